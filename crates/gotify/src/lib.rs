//! Gotify counting client.
//!
//! Queries a Gotify server's REST API and reduces its listings to the counts
//! shown by the dashboard widget. Message listings are capped per page by the
//! server, so the message count walks every page via the `since` cursor.

pub mod client;
pub mod error;
pub mod models;

pub use client::GotifyClient;
pub use error::GotifyError;
pub use models::Endpoint;

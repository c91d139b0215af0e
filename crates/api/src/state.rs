//! Shared application state for the Axum API server.

use widgets_common::config::AppConfig;
use widgets_gotify::{GotifyClient, GotifyError};

/// Application state shared across all route handlers via Axum `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gotify: GotifyClient,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, GotifyError> {
        let gotify = GotifyClient::new(&config.gotify)?;
        Ok(Self { gotify, config })
    }
}

//! Widgets gateway HTTP API.
//!
//! Endpoints:
//! - GET /health — Liveness probe
//! - GET /api/gotify — Application, client and message counts
//! - GET /api/gotify/{application,client,message} — Length-only payloads for dashboard widgets

pub mod routes;
pub mod state;

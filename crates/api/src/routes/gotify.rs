//! Gotify widget routes.
//!
//! Every request recomputes its counts against the upstream server.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use widgets_common::error::AppError;
use widgets_common::types::{AggregateCounts, MessageListing, PlaceholderList};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/gotify", get(counts))
        .route("/api/gotify/application", get(applications))
        .route("/api/gotify/client", get(clients))
        .route("/api/gotify/message", get(messages))
}

/// GET /api/gotify — All three counts in one object.
async fn counts(State(state): State<AppState>) -> Result<Json<AggregateCounts>, AppError> {
    let counts = state.gotify.aggregate().await?;

    tracing::info!(
        applications = counts.applications,
        clients = counts.clients,
        messages = counts.messages,
        "Gotify counts served"
    );

    Ok(Json(counts))
}

/// GET /api/gotify/application — One empty object per application.
async fn applications(State(state): State<AppState>) -> Result<Json<PlaceholderList>, AppError> {
    let count = state.gotify.count_applications().await?;
    Ok(Json(PlaceholderList::new(count)))
}

/// GET /api/gotify/client — One empty object per client.
async fn clients(State(state): State<AppState>) -> Result<Json<PlaceholderList>, AppError> {
    let count = state.gotify.count_clients().await?;
    Ok(Json(PlaceholderList::new(count)))
}

/// GET /api/gotify/message — `{"messages": [...]}` with one empty object per message.
async fn messages(State(state): State<AppState>) -> Result<Json<MessageListing>, AppError> {
    let count = state.gotify.count_messages().await?;
    Ok(Json(MessageListing {
        messages: PlaceholderList::new(count),
    }))
}

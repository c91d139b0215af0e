//! Typed error enum for Gotify requests.

use reqwest::StatusCode;
use thiserror::Error;

use widgets_common::error::AppError;

use crate::models::Endpoint;

/// Errors from counting operations. Every variant aborts the whole count.
#[derive(Debug, Error)]
pub enum GotifyError {
    #[error("failed to prepare {endpoint} request: {reason}")]
    RequestConstruction { endpoint: Endpoint, reason: String },

    #[error("failed to fetch {endpoint}: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {endpoint} with status: {status}")]
    UpstreamStatus {
        endpoint: Endpoint,
        status: StatusCode,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("implausible {endpoint} page: size {size} overflows running total {total}")]
    CountOverflow {
        endpoint: Endpoint,
        total: u64,
        size: u64,
    },

    #[error("message pagination exceeded {limit} pages")]
    PageLimitExceeded { limit: u64 },
}

impl GotifyError {
    /// Classify a `reqwest` failure: builder errors are request-construction
    /// problems, everything else is transport.
    pub(crate) fn from_reqwest(endpoint: Endpoint, source: reqwest::Error) -> Self {
        if source.is_builder() {
            GotifyError::RequestConstruction {
                endpoint,
                reason: source.to_string(),
            }
        } else {
            GotifyError::Transport { endpoint, source }
        }
    }

    /// The endpoint the failure relates to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            GotifyError::RequestConstruction { endpoint, .. }
            | GotifyError::Transport { endpoint, .. }
            | GotifyError::UpstreamStatus { endpoint, .. }
            | GotifyError::Decode { endpoint, .. }
            | GotifyError::CountOverflow { endpoint, .. } => *endpoint,
            GotifyError::PageLimitExceeded { .. } => Endpoint::Message,
        }
    }

    /// Whether this is a transport failure caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GotifyError::Transport { source, .. } if source.is_timeout())
    }
}

impl From<GotifyError> for AppError {
    fn from(err: GotifyError) -> Self {
        match &err {
            GotifyError::RequestConstruction { .. } => AppError::Config(err.to_string()),
            _ if err.is_timeout() => AppError::UpstreamTimeout(err.to_string()),
            _ => AppError::Upstream(err.to_string()),
        }
    }
}

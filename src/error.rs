use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Database setup failed: {0}")]
    Database(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Errors surfaced by a genre search.
///
/// A vanished cache slot is not represented here: the cache recovers from it
/// by recomputing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error("song catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("session store failure: {0}")]
    SessionStore(String),
}

impl SearchError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CatalogUnavailable(_) | Self::SessionStore(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

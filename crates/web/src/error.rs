//! Unified error handling.
//!
//! Provides a unified `AppError` type for route handlers. Validation and
//! conflict problems never reach this type - they travel as notifications.
//! What lands here is the fatal tier: broken session plumbing, unreadable
//! data files, and id references the UI should never have produced.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use rolodex_core::{EngineError, StoreError};

use crate::services::auth::AuthError;

/// Application-level error type for the web front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the data files failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The rule engine hit a contract violation or could not persist.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Store(_) | Self::Engine(_) | Self::Session(_)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        match &self {
            Self::Store(_) | Self::Engine(_) | Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response(),
            Self::Auth(err) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            Self::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("Not found: {what}")).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("category 9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Store(StoreError::Malformed("bad yaml".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

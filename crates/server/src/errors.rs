use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::{LoadError, LookupError};
use thiserror::Error;
use tracing::error;

/// Request-level failure rendered as `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{param} is required")]
    MissingParam { param: &'static str },
    #[error("{param} not found")]
    NotFound { param: &'static str },
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error("catalog reload failed: {0}")]
    Reload(#[from] LoadError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Name the query parameter the lookup key came from.
    pub fn lookup(err: LookupError, param: &'static str) -> Self {
        match err {
            LookupError::MissingKey => Self::MissingParam { param },
            LookupError::NotFound(_) => Self::NotFound { param },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam { .. } | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Reload(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        }
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("catalog load failed: {0}")]
    Catalog(#[from] LoadError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

// Portal Error Types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::session::SessionError;

/// Message shown on the login form after a failed password attempt.
pub const WRONG_PASSWORD_MESSAGE: &str = "Wrong password, try again!";

/// Request-level failures with the status codes and plain-text bodies students see
#[derive(Debug, Error)]
pub enum PortalError {
    // 401 Unauthorized (normally recovered by re-rendering the login form)
    #[error("{}", WRONG_PASSWORD_MESSAGE)]
    WrongPassword,

    // 403 Forbidden
    #[error("path escapes app directory: {0}")]
    PathEscape(String),

    // 404 Not Found
    #[error("unknown app: {0}")]
    UnknownApp(String),

    #[error("not a file: {0}")]
    AssetNotFound(String),

    // 500 Internal Server Error
    #[error("session store error: {0}")]
    Session(#[from] SessionError),

    #[error("template error: {0}")]
    Template(String),

    #[error("{0}")]
    Internal(String),
}

impl PortalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::WrongPassword => StatusCode::UNAUTHORIZED,
            PortalError::PathEscape(_) => StatusCode::FORBIDDEN,
            PortalError::UnknownApp(_) | PortalError::AssetNotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Session(_) | PortalError::Template(_) | PortalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-safe body text. Internal details stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            PortalError::WrongPassword => WRONG_PASSWORD_MESSAGE,
            PortalError::PathEscape(_) => "Forbidden",
            PortalError::UnknownApp(_) => "App not found",
            PortalError::AssetNotFound(_) => "Not found",
            PortalError::Session(_) | PortalError::Template(_) | PortalError::Internal(_) => {
                "Internal server error"
            }
        }
    }
}

impl From<askama::Error> for PortalError {
    fn from(err: askama::Error) -> Self {
        PortalError::Template(err.to_string())
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        match &self {
            PortalError::Session(_) | PortalError::Template(_) | PortalError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
            }
            PortalError::PathEscape(path) => {
                tracing::warn!("Rejected path outside app directory: {}", path);
            }
            PortalError::UnknownApp(id) => {
                tracing::debug!("Unknown app requested: {}", id);
            }
            PortalError::AssetNotFound(path) => {
                tracing::debug!("Asset is not a regular file: {}", path);
            }
            PortalError::WrongPassword => {}
        }
        (self.status_code(), self.message()).into_response()
    }
}

pub type PortalResult<T> = Result<T, PortalError>;

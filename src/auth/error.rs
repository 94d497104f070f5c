use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::dto::AuthResponse;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure the store, the validator and the handlers can produce.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid request format: {0}")]
    MalformedRequest(String),
    #[error("username already exists")]
    DuplicateUsername,
    #[error("user not found")]
    NotFound,
    #[error("invalid password")]
    InvalidPassword,
    #[error("user account is not active")]
    AccountInactive,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl AuthError {
    pub fn storage(source: impl Into<BoxError>) -> Self {
        Self::Storage(source.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateUsername => StatusCode::CONFLICT,
            // merged so login can't be used to probe for usernames
            Self::NotFound | Self::InvalidPassword => StatusCode::UNAUTHORIZED,
            Self::AccountInactive => StatusCode::FORBIDDEN,
            Self::Hashing(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MalformedRequest(detail) => format!("Invalid request format: {detail}"),
            Self::DuplicateUsername => "Username already exists".into(),
            Self::NotFound | Self::InvalidPassword => "Invalid username or password".into(),
            Self::AccountInactive => "User account is not active".into(),
            Self::Hashing(_) | Self::Storage(_) => "Internal server error".into(),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(Box::new(e))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(AuthResponse::failure(self.public_message()))).into_response()
    }
}

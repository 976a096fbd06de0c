use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with. Each variant maps to exactly one
/// status code and a `{"error": message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Username and password are required.")]
    MissingCredentials,
    #[error("Username already exists.")]
    UsernameTaken,
    /// Entity validation failure; the message is surfaced verbatim.
    #[error("{0}")]
    Unprocessable(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            // the only unique constraint in the schema is users.username
            if db_err.is_unique_violation() {
                return ApiError::UsernameTaken;
            }
        }
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingCredentials | ApiError::UsernameTaken | ApiError::Unprocessable(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

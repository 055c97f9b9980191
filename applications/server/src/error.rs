/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<muse_storage::StorageError> for ServerError {
    fn from(err: muse_storage::StorageError) -> Self {
        match err {
            muse_storage::StorageError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{entity} {id}"))
            }
            muse_storage::StorageError::Duplicate(msg) => ServerError::BadRequest(msg),
            other => ServerError::Database(other.to_string()),
        }
    }
}

impl From<muse_extractor::ExtractError> for ServerError {
    fn from(err: muse_extractor::ExtractError) -> Self {
        match err {
            muse_extractor::ExtractError::NotFound(id) => {
                ServerError::NotFound(format!("Video {id}"))
            }
            other => ServerError::Extraction(other.to_string()),
        }
    }
}

impl From<muse_core::MuseError> for ServerError {
    fn from(err: muse_core::MuseError) -> Self {
        match err {
            muse_core::MuseError::InvalidInput(msg) | muse_core::MuseError::Duplicate(msg) => {
                ServerError::BadRequest(msg)
            }
            muse_core::MuseError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{entity} {id}"))
            }
            muse_core::MuseError::Extraction(msg) => ServerError::Extraction(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Extraction(ref msg) => {
                tracing::error!("Extraction error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Stream extraction failed".to_string(),
                )
            }
            ServerError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

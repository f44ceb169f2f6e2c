use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::error;

use crate::types::FieldError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid submission: {} field error(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Permission denied")]
    Forbidden,

    #[error("Too many requests")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Validation(_) | AppError::InvalidFields(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Csv(_)
            | AppError::Config(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            AppError::InvalidFields(fields) => serde_json::json!({
                "error": "Invalid submission",
                "fields": fields,
            }),
            e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                error!("Request failed: {e}");
                serde_json::json!({ "error": "Failed to load data" })
            }
            e => serde_json::json!({ "error": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::features::VectorError;
use crate::model::ModelError;

pub type AppResult<T> = Result<T, AppError>;

pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Model not available. Please check the server logs.";

#[derive(Debug)]
pub enum AppError {
    // Availability errors
    ModelUnavailable,

    // Validation errors
    MissingField(String),
    ValidationError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ModelUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, MODEL_UNAVAILABLE_MESSAGE.to_string())
            }
            AppError::MissingField(field) => {
                (StatusCode::BAD_REQUEST, format!("Missing data field: '{}'", field))
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<VectorError> for AppError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::MissingField(field) => AppError::MissingField(field),
            other @ VectorError::NotANumber { .. } => AppError::ValidationError(other.to_string()),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

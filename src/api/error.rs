use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::services::image_service::ImageServiceError;
use crate::services::pdf_service::PdfServiceError;
use crate::utils::validation::ValidationError;

/// Structured body returned by every failing endpoint
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error("Malformed multipart request: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Multipart(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<PdfServiceError> for AppError {
    fn from(err: PdfServiceError) -> Self {
        match err {
            // Expected, recoverable-by-caller conditions
            PdfServiceError::WrongPassword | PdfServiceError::AlreadyEncrypted => {
                AppError::BadRequest(err.to_string())
            }
            PdfServiceError::Engine(_) | PdfServiceError::Encryption(_) | PdfServiceError::Io(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<ImageServiceError> for AppError {
    fn from(err: ImageServiceError) -> Self {
        AppError::Internal(err.to_string())
    }
}

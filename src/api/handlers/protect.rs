use axum::{extract::Multipart, response::Response};
use bytes::Bytes;

use crate::api::error::{AppError, ErrorBody};
use crate::api::handlers::attachment;
use crate::services::pdf_service;

/// Add password protection to an uploaded PDF.
///
/// Already-encrypted input is rejected; re-keying is not supported.
#[utoipa::path(
    post,
    path = "/add_pdf_password",
    responses(
        (status = 200, description = "Encrypted PDF attachment `protected.pdf`"),
        (status = 400, description = "No file, missing password, or already encrypted", body = ErrorBody),
        (status = 500, description = "PDF engine failure", body = ErrorBody)
    ),
    tag = "pdf"
)]
pub async fn add_pdf_password(mut multipart: Multipart) -> Result<Response, AppError> {
    let mut file: Option<Bytes> = None;
    let mut password = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pdf_file" => file = Some(field.bytes().await?),
            "password" => password = field.text().await?,
            _ => {}
        }
    }

    let data = file.ok_or_else(|| AppError::BadRequest("No PDF file uploaded".to_string()))?;
    if password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    let protected = pdf_service::protect(&data, &password)?;

    Ok(attachment(
        protected,
        mime::APPLICATION_PDF.as_ref(),
        "protected.pdf",
    ))
}

use axum::{extract::Multipart, response::Response};
use bytes::Bytes;

use crate::api::error::{AppError, ErrorBody};
use crate::api::handlers::attachment;
use crate::services::pdf_service;

/// Remove password protection from an uploaded PDF.
///
/// Unencrypted input is passed through unchanged apart from re-serialization.
#[utoipa::path(
    post,
    path = "/unlock",
    responses(
        (status = 200, description = "Decrypted PDF attachment `unlocked.pdf`"),
        (status = 400, description = "No file uploaded, or wrong password", body = ErrorBody),
        (status = 500, description = "PDF engine failure", body = ErrorBody)
    ),
    tag = "pdf"
)]
pub async fn unlock_pdf(mut multipart: Multipart) -> Result<Response, AppError> {
    let mut file: Option<Bytes> = None;
    let mut password = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => file = Some(field.bytes().await?),
            "password" => password = field.text().await?,
            _ => {}
        }
    }

    let data = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let unlocked = pdf_service::unlock(&data, &password)?;

    Ok(attachment(
        unlocked,
        mime::APPLICATION_PDF.as_ref(),
        "unlocked.pdf",
    ))
}

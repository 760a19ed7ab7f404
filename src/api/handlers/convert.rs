use axum::{extract::Multipart, response::Response};
use bytes::Bytes;

use crate::api::error::{AppError, ErrorBody};
use crate::api::handlers::attachment;
use crate::services::{image_service, pdf_service};

/// Convert an uploaded raster image into a single-page PDF.
///
/// With a `password` field the result goes through the same encrypt path as
/// `/add_pdf_password` before being returned.
#[utoipa::path(
    post,
    path = "/convert_image_to_pdf",
    responses(
        (status = 200, description = "PDF attachment `converted.pdf` or `converted_protected.pdf`"),
        (status = 400, description = "No image part or empty filename", body = ErrorBody),
        (status = 500, description = "Image decode or conversion failure", body = ErrorBody)
    ),
    tag = "image"
)]
pub async fn convert_image_to_pdf(mut multipart: Multipart) -> Result<Response, AppError> {
    let mut image: Option<Bytes> = None;
    let mut filename: Option<String> = None;
    let mut password = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                filename = field.file_name().map(|s| s.to_string());
                image = Some(field.bytes().await?);
            }
            "password" => password = field.text().await?,
            _ => {}
        }
    }

    let data =
        image.ok_or_else(|| AppError::BadRequest("No image part in the request".to_string()))?;
    if filename.as_deref().unwrap_or_default().is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }

    let pdf = image_service::convert_to_pdf(&data)?;

    if password.is_empty() {
        Ok(attachment(
            pdf,
            mime::APPLICATION_PDF.as_ref(),
            "converted.pdf",
        ))
    } else {
        let protected = pdf_service::protect(&pdf, &password)?;
        Ok(attachment(
            protected,
            mime::APPLICATION_PDF.as_ref(),
            "converted_protected.pdf",
        ))
    }
}

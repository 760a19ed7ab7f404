use axum::{
    extract::Multipart,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::api::error::{AppError, ErrorBody};
use crate::models::CompressionStats;
use crate::services::{image_service, pdf_service};
use crate::utils::validation::{self, CompressionTarget};

/// Compress an uploaded image or PDF, reporting size metrics.
///
/// The target family is picked from the declared filename's extension. Raster
/// input is re-encoded as JPEG at the requested quality; PDF input gets a
/// structural content-stream compression pass (quality is a no-op there).
#[utoipa::path(
    post,
    path = "/compress_file",
    responses(
        (status = 200, description = "Compressed payload with X-Original-Size, \
            X-Compressed-Size and X-Compression-Ratio headers"),
        (status = 400, description = "No file, quality out of range, or unsupported extension", body = ErrorBody),
        (status = 500, description = "Codec failure", body = ErrorBody)
    ),
    tag = "pdf"
)]
pub async fn compress_file(mut multipart: Multipart) -> Result<Response, AppError> {
    let mut file: Option<Bytes> = None;
    let mut filename = String::new();
    let mut quality_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().unwrap_or_default().to_string();
                file = Some(field.bytes().await?);
            }
            "quality" => quality_raw = Some(field.text().await?),
            _ => {}
        }
    }

    let data = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let quality = validation::parse_quality(quality_raw.as_deref())?;

    let (compressed, content_type, download_name) =
        match validation::compression_target(&filename)? {
            CompressionTarget::Raster => {
                let extension = filename
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase())
                    .unwrap_or_default();
                let out = image_service::compress_to_jpeg(&data, quality)?;
                (
                    out,
                    mime::IMAGE_JPEG.as_ref(),
                    format!("compressed_image.{}", extension),
                )
            }
            CompressionTarget::Document => {
                let out = pdf_service::compress(&data)?;
                (
                    out,
                    mime::APPLICATION_PDF.as_ref(),
                    "compressed.pdf".to_string(),
                )
            }
        };

    let stats = CompressionStats::new(data.len(), compressed.len());

    Ok((
        [
            ("Content-Type", content_type.to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", download_name),
            ),
            ("X-Original-Size", stats.original_size.to_string()),
            ("X-Compressed-Size", stats.compressed_size.to_string()),
            ("X-Compression-Ratio", format!("{:.2}", stats.ratio_percent())),
        ],
        compressed,
    )
        .into_response())
}

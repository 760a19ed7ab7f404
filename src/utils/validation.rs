use thiserror::Error;

/// Default JPEG quality when the form field is absent.
const DEFAULT_QUALITY: &str = "75";

/// Extensions re-encoded through the lossy raster path.
const RASTER_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Quality must be an integer")]
    QualityNotAnInteger,

    #[error("Quality must be between 1 and 95")]
    QualityOutOfRange,

    #[error("Unsupported file type for compression")]
    UnsupportedFileType,
}

/// Compression family selected from the uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionTarget {
    Raster,
    Document,
}

/// Parse the `quality` form field, defaulting to 75, clamped nowhere:
/// anything outside [1, 95] is rejected.
pub fn parse_quality(raw: Option<&str>) -> Result<u8, ValidationError> {
    let quality: i64 = raw
        .unwrap_or(DEFAULT_QUALITY)
        .trim()
        .parse()
        .map_err(|_| ValidationError::QualityNotAnInteger)?;

    if !(1..=95).contains(&quality) {
        return Err(ValidationError::QualityOutOfRange);
    }

    Ok(quality as u8)
}

/// Pick the compression family by case-insensitive extension sniffing.
pub fn compression_target(filename: &str) -> Result<CompressionTarget, ValidationError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(ValidationError::UnsupportedFileType)?;

    if RASTER_EXTENSIONS.contains(&extension.as_str()) {
        Ok(CompressionTarget::Raster)
    } else if extension == "pdf" {
        Ok(CompressionTarget::Document)
    } else {
        Err(ValidationError::UnsupportedFileType)
    }
}

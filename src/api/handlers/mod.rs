pub mod compress;
pub mod convert;
pub mod health;
pub mod protect;
pub mod unlock;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Binary payload served as a downloadable attachment.
pub(crate) fn attachment(bytes: Vec<u8>, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

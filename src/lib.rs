pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::ServerConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::health::home,
        api::handlers::unlock::unlock_pdf,
        api::handlers::protect::add_pdf_password,
        api::handlers::convert::convert_image_to_pdf,
        api::handlers::compress::compress_file,
    ),
    components(
        schemas(
            api::error::ErrorBody,
        )
    ),
    tags(
        (name = "pdf", description = "PDF password and compression endpoints"),
        (name = "image", description = "Image conversion endpoints"),
        (name = "system", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
}

pub fn create_app(state: AppState) -> Router {
    // Browsers need the size headers whitelisted to read them cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::health::home))
        .route("/unlock", post(api::handlers::unlock::unlock_pdf))
        .route(
            "/add_pdf_password",
            post(api::handlers::protect::add_pdf_password),
        )
        .route(
            "/convert_image_to_pdf",
            post(api::handlers::convert::convert_image_to_pdf),
        )
        .route("/compress_file", post(api::handlers::compress::compress_file))
        .layer(DefaultBodyLimit::max(state.config.max_upload_size))
        .layer(cors)
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = String)
    ),
    tag = "system"
)]
pub async fn home() -> &'static str {
    "PDF Tools Backend is running!"
}

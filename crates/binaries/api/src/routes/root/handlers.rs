/// Root greeting.
#[utoipa::path(
    get,
    path = "/",
    tag = "Places",
    responses(
        (status = 200, description = "Root message", body = String)
    )
)]
pub async fn root() -> &'static str {
    "Meaningful places gallery API"
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Places",
    responses(
        (status = 200, description = "The server is up", body = String)
    )
)]
pub async fn health() -> &'static str {
    "OK"
}

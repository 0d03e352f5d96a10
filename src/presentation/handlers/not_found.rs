use axum::Json;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use serde::Serialize;

use super::api_info::Endpoints;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub error: String,
    pub code: &'static str,
    pub available_endpoints: Endpoints,
}

pub async fn not_found_handler(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");

    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: format!("Endpoint not found: {} {}", method, uri.path()),
            code: "NOT_FOUND",
            available_endpoints: Endpoints::listing(),
        }),
    )
}

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Voice Transcription API";

#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    #[serde(rename = "vendorHealth")]
    pub vendor_health: &'static str,
    pub api: &'static str,
    pub transcribe: &'static str,
}

impl Endpoints {
    pub const fn listing() -> Self {
        Self {
            health: "GET /health",
            vendor_health: "GET /health/vendor",
            api: "GET /api",
            transcribe: "POST /api/transcribe",
        }
    }
}

#[derive(Serialize)]
pub struct ApiInfoResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

pub async fn api_info_handler() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints::listing(),
    })
}

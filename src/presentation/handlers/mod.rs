mod api_info;
mod health;
mod not_found;
mod transcribe;

pub use api_info::{ApiInfoResponse, Endpoints, SERVICE_NAME, api_info_handler};
pub use health::{HealthResponse, VendorHealthResponse, health_handler, vendor_health_handler};
pub use not_found::not_found_handler;
pub use transcribe::{
    AUDIO_FIELD, TranscribeResponse, read_audio_upload, transcribe_handler,
};

use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::SpeechToTextVendor;
use crate::application::services::TranscriptionService;
use crate::domain::UploadPolicy;
use crate::infrastructure::rate_limit::IpRateLimiter;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub upload_policy: Arc<UploadPolicy>,
    pub rate_limiter: Arc<IpRateLimiter>,
    pub settings: Arc<Settings>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings, vendor: Arc<dyn SpeechToTextVendor>) -> Self {
        let transcription_service = TranscriptionService::new(vendor, settings.polling_policy())
            .with_language_code(settings.vendor.language_code.clone());
        let (max_requests, window) = settings.rate_limit_quota();

        Self {
            transcription_service: Arc::new(transcription_service),
            upload_policy: Arc::new(settings.upload_policy()),
            rate_limiter: Arc::new(IpRateLimiter::new(max_requests, window)),
            settings: Arc::new(settings),
            started_at: Instant::now(),
        }
    }
}

use async_trait::async_trait;

use crate::domain::{JobId, TranscriptRequest, TranscriptionJob};

use super::VendorError;

/// A hosted speech-to-text API driven through upload, submit and status fetch.
#[async_trait]
pub trait SpeechToTextVendor: Send + Sync {
    /// Sends raw audio bytes and returns the vendor's URL for them.
    async fn upload(&self, audio_data: &[u8]) -> Result<String, VendorError>;

    /// Creates a transcription job and returns its identifier.
    async fn submit(&self, request: &TranscriptRequest) -> Result<JobId, VendorError>;

    async fn fetch_job(&self, job_id: &JobId) -> Result<TranscriptionJob, VendorError>;

    /// Cheap authenticated call used to verify credentials and reachability.
    async fn health_check(&self) -> Result<(), VendorError>;

    fn name(&self) -> &'static str;
}

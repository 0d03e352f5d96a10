/// Failures of the upload, submit and poll sequence.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("File upload failed: {0}")]
    Upload(String),
    #[error("Transcription submission failed: {0}")]
    Submission(String),
    #[error("Transcription failed: {0}")]
    Vendor(String),
    #[error("Transcript not found: {0}")]
    JobNotFound(String),
    #[error("Unknown transcription status: {0}")]
    UnknownStatus(String),
    #[error("Transcription polling timed out after {attempts} attempts")]
    PollingTimeout { attempts: u32 },
    #[error("Transcription vendor unreachable after {failures} consecutive failures: {last_error}")]
    VendorUnavailable { failures: u32, last_error: String },
    #[error("Vendor authentication failed")]
    VendorAuth,
    #[error("Vendor rate limit exceeded")]
    VendorRateLimit,
    #[error("internal error: {0}")]
    Internal(String),
}

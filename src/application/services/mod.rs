mod polling_policy;
mod transcription_error;
mod transcription_service;

pub use polling_policy::{DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, PollingPolicy};
pub use transcription_error::TranscriptionError;
pub use transcription_service::{TranscriptionService, VendorHealth};

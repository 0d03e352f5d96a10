use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{SpeechToTextVendor, VendorError};
use crate::domain::{
    AudioUpload, DEFAULT_LANGUAGE_CODE, JobId, JobStatus, TranscriptRequest, TranscriptionJob,
    TranscriptionResult,
};

use super::{PollingPolicy, TranscriptionError};

/// Outcome of probing the vendor with its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorHealth {
    pub service: &'static str,
    pub error: Option<String>,
}

impl VendorHealth {
    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives one audio upload through the vendor: upload, submit, then poll.
pub struct TranscriptionService {
    vendor: Arc<dyn SpeechToTextVendor>,
    polling: PollingPolicy,
    language_code: String,
}

impl TranscriptionService {
    pub fn new(vendor: Arc<dyn SpeechToTextVendor>, polling: PollingPolicy) -> Self {
        Self {
            vendor,
            polling,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn polling_policy(&self) -> &PollingPolicy {
        &self.polling
    }

    #[tracing::instrument(skip(self, upload), fields(filename = %upload.filename, size_bytes = upload.size_bytes()))]
    pub async fn transcribe(
        &self,
        upload: &AudioUpload,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let started = Instant::now();

        let audio_url = self.upload_audio(upload).await?;
        tracing::debug!("Audio uploaded to vendor");

        let job_id = self.submit_job(audio_url).await?;
        tracing::info!(job_id = %job_id, "Transcription job submitted");

        let job = self.poll_until_complete(&job_id).await?;

        let result = TranscriptionResult {
            text: job.text.unwrap_or_default(),
            confidence: job.confidence,
            words: job.words,
            processing_time: started.elapsed(),
        };

        tracing::info!(
            job_id = %job_id,
            chars = result.text.len(),
            elapsed_ms = result.processing_time.as_millis() as u64,
            "Transcription job completed"
        );

        Ok(result)
    }

    pub async fn vendor_health(&self) -> VendorHealth {
        let error = match self.vendor.health_check().await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, vendor = self.vendor.name(), "Vendor health check failed");
                Some(e.to_string())
            }
        };

        VendorHealth {
            service: self.vendor.name(),
            error,
        }
    }

    async fn upload_audio(&self, upload: &AudioUpload) -> Result<String, TranscriptionError> {
        self.vendor
            .upload(&upload.data)
            .await
            .map_err(|e| classify_request_error(e, TranscriptionError::Upload))
    }

    async fn submit_job(&self, audio_url: String) -> Result<JobId, TranscriptionError> {
        let request = TranscriptRequest::for_dictation(audio_url, &self.language_code);
        self.vendor
            .submit(&request)
            .await
            .map_err(|e| classify_request_error(e, TranscriptionError::Submission))
    }

    async fn poll_until_complete(
        &self,
        job_id: &JobId,
    ) -> Result<TranscriptionJob, TranscriptionError> {
        // A submitted job is always checked at least once.
        let max_attempts = self.polling.max_attempts.max(1);
        let mut consecutive_failures = 0u32;

        for attempt in 1..=max_attempts {
            match self.vendor.fetch_job(job_id).await {
                Ok(job) => {
                    consecutive_failures = 0;
                    tracing::debug!(attempt, status = %job.status, "Polled transcription job");

                    match job.status {
                        JobStatus::Completed => return Ok(job),
                        JobStatus::Error => {
                            let message = job
                                .error
                                .unwrap_or_else(|| "vendor reported an error".to_string());
                            return Err(TranscriptionError::Vendor(message));
                        }
                        JobStatus::Queued | JobStatus::Processing => {}
                        JobStatus::Unrecognized(status) => {
                            return Err(TranscriptionError::UnknownStatus(status));
                        }
                    }
                }
                Err(VendorError::NotFound(_)) => {
                    return Err(TranscriptionError::JobNotFound(job_id.to_string()));
                }
                Err(e) => {
                    consecutive_failures += 1;
                    tracing::warn!(attempt, error = %e, "Polling attempt failed");

                    if let Some(limit) = self.polling.max_consecutive_failures {
                        if consecutive_failures >= limit {
                            return Err(TranscriptionError::VendorUnavailable {
                                failures: consecutive_failures,
                                last_error: e.to_string(),
                            });
                        }
                    }
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.polling.interval).await;
            }
        }

        tracing::warn!(job_id = %job_id, attempts = max_attempts, "Polling budget exhausted");
        Err(TranscriptionError::PollingTimeout {
            attempts: max_attempts,
        })
    }
}

fn classify_request_error(
    error: VendorError,
    step_failure: fn(String) -> TranscriptionError,
) -> TranscriptionError {
    match error {
        VendorError::Unauthorized => TranscriptionError::VendorAuth,
        VendorError::RateLimited => TranscriptionError::VendorRateLimit,
        other => step_failure(other.to_string()),
    }
}

mod audio_upload;
mod job_status;
mod transcript_request;
mod transcription_job;
mod transcription_result;

pub use audio_upload::{AudioUpload, UploadPolicy, default_allowed_mime_types};
pub use job_status::JobStatus;
pub use transcript_request::{DEFAULT_LANGUAGE_CODE, TranscriptRequest};
pub use transcription_job::{JobId, TranscriptionJob, WordTiming};
pub use transcription_result::TranscriptionResult;

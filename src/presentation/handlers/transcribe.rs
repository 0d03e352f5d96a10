use std::time::Instant;

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::BytesMut;
use serde::Serialize;

use crate::domain::{AudioUpload, UploadPolicy};
use crate::infrastructure::observability::transcript_preview;
use crate::presentation::error::{ApiError, PayloadLimit};
use crate::presentation::state::AppState;

pub const AUDIO_FIELD: &str = "audio";

const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub text: String,
    pub confidence: Option<f64>,
    /// Milliseconds from request receipt to result.
    pub processing_time: u64,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let started = Instant::now();

    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Request body is not multipart");
        ApiError::MissingFile
    })?;

    let upload = read_audio_upload(&mut multipart, &state.upload_policy).await?;

    tracing::info!(
        filename = %upload.filename,
        size_bytes = upload.size_bytes(),
        mime_type = %upload.mime_type,
        "Processing transcription request"
    );

    let result = state.transcription_service.transcribe(&upload).await?;
    let processing_time = started.elapsed().as_millis() as u64;

    tracing::info!(
        processing_time_ms = processing_time,
        preview = %transcript_preview(&result.text),
        "Transcription request completed"
    );

    Ok(Json(TranscribeResponse {
        text: result.text,
        confidence: result.confidence,
        processing_time,
    }))
}

/// Reads the single `audio` file out of a multipart body, enforcing `policy`.
///
/// Non-file form fields are skipped. Any rejection happens before the vendor
/// is contacted.
pub async fn read_audio_upload(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> Result<AudioUpload, ApiError> {
    let mut upload: Option<AudioUpload> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, policy))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();

        if !is_file {
            tracing::debug!(field = %name, "Ignoring non-file form field");
            continue;
        }

        if name != AUDIO_FIELD {
            return Err(ApiError::PayloadLimit(PayloadLimit::UnexpectedField {
                field: name,
            }));
        }

        if upload.is_some() {
            return Err(ApiError::PayloadLimit(PayloadLimit::TooManyFiles));
        }

        let mime_type = field.content_type().unwrap_or(UNKNOWN_MIME_TYPE).to_string();
        if !policy.allows(&mime_type) {
            return Err(ApiError::InvalidFileType { mime_type });
        }

        let filename = field.file_name().unwrap_or(AUDIO_FIELD).to_string();
        let mut data = BytesMut::new();

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, policy))?
        {
            if policy.exceeds_limit(data.len() + chunk.len()) {
                return Err(file_too_large(policy));
            }
            data.extend_from_slice(&chunk);
        }

        upload = Some(AudioUpload::new(filename, mime_type, data.freeze()));
    }

    upload.ok_or(ApiError::MissingFile)
}

fn multipart_error(error: MultipartError, policy: &UploadPolicy) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return file_too_large(policy);
    }
    ApiError::MalformedUpload(error.body_text())
}

fn file_too_large(policy: &UploadPolicy) -> ApiError {
    ApiError::PayloadLimit(PayloadLimit::FileTooLarge {
        max_mb: policy.max_file_size_mb(),
    })
}

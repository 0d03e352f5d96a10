use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::TranscriptionError;

use super::config::Environment;

const MASKED_INTERNAL_MESSAGE: &str = "Internal server error";

/// Upload limits enforced while reading the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadLimit {
    FileTooLarge { max_mb: usize },
    TooManyFiles,
    UnexpectedField { field: String },
}

/// Every failure a route can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No audio file provided")]
    MissingFile,
    #[error("Invalid file type: {mime_type}. Only audio files are allowed.")]
    InvalidFileType { mime_type: String },
    #[error("{}", payload_limit_message(.0))]
    PayloadLimit(PayloadLimit),
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error("{0}")]
    Internal(String),
}

fn payload_limit_message(limit: &PayloadLimit) -> String {
    match limit {
        PayloadLimit::FileTooLarge { max_mb } => {
            format!("File size too large. Maximum size is {}MB.", max_mb)
        }
        PayloadLimit::TooManyFiles => "Too many files. Only one file allowed.".to_string(),
        PayloadLimit::UnexpectedField { field } => {
            format!("Unexpected file field '{}'. Use \"audio\" field name.", field)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Unmasked error details attached to a response for the verbosity middleware.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub stack: String,
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::InvalidFileType { .. } => (StatusCode::BAD_REQUEST, "INVALID_FILE_TYPE"),
            ApiError::PayloadLimit(PayloadLimit::FileTooLarge { .. }) => {
                (StatusCode::BAD_REQUEST, "FILE_TOO_LARGE")
            }
            ApiError::PayloadLimit(PayloadLimit::TooManyFiles) => {
                (StatusCode::BAD_REQUEST, "TOO_MANY_FILES")
            }
            ApiError::PayloadLimit(PayloadLimit::UnexpectedField { .. }) => {
                (StatusCode::BAD_REQUEST, "UNEXPECTED_FILE")
            }
            ApiError::MalformedUpload(_) => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"),
            ApiError::Transcription(e) => transcription_status_and_code(e),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to show any caller.
    fn public_message(&self) -> String {
        match self {
            ApiError::Transcription(TranscriptionError::VendorAuth) => {
                "Internal server error: Authentication failed".to_string()
            }
            ApiError::Transcription(TranscriptionError::VendorRateLimit) => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            ApiError::Transcription(TranscriptionError::Internal(_)) | ApiError::Internal(_) => {
                MASKED_INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

fn transcription_status_and_code(error: &TranscriptionError) -> (StatusCode, &'static str) {
    match error {
        TranscriptionError::Upload(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UPLOAD_FAILED"),
        TranscriptionError::Submission(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "SUBMISSION_FAILED")
        }
        TranscriptionError::Vendor(_) => (StatusCode::UNPROCESSABLE_ENTITY, "TRANSCRIPTION_ERROR"),
        TranscriptionError::JobNotFound(_) => (StatusCode::UNPROCESSABLE_ENTITY, "JOB_NOT_FOUND"),
        TranscriptionError::UnknownStatus(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "UNKNOWN_STATUS")
        }
        TranscriptionError::PollingTimeout { .. } => {
            (StatusCode::GATEWAY_TIMEOUT, "TRANSCRIPTION_TIMEOUT")
        }
        TranscriptionError::VendorUnavailable { .. } => {
            (StatusCode::BAD_GATEWAY, "VENDOR_UNAVAILABLE")
        }
        TranscriptionError::VendorAuth => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ERROR"),
        TranscriptionError::VendorRateLimit => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT"),
        TranscriptionError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::warn!(error = %self, code, "Request rejected");
        }

        let public_message = self.public_message();
        let detailed_message = match &self {
            ApiError::Internal(_) | ApiError::Transcription(TranscriptionError::Internal(_)) => {
                self.to_string()
            }
            _ => public_message.clone(),
        };
        let report = ErrorReport {
            status,
            code,
            message: detailed_message,
            stack: format!("{:?}", self),
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                error: public_message,
                code,
                stack: None,
            }),
        )
            .into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Outside production, rewrites error bodies with the unmasked message and a `stack` field.
pub async fn error_verbosity_middleware(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if environment.is_production() {
        return response;
    }

    match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(axum::http::header::CONTENT_LENGTH);
            let body = Json(ErrorResponse {
                error: report.message,
                code: report.code,
                stack: Some(report.stack),
            });
            (parts, body).into_response()
        }
        None => response,
    }
}

use std::fmt;

use super::JobStatus;

/// Opaque identifier the vendor assigns to a submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordTiming {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub confidence: Option<f64>,
}

/// Snapshot of a vendor job as returned by one status fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionJob {
    pub id: JobId,
    pub status: JobStatus,
    pub text: Option<String>,
    pub confidence: Option<f64>,
    pub words: Vec<WordTiming>,
    pub error: Option<String>,
}

impl TranscriptionJob {
    pub fn new(id: JobId, status: JobStatus) -> Self {
        Self {
            id,
            status,
            text: None,
            confidence: None,
            words: Vec::new(),
            error: None,
        }
    }
}

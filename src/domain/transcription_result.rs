use std::time::Duration;

use super::WordTiming;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    pub confidence: Option<f64>,
    pub words: Vec<WordTiming>,
    pub processing_time: Duration,
}

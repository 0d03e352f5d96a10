pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Job-creation options sent with every submission.
///
/// Tuned for short dictation clips: one forced language, punctuation and
/// casing restored, filler words dropped, no diarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRequest {
    pub audio_url: String,
    pub language_code: String,
    pub punctuate: bool,
    pub format_text: bool,
    pub disfluencies: bool,
    pub dual_channel: bool,
    pub speaker_labels: bool,
}

impl TranscriptRequest {
    pub fn for_dictation(audio_url: String, language_code: &str) -> Self {
        Self {
            audio_url,
            language_code: language_code.to_string(),
            punctuate: true,
            format_text: true,
            disfluencies: false,
            dual_channel: false,
            speaker_labels: false,
        }
    }
}

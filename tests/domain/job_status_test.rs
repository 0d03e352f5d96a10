use voice_transcription_api::domain::{JobStatus, TranscriptRequest};

#[test]
fn given_known_wire_values_when_parsed_then_map_to_statuses() {
    assert_eq!(JobStatus::parse("queued"), JobStatus::Queued);
    assert_eq!(JobStatus::parse("processing"), JobStatus::Processing);
    assert_eq!(JobStatus::parse("completed"), JobStatus::Completed);
    assert_eq!(JobStatus::parse("error"), JobStatus::Error);
}

#[test]
fn given_unknown_wire_value_when_parsed_then_keeps_original_text() {
    let status = JobStatus::parse("paused");

    assert_eq!(status, JobStatus::Unrecognized("paused".to_string()));
    assert_eq!(status.to_string(), "paused");
    assert!(!status.is_terminal());
}

#[test]
fn given_statuses_when_checking_terminality_then_only_completed_and_error_are_terminal() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Error.is_terminal());
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
}

#[test]
fn given_audio_url_when_building_dictation_request_then_uses_fixed_options() {
    let request = TranscriptRequest::for_dictation("https://cdn/x".to_string(), "en");

    assert_eq!(request.language_code, "en");
    assert!(request.punctuate);
    assert!(request.format_text);
    assert!(!request.disfluencies);
    assert!(!request.dual_channel);
    assert!(!request.speaker_labels);
}

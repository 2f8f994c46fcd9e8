use chesscoach::error::CoachError;

#[test]
fn test_error_creation() {
    let error = CoachError::new("Test error", "test_stage");
    assert_eq!(error.message, "Test error");
    assert_eq!(error.stage, "test_stage");
}

#[test]
fn test_error_with_context() {
    let error = CoachError::new("Test error", "test_stage")
        .with_context("Additional context");
    assert!(error.context.is_some());
    assert_eq!(error.context.unwrap(), "Additional context");
}

#[test]
fn test_error_with_source() {
    let error = CoachError::new("Test error", "test_stage")
        .with_source("serde_json");
    assert!(error.source.is_some());
    assert_eq!(error.source.unwrap(), "serde_json");
}

#[test]
fn test_error_display() {
    let error = CoachError::new("Test error", "test_stage")
        .with_context("context")
        .with_source("source");
    let display = format!("{}", error);
    assert!(display.contains("test_stage"));
    assert!(display.contains("Test error"));
}

#[test]
fn test_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: CoachError = io_error.into();
    assert_eq!(error.stage, "io");
    assert_eq!(error.source.unwrap(), "std::io");
}

/*!
 * Tests for error types and conversions
 */

use isotrans::errors::{AppError, CommandError, ImportError, ProtocolError, ProviderError};

#[test]
fn test_protocolError_incompleteGlossary_shouldDisplayCountAndPreview() {
    let error = ProtocolError::IncompleteGlossary {
        missing_preview: vec!["lupus".to_string(), "canis".to_string()],
        total: 5,
    };
    let display = format!("{}", error);
    assert!(display.starts_with("INCOMPLETE GLOSSARY"));
    assert!(display.contains("5 core token(s)"));
    assert!(display.contains("\"lupus\""));
    assert_eq!(error.missing_preview(), ["lupus".to_string(), "canis".to_string()]);
    assert_eq!(error.total_missing(), 5);
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_connectionError_shouldDisplayCorrectly() {
    let error = ProviderError::ConnectionError("Host unreachable".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_commandError_format_shouldShowExpectedSyntax() {
    let error = CommandError::Format("[ADD lupus]".to_string());
    assert_eq!(
        error.to_string(),
        "Format error: expected [ADD token=translation], got [ADD lupus]"
    );
}

#[test]
fn test_importError_unreadable_shouldKeepIoSource() {
    let error = ImportError::Unreadable {
        path: "missing.txt".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    assert!(error.to_string().contains("missing.txt"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_appError_fromProtocolError_shouldWrap() {
    let protocol = ProtocolError::IncompleteGlossary {
        missing_preview: vec!["lupus".to_string()],
        total: 1,
    };
    let app_error: AppError = protocol.clone().into();
    assert!(matches!(&app_error, AppError::Protocol(inner) if *inner == protocol));
    assert!(app_error.to_string().starts_with("Protocol error: INCOMPLETE GLOSSARY"));
}

#[test]
fn test_appError_fromAnyhowAndIo_shouldMapToUnknownAndFile() {
    let app_error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app_error, AppError::Unknown(ref msg) if msg == "boom"));

    let app_error: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
    assert!(matches!(app_error, AppError::File(ref msg) if msg == "disk"));
}

//! Unit tests for error.rs

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("range_start must be below range_end".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid config"));
    assert!(display.contains("range_start must be below range_end"));
}

#[test]
fn test_invalid_mirror_display() {
    let err = Error::InvalidMirror("stale key".to_string());
    assert_eq!(format!("{}", err), "Invalid mirror: stale key");
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("render target allocation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("render target allocation failed"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("no viewport".to_string());
    assert!(format!("{}", err).starts_with("Initialization failed"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_debug() {
    let err = Error::InvalidMirror("gone".to_string());
    let cloned = err.clone();
    assert_eq!(format!("{}", err), format!("{}", cloned));
    assert!(format!("{:?}", cloned).contains("InvalidMirror"));
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_when_negative(value: f64) -> Result<f64> {
    if value < 0.0 {
        crate::mirror_bail!("mirror3d::test", InvalidConfig, "negative value {}", value);
    }
    Ok(value)
}

#[test]
fn test_mirror_bail_returns_variant() {
    assert_eq!(bail_when_negative(2.0).unwrap(), 2.0);
    match bail_when_negative(-1.0) {
        Err(Error::InvalidConfig(msg)) => assert_eq!(msg, "negative value -1"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_mirror_err_builds_variant() {
    let err = crate::mirror_err!("mirror3d::test", BackendError, "code {}", 7);
    assert!(matches!(err, Error::BackendError(ref msg) if msg == "code 7"));
}

//! Unit tests for error module.

use super::*;

#[test]
fn test_api_error_display() {
    let error = Error::Api {
        status: 500,
        message: "Storage error: GetObject failed".to_string(),
    };

    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("Storage error: GetObject failed"));
}

#[test]
fn test_json_error_display() {
    let error = Error::from(serde_json::from_str::<u64>("nope").unwrap_err());

    let display = format!("{}", error);
    assert!(display.starts_with("JSON error:"));
}

#[test]
fn test_error_debug() {
    let error = Error::Api {
        status: 500,
        message: "Internal server error".to_string(),
    };

    let debug = format!("{:?}", error);
    assert!(debug.contains("Api"));
    assert!(debug.contains("500"));
}

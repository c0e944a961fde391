//! Unit tests for client module.

use super::*;

// ============================================================================
// ClientConfig Tests
// ============================================================================

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_client_config_custom() {
    let config = ClientConfig {
        base_url: "http://api.example.com:9000".to_string(),
        timeout: Duration::from_secs(60),
    };

    assert_eq!(config.base_url, "http://api.example.com:9000");
    assert_eq!(config.timeout, Duration::from_secs(60));
}

// ============================================================================
// ChainLogClient Creation Tests
// ============================================================================

#[test]
fn test_chain_log_client_new() {
    let client = ChainLogClient::new(ClientConfig::default());
    assert!(client.is_ok());
}

#[test]
fn test_chain_log_client_base_url_trimmed() {
    let client = ChainLogClient::with_base_url("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

// ============================================================================
// URL Building Tests
// ============================================================================

#[test]
fn test_observations_url_without_params() {
    let client = ChainLogClient::with_base_url("http://localhost:8080").unwrap();
    let url = client
        .observations_url(&ObservationParams::default())
        .unwrap();

    assert_eq!(url, "http://localhost:8080/api/v1/observations");
}

#[test]
fn test_observations_url_encodes_params() {
    let client = ChainLogClient::with_base_url("http://localhost:8080").unwrap();
    let url = client
        .observations_url(&ObservationParams {
            call_volume: Some("1,200".to_string()),
            selected_ticker: Some("QQQ".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(
        url,
        "http://localhost:8080/api/v1/observations?callVolume=1%2C200&selectedTicker=QQQ"
    );
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let client = ChainLogClient::new(ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    let result = client.health_check().await;
    assert!(matches!(result, Err(Error::Http(_))));
}

// ============================================================================
// Response Decoding Tests
// ============================================================================

#[test]
fn test_parse_body_success() {
    let record: EventRecord = parse_body(
        StatusCode::OK,
        r#"{"id":-3,"timestamp":"2024-03-15T14:30:00.000Z","callVolume":"120","putVolume":0,"selectedTicker":"SPY","lstPrice":"450.2"}"#,
    )
    .unwrap();

    assert_eq!(record.id, -3);
    assert_eq!(record.put_volume, FieldValue::Number(0));
}

#[test]
fn test_parse_body_malformed_success_is_json_error() {
    let result: Result<EventRecord, Error> = parse_body(StatusCode::OK, "<html>gateway</html>");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_parse_body_failure_uses_details() {
    let result: Result<EventRecord, Error> = parse_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"Internal Server Error","details":"Storage error: denied"}"#,
    );

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Storage error: denied");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_parse_body_failure_without_json_keeps_text() {
    let result: Result<HealthResponse, Error> =
        parse_body(StatusCode::BAD_GATEWAY, "upstream unavailable");
    assert!(matches!(
        result,
        Err(Error::Api { status: 502, ref message }) if message == "upstream unavailable"
    ));
}

//! Router tests driving requests through the full middleware stack.

use super::*;
use crate::error::ErrorResponse;
use crate::models::{EventRecord, FieldValue, HealthResponse};
use crate::store::{MemoryStore, ObjectStore, StoreError};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

fn router(store: &Arc<MemoryStore>) -> Router {
    create_router(Arc::new(AppState::in_memory(store.clone())))
}

async fn send(router: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(response: &Response) {
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["access-control-allow-headers"], "*");
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let store = Arc::new(MemoryStore::new());
    let response = send(router(&store), Method::GET, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let health: HealthResponse = json_body(response).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// Observation Tests
// ============================================================================

#[tokio::test]
async fn test_record_observation_success() {
    let store = Arc::new(MemoryStore::new());
    let response = send(
        router(&store),
        Method::GET,
        "/api/v1/observations?callVolume=120&putVolume=80&lstPrice=450.2&selectedTicker=SPY",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);

    let record: EventRecord = json_body(response).await;
    assert_eq!(record.id, 1);
    assert_eq!(record.fields.call_volume, FieldValue::from("120"));
    assert_eq!(record.fields.put_volume, FieldValue::from("80"));
    assert_eq!(record.fields.lst_price, FieldValue::from("450.2"));
    assert_eq!(record.fields.selected_ticker, "SPY");
    assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());

    let keys = store.keys();
    assert_eq!(keys.len(), 1);
    let entries: Vec<Value> =
        serde_json::from_slice(&store.object(&keys[0]).unwrap().body).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["callVolume"], "120");
}

#[tokio::test]
async fn test_record_observation_defaults_via_post_root() {
    let store = Arc::new(MemoryStore::new());
    let response = send(router(&store), Method::POST, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let record: Value = json_body(response).await;
    assert_eq!(record["id"], 1);
    assert_eq!(record["callVolume"], 0);
    assert_eq!(record["putVolume"], 0);
    assert_eq!(record["lstPrice"], 0);
    assert_eq!(record["selectedTicker"], "SPY");
}

#[tokio::test]
async fn test_record_observation_increments_id() {
    let store = Arc::new(MemoryStore::new());
    let router = router(&store);

    for expected in 1..=3i64 {
        let response = send(
            router.clone(),
            Method::POST,
            "/api/v1/observations?callVolume=1",
        )
        .await;
        let record: EventRecord = json_body(response).await;
        assert_eq!(record.id, expected);
    }
}

#[tokio::test]
async fn test_record_observation_url_decodes_values() {
    let store = Arc::new(MemoryStore::new());
    let response = send(
        router(&store),
        Method::GET,
        "/api/v1/observations?selectedTicker=BRK%2EB&callVolume=1%2C200",
    )
    .await;

    let record: EventRecord = json_body(response).await;
    assert_eq!(record.fields.selected_ticker, "BRK.B");
    assert_eq!(record.fields.call_volume, FieldValue::from("1,200"));
}

#[tokio::test]
async fn test_record_observation_storage_error() {
    let store = Arc::new(MemoryStore::new());
    store.deny_reads(true);

    let response = send(router(&store), Method::GET, "/api/v1/observations").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let body: ErrorResponse = json_body(response).await;
    assert_eq!(body.error, "Internal Server Error");
    assert!(body.details.starts_with("Storage error:"));
    assert!(body.details.contains("AccessDenied"));
    assert_eq!(store.put_calls(), 0);
}

/// Store whose every object holds the same corrupt body.
struct CorruptStore;

#[async_trait::async_trait]
impl ObjectStore for CorruptStore {
    fn backend_tag(&self) -> &'static str {
        "corrupt"
    }

    async fn exists(&self, _key: &str) -> Result<bool, StoreError> {
        Ok(true)
    }

    async fn get(&self, _key: &str) -> Result<bytes::Bytes, StoreError> {
        Ok(bytes::Bytes::from_static(b"not json"))
    }

    async fn put(&self, key: &str, _body: bytes::Bytes, _ct: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend {
            operation: "PutObject",
            key: key.to_string(),
            message: "unexpected write".to_string(),
        })
    }
}

#[tokio::test]
async fn test_record_observation_data_format_error() {
    let state = AppState::new(Arc::new(CorruptStore), chrono_tz::America::New_York);
    let response = send(
        create_router(Arc::new(state)),
        Method::POST,
        "/api/v1/observations",
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let body: ErrorResponse = json_body(response).await;
    assert_eq!(body.error, "Internal Server Error");
    assert!(body.details.starts_with("Data format error"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let store = Arc::new(MemoryStore::new());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/observations")
        .header("origin", "https://dashboard.example.com")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = router(&store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(store.head_calls(), 0);
}

#[tokio::test]
async fn test_unknown_route() {
    let store = Arc::new(MemoryStore::new());
    let response = send(router(&store), Method::GET, "/api/v1/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

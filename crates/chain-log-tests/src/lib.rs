//! Integration tests for the Chain Volume Log API.
//!
//! Each test gets its own server on an ephemeral port, backed by an in-memory
//! store the test can inspect. Set `API_BASE_URL` to run the client-only tests
//! against an already running deployment instead.

use chain_log_client::{ChainLogClient, ClientConfig};
use chain_volume_log::api::create_router;
use chain_volume_log::state::AppState;
use chain_volume_log::store::MemoryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// A server running in the test process.
pub struct TestServer {
    /// Client pointed at the server.
    pub client: ChainLogClient,
    /// Store behind the server.
    pub store: Arc<MemoryStore>,
}

/// Gets the external API base URL, if one is configured.
#[must_use]
pub fn external_api_url() -> Option<String> {
    std::env::var("API_BASE_URL").ok()
}

/// Creates a client for `base_url` with a short timeout.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client(base_url: &str) -> Result<ChainLogClient, chain_log_client::Error> {
    ChainLogClient::new(ClientConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(10),
    })
}

/// Starts the router on `127.0.0.1` with a fresh in-memory store.
///
/// # Errors
/// Returns error if the listener cannot be bound or the client built.
pub async fn spawn_server() -> Result<TestServer, Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryStore::new());
    let app = create_router(Arc::new(AppState::in_memory(store.clone())));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = create_test_client(&format!("http://{}", addr))?;
    Ok(TestServer { client, store })
}

//! Health check endpoint tests.

use chain_log_tests::{create_test_client, external_api_url, spawn_server};

#[tokio::test]
async fn test_health_check() {
    let server = spawn_server().await.expect("Failed to start server");

    let health = server
        .client
        .health_check()
        .await
        .expect("Health check failed");

    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_health_check_external() {
    let Some(url) = external_api_url() else {
        return;
    };
    let client = create_test_client(&url).expect("Failed to create client");

    let health = client.health_check().await.expect("Health check failed");
    assert_eq!(health.status, "ok");
}

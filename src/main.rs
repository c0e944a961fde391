//! Chain Volume Log Server
//!
//! HTTP entry point that appends option-chain observations to daily logs.

use chain_volume_log::api::create_router;
use chain_volume_log::config::Config;
use chain_volume_log::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use chain_volume_log::error::ErrorResponse;
use chain_volume_log::models::{EventFields, EventRecord, FieldValue, HealthResponse};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        chain_volume_log::api::handlers::health_check,
        chain_volume_log::api::handlers::record_observation,
    ),
    components(
        schemas(
            HealthResponse,
            EventRecord,
            EventFields,
            FieldValue,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Observations", description = "Daily option-chain observation log"),
    ),
    info(
        title = "Chain Volume Log API",
        version = "0.1.0",
        description = "Records option-chain volume observations into daily JSON logs",
        license(name = "MIT"),
        contact(name = "Joaquin Bejar", email = "jb@taunais.com")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The store client is built once and shared by every request.
    let state = Arc::new(AppState::from_config(&config).await?);

    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    #[cfg(feature = "lambda")]
    {
        if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
            info!("Starting Chain Volume Log in AWS Lambda");
            return lambda_http::run(app)
                .await
                .map_err(|e| anyhow::anyhow!("lambda runtime error: {}", e));
        }
    }

    let host = &config.server.host;
    let port = config.server.port;

    info!("Starting Chain Volume Log on {}:{}", host, port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        host, port
    );

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

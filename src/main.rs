use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cropdesk::transport;
use cropdesk::{Config, CredentialStore, HashCost, LoggingTransport, PasswordHasher, RecordProxy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let hasher = PasswordHasher::new(HashCost::default())?;
    let credentials = CredentialStore::connect(&config.database_url, hasher).await?;
    let crops = RecordProxy::new(config.remote_endpoint.clone(), config.remote_timeout)?;
    info!(endpoint = %config.remote_endpoint, "record proxy ready");

    let app_state = transport::http::AppState {
        credentials: Arc::new(credentials),
        crops: Arc::new(crops),
        notifier: Arc::new(LoggingTransport),
        image_bucket: config.image_bucket.clone(),
        notify_sender: config.notify_sender.clone(),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

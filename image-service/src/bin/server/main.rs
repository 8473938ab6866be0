use std::sync::Arc;

use auth::TokenVerifier;
use image_service::config::Config;
use image_service::domain::image::service::ImageService;
use image_service::inbound::http::create_router;
use image_service::outbound::repositories::PostgresImageRepository;
use image_service::outbound::storage::LocalImageStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "image-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.jwt.issuer,
        storage_path = %config.storage.path.display(),
        max_upload_bytes = config.storage.max_upload_bytes,
        "Configuration loaded"
    );

    let token_verifier = Arc::new(TokenVerifier::new(Arc::new(config.jwt.token_config()?)));
    let image_storage = Arc::new(LocalImageStorage::open(&config.storage.path).await?);
    tracing::info!(
        path = %image_storage.root().display(),
        "Image storage ready"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let image_repository = Arc::new(PostgresImageRepository::new(pg_pool));
    let image_service = Arc::new(ImageService::new(image_repository, image_storage));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(image_service, token_verifier, config.http_limits());
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

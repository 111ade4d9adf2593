//! # eShop Basket Server
//!
//! Main entry point for the basket service.

use anyhow::Context;
use eshop_config::{AppConfig, ConfigLoader};
use eshop_core::telemetry::{init_telemetry, TelemetryConfig};
use eshop_core::CancellationSource;
use eshop_repository::{create_pool, create_redis_pool, DistributedCache, PostgresDocumentStore, RedisDistributedCache};
use eshop_server::{
    app::{build_router, compose_repository},
    startup::{cancel_after_grace, print_startup_info, shutdown_signal},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            let _ = init_telemetry(&TelemetryConfig::default());
            return Err(e).context("Failed to load configuration");
        }
    };
    init_telemetry(&config.observability)?;

    info!("Starting {}...", config.app.name);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    serve(config).await
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let db_pool = create_pool(&config.database)
        .await
        .context("Failed to connect to the document store")?;
    if config.database.run_migrations {
        db_pool.run_migrations().await.context("Failed to run migrations")?;
    }
    let store = Arc::new(PostgresDocumentStore::new(Arc::clone(&db_pool)));

    let cache: Option<Arc<dyn DistributedCache>> = if config.redis.enabled {
        let cache = RedisDistributedCache::new(create_redis_pool(&config.redis)?);
        if let Err(e) = cache.health_check().await {
            warn!("Redis is not reachable yet, cache calls will degrade: {}", e);
        }
        Some(Arc::new(cache))
    } else {
        None
    };
    let cache_enabled = cache.is_some();

    let repository = compose_repository(store, cache, &config.redis);

    let request_cancel = CancellationSource::new();
    let router = build_router(repository, &config, request_cancel.token());

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    print_startup_info(&addr, cache_enabled);

    let grace = config.server.shutdown_grace();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tokio::spawn(cancel_after_grace(request_cancel, grace));
        })
        .await
        .context("Server error")?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

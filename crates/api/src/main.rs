use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use lander_api::config::{LogFormat, ServerConfig};
use lander_api::media::LocalBlobStore;
use lander_api::router::build_app_router;
use lander_api::state::AppState;
use lander_db::{
    ContentStore, MemoryContentStore, MemoryOperatorStore, OperatorStore, PgContentStore,
    PgOperatorStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Stores ---
    let (content, operators) = build_stores(&config).await?;

    // --- Media ---
    tokio::fs::create_dir_all(&config.media_root)
        .await
        .with_context(|| format!("Failed to create MEDIA_ROOT {}", config.media_root.display()))?;
    let media = Arc::new(LocalBlobStore::new(&config.media_root, &config.public_base_url));
    tracing::info!(root = %config.media_root.display(), "Media storage ready");

    // --- App state ---
    let state = AppState {
        content,
        operators,
        media,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .with_context(|| format!("Invalid HOST address '{}'", config.host))?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lander_api=debug,lander_db=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// PostgreSQL stores when `DATABASE_URL` is set, in-memory stores otherwise.
async fn build_stores(
    config: &ServerConfig,
) -> anyhow::Result<(Arc<dyn ContentStore>, Arc<dyn OperatorStore>)> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory stores, content is lost on exit");
        return Ok((
            Arc::new(MemoryContentStore::new()),
            Arc::new(MemoryOperatorStore::new()),
        ));
    };

    let pool = lander_db::create_pool(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    lander_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    lander_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok((
        Arc::new(PgContentStore::new(pool.clone())),
        Arc::new(PgOperatorStore::new(pool)),
    ))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}

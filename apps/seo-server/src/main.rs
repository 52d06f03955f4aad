use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use seo_analyzer::{AnalyzerConfig, Auditor};
use seo_server::{AppState, Cli};
use seo_storage::SeoStorage;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,seo_server=info,seo_analyzer=info,seo_storage=info,sqlx=warn")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// The cache is optional; a broken database only disables it.
async fn open_cache(database_url: &str) -> Option<SeoStorage> {
    let storage = match SeoStorage::new(database_url).await {
        Ok(storage) => storage,
        Err(e) => {
            warn!(error = %e, "cache database unavailable, continuing without cache");
            return None;
        }
    };
    if let Err(e) = storage.migrate().await {
        warn!(error = %e, "cache migration failed, continuing without cache");
        return None;
    }
    Some(storage)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AnalyzerConfig::from_env();
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, recommendations will be unavailable");
    }
    let auditor = Arc::new(Auditor::from_config(&config));

    let cache = if cli.no_cache {
        None
    } else {
        open_cache(&cli.database_url).await
    };

    let origins = cli.origin_headers()?;
    let app = seo_server::app(AppState::new(auditor, cache), origins);

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", cli.host, cli.port))?;
    info!(address = %listener.local_addr()?, "seo-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

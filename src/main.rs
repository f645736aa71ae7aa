use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slateboard::config::AppConfig;
use slateboard::server;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    let cfg = AppConfig::from_env();
    info!(
        "odds quotes {}",
        if cfg.odds_api_key.is_some() {
            "enabled"
        } else {
            "disabled (no ODDS_API_KEY, every quote renders as -)"
        }
    );
    info!("snapshots under {}", cfg.snapshot_dir.display());

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("listening on {}", cfg.listen_addr);

    let app = server::router(Arc::new(cfg));
    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("slateboard=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

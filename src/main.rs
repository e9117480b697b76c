//! DeadW3 landing server
//!
//! Entry point: loads configuration, sets up logging and serves the site.

use std::sync::Arc;

use mimalloc::MiMalloc;

use deadw3_landing::config::AppConfig;
use deadw3_landing::{server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenvy::dotenv();

    let config = Arc::new(AppConfig::load()?);
    telemetry::init(&config.telemetry);

    tracing::info!(
        name: "config.loaded",
        storage = ?config.storage.backend,
        submit_delay_ms = config.dialog.submit_delay_ms,
        analytics = config.integrations.analytics_id().is_some(),
        "Configuration loaded"
    );

    server::start_server(config).await
}

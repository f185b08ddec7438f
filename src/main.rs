use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use riskwatch_console::charts::ChartRegistry;
use riskwatch_console::config::Config;
use riskwatch_console::gateway::HttpGateway;
use riskwatch_console::page::Page;
use riskwatch_console::scheduler::Poller;
use riskwatch_console::state::DashboardState;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=debug for per-cycle detail)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    tracing::info!("RiskWatch console starting");

    // An explicit path must exist; the default one is optional.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config = Config::load(&path)?;
            tracing::info!("Configuration loaded from {}", path);
            config
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            let config = Config::load(DEFAULT_CONFIG_PATH)?;
            tracing::info!("Configuration loaded from {}", DEFAULT_CONFIG_PATH);
            config
        }
        None => {
            let config = Config::default();
            config.validate()?;
            tracing::info!("No config file found, using defaults");
            config
        }
    };

    tracing::info!(
        backend = %config.backend.api_root(),
        interval_ms = config.polling.interval_ms,
        ordered_apply = config.polling.ordered_apply,
        "Polling backend"
    );

    let gateway = Arc::new(HttpGateway::new(&config.backend)?);

    let dashboard = DashboardState::new(
        Page::dashboard(config.polling.auto_refresh),
        Box::new(ChartRegistry::new()),
        config.views.clone(),
        &config.polling,
    )
    .into_shared();

    let poller = Poller::new(gateway, dashboard, &config.polling);

    // Spawn console server
    if config.console.enabled {
        let console_poller = poller.clone();
        let host = config.console.host.clone();
        let port = config.console.port;
        tokio::spawn(async move {
            if let Err(e) = riskwatch_console::api::serve(console_poller, &host, port).await {
                tracing::error!(error = %e, "Console server failed");
            }
        });
    }

    // Create shutdown signal
    let shutdown = CancellationToken::new();
    let scheduler = tokio::spawn(poller.run(shutdown.clone()));

    tracing::info!("Poll scheduler running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping...");
    shutdown.cancel();

    let _ = scheduler.await;

    tracing::info!("RiskWatch console stopped");
    Ok(())
}

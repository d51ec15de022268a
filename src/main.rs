use anyhow::{Context, Result};
use clap::Parser;
use meal_planner_rust::config::Config;
use meal_planner_rust::recipes::{catalog::resolve_catalog_path, RecipeCatalog};
use meal_planner_rust::router::create_app_router;
use meal_planner_rust::state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Recipe browsing and in-memory meal planning over HTTP
#[derive(Parser)]
#[command(name = "meal-planner", version)]
struct Cli {
    /// Path to configuration file (defaults to config/default.toml)
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// Server host address (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides config file)
    #[arg(long)]
    port: Option<u16>,

    /// Recipe catalog JSON file (overrides config file)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    meal_planner_rust::observability::init_observability(
        "meal-planner",
        &config.observability.log_level,
        config.observability.json_logs,
    )?;

    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let catalog_path = resolve_catalog_path(&config.catalog.path, &current_dir);
    tracing::info!(path = %catalog_path.display(), "Using recipe catalog");

    // Initialize application state
    let state = Arc::new(AppState::new(RecipeCatalog::open(catalog_path)));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

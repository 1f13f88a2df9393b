//! Jira Datasource Server
//!
//! Run with: cargo run --bin jira-datasource
//!
//! # Configuration
//!
//! Environment variables:
//! - `JIRA_HOST`: Jira hostname or base URL (required)
//! - `JIRA_USER`: Jira account email
//! - `JIRA_API_TOKEN`: Jira API token
//! - `HTTP_USER` / `HTTP_PASS`: Basic auth for inbound requests (anonymous if unset)
//! - `JIRA_DATASOURCE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `JIRA_DATASOURCE_PORT`: Port to listen on (default: 3000)
//! - `JIRA_DATASOURCE_REQUEST_TIMEOUT`: Whole-request timeout in seconds (default: 30)
//! - `JIRA_DATASOURCE_LOG_LEVEL`: Log level (default: info)
//! - `JIRA_DATASOURCE_LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Full filter directive, overrides the log level

use anyhow::Context;
use clap::Parser;
use jira_datasource::api::{serve, AppState};
use jira_datasource::config::{AuthMode, Config, LoggingConfig};
use jira_datasource::jira::JiraClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jira-datasource")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grafana JSON datasource for Jira issues")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config.logging);

    tracing::info!("Starting Jira datasource v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    let tracker = JiraClient::new(&config.jira).context("failed to create Jira client")?;
    tracing::info!("Jira instance: {}", tracker.base_url());

    let auth = config.auth_mode();
    match &auth {
        AuthMode::Anonymous => tracing::info!("Inbound authentication: anonymous"),
        AuthMode::BasicCredentials { user, .. } => {
            tracing::info!("Inbound authentication: basic (user {})", user)
        }
    }

    let state = AppState::new(Arc::new(tracker), auth);
    serve(state, &config.server).await?;

    tracing::info!("Jira datasource stopped");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("jira_datasource={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

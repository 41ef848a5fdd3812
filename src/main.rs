//! SoulBuddy MCP Server - Entry Point
//!
//! Serves the SoulBuddy tools over STDIO.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use soulbuddy::api::HttpApi;
use soulbuddy::config::Config;
use soulbuddy::SoulBuddyServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries MCP traffic
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(
        "Starting SoulBuddy MCP Server against {} (charts in {})",
        config.api_base_url,
        config.chart_dir.display()
    );

    let api = HttpApi::from_config(&config).context("Failed to build HTTP client")?;
    let server = SoulBuddyServer::new(config, Arc::new(api));
    let service = server.serve(stdio()).await?;

    tracing::info!("Server initialized, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");

    Ok(())
}

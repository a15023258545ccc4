//! Raide - MCP server for the Raide ticketing and traffic APIs
//!
//! This binary runs as an MCP server using stdio transport, allowing an MCP
//! client such as Claude Desktop to work with Raide tickets through natural
//! language.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `RAIDE_ACCOUNT_ID`: Raide account id
//! - `RAIDE_API_KEY`: API key
//! - `RAIDE_API_SECRET`: API secret
//!
//! # Usage
//!
//! ```bash
//! RAIDE_ACCOUNT_ID=7 RAIDE_API_KEY=... RAIDE_API_SECRET=... ./raide
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use raide::{client, config, server, traffic};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Log to stderr; stdout carries the MCP JSON-RPC messages
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raide=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Raide MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(
        base_url = %config.base_url,
        traffic_base_url = %config.traffic_base_url,
        verify_certificates = config.verify_certificates,
        "Configuration loaded"
    );

    let raide_client =
        client::RaideClient::from_config(&config).context("Failed to create Raide client")?;
    let traffic_client = traffic::TrafficClient::from_config(&config)
        .context("Failed to create Raide traffic client")?;

    tracing::info!("Testing connection to Raide...");
    if let Err(e) = raide_client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!(
            "Server will start but may not be able to reach Raide. \
             Check configuration and network connectivity."
        );
    }

    let server = server::RaideServer::new(raide_client, traffic_client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}

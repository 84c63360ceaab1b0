//! zendesk - print every group of a Zendesk account as JSON lines.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `ZENDESK_SUBDOMAIN` (or `ZENDESK_ENDPOINT_URL`)
//! - `ZENDESK_EMAIL` + `ZENDESK_API_TOKEN`, or `ZENDESK_OAUTH_TOKEN`
//!
//! # Usage
//!
//! ```bash
//! ZENDESK_SUBDOMAIN=acme ZENDESK_EMAIL=agent@acme.com ZENDESK_API_TOKEN=xxx ./zendesk
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use zendesk::{Client, Config, PaginationOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout carries the JSON lines, logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zendesk=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting zendesk v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    let client = Client::from_config(&config).context("Failed to create Zendesk client")?;

    tracing::debug!(base_url = %client.base_url(), "Client initialized");

    let mut groups = client.groups_iter(PaginationOptions::default());
    let mut count = 0usize;
    while let Some(group) = groups.next().await.context("Failed to list groups")? {
        println!("{}", serde_json::to_string(&group)?);
        count += 1;
    }

    tracing::info!(count, "Listed groups");

    Ok(())
}

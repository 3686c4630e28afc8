//! Library root for `snipeit-bot`.
//!
//! Snipeit-bot is a Slack bot that answers asset-inventory questions:
//! - `user <username>` lists the assets checked out to a user
//! - `serial <serial>` shows the asset with a serial number
//! - `asset <tag>` shows the asset with an asset tag
//! - `help` prints usage
//!
//! The bot integrates with Slack for chat and Snipe-IT for inventory data.
//! Each service sits behind a trait so it can be swapped or mocked.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the snipeit-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with inventory and chat clients
/// - Starts the main event loop for processing messages
pub async fn start(config: Config) -> Void {
    info!("Starting snipeit-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the default crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}

//! Runtime services and shared state for the snipeit-bot.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{chat::ChatClient, inventory::InventoryClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the inventory client, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The inventory client instance.
    pub inventory: InventoryClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the inventory client.
        let inventory = InventoryClient::snipeit(&config)?;

        // Initialize the chat client.
        let chat = ChatClient::slack(&config, inventory.clone()).await?;

        Ok(Self { config, inventory, chat })
    }

    pub async fn start(&self) -> Void {
        self.chat.start().await
    }
}

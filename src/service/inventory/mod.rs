pub mod snipeit;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::LookupResult;

// Traits.

/// Generic inventory client trait that clients must implement.
///
/// This trait defines the lookups the bot can answer. Implementing it allows
/// different asset-management backends to be used with the snipeit-bot.
#[async_trait]
pub trait GenericInventoryClient: Send + Sync + 'static {
    /// Look up the assets checked out to the user best matching `username`.
    async fn lookup_user_assets(&self, username: &str) -> LookupResult;

    /// Look up the assets carrying the given serial number.
    async fn lookup_asset_by_serial(&self, serial: &str) -> LookupResult;

    /// Look up the single asset with the given asset tag.
    async fn lookup_asset_by_tag(&self, tag: &str) -> LookupResult;
}

// Structs.

/// Inventory client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct InventoryClient {
    inner: Arc<dyn GenericInventoryClient>,
}

impl Deref for InventoryClient {
    type Target = dyn GenericInventoryClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl InventoryClient {
    pub fn new(inner: Arc<dyn GenericInventoryClient>) -> Self {
        Self { inner }
    }
}

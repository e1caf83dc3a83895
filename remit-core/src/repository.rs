use async_trait::async_trait;
use uuid::Uuid;

use crate::{geo, CoreResult, OrderContext};

/// Key-value store for gateway options, keyed by namespaced option names.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch a stored value, `None` when the key was never written
    async fn get(&self, key: &str) -> CoreResult<Option<serde_json::Value>>;

    async fn set(&self, key: &str, value: serde_json::Value) -> CoreResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> CoreResult<()>;
}

/// Resolves order ids to the snapshot the account selector needs
#[async_trait]
pub trait OrderProvider: Send + Sync {
    async fn resolve(&self, order_id: Uuid) -> CoreResult<Option<OrderContext>>;

    /// Continent code for a billing country, from the built-in table unless overridden
    fn continent_for(&self, country_code: &str) -> Option<String> {
        geo::continent_for_country(country_code).map(str::to_string)
    }
}

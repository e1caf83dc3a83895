use remit_accounts::Account;
use remit_core::{CoreResult, GatewaySettings, SettingsStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Keys of the flat single-account options older configurations stored in the settings object
const LEGACY_ACCOUNT_KEYS: [&str; 8] = [
    "account_scope",
    "account_currency",
    "account_number",
    "routing_number",
    "iban",
    "bic",
    "branch",
    "remarks",
];

/// Typed access to the gateway's options in a [`SettingsStore`].
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn SettingsStore>,
    gateway_id: String,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn SettingsStore>, gateway_id: &str) -> Self {
        Self {
            store,
            gateway_id: gateway_id.to_string(),
        }
    }

    pub fn gateway_id(&self) -> &str {
        &self.gateway_id
    }

    pub fn settings_key(&self) -> String {
        format!("{}_settings", self.gateway_id)
    }

    pub fn accounts_key(&self) -> String {
        format!("{}_accounts", self.gateway_id)
    }

    /// Stored value for `key`, or `default` when the key was never written
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> CoreResult<T> {
        match self.store.get(key).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(default),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> CoreResult<()> {
        self.store.set(key, serde_json::to_value(value)?).await
    }

    pub async fn load_settings(&self) -> CoreResult<GatewaySettings> {
        self.get(&self.settings_key(), GatewaySettings::default()).await
    }

    pub async fn save_settings(&self, settings: &GatewaySettings) -> CoreResult<()> {
        self.set(&self.settings_key(), settings).await?;
        info!("Gateway settings saved for {}", self.gateway_id);
        Ok(())
    }

    /// Configured accounts in display order.
    ///
    /// Before the account table existed, a single account lived as flat keys in the
    /// settings object. When no account list was ever saved, that account is returned.
    pub async fn load_accounts(&self) -> CoreResult<Vec<Account>> {
        if let Some(value) = self.store.get(&self.accounts_key()).await? {
            return Ok(serde_json::from_value(value)?);
        }

        let settings = self.load_settings().await?;
        let legacy: serde_json::Map<String, serde_json::Value> = LEGACY_ACCOUNT_KEYS
            .iter()
            .map(|key| (key.to_string(), serde_json::Value::String(settings.extra_str(key))))
            .collect();
        let account: Account = serde_json::from_value(serde_json::Value::Object(legacy))?;
        Ok(vec![account])
    }

    pub async fn save_accounts(&self, accounts: &[Account]) -> CoreResult<()> {
        self.set(&self.accounts_key(), &accounts).await?;
        info!("{} account(s) saved for {}", accounts.len(), self.gateway_id);
        Ok(())
    }

    /// Uninstall hook. Deletes settings and accounts when the wipe flag is set and
    /// reports whether anything was wiped.
    pub async fn uninstall(&self) -> CoreResult<bool> {
        let settings = self.load_settings().await?;
        if !settings.wipe_data {
            info!("Uninstall for {}: configuration kept", self.gateway_id);
            return Ok(false);
        }

        self.store.delete(&self.settings_key()).await?;
        self.store.delete(&self.accounts_key()).await?;
        info!("Uninstall for {}: configuration wiped", self.gateway_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySettingsStore;
    use serde_json::json;

    fn repo() -> (Arc<MemorySettingsStore>, SettingsRepository) {
        let store = Arc::new(MemorySettingsStore::new());
        let repo = SettingsRepository::new(store.clone(), "bank_transfer");
        (store, repo)
    }

    #[tokio::test]
    async fn test_get_returns_default_for_missing_key() {
        let (_, repo) = repo();
        assert_eq!(repo.get("nope", 7u32).await.unwrap(), 7);
        assert_eq!(repo.load_settings().await.unwrap(), GatewaySettings::default());
    }

    #[tokio::test]
    async fn test_accounts_round_trip_in_order() {
        let (_, repo) = repo();
        let accounts = vec![
            Account {
                scope: "GB".to_string(),
                iban: "GB29NWBK60161331926819".into(),
                ..Default::default()
            },
            Account {
                currency: "USD".to_string(),
                account_number: "8310".into(),
                ..Default::default()
            },
        ];
        repo.save_accounts(&accounts).await.unwrap();
        assert_eq!(repo.load_accounts().await.unwrap(), accounts);
    }

    #[tokio::test]
    async fn test_saved_empty_list_stays_empty() {
        let (_, repo) = repo();
        repo.save_accounts(&[]).await.unwrap();
        assert!(repo.load_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_legacy_single_account_fallback() {
        let (store, repo) = repo();
        store
            .set(
                "bank_transfer_settings",
                json!({"title": "Bank", "account_currency": "EUR", "iban": "DE89370400440532013000"}),
            )
            .await
            .unwrap();

        let accounts = repo.load_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].currency, "EUR");
        assert_eq!(accounts[0].iban.expose(), "DE89370400440532013000");
        assert_eq!(accounts[0].scope, "");
    }

    #[tokio::test]
    async fn test_uninstall_respects_wipe_flag() {
        let (store, repo) = repo();
        repo.save_settings(&GatewaySettings::default()).await.unwrap();
        repo.save_accounts(&[Account::default()]).await.unwrap();

        assert!(!repo.uninstall().await.unwrap());
        assert!(store.get("bank_transfer_accounts").await.unwrap().is_some());

        let settings = GatewaySettings {
            wipe_data: true,
            ..Default::default()
        };
        repo.save_settings(&settings).await.unwrap();
        assert!(repo.uninstall().await.unwrap());
        assert!(store.get("bank_transfer_settings").await.unwrap().is_none());
        assert!(store.get("bank_transfer_accounts").await.unwrap().is_none());
    }
}

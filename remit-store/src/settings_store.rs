use async_trait::async_trait;
use remit_core::{CoreError, CoreResult, SettingsStore};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Process-local settings, lost on restart
#[derive(Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> CoreResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Settings kept in a single JSON object on disk, rewritten on every change
pub struct JsonFileSettingsStore {
    path: PathBuf,
    values: RwLock<HashMap<String, Value>>,
}

impl JsonFileSettingsStore {
    /// Open the file, starting empty when it does not exist yet
    pub async fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        let values = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(CoreError::Storage(format!("{}: {}", path.display(), e))),
        };
        info!("Settings file opened: {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    async fn flush(&self, values: &HashMap<String, Value>) -> CoreResult<()> {
        let bytes = serde_json::to_vec_pretty(values)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| CoreError::Storage(format!("{}: {}", self.path.display(), e)))?;
        debug!("Settings file written: {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    // Edits go to a copy; the shared map only changes once the file is written.
    async fn set(&self, key: &str, value: Value) -> CoreResult<()> {
        let mut values = self.values.write().await;
        let mut next = values.clone();
        next.insert(key.to_string(), value);
        self.flush(&next).await?;
        *values = next;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        let mut values = self.values.write().await;
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.flush(&next).await?;
        *values = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemorySettingsStore::new();
        assert!(store.get("a").await.unwrap().is_none());

        store.set("a", json!({"title": "Pay by Bank"})).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!({"title": "Pay by Bank"})));

        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert!(store.get("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = JsonFileSettingsStore::open(&path).await.unwrap();
        store.set("bank_transfer_accounts", json!([{"iban": "DE89"}])).await.unwrap();
        store.set("other", json!(1)).await.unwrap();
        store.delete("other").await.unwrap();
        drop(store);

        let reopened = JsonFileSettingsStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("bank_transfer_accounts").await.unwrap(),
            Some(json!([{"iban": "DE89"}]))
        );
        assert!(reopened.get("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_keeps_state_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = JsonFileSettingsStore::open(&path).await.unwrap();
        store.set("bank_transfer_settings", json!({"enabled": "yes"})).await.unwrap();

        // A directory in place of the file makes every write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store.set("bank_transfer_accounts", json!([{"iban": "X"}])).await;
        assert!(matches!(result, Err(CoreError::Storage(_))));
        assert!(store.get("bank_transfer_accounts").await.unwrap().is_none());

        let result = store.delete("bank_transfer_settings").await;
        assert!(matches!(result, Err(CoreError::Storage(_))));
        assert_eq!(
            store.get("bank_transfer_settings").await.unwrap(),
            Some(json!({"enabled": "yes"}))
        );
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = JsonFileSettingsStore::open(&path).await;
        assert!(matches!(result, Err(CoreError::Serialization(_))));
    }
}

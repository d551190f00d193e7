use std::sync::Mutex;

use super::traits::KeyValueStore;
use crate::errors::CoreError;
use crate::models::wallet::Wallet;

/// Persists the tracked-wallet list as one JSON array under a single key.
///
/// Every mutation is a read-modify-write of the **current persisted** list
/// (never a stale in-memory copy), serialized by an internal lock, so
/// concurrent refreshes that finish out of order each touch only their own
/// entry.
pub struct PortfolioStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl PortfolioStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted wallets. Nothing stored yet means an empty list.
    pub fn load(&self) -> Result<Vec<Wallet>, CoreError> {
        match self.store.get(&self.key)? {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(&json).map_err(|e| {
                CoreError::Deserialization(format!("Failed to deserialize wallets: {e}"))
            }),
            _ => Ok(Vec::new()),
        }
    }

    /// Overwrite the persisted list.
    pub fn save(&self, wallets: &[Wallet]) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write(wallets)
    }

    /// Reload, apply `f`, persist. If `f` fails nothing is written.
    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut Vec<Wallet>) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut wallets = self.load()?;
        let result = f(&mut wallets)?;
        self.write(&wallets)?;
        Ok(result)
    }

    fn write(&self, wallets: &[Wallet]) -> Result<(), CoreError> {
        let json = serde_json::to_string(wallets)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize wallets: {e}")))?;
        self.store.set(&self.key, &json)
    }
}

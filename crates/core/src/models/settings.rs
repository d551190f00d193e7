use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Client configuration: where the balance/market service lives and how
/// addresses and the local store are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the balance/market service, without trailing slash.
    pub api_base_url: String,

    /// Per-request timeout (native targets only).
    pub request_timeout_secs: u64,

    /// Inputs ending with this suffix are treated as name-service aliases.
    pub alias_suffix: String,

    /// Symbol and name given to the native balance when the legacy
    /// `/balance` endpoint is the data source.
    pub native_symbol: String,
    pub native_name: String,

    /// Key under which the wallet list is persisted.
    pub storage_key: String,

    /// Default number of coins requested from the market listing.
    pub market_top_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001".to_string(),
            request_timeout_secs: 30,
            alias_suffix: ".hl".to_string(),
            native_symbol: "HYPE".to_string(),
            native_name: "Hyperliquid".to_string(),
            storage_key: "wallets".to_string(),
            market_top_limit: 10,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.api_base_url = settings.api_base_url.trim_end_matches('/').to_string();
        Ok(settings)
    }

    /// Same as default, pointed at another service (used by tests and the
    /// embedding app's environment switch).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            api_base_url: base.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

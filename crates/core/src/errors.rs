use thiserror::Error;

/// Unified error type for the entire wallet-portfolio-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Address validation ──────────────────────────────────────────
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    #[error("Could not resolve alias: {0}")]
    Resolution(String),

    #[error("Wallet already tracked: {0}")]
    DuplicateWallet(String),

    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Only produced by the strict balance parser. Valuation degrades
    /// malformed balances to zero instead of surfacing this.
    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// True for any failure while fetching from the balance/market service:
    /// transport errors, non-2xx statuses, undecodable bodies and
    /// `success: false` payloads.
    pub fn is_network(&self) -> bool {
        matches!(self, CoreError::Network(_) | CoreError::Api { .. })
    }

    /// True for errors the user can fix by editing the address they typed.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidFormat(_) | CoreError::Resolution(_) | CoreError::DuplicateWallet(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full request URL; drop the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

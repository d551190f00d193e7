use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::holding::{Holding, RawHolding};

/// The two holding shapes the balance service can return.
///
/// Decided once at the provider boundary; the valuation code matches on it
/// and never re-inspects the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HoldingsPayload {
    /// Each holding already carries `usd_value`, and the service supplied the
    /// wallet total. Both are trusted as-is.
    Valued {
        holdings: Vec<RawHolding>,
        total_value: f64,
    },
    /// Balances and prices only; values are computed locally.
    Raw { holdings: Vec<RawHolding> },
}

impl HoldingsPayload {
    pub fn holdings(&self) -> &[RawHolding] {
        match self {
            HoldingsPayload::Valued { holdings, .. } | HoldingsPayload::Raw { holdings } => {
                holdings
            }
        }
    }

    pub fn is_valued(&self) -> bool {
        matches!(self, HoldingsPayload::Valued { .. })
    }
}

/// Result of one fetch from the balance service for one address.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWalletData {
    pub address: Address,
    pub payload: HoldingsPayload,
    /// Server-side timestamp, if the service sent one.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RawWalletData {
    pub fn raw(address: Address, holdings: Vec<RawHolding>) -> Self {
        Self {
            address,
            payload: HoldingsPayload::Raw { holdings },
            fetched_at: None,
        }
    }

    pub fn valued(address: Address, holdings: Vec<RawHolding>, total_value: f64) -> Self {
        Self {
            address,
            payload: HoldingsPayload::Valued {
                holdings,
                total_value,
            },
            fetched_at: None,
        }
    }
}

/// A tracked address with its valued holdings.
///
/// This is the record persisted in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: Address,

    /// Sorted by descending `usd_value`
    pub holdings: Vec<Holding>,

    /// Cached sum of holding values (or the service's figure)
    pub total_value: f64,

    pub token_count: usize,

    /// When the holdings were last replaced
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Wallet {
    /// Largest holding by USD value.
    pub fn top_holding(&self) -> Option<&Holding> {
        self.holdings.first()
    }

    /// The native-asset holding, if the wallet has a non-zero one.
    pub fn native_holding(&self) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.is_native)
    }
}

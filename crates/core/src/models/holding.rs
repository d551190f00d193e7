use serde::{Deserialize, Serialize};

/// One token balance as received from the balance service, before valuation.
///
/// `balance` stays a decimal string: it is only parsed when the holding is
/// valued locally, and is carried through to [`Holding`] untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHolding {
    pub symbol: String,
    pub name: String,
    pub balance: String,
    pub decimals: u8,
    pub contract_address: Option<String>,
    pub is_native: bool,
    /// Unit price in USD, `None` when the market has no quote.
    pub price: Option<f64>,
    /// Present only in the pre-valued shape.
    pub usd_value: Option<f64>,
    pub price_change_24h: Option<f64>,
}

impl RawHolding {
    /// A contract token with a known price, the common case in tests and
    /// for the legacy token endpoint (which carries no price).
    pub fn token(
        symbol: impl Into<String>,
        balance: impl Into<String>,
        decimals: u8,
        price: Option<f64>,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            balance: balance.into(),
            decimals,
            contract_address: None,
            is_native: false,
            price,
            usd_value: None,
            price_change_24h: None,
        }
    }

    /// The chain's native asset.
    pub fn native(
        symbol: impl Into<String>,
        name: impl Into<String>,
        balance: impl Into<String>,
        price: Option<f64>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            balance: balance.into(),
            decimals: 18,
            contract_address: None,
            is_native: true,
            price,
            usd_value: None,
            price_change_24h: None,
        }
    }

    pub fn with_usd_value(mut self, usd_value: f64) -> Self {
        self.usd_value = Some(usd_value);
        self
    }
}

/// One valued token balance inside a [`Wallet`](super::wallet::Wallet).
///
/// Holdings are never edited in place: a refresh replaces the wallet's
/// whole holding list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol exactly as the service reported it (e.g. "HYPE", "USDC")
    pub symbol: String,

    /// Display name (e.g. "Hyperliquid")
    pub name: String,

    /// Balance as a decimal string, in whole-token units
    pub balance: String,

    pub decimals: u8,

    #[serde(default)]
    pub contract_address: Option<String>,

    /// Unit price in USD, if the market had a quote
    pub price: Option<f64>,

    /// Balance × price, or the service's own figure for pre-valued data
    pub usd_value: f64,

    /// 24h price change in percent
    #[serde(default)]
    pub price_change_24h: Option<f64>,

    /// Whether this is the chain's base currency. At most one per wallet.
    #[serde(default)]
    pub is_native: bool,
}

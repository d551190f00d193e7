//! Wire types of the balance/market service. Only the provider module sees
//! these; everything past the boundary works with `models`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::models::holding::RawHolding;
use crate::models::market::{GlobalMarket, MarketCoin};

/// Default decimals when the service omits them (EVM convention).
const DEFAULT_DECIMALS: u8 = 18;

// ── /api/wallet/{address}/real-holdings ─────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RealHoldingsResponse {
    pub success: bool,
    #[serde(default)]
    pub tokens: Vec<TokenDto>,
    /// Present (and non-null) only when the service valued the holdings.
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenDto {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Value,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub is_native: Option<bool>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub usd_value: Option<f64>,
    #[serde(default, alias = "priceChange24H")]
    pub price_change_24h: Option<f64>,
}

impl From<TokenDto> for RawHolding {
    fn from(t: TokenDto) -> Self {
        RawHolding {
            name: t.name.unwrap_or_else(|| t.symbol.clone()),
            symbol: t.symbol,
            balance: balance_to_string(&t.balance),
            decimals: t.decimals.unwrap_or(DEFAULT_DECIMALS),
            contract_address: t.contract_address,
            is_native: t.is_native.unwrap_or(false),
            price: t.price,
            usd_value: t.usd_value,
            price_change_24h: t.price_change_24h,
        }
    }
}

impl RealHoldingsResponse {
    /// The service's error text, whichever field it used.
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request was not successful".to_string())
    }
}

// ── legacy /balance and /tokens ─────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct LegacyBalanceResponse {
    #[serde(default)]
    pub balance: Value,
}

#[derive(Deserialize)]
pub(crate) struct LegacyTokensResponse {
    #[serde(default)]
    pub tokens: Vec<LegacyTokenDto>,
}

#[derive(Deserialize)]
pub(crate) struct LegacyTokenDto {
    pub symbol: String,
    #[serde(default)]
    pub balance: Value,
    #[serde(default)]
    pub decimals: Option<u8>,
}

impl From<LegacyTokenDto> for RawHolding {
    fn from(t: LegacyTokenDto) -> Self {
        RawHolding::token(
            t.symbol,
            balance_to_string(&t.balance),
            t.decimals.unwrap_or(DEFAULT_DECIMALS),
            None,
        )
    }
}

// ── /api/market/* ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct TopMarketResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<MarketCoinDto>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct MarketCoinDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

impl From<MarketCoinDto> for MarketCoin {
    fn from(c: MarketCoinDto) -> Self {
        MarketCoin {
            id: c.id,
            symbol: c.symbol.to_uppercase(),
            name: c.name,
            current_price: c.current_price,
            price_change_percentage_24h: c.price_change_percentage_24h,
            market_cap: c.market_cap,
            total_volume: c.total_volume,
            market_cap_rank: c.market_cap_rank,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct GlobalMarketResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<GlobalMarketDto>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct GlobalMarketDto {
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h_usd: Option<f64>,
}

impl From<GlobalMarketDto> for GlobalMarket {
    fn from(g: GlobalMarketDto) -> Self {
        let pick = |m: &HashMap<String, f64>, k: &str| m.get(k).copied().unwrap_or(0.0);
        GlobalMarket {
            total_market_cap_usd: pick(&g.total_market_cap, "usd"),
            total_volume_usd: pick(&g.total_volume, "usd"),
            btc_dominance: pick(&g.market_cap_percentage, "btc"),
            eth_dominance: pick(&g.market_cap_percentage, "eth"),
            market_cap_change_24h_pct: g.market_cap_change_percentage_24h_usd.unwrap_or(0.0),
        }
    }
}

// ── /api/hlnames/resolve/{alias} ────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct ResolveResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ResolveData>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ResolveData {
    #[serde(default)]
    pub address: Option<String>,
}

// ── helpers ─────────────────────────────────────────────────────────

/// Balances arrive as strings, but some endpoints send bare numbers.
/// Anything else becomes an empty string, which values to zero.
pub(crate) fn balance_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Timestamps come either as RFC 3339 strings or unix milliseconds.
pub(crate) fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

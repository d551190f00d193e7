use serde::{Deserialize, Serialize};

/// One row of the top-coins market listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub market_cap_rank: Option<u32>,
}

/// Whole-market figures in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMarket {
    pub total_market_cap_usd: f64,
    pub total_volume_usd: f64,
    /// BTC dominance, percent
    pub btc_dominance: f64,
    /// ETH dominance, percent
    pub eth_dominance: f64,
    pub market_cap_change_24h_pct: f64,
}

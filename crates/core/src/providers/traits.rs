use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::address::Address;
use crate::models::market::{GlobalMarket, MarketCoin};
use crate::models::wallet::RawWalletData;

/// Source of wallet holdings and alias resolution.
///
/// The REST backend implements this; tests and alternative backends plug in
/// their own implementation without touching the services.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WalletDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the current holdings of one address. The payload shape
    /// (pre-valued or raw) is decided here and nowhere else.
    async fn fetch_holdings(&self, address: &Address) -> Result<RawWalletData, CoreError>;

    /// Resolve a name-service alias to the address string the service
    /// returned. Shape validation is the caller's job.
    async fn resolve_alias(&self, alias: &str) -> Result<String, CoreError>;
}

/// Source of market-wide data.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Top coins by market cap, at most `limit` entries.
    async fn top_coins(&self, limit: u32) -> Result<Vec<MarketCoin>, CoreError>;

    async fn global_market(&self) -> Result<GlobalMarket, CoreError>;
}

pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use futures::future::join_all;
use std::sync::Arc;

use errors::CoreError;
use models::{
    address::Address,
    analysis::AnalysisResult,
    market::{GlobalMarket, MarketCoin},
    settings::Settings,
    wallet::Wallet,
};
use providers::{
    api_client::BackendApiClient,
    traits::{MarketDataProvider, WalletDataProvider},
};
use services::{
    address_service::AddressService, analysis_service::AnalysisService,
    portfolio_service::PortfolioService, valuation_service::ValuationService,
};
use storage::{manager::PortfolioStore, traits::KeyValueStore};

/// What happened to one wallet during [`WalletTracker::refresh_all`].
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Fresh holdings were fetched and persisted.
    Refreshed(Wallet),
    /// The wallet was removed while its fetch was in flight; result dropped.
    Discarded(Address),
    /// The fetch failed; the cached wallet is unchanged.
    Failed { address: Address, error: CoreError },
}

impl RefreshOutcome {
    pub fn address(&self) -> &Address {
        match self {
            RefreshOutcome::Refreshed(w) => &w.address,
            RefreshOutcome::Discarded(a) => a,
            RefreshOutcome::Failed { address, .. } => address,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RefreshOutcome::Failed { .. })
    }
}

/// Main entry point for the wallet portfolio core library.
///
/// Owned by the application root. Holds the collaborators (balance/market
/// service, local store) and the services that operate on the wallet list.
/// The list itself lives in the store; every read goes back to it, so there
/// is no second copy to drift out of sync.
#[must_use]
pub struct WalletTracker {
    settings: Settings,
    wallet_provider: Arc<dyn WalletDataProvider>,
    market_provider: Arc<dyn MarketDataProvider>,
    store: PortfolioStore,
    address_service: AddressService,
    valuation_service: ValuationService,
    analysis_service: AnalysisService,
    portfolio_service: PortfolioService,
}

impl std::fmt::Debug for WalletTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletTracker")
            .field("settings", &self.settings)
            .field("wallet_provider", &self.wallet_provider.name())
            .field("market_provider", &self.market_provider.name())
            .field("storage_key", &self.store.key())
            .finish()
    }
}

impl WalletTracker {
    /// Tracker talking to the REST backend configured in `settings`.
    pub fn new(settings: Settings, store: Box<dyn KeyValueStore>) -> Self {
        let client = Arc::new(BackendApiClient::new(&settings));
        Self::with_providers(settings, client.clone(), client, store)
    }

    /// Tracker with explicit collaborators (alternative backends, tests).
    pub fn with_providers(
        settings: Settings,
        wallet_provider: Arc<dyn WalletDataProvider>,
        market_provider: Arc<dyn MarketDataProvider>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            address_service: AddressService::new(settings.alias_suffix.clone()),
            store: PortfolioStore::new(store, settings.storage_key.clone()),
            valuation_service: ValuationService::new(),
            analysis_service: AnalysisService::new(),
            portfolio_service: PortfolioService::new(),
            wallet_provider,
            market_provider,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Addresses ───────────────────────────────────────────────────

    /// Validate hex input or resolve an alias, without touching the list.
    pub async fn normalize_address(&self, input: &str) -> Result<Address, CoreError> {
        self.address_service
            .normalize(input, self.wallet_provider.as_ref())
            .await
    }

    // ── Wallet Management ───────────────────────────────────────────

    /// Validate/resolve `input`, fetch and value its holdings, then persist.
    ///
    /// All-or-nothing: any failure along the way leaves the stored list
    /// untouched.
    pub async fn add_wallet(&self, input: &str) -> Result<Wallet, CoreError> {
        let address = self.normalize_address(input).await?;

        // Cheap early rejection before the network round trip.
        let current = self.store.load()?;
        self.portfolio_service.ensure_not_tracked(&current, &address)?;

        let data = self.wallet_provider.fetch_holdings(&address).await?;
        let wallet = self.valuation_service.value_wallet(data);

        // Re-checked against the freshly loaded list inside the update.
        self.store.update(|wallets| {
            self.portfolio_service.add_wallet(wallets, wallet.clone())
        })?;

        log::info!(
            "tracking wallet {} ({} holdings, ${:.2})",
            wallet.address.short(),
            wallet.token_count,
            wallet.total_value
        );
        Ok(wallet)
    }

    /// Stop tracking an address. Returns the removed wallet.
    pub fn remove_wallet(&self, address: &str) -> Result<Wallet, CoreError> {
        let removed = self
            .store
            .update(|wallets| self.portfolio_service.remove_wallet(wallets, address))?;
        log::info!("removed wallet {}", removed.address.short());
        Ok(removed)
    }

    /// Refetch one wallet and replace its holdings.
    ///
    /// On a fetch error the cached wallet is left as it was. If the wallet
    /// was removed while the fetch was in flight the result is discarded and
    /// `Ok(None)` returned.
    pub async fn refresh_wallet(&self, address: &str) -> Result<Option<Wallet>, CoreError> {
        let tracked = self
            .wallet(address)?
            .ok_or_else(|| CoreError::WalletNotFound(address.trim().to_string()))?;

        let data = self.wallet_provider.fetch_holdings(&tracked.address).await?;
        self.merge(self.valuation_service.value_wallet(data))
    }

    /// Refetch every tracked wallet concurrently.
    ///
    /// Failures are isolated per wallet; each success is merged on its own,
    /// against the current persisted list.
    pub async fn refresh_all(&self) -> Result<Vec<RefreshOutcome>, CoreError> {
        let tracked = self.store.load()?;

        let fetches = tracked.iter().map(|w| {
            let provider = Arc::clone(&self.wallet_provider);
            let address = w.address.clone();
            async move {
                let result = provider.fetch_holdings(&address).await;
                (address, result)
            }
        });

        let mut outcomes = Vec::with_capacity(tracked.len());
        for (address, result) in join_all(fetches).await {
            let outcome = match result {
                Ok(data) => match self.merge(self.valuation_service.value_wallet(data)) {
                    Ok(Some(wallet)) => RefreshOutcome::Refreshed(wallet),
                    Ok(None) => RefreshOutcome::Discarded(address),
                    Err(error) => RefreshOutcome::Failed { address, error },
                },
                Err(error) => {
                    log::warn!("refresh failed for {}: {error}", address.short());
                    RefreshOutcome::Failed { address, error }
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// All tracked wallets, in the order they were added.
    pub fn wallets(&self) -> Result<Vec<Wallet>, CoreError> {
        self.store.load()
    }

    /// A single tracked wallet (case-insensitive address match).
    pub fn wallet(&self, address: &str) -> Result<Option<Wallet>, CoreError> {
        let wallets = self.store.load()?;
        Ok(self.portfolio_service.find(&wallets, address).cloned())
    }

    fn merge(&self, refreshed: Wallet) -> Result<Option<Wallet>, CoreError> {
        let address = refreshed.address.clone();
        let merged = self
            .store
            .update(|wallets| Ok(self.portfolio_service.merge_refresh(wallets, refreshed)))?;
        if merged.is_none() {
            log::info!("wallet {} no longer tracked; refresh discarded", address.short());
        }
        Ok(merged)
    }

    // ── Value & Analysis ────────────────────────────────────────────

    /// Sum of every wallet's total, recomputed from the stored list.
    pub fn total_value(&self) -> Result<f64, CoreError> {
        let wallets = self.store.load()?;
        Ok(self.valuation_service.total_portfolio_value(&wallets))
    }

    /// Diversification and risk view over all tracked wallets.
    pub fn analyze(&self) -> Result<AnalysisResult, CoreError> {
        let wallets = self.store.load()?;
        Ok(self.analysis_service.analyze(&wallets))
    }

    // ── Market ──────────────────────────────────────────────────────

    /// Top coins by market cap; `None` uses the configured default limit.
    pub async fn top_markets(&self, limit: Option<u32>) -> Result<Vec<MarketCoin>, CoreError> {
        let limit = limit.unwrap_or(self.settings.market_top_limit);
        self.market_provider.top_coins(limit).await
    }

    pub async fn global_market(&self) -> Result<GlobalMarket, CoreError> {
        self.market_provider.global_market().await
    }
}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::dto::{
    parse_timestamp, GlobalMarketResponse, LegacyBalanceResponse, LegacyTokensResponse,
    RealHoldingsResponse, ResolveResponse, TopMarketResponse,
};
use super::traits::{MarketDataProvider, WalletDataProvider};
use crate::errors::CoreError;
use crate::models::address::Address;
use crate::models::holding::RawHolding;
use crate::models::market::{GlobalMarket, MarketCoin};
use crate::models::settings::Settings;
use crate::models::wallet::{HoldingsPayload, RawWalletData};

/// Upper bound the market listing accepts for `limit`.
pub const MAX_MARKET_LIMIT: u32 = 250;

/// Statuses from `/real-holdings` meaning the deployment has no enrichment
/// endpoint at all. Only these switch to the legacy endpoints; any other
/// failure is reported to the caller.
const ENRICHMENT_UNAVAILABLE: [StatusCode; 2] = [StatusCode::NOT_FOUND, StatusCode::NOT_IMPLEMENTED];

/// REST client for the wallet/market backend.
///
/// - **Holdings**: `/api/wallet/{address}/real-holdings`, falling back to the
///   legacy `/balance` + `/tokens` pair when enrichment is not deployed.
/// - **Names**: `/api/hlnames/resolve/{alias}`
/// - **Market**: `/api/market/top`, `/api/market/global`
///
/// No retries: a failed call is reported once and the caller decides.
pub struct BackendApiClient {
    client: Client,
    base_url: String,
    native_symbol: String,
    native_name: String,
}

impl BackendApiClient {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            native_symbol: settings.native_symbol.clone(),
            native_name: settings.native_name.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL plus `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CoreError::Network(format!("Invalid API base URL {:?}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| CoreError::Network(format!("API base URL {:?} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, CoreError> {
        let resp = request.send().await?;
        Self::decode(resp, path).await
    }

    /// Non-2xx statuses and undecodable bodies are both network errors.
    async fn decode<T: DeserializeOwned>(resp: Response, path: &str) -> Result<T, CoreError> {
        let status = resp.status();
        if !status.is_success() {
            // Error bodies usually carry `{ success: false, error }`; keep the text.
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .or_else(|| v.get("message"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                });
            return Err(CoreError::Network(match detail {
                Some(detail) => format!("HTTP {status} from {path}: {detail}"),
                None => format!("HTTP {status} from {path}"),
            }));
        }

        resp.json::<T>()
            .await
            .map_err(|e| CoreError::Network(format!("Invalid response from {path}: {e}")))
    }

    async fn request_real_holdings(&self, address: &Address) -> Result<(Response, String), CoreError> {
        let url = self.url(&["api", "wallet", address.as_str(), "real-holdings"])?;
        let path = url.path().to_string();
        let resp = self.client.get(url).send().await?;
        Ok((resp, path))
    }

    /// Enriched holdings: prices, values and the wallet total.
    pub async fn fetch_real_holdings(&self, address: &Address) -> Result<RawWalletData, CoreError> {
        let (resp, path) = self.request_real_holdings(address).await?;
        Self::read_real_holdings(address, resp, path).await
    }

    async fn read_real_holdings(
        address: &Address,
        resp: Response,
        path: String,
    ) -> Result<RawWalletData, CoreError> {
        let resp: RealHoldingsResponse = Self::decode(resp, &path).await?;

        if !resp.success {
            return Err(CoreError::Api {
                endpoint: path,
                message: resp.failure_message(),
            });
        }

        let fetched_at = resp.timestamp.as_ref().and_then(parse_timestamp);
        let holdings: Vec<RawHolding> = resp.tokens.into_iter().map(RawHolding::from).collect();

        // A wallet-level total means the service already valued everything.
        let payload = match resp.total_value {
            Some(total_value) => HoldingsPayload::Valued {
                holdings,
                total_value,
            },
            None => HoldingsPayload::Raw { holdings },
        };

        Ok(RawWalletData {
            address: address.clone(),
            payload,
            fetched_at,
        })
    }

    /// Native balance plus token balances from the legacy endpoints.
    /// No prices are available here, so everything values to zero.
    pub async fn fetch_legacy_holdings(
        &self,
        address: &Address,
    ) -> Result<RawWalletData, CoreError> {
        let url = self.url(&["api", "wallet", address.as_str(), "balance"])?;
        let path = url.path().to_string();
        let balance: LegacyBalanceResponse = self.get_json(self.client.get(url), &path).await?;

        let url = self.url(&["api", "wallet", address.as_str(), "tokens"])?;
        let path = url.path().to_string();
        let tokens: LegacyTokensResponse = self.get_json(self.client.get(url), &path).await?;

        let mut holdings = Vec::with_capacity(tokens.tokens.len() + 1);
        holdings.push(RawHolding::native(
            self.native_symbol.clone(),
            self.native_name.clone(),
            super::dto::balance_to_string(&balance.balance),
            None,
        ));
        holdings.extend(tokens.tokens.into_iter().map(RawHolding::from));

        Ok(RawWalletData::raw(address.clone(), holdings))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl WalletDataProvider for BackendApiClient {
    fn name(&self) -> &str {
        "Backend API"
    }

    async fn fetch_holdings(&self, address: &Address) -> Result<RawWalletData, CoreError> {
        let (resp, path) = self.request_real_holdings(address).await?;
        if ENRICHMENT_UNAVAILABLE.contains(&resp.status()) {
            log::warn!(
                "{path} answered {}; using legacy endpoints for {}",
                resp.status(),
                address.short()
            );
            return self.fetch_legacy_holdings(address).await;
        }
        Self::read_real_holdings(address, resp, path).await
    }

    async fn resolve_alias(&self, alias: &str) -> Result<String, CoreError> {
        let url = self.url(&["api", "hlnames", "resolve", alias.trim()])?;
        let path = url.path().to_string();
        let resp: ResolveResponse = self.get_json(self.client.get(url), &path).await?;

        if !resp.success {
            return Err(CoreError::Api {
                endpoint: path,
                message: resp
                    .error
                    .or(resp.message)
                    .unwrap_or_else(|| format!("{alias} could not be resolved")),
            });
        }

        resp.data
            .and_then(|d| d.address)
            .ok_or_else(|| CoreError::Api {
                endpoint: path,
                message: "response did not contain an address".into(),
            })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for BackendApiClient {
    fn name(&self) -> &str {
        "Backend API"
    }

    async fn top_coins(&self, limit: u32) -> Result<Vec<MarketCoin>, CoreError> {
        let limit = limit.clamp(1, MAX_MARKET_LIMIT);
        let url = self.url(&["api", "market", "top"])?;
        let path = url.path().to_string();
        let request = self.client.get(url).query(&[("limit", limit)]);
        let resp: TopMarketResponse = self.get_json(request, &path).await?;

        if !resp.success {
            return Err(CoreError::Api {
                endpoint: path,
                message: resp.error.unwrap_or_else(|| "market data unavailable".into()),
            });
        }

        Ok(resp
            .data
            .into_iter()
            .take(limit as usize)
            .map(MarketCoin::from)
            .collect())
    }

    async fn global_market(&self) -> Result<GlobalMarket, CoreError> {
        let url = self.url(&["api", "market", "global"])?;
        let path = url.path().to_string();
        let resp: GlobalMarketResponse = self.get_json(self.client.get(url), &path).await?;

        match (resp.success, resp.data) {
            (true, Some(data)) => Ok(GlobalMarket::from(data)),
            (_, _) => Err(CoreError::Api {
                endpoint: path,
                message: resp
                    .error
                    .unwrap_or_else(|| "global market data unavailable".into()),
            }),
        }
    }
}

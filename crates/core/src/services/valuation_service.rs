use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::models::holding::{Holding, RawHolding};
use crate::models::wallet::{HoldingsPayload, RawWalletData, Wallet};

/// Strictly parse a balance string as a non-negative decimal.
///
/// Accepts plain (`"12.5"`) and scientific (`"1.2e3"`) notation. Empty,
/// non-numeric, negative or out-of-range (beyond 28 significant digits)
/// input is [`CoreError::MalformedData`].
pub fn try_parse_balance(s: &str) -> Result<Decimal, CoreError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MalformedData("empty balance".into()));
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| CoreError::MalformedData(format!("balance {trimmed:?}: {e}")))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::MalformedData(format!(
            "balance {trimmed:?} is negative"
        )));
    }
    Ok(value)
}

/// Lenient balance parser used by valuation: malformed input is worth zero.
///
/// Upstream data occasionally carries junk in a single token row; that row
/// contributes nothing instead of failing the whole wallet.
pub fn parse_balance(s: &str) -> Decimal {
    try_parse_balance(s).unwrap_or_else(|e| {
        log::debug!("{e}; valuing as zero");
        Decimal::ZERO
    })
}

/// Turns fetched holdings into a valued, sorted [`Wallet`].
///
/// Pure computation, no I/O. Either trusts the service's figures
/// (pre-valued payload) or multiplies balance × price itself (raw payload).
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    pub fn value_wallet(&self, data: RawWalletData) -> Wallet {
        let (raw, trusted_total) = match data.payload {
            HoldingsPayload::Valued {
                holdings,
                total_value,
            } => (holdings, Some(total_value)),
            HoldingsPayload::Raw { holdings } => (holdings, None),
        };

        let mut holdings: Vec<Holding> = Self::filter_native(raw)
            .into_iter()
            .map(|h| {
                let usd_value = match trusted_total {
                    Some(_) => h.usd_value.filter(|v| v.is_finite()).unwrap_or(0.0),
                    None => Self::holding_value(&h.balance, h.price),
                };
                Holding {
                    symbol: h.symbol,
                    name: h.name,
                    balance: h.balance,
                    decimals: h.decimals,
                    contract_address: h.contract_address,
                    price: h.price,
                    usd_value,
                    price_change_24h: h.price_change_24h,
                    is_native: h.is_native,
                }
            })
            .collect();

        // Vec::sort_by is stable: equal values keep their input order.
        holdings.sort_by(|a, b| b.usd_value.total_cmp(&a.usd_value));

        let total_value = match trusted_total {
            Some(total) => total,
            None => holdings.iter().map(|h| h.usd_value).sum(),
        };

        Wallet {
            address: data.address,
            token_count: holdings.len(),
            holdings,
            total_value,
            last_updated: Some(data.fetched_at.unwrap_or_else(Utc::now)),
        }
    }

    /// Sum of every wallet's cached total. Recomputed on each call.
    pub fn total_portfolio_value(&self, wallets: &[Wallet]) -> f64 {
        wallets.iter().map(|w| w.total_value).sum()
    }

    /// balance × price in USD. Missing or non-finite prices count as zero.
    pub fn holding_value(balance: &str, price: Option<f64>) -> f64 {
        let price = price.filter(|p| p.is_finite()).unwrap_or(0.0);
        if price == 0.0 {
            return 0.0;
        }
        parse_balance(balance).to_f64().unwrap_or(0.0) * price
    }

    /// Keep at most one native holding, and drop it when its balance is zero
    /// or absent. Later rows flagged native are kept as ordinary tokens.
    fn filter_native(raw: Vec<RawHolding>) -> Vec<RawHolding> {
        let mut seen_native = false;
        raw.into_iter()
            .filter_map(|mut h| {
                if !h.is_native {
                    return Some(h);
                }
                if seen_native {
                    log::warn!("second native holding {} treated as a token", h.symbol);
                    h.is_native = false;
                    return Some(h);
                }
                seen_native = true;
                if parse_balance(&h.balance).is_zero() {
                    None
                } else {
                    Some(h)
                }
            })
            .collect()
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

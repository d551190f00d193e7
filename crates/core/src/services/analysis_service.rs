use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::analysis::{AnalysisResult, RiskLevel, SymbolAllocation};
use crate::models::wallet::Wallet;
use crate::services::valuation_service::{parse_balance, ValuationService};

/// Share (percent) up to which the top holding costs no diversification points.
const FULL_CREDIT_SHARE_PCT: f64 = 20.0;
/// Above this share the portfolio is High risk.
const HIGH_RISK_SHARE_PCT: f64 = 70.0;
/// Below this share (with enough symbols) the portfolio is Low risk.
const LOW_RISK_SHARE_PCT: f64 = 30.0;
/// Low risk also needs strictly more distinct symbols than this.
const LOW_RISK_MIN_TOKENS: usize = 5;
/// Above this share the recommendation is a concentration warning.
const CONCENTRATION_WARNING_PCT: f64 = 60.0;
/// Fewer distinct symbols than this gets the "add more tokens" advice.
const FEW_TOKENS: usize = 3;
/// Scores above this get the positive message.
const WELL_DIVERSIFIED_SCORE: f64 = 80.0;

pub const NO_HOLDING: &str = "N/A";
pub const EMPTY_RECOMMENDATION: &str = "Add wallets with token balances to see portfolio analysis.";

/// Computes the diversification/risk view over all tracked wallets.
///
/// Stateless: every call re-derives the result from the wallets it is given.
pub struct AnalysisService {
    valuation_service: ValuationService,
}

impl AnalysisService {
    pub fn new() -> Self {
        Self {
            valuation_service: ValuationService::new(),
        }
    }

    pub fn analyze(&self, wallets: &[Wallet]) -> AnalysisResult {
        let total_value = self.valuation_service.total_portfolio_value(wallets);
        if wallets.is_empty() || total_value <= 0.0 || !total_value.is_finite() {
            return Self::empty_result();
        }

        let allocations = Self::merge_by_symbol(wallets, total_value);
        let token_count = allocations.len();

        // allocations is sorted largest first, so the head is the top holding
        let (top_holding, top_holding_share) = allocations
            .first()
            .map(|a| (a.symbol.clone(), a.share_pct))
            .unwrap_or_else(|| (NO_HOLDING.to_string(), 0.0));

        let diversification_score = Self::diversification_score(top_holding_share);
        let risk_level = Self::risk_level(top_holding_share, token_count);
        let recommendation = Self::recommendation(
            &top_holding,
            top_holding_share,
            token_count,
            diversification_score,
        );

        AnalysisResult {
            total_value,
            top_holding,
            top_holding_share,
            token_count,
            diversification_score,
            risk_level,
            recommendation,
            allocations,
        }
    }

    /// The canned result for a portfolio with nothing of value in it.
    pub fn empty_result() -> AnalysisResult {
        AnalysisResult {
            total_value: 0.0,
            top_holding: NO_HOLDING.to_string(),
            top_holding_share: 0.0,
            token_count: 0,
            diversification_score: 0.0,
            risk_level: RiskLevel::Low,
            recommendation: EMPTY_RECOMMENDATION.to_string(),
            allocations: Vec::new(),
        }
    }

    /// 100 at or below 20% top share, minus one point per percent above,
    /// clamped to 0..=100.
    pub fn diversification_score(top_share_pct: f64) -> f64 {
        (100.0 - (top_share_pct - FULL_CREDIT_SHARE_PCT)).clamp(0.0, 100.0)
    }

    /// High wins outright; Low needs both a small top share and many symbols.
    pub fn risk_level(top_share_pct: f64, token_count: usize) -> RiskLevel {
        if top_share_pct > HIGH_RISK_SHARE_PCT {
            RiskLevel::High
        } else if top_share_pct < LOW_RISK_SHARE_PCT && token_count > LOW_RISK_MIN_TOKENS {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    }

    /// First matching rule wins; several can hold at once.
    pub fn recommendation(
        top_symbol: &str,
        top_share_pct: f64,
        token_count: usize,
        diversification_score: f64,
    ) -> String {
        if top_share_pct > CONCENTRATION_WARNING_PCT {
            format!(
                "High concentration in {top_symbol} ({top_share_pct:.1}% of portfolio). \
                 Consider diversifying to reduce risk."
            )
        } else if token_count < FEW_TOKENS {
            "Consider adding more tokens to diversify your portfolio.".to_string()
        } else if diversification_score > WELL_DIVERSIFIED_SCORE {
            "Your portfolio is well diversified. Keep it up!".to_string()
        } else {
            format!("Consider rebalancing your {top_symbol} position to improve diversification.")
        }
    }

    /// Merge holdings with the exact same symbol across wallets.
    ///
    /// Output is sorted by descending value; buckets with equal value keep
    /// first-seen order, so the top holding on a tie is the one seen first.
    fn merge_by_symbol(wallets: &[Wallet], total_value: f64) -> Vec<SymbolAllocation> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut buckets: Vec<(String, f64, Decimal)> = Vec::new();

        for holding in wallets.iter().flat_map(|w| &w.holdings) {
            let balance = parse_balance(&holding.balance);
            match index.get(holding.symbol.as_str()) {
                Some(&i) => {
                    let bucket = &mut buckets[i];
                    bucket.1 += holding.usd_value;
                    bucket.2 = bucket.2.checked_add(balance).unwrap_or(bucket.2);
                }
                None => {
                    index.insert(holding.symbol.as_str(), buckets.len());
                    buckets.push((holding.symbol.clone(), holding.usd_value, balance));
                }
            }
        }

        let mut allocations: Vec<SymbolAllocation> = buckets
            .into_iter()
            .map(|(symbol, usd_value, balance)| SymbolAllocation {
                symbol,
                usd_value,
                balance,
                share_pct: usd_value / total_value * 100.0,
            })
            .collect();

        allocations.sort_by(|a, b| b.usd_value.total_cmp(&a.usd_value));
        allocations
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

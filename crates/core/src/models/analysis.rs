use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coarse risk classification derived from concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// One symbol's holdings merged across all wallets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolAllocation {
    pub symbol: String,

    /// Sum of `usd_value` for this symbol across wallets
    pub usd_value: f64,

    /// Sum of parsed balances; unparseable balances contribute zero
    pub balance: Decimal,

    /// usd_value / total portfolio value × 100
    pub share_pct: f64,
}

/// Aggregate view of the whole portfolio. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_value: f64,

    /// Symbol with the largest merged USD value, "N/A" for an empty portfolio
    pub top_holding: String,

    /// Top holding's share of total value, in percent
    pub top_holding_share: f64,

    /// Number of distinct symbols across all wallets
    pub token_count: usize,

    /// 0..=100; 100 when no symbol exceeds 20% of the portfolio
    pub diversification_score: f64,

    pub risk_level: RiskLevel,

    pub recommendation: String,

    /// Per-symbol breakdown, largest first
    pub allocations: Vec<SymbolAllocation>,
}

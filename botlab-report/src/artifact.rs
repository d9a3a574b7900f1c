//! The decoded results artifact.
//!
//! This is the document the strategy tester's expert advisor writes at
//! the end of a run. The wire format is JSON; field names follow the
//! producer's schema (`ea_name`, `final`, ...) and are mapped to
//! clearer Rust names where they differ.
//!
//! Aggregate blocks under `results` other than `balance` are optional:
//! older artifacts omit some of them, and downstream rendering simply
//! drops the corresponding summary lines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for a structurally-parsed artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("initial balance must be strictly positive, got {0}")]
    NonPositiveInitialBalance(f64),
}

/// Complete decoded results artifact.
///
/// `trades` preserves producer order exactly. That order is the
/// authoritative chronology: the producer's running totals were
/// accumulated in it, so it is never re-sorted by parsed timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultArtifact {
    pub metadata: Metadata,
    pub results: Results,
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

impl ResultArtifact {
    /// Rejects documents the analytics cannot work with.
    ///
    /// A non-positive initial balance makes every percentage and the
    /// CAGR base undefined, so it is a hard error rather than a
    /// degraded metric.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.results.balance.initial <= 0.0 {
            return Err(ArtifactError::NonPositiveInitialBalance(
                self.results.balance.initial,
            ));
        }
        Ok(())
    }
}

/// Run identification and test period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(rename = "ea_name")]
    pub strategy_name: String,

    #[serde(rename = "ea_version")]
    pub strategy_version: String,

    pub symbol: String,

    pub timeframe: String,

    /// Test period start, as the producer formatted it (see `timestamp`).
    pub test_start: String,

    /// Test period end, same caveat as `test_start`.
    pub test_end: String,
}

/// Aggregate results block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Results {
    pub balance: Balance,

    #[serde(default)]
    pub profit: Option<Profit>,

    #[serde(default)]
    pub drawdown: Option<Drawdown>,

    #[serde(default)]
    pub statistics: Option<Statistics>,

    #[serde(default)]
    pub trades: Option<TradeCounts>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub initial: f64,

    #[serde(rename = "final")]
    pub final_balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profit {
    pub net: f64,
    pub net_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drawdown {
    /// Maximum equity drawdown in percent.
    pub max_percent: f64,

    /// Relative drawdown in percent. Missing in artifacts written
    /// before the producer started reporting it.
    #[serde(default)]
    pub max_relative_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    pub profit_factor: f64,
    pub win_rate: f64,
    pub avg_trade: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeCounts {
    pub total: u32,
    pub winning: u32,
    pub losing: u32,
}

/// One closed trade in the producer's ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    /// Close timestamp as a string; parsed lazily by the equity
    /// reconstructor because the format varies.
    pub close_time: String,

    /// Signed monetary profit of the trade.
    pub profit: f64,
}

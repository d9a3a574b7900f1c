//! Equity curve reconstruction from the trade ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artifact::ResultArtifact;
use crate::timestamp::{parse_timestamp, TimestampError};

/// Single point in the reconstructed equity curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EquityPoint {
    pub time: NaiveDateTime,
    pub equity: f64,
}

#[derive(Debug, Error)]
pub enum EquityError {
    #[error("unparseable timestamp in {field}: {source}")]
    BadTimestamp {
        field: String,
        source: TimestampError,
    },
}

/// Replays the trade ledger against the initial balance.
///
/// Returns the synthetic start point `(test_start, initial)` followed
/// by one point per trade at its close time, so N trades always yield
/// N+1 points. The ledger's order is authoritative: re-sorting by
/// parsed timestamp would desynchronize the running sum from the
/// producer's own totals. Any unparseable timestamp is fatal for the
/// whole series — a curve silently missing trades would be wrong.
pub fn reconstruct_equity(artifact: &ResultArtifact) -> Result<Vec<EquityPoint>, EquityError> {
    let start =
        parse_timestamp(&artifact.metadata.test_start).map_err(|source| EquityError::BadTimestamp {
            field: "metadata.test_start".to_string(),
            source,
        })?;

    let initial = artifact.results.balance.initial;
    let mut series = Vec::with_capacity(artifact.trades.len() + 1);
    series.push(EquityPoint {
        time: start,
        equity: initial,
    });

    let mut cumulative = 0.0;
    for (i, trade) in artifact.trades.iter().enumerate() {
        let time = parse_timestamp(&trade.close_time).map_err(|source| EquityError::BadTimestamp {
            field: format!("trades[{i}].close_time"),
            source,
        })?;
        cumulative += trade.profit;
        series.push(EquityPoint {
            time,
            equity: initial + cumulative,
        });
    }

    Ok(series)
}

/// Cross-checks the reconstructed final equity against the artifact's
/// own reported final balance.
///
/// The artifact's aggregate is the only available oracle, so a
/// divergence is surfaced as a data-quality warning rather than an
/// error.
pub fn consistency_warnings(series: &[EquityPoint], artifact: &ResultArtifact) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(last) = series.last() {
        let reported = artifact.results.balance.final_balance;
        if (last.equity - reported).abs() > 0.01 {
            warnings.push(format!(
                "reconstructed final equity {:.2} diverges from reported final balance {:.2}",
                last.equity, reported
            ));
        }
    }

    warnings
}

//! Plain-text backtest summary.

use std::fmt::Write;

use crate::artifact::ResultArtifact;
use crate::metrics::DerivedMetrics;

const RULE: &str = "==================================================";

/// Renders the deterministic text summary.
///
/// Fields backed by absent aggregate blocks or undefined derived
/// metrics are omitted outright — no placeholder rows. Monetary
/// amounts print as `$x.xx`, percentages as `x.xx%`.
pub fn render_summary(
    artifact: &ResultArtifact,
    metrics: &DerivedMetrics,
    warnings: &[String],
) -> String {
    let meta = &artifact.metadata;
    let results = &artifact.results;
    let mut out = String::new();

    // Writing into a String is infallible.
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "BACKTEST SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Strategy: {} v{}", meta.strategy_name, meta.strategy_version);
    let _ = writeln!(out, "Symbol: {}", meta.symbol);
    let _ = writeln!(out, "Timeframe: {}", meta.timeframe);
    let _ = writeln!(out, "Period: {} to {}", meta.test_start, meta.test_end);
    let _ = writeln!(out);
    let _ = writeln!(out, "Initial Balance: ${:.2}", results.balance.initial);
    let _ = writeln!(out, "Final Balance: ${:.2}", results.balance.final_balance);
    if let Some(profit) = &results.profit {
        let _ = writeln!(out, "Net Profit: ${:.2} ({:.2}%)", profit.net, profit.net_percent);
    }

    if let Some(drawdown) = &results.drawdown {
        let _ = writeln!(out);
        let _ = writeln!(out, "Max Drawdown (Equity): {:.2}%", drawdown.max_percent);
        if let Some(relative) = drawdown.max_relative_percent {
            let _ = writeln!(out, "Max Drawdown (Relative): {relative:.2}%");
        }
    }

    if metrics.cagr.is_some() || metrics.calmar.is_some() {
        let _ = writeln!(out);
        if let Some(cagr) = metrics.cagr {
            let _ = writeln!(out, "CAGR: {cagr:.2}%");
        }
        if let Some(calmar) = metrics.calmar {
            let _ = writeln!(out, "Calmar Ratio: {calmar:.2}");
        }
    }

    if let Some(counts) = &results.trades {
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Trades: {}", counts.total);
        match &results.statistics {
            Some(stats) => {
                let _ = writeln!(out, "Winners: {} ({:.2}%)", counts.winning, stats.win_rate);
            }
            None => {
                let _ = writeln!(out, "Winners: {}", counts.winning);
            }
        }
        let _ = writeln!(out, "Losers: {}", counts.losing);
    }
    if let Some(stats) = &results.statistics {
        let _ = writeln!(out, "Profit Factor: {:.2}", stats.profit_factor);
        let _ = writeln!(out, "Avg Trade: ${:.2}", stats.avg_trade);
    }

    if !warnings.is_empty() {
        let _ = writeln!(out);
        for warning in warnings {
            let _ = writeln!(out, "WARNING: {warning}");
        }
    }

    let _ = writeln!(out, "{RULE}");
    out
}

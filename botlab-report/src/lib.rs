//! Backtest results analytics.
//!
//! Turns a strategy-tester results artifact into performance
//! analytics: locates the newest artifact dropped by the tester
//! agents, decodes it regardless of text encoding, replays the trade
//! ledger into an equity curve, derives CAGR and Calmar, and renders
//! a text summary plus an equity-curve chart.
//!
//! Pipeline order: locate → decode → reconstruct → derive → render.
//! Each stage is a pure function of the previous stage's output; no
//! state survives an invocation, and nothing is retried — retry
//! policy belongs to whatever orchestration calls this crate.

pub mod artifact;
pub mod decode;
pub mod equity;
pub mod locate;
pub mod metrics;
pub mod report;
pub mod timestamp;

pub use artifact::{ArtifactError, ResultArtifact, TradeRecord};
pub use decode::{decode_artifact, DecodeError};
pub use equity::{consistency_warnings, reconstruct_equity, EquityError, EquityPoint};
pub use locate::{find_latest_artifact, LocateError};
pub use metrics::DerivedMetrics;
pub use report::{chart_path_for, render_equity_chart, render_summary, ChartError};
pub use timestamp::{parse_timestamp, TimestampError};

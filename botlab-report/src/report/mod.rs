//! Report rendering: text summary, equity chart, CSV exports.

pub mod chart;
pub mod export;
pub mod summary;

pub use chart::{chart_path_for, render_equity_chart, ChartError};
pub use summary::render_summary;

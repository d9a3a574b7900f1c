//! Equity-curve chart rendering.
//!
//! Produces a PNG sized for report use: the equity line over time, a
//! dashed reference line at the initial balance, a shaded band between
//! the two colored by net gain/loss sign, and a stats panel overlay.

use chrono::{Duration, NaiveDateTime};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::artifact::ResultArtifact;
use crate::equity::EquityPoint;
use crate::metrics::DerivedMetrics;

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 900;

const EQUITY_LINE: RGBColor = RGBColor(0x2e, 0x86, 0xab);
const GAIN_FILL: RGBColor = RGBColor(0x06, 0xd6, 0xa0);
const LOSS_FILL: RGBColor = RGBColor(0xef, 0x47, 0x6f);
const REFERENCE: RGBColor = RGBColor(0x80, 0x80, 0x80);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("equity series has no trades to chart")]
    EmptySeries,

    #[error("chart backend error: {0}")]
    Backend(String),

    #[error("failed to finalize chart {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Output path for the chart: the artifact's extension replaced by an
/// `_equity_curve.png` suffix.
pub fn chart_path_for(artifact_path: &Path) -> PathBuf {
    let stem = artifact_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("backtest");
    artifact_path.with_file_name(format!("{stem}_equity_curve.png"))
}

/// Renders the equity-curve chart to `path`.
///
/// Refuses a series without trades: a single synthetic start point
/// styled as a curve would be misleading. The image is drawn into a
/// sibling temp file and renamed into place, so an aborted render
/// never leaves a truncated PNG that could pass for a finished one.
pub fn render_equity_chart(
    path: &Path,
    artifact: &ResultArtifact,
    series: &[EquityPoint],
    metrics: &DerivedMetrics,
) -> Result<(), ChartError> {
    if series.len() < 2 {
        return Err(ChartError::EmptySeries);
    }

    let tmp = path.with_extension("png.tmp");
    draw(&tmp, artifact, series, metrics)?;
    std::fs::rename(&tmp, path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn draw(
    path: &Path,
    artifact: &ResultArtifact,
    series: &[EquityPoint],
    metrics: &DerivedMetrics,
) -> Result<(), ChartError> {
    let initial = artifact.results.balance.initial;
    let final_equity = series[series.len() - 1].equity;

    let mut t_min = series[0].time;
    let mut t_max = series[0].time;
    let mut e_min = initial;
    let mut e_max = initial;
    for point in series {
        t_min = t_min.min(point.time);
        t_max = t_max.max(point.time);
        e_min = e_min.min(point.equity);
        e_max = e_max.max(point.equity);
    }
    if t_min == t_max {
        // Degenerate single-instant series still needs a non-empty axis.
        t_max += Duration::seconds(1);
    }
    let pad = ((e_max - e_min) * 0.05).max(1.0);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(to_backend)?;

    let meta = &artifact.metadata;
    let title = format!(
        "{} - {} {}  Equity Curve",
        meta.strategy_name, meta.symbol, meta.timeframe
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(
            RangedDateTime::from(t_min..t_max),
            (e_min - pad)..(e_max + pad),
        )
        .map_err(to_backend)?;

    chart
        .configure_mesh()
        .x_labels(10)
        .x_label_formatter(&|t: &NaiveDateTime| t.format("%Y-%m").to_string())
        .y_label_formatter(&|v: &f64| format!("${v:.0}"))
        .x_desc("Date")
        .y_desc("Balance")
        .draw()
        .map_err(to_backend)?;

    let fill = if final_equity >= initial {
        GAIN_FILL
    } else {
        LOSS_FILL
    };
    chart
        .draw_series(AreaSeries::new(
            series.iter().map(|p| (p.time, p.equity)),
            initial,
            &fill.mix(0.2),
        ))
        .map_err(to_backend)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.time, p.equity)),
            EQUITY_LINE.stroke_width(2),
        ))
        .map_err(to_backend)?
        .label("Equity")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], EQUITY_LINE.stroke_width(2))
        });

    chart
        .draw_series(DashedLineSeries::new(
            [(t_min, initial), (t_max, initial)],
            8,
            6,
            REFERENCE.stroke_width(1),
        ))
        .map_err(to_backend)?
        .label(format!("Initial Balance (${initial:.0})"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], REFERENCE.stroke_width(1)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.9))
        .border_style(&REFERENCE)
        .draw()
        .map_err(to_backend)?;

    let panel = stats_panel(artifact, metrics, final_equity);
    for (i, line) in panel.lines().enumerate() {
        root.draw(&Text::new(
            line.to_string(),
            (120, 110 + (i as i32) * 24),
            ("monospace", 18).into_font().color(&BLACK),
        ))
        .map_err(to_backend)?;
    }

    root.present().map_err(to_backend)?;
    Ok(())
}

/// Summary statistics box drawn onto the chart. Mirrors the text
/// summary's fields; lines backed by absent data are dropped.
fn stats_panel(artifact: &ResultArtifact, metrics: &DerivedMetrics, final_equity: f64) -> String {
    let results = &artifact.results;
    let mut panel = String::new();

    let _ = writeln!(panel, "Final Balance: ${final_equity:.2}");
    if let Some(profit) = &results.profit {
        let _ = writeln!(
            panel,
            "Net Profit: ${:.2} ({:.2}%)",
            profit.net, profit.net_percent
        );
    }
    if let Some(drawdown) = &results.drawdown {
        let _ = writeln!(panel, "Max DD: {:.2}%", drawdown.max_percent);
    }
    if let Some(cagr) = metrics.cagr {
        let _ = writeln!(panel, "CAGR: {cagr:.2}%");
    }
    if let Some(calmar) = metrics.calmar {
        let _ = writeln!(panel, "Calmar: {calmar:.2}");
    }
    if let Some(stats) = &results.statistics {
        let _ = writeln!(panel, "Win Rate: {:.2}%", stats.win_rate);
        let _ = writeln!(panel, "Profit Factor: {:.2}", stats.profit_factor);
    }
    if let Some(counts) = &results.trades {
        let _ = writeln!(panel, "Total Trades: {}", counts.total);
    }

    panel
}

fn to_backend(err: impl std::fmt::Display) -> ChartError {
    ChartError::Backend(err.to_string())
}

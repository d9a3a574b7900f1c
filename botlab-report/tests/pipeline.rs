//! End-to-end pipeline tests: raw bytes in, summary text and chart out.

use botlab_report::{
    chart_path_for, consistency_warnings, decode_artifact, reconstruct_equity,
    render_equity_chart, render_summary, DerivedMetrics,
};
use tempfile::TempDir;

fn sample_json(trades: &str, drawdown_max: f64) -> String {
    format!(
        r#"{{
            "metadata": {{
                "ea_name": "a4n_bot_v2",
                "ea_version": "2.3",
                "symbol": "USDJPY",
                "timeframe": "H4",
                "test_start": "2024-01-01T00:00:00",
                "test_end": "2025-01-01T00:00:00"
            }},
            "results": {{
                "balance": {{"initial": 10000.0, "final": 10300.0}},
                "profit": {{"net": 300.0, "net_percent": 3.0}},
                "drawdown": {{"max_percent": {drawdown_max}}},
                "statistics": {{"profit_factor": 1.8, "win_rate": 50.0, "avg_trade": 150.0}},
                "trades": {{"total": 2, "winning": 1, "losing": 1}}
            }},
            "trades": [{trades}]
        }}"#
    )
}

const TWO_TRADES: &str = r#"
    {"close_time": "2024.03.01 10:00:00", "profit": 500.0},
    {"close_time": "2024-06-01 10:00:00", "profit": -200.0}
"#;

fn to_utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

#[test]
fn bytes_to_equity_series() {
    let artifact = decode_artifact(sample_json(TWO_TRADES, 4.5).as_bytes()).unwrap();
    let series = reconstruct_equity(&artifact).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series[0].equity, 10_000.0);
    assert_eq!(series[1].equity, 10_500.0);
    assert_eq!(series[2].equity, 10_300.0);
    assert!(consistency_warnings(&series, &artifact).is_empty());
}

#[test]
fn utf16_artifact_produces_identical_analytics() {
    let json = sample_json(TWO_TRADES, 4.5);
    let from_utf8 = decode_artifact(json.as_bytes()).unwrap();
    let from_utf16 = decode_artifact(&to_utf16le(&json)).unwrap();
    assert_eq!(from_utf8, from_utf16);

    let metrics_a = DerivedMetrics::compute(&from_utf8);
    let metrics_b = DerivedMetrics::compute(&from_utf16);
    assert_eq!(metrics_a, metrics_b);
}

#[test]
fn derived_metrics_over_one_year() {
    let artifact = decode_artifact(sample_json(TWO_TRADES, 4.5).as_bytes()).unwrap();
    let metrics = DerivedMetrics::compute(&artifact);

    // 366 days in 2024 → slightly over one year; +3% total.
    let years = metrics.duration_years.unwrap();
    assert!((years - 366.0 / 365.25).abs() < 1e-9);
    let cagr = metrics.cagr.unwrap();
    assert!((cagr - 2.99).abs() < 0.05, "CAGR should be ~3%, got {cagr}");
    let calmar = metrics.calmar.unwrap();
    assert!((calmar - cagr / 4.5).abs() < 1e-9);
}

#[test]
fn zero_drawdown_leaves_calmar_undefined_but_cagr_defined() {
    let artifact = decode_artifact(sample_json(TWO_TRADES, 0.0).as_bytes()).unwrap();
    let metrics = DerivedMetrics::compute(&artifact);
    assert!(metrics.cagr.is_some());
    assert!(metrics.calmar.is_none());

    let text = render_summary(&artifact, &metrics, &[]);
    assert!(text.contains("CAGR"));
    assert!(!text.contains("Calmar"));
}

#[test]
fn summary_for_empty_ledger_still_prints_counts() {
    let json = sample_json("", 4.5)
        .replace(r#""total": 2"#, r#""total": 0"#)
        .replace(r#""winning": 1"#, r#""winning": 0"#)
        .replace(r#""losing": 1"#, r#""losing": 0"#);
    let artifact = decode_artifact(json.as_bytes()).unwrap();
    assert!(artifact.trades.is_empty());

    let series = reconstruct_equity(&artifact).unwrap();
    assert_eq!(series.len(), 1);

    let metrics = DerivedMetrics::compute(&artifact);
    let text = render_summary(&artifact, &metrics, &[]);
    assert!(text.contains("Total Trades: 0"));
}

#[test]
fn empty_ledger_never_produces_a_chart_file() {
    let artifact = decode_artifact(sample_json("", 4.5).as_bytes()).unwrap();
    let series = reconstruct_equity(&artifact).unwrap();
    let metrics = DerivedMetrics::compute(&artifact);

    let dir = TempDir::new().unwrap();
    let chart_path = dir.path().join("backtest_equity_curve.png");
    let err = render_equity_chart(&chart_path, &artifact, &series, &metrics).unwrap_err();
    assert!(err.to_string().contains("no trades"));
    assert!(!chart_path.exists());
}

#[test]
fn chart_is_written_for_a_real_series() {
    let artifact = decode_artifact(sample_json(TWO_TRADES, 4.5).as_bytes()).unwrap();
    let series = reconstruct_equity(&artifact).unwrap();
    let metrics = DerivedMetrics::compute(&artifact);

    let dir = TempDir::new().unwrap();
    let artifact_path = dir.path().join("backtest_20240101.json");
    let chart_path = chart_path_for(&artifact_path);

    render_equity_chart(&chart_path, &artifact, &series, &metrics).unwrap();

    assert!(chart_path.exists());
    assert!(chart_path.ends_with("backtest_20240101_equity_curve.png"));
    let size = std::fs::metadata(&chart_path).unwrap().len();
    assert!(size > 0, "chart file should not be empty");
    // No temp file left behind.
    assert!(!chart_path.with_extension("png.tmp").exists());
}

#[test]
fn divergent_aggregate_surfaces_in_the_summary() {
    let json = sample_json(TWO_TRADES, 4.5).replace(r#""final": 10300.0"#, r#""final": 11000.0"#);
    let artifact = decode_artifact(json.as_bytes()).unwrap();
    let series = reconstruct_equity(&artifact).unwrap();
    let warnings = consistency_warnings(&series, &artifact);
    assert_eq!(warnings.len(), 1);

    let text = render_summary(&artifact, &DerivedMetrics::compute(&artifact), &warnings);
    assert!(text.contains("WARNING"));
}

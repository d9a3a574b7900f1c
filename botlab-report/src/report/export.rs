//! CSV export of the reconstructed series and the trade ledger.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::artifact::TradeRecord;
use crate::equity::EquityPoint;

pub fn write_equity_csv(path: &Path, series: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    writeln!(file, "time,equity")?;
    for point in series {
        writeln!(
            file,
            "{},{:.2}",
            point.time.format("%Y-%m-%dT%H:%M:%S"),
            point.equity
        )?;
    }
    Ok(())
}

pub fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    writeln!(file, "close_time,profit")?;
    for trade in trades {
        writeln!(file, "{},{:.2}", trade.close_time, trade.profit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn equity_csv_has_header_and_one_row_per_point() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("equity.csv");
        let time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let series = vec![
            EquityPoint { time, equity: 10_000.0 },
            EquityPoint {
                time: time + chrono::Duration::hours(4),
                equity: 10_500.0,
            },
        ];

        write_equity_csv(&path, &series).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "time,equity");
        assert_eq!(lines[1], "2024-01-01T00:00:00,10000.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn trades_csv_preserves_ledger_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        let trades = vec![
            TradeRecord {
                close_time: "2024.01.07 12:00:00".into(),
                profit: 120.5,
            },
            TradeRecord {
                close_time: "2024.01.09 04:00:00".into(),
                profit: -45.0,
            },
        ];

        write_trades_csv(&path, &trades).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "close_time,profit");
        assert_eq!(lines[1], "2024.01.07 12:00:00,120.50");
        assert_eq!(lines[2], "2024.01.09 04:00:00,-45.00");
    }
}

//! Derived performance metrics.
//!
//! Pure numeric functions: equity aggregates in, scalar out. Undefined
//! domains (zero duration, non-positive balance base, zero drawdown)
//! come back as `None`, never as a panic or a synthetic zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::artifact::ResultArtifact;
use crate::timestamp::parse_timestamp;

/// Metrics derived from the artifact's aggregates, as opposed to the
/// precomputed ones the producer reports directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DerivedMetrics {
    pub duration_years: Option<f64>,
    pub cagr: Option<f64>,
    pub calmar: Option<f64>,
}

impl DerivedMetrics {
    /// Derives CAGR and Calmar from the artifact.
    ///
    /// Unparseable test dates degrade to `None` here rather than
    /// failing: the derived-metrics lines of the summary are
    /// omissible, unlike the equity curve which hard-requires its
    /// timestamps.
    pub fn compute(artifact: &ResultArtifact) -> Self {
        let duration = match (
            parse_timestamp(&artifact.metadata.test_start),
            parse_timestamp(&artifact.metadata.test_end),
        ) {
            (Ok(start), Ok(end)) => Some(duration_years(start, end)),
            _ => None,
        };

        let cagr_value = duration.and_then(|years| {
            cagr(
                artifact.results.balance.initial,
                artifact.results.balance.final_balance,
                years,
            )
        });

        let calmar_value = calmar(
            cagr_value,
            artifact.results.drawdown.as_ref().map(|d| d.max_percent),
        );

        Self {
            duration_years: duration,
            cagr: cagr_value,
            calmar: calmar_value,
        }
    }
}

/// Test duration in years, using the producer's day-count convention.
pub fn duration_years(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_days() as f64 / 365.25
}

/// Compound annual growth rate in percent.
///
/// Defined only for a positive initial balance over a positive
/// duration; a negative final balance pushes the fractional power out
/// of the real domain and also yields `None`.
pub fn cagr(initial: f64, final_balance: f64, years: f64) -> Option<f64> {
    if years <= 0.0 || initial <= 0.0 {
        return None;
    }
    let value = ((final_balance / initial).powf(1.0 / years) - 1.0) * 100.0;
    value.is_finite().then_some(value)
}

/// Calmar ratio: CAGR over maximum drawdown percent.
///
/// Undefined when CAGR is undefined or the drawdown is zero (nothing
/// to normalize by).
pub fn calmar(cagr: Option<f64>, max_drawdown_percent: Option<f64>) -> Option<f64> {
    match (cagr, max_drawdown_percent) {
        (Some(c), Some(dd)) if dd > 0.0 => Some(c / dd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn duration_uses_day_count_over_365_25() {
        let years = duration_years(ts(2020, 1, 1), ts(2025, 1, 1));
        // 1827 days across one leap year boundary set.
        assert!((years - 1827.0 / 365.25).abs() < 1e-12);
    }

    #[test]
    fn cagr_doubling_over_two_years() {
        let c = cagr(10_000.0, 20_000.0, 2.0).unwrap();
        // 2^(1/2) - 1 = 41.42%
        assert!((c - 41.421356).abs() < 1e-4);
    }

    #[test]
    fn cagr_flat_balance_is_zero_percent() {
        let c = cagr(10_000.0, 10_000.0, 3.0).unwrap();
        assert!(c.abs() < 1e-12);
    }

    #[test]
    fn cagr_undefined_for_zero_duration() {
        assert_eq!(cagr(10_000.0, 12_000.0, 0.0), None);
        assert_eq!(cagr(10_000.0, 12_000.0, -1.0), None);
    }

    #[test]
    fn cagr_undefined_for_non_positive_initial() {
        assert_eq!(cagr(0.0, 12_000.0, 1.0), None);
        assert_eq!(cagr(-5_000.0, 12_000.0, 1.0), None);
    }

    #[test]
    fn cagr_undefined_for_negative_final_balance() {
        // Negative ratio under a fractional exponent is NaN; that must
        // surface as None, not propagate.
        assert_eq!(cagr(10_000.0, -2_000.0, 2.0), None);
    }

    #[test]
    fn calmar_requires_positive_drawdown() {
        assert_eq!(calmar(Some(20.0), Some(0.0)), None);
        assert_eq!(calmar(Some(20.0), Some(-3.0)), None);
        assert_eq!(calmar(Some(20.0), None), None);
        assert_eq!(calmar(None, Some(5.0)), None);
        assert_eq!(calmar(Some(20.0), Some(5.0)), Some(4.0));
    }
}

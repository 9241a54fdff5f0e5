//! Analytics engine — window filtering, return moments, and the OLS trend.
//!
//! Every function here is pure: rows in, scalars out. Given identical
//! input rows and window the output is bit-reproducible; there is no
//! randomness and no I/O.

use crate::domain::PriceRow;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Derived metrics for one symbol over one date window.
///
/// Ephemeral: recomputed per filter selection, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sample standard deviation of the non-null returns in the window.
    pub volatility: f64,
    /// Arithmetic mean of the same returns.
    pub mean_return: f64,
    /// `mean_return / volatility`, defined as exactly 0.0 when the
    /// volatility is 0 (single-row windows included). This is a policy,
    /// not a numerical accident.
    pub risk_ratio: f64,
    /// OLS fit of close on date, absent when the window has fewer than
    /// two usable price points.
    pub trend: Option<Trend>,
}

/// Ordinary-least-squares trend of close price against time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Fitted slope in price units per day.
    pub slope: f64,
    /// Coefficient of determination against the fitted line.
    pub r_squared: f64,
    /// One fitted close per regression row, aligned by date.
    pub predicted: Vec<PredictedClose>,
}

/// A single point on the fitted trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedClose {
    pub date: NaiveDate,
    pub close: f64,
}

/// Analyze the rows of a single symbol over an inclusive date window.
///
/// Rows outside `[window_start, window_end]` are discarded. The return
/// moments tolerate null returns by excluding them; the regression
/// excludes rows without a usable close price but those rows still count
/// toward the moments.
pub fn analyze(
    rows: &[PriceRow],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> AnalysisResult {
    let window: Vec<&PriceRow> = rows
        .iter()
        .filter(|r| r.date >= window_start && r.date <= window_end)
        .collect();

    let returns: Vec<f64> = window.iter().filter_map(|r| r.ret).collect();
    let volatility = sample_std_dev(&returns);
    let mean_return = mean(&returns);
    let risk_ratio = if volatility == 0.0 {
        0.0
    } else {
        mean_return / volatility
    };

    AnalysisResult {
        volatility,
        mean_return,
        risk_ratio,
        trend: fit_trend(&window),
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0.0 below two points.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Fit close ~ date over the windowed rows.
///
/// The date is converted to its proleptic-Gregorian ordinal day count
/// (days since 0001-01-01), so the slope reads as price units per
/// calendar day. Returns `None` when fewer than two rows carry a usable
/// close, or when all rows share one date (zero variance in x).
fn fit_trend(window: &[&PriceRow]) -> Option<Trend> {
    let points: Vec<(f64, f64, NaiveDate)> = window
        .iter()
        .filter(|r| r.close.is_finite())
        .map(|r| (f64::from(r.date.num_days_from_ce()), r.close, r.date))
        .collect();

    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let x_mean = points.iter().map(|p| p.0).sum::<f64>() / n;
    let y_mean = points.iter().map(|p| p.1).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|p| (p.0 - x_mean).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = points
        .iter()
        .map(|p| (p.0 - x_mean) * (p.1 - y_mean))
        .sum();

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let predicted: Vec<PredictedClose> = points
        .iter()
        .map(|p| PredictedClose {
            date: p.2,
            close: slope * p.0 + intercept,
        })
        .collect();

    let ss_res: f64 = points
        .iter()
        .zip(&predicted)
        .map(|(p, fit)| (p.1 - fit.close).powi(2))
        .sum();
    let ss_tot: f64 = points.iter().map(|p| (p.1 - y_mean).powi(2)).sum();

    // A constant series is fitted exactly by the flat line.
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(Trend {
        slope,
        r_squared,
        predicted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn row(day: u32, close: f64, ret: Option<f64>) -> PriceRow {
        PriceRow {
            date: date(day),
            close,
            volume: 1000,
            symbol: "X".into(),
            ret,
        }
    }

    // ── Moments ──

    #[test]
    fn worked_example_three_rows() {
        // closes 100 → 110 → 99: returns [None, 0.10, -0.10]
        let rows = vec![
            row(1, 100.0, None),
            row(2, 110.0, Some(0.10)),
            row(3, 99.0, Some(-0.10)),
        ];
        let result = analyze(&rows, date(1), date(3));

        assert!((result.mean_return - 0.0).abs() < 1e-12);
        // sample std-dev of [0.10, -0.10] = sqrt(0.02)
        assert!((result.volatility - 0.02_f64.sqrt()).abs() < 1e-12);
        assert!((result.risk_ratio - 0.0).abs() < 1e-12);
    }

    #[test]
    fn null_returns_are_excluded_from_moments() {
        let rows = vec![
            row(1, 100.0, None),
            row(2, 102.0, Some(0.02)),
            row(3, 104.0, Some(0.02)),
        ];
        let result = analyze(&rows, date(1), date(3));

        assert!((result.mean_return - 0.02).abs() < 1e-12);
        assert_eq!(result.volatility, 0.0); // identical returns
    }

    #[test]
    fn single_row_window_has_zero_risk_ratio_not_nan() {
        let rows = vec![row(1, 100.0, None), row(2, 110.0, Some(0.10))];
        let result = analyze(&rows, date(2), date(2));

        assert_eq!(result.volatility, 0.0);
        assert_eq!(result.risk_ratio, 0.0);
        assert!(result.risk_ratio.is_finite());
    }

    #[test]
    fn empty_window_is_all_zeros_and_no_trend() {
        let rows = vec![row(1, 100.0, None)];
        let result = analyze(&rows, date(10), date(20));

        assert_eq!(result.volatility, 0.0);
        assert_eq!(result.mean_return, 0.0);
        assert_eq!(result.risk_ratio, 0.0);
        assert!(result.trend.is_none());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let rows = vec![
            row(1, 100.0, None),
            row(2, 101.0, Some(0.01)),
            row(3, 102.0, Some(0.0099)),
            row(4, 103.0, Some(0.0098)),
        ];
        let result = analyze(&rows, date(2), date(3));
        let trend = result.trend.unwrap();

        assert_eq!(trend.predicted.len(), 2);
        assert_eq!(trend.predicted[0].date, date(2));
        assert_eq!(trend.predicted[1].date, date(3));
    }

    // ── Trend ──

    #[test]
    fn perfect_line_recovers_slope_and_r2_one() {
        // close = 2.0 per day on consecutive days
        let rows = vec![
            row(1, 100.0, None),
            row(2, 102.0, Some(0.02)),
            row(3, 104.0, Some(0.0196)),
            row(4, 106.0, Some(0.0192)),
        ];
        let result = analyze(&rows, date(1), date(4));
        let trend = result.trend.unwrap();

        assert!((trend.slope - 2.0).abs() < 1e-9);
        assert!((trend.r_squared - 1.0).abs() < 1e-12);
        for (r, fit) in rows.iter().zip(&trend.predicted) {
            assert_eq!(r.date, fit.date);
            assert!((r.close - fit.close).abs() < 1e-9);
        }
    }

    #[test]
    fn constant_series_has_zero_slope_and_r2_one() {
        let rows = vec![
            row(1, 100.0, None),
            row(2, 100.0, Some(0.0)),
            row(3, 100.0, Some(0.0)),
        ];
        let trend = analyze(&rows, date(1), date(3)).trend.unwrap();

        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.r_squared, 1.0);
    }

    #[test]
    fn trend_is_none_below_two_points() {
        let rows = vec![row(1, 100.0, None)];
        assert!(analyze(&rows, date(1), date(1)).trend.is_none());
        assert!(analyze(&[], date(1), date(1)).trend.is_none());
    }

    #[test]
    fn non_finite_closes_are_dropped_from_regression_only() {
        let rows = vec![
            row(1, 100.0, None),
            row(2, f64::NAN, Some(0.05)),
            row(3, 104.0, Some(0.02)),
            row(4, 106.0, Some(0.0192)),
        ];
        let result = analyze(&rows, date(1), date(4));

        // The NaN close row still contributes its return to the moments.
        assert!((result.mean_return - (0.05 + 0.02 + 0.0192) / 3.0).abs() < 1e-12);

        let trend = result.trend.unwrap();
        assert_eq!(trend.predicted.len(), 3);
        assert!(trend.predicted.iter().all(|p| p.close.is_finite()));
    }

    // ── Determinism ──

    #[test]
    fn analyze_is_bit_reproducible() {
        let rows = vec![
            row(1, 100.0, None),
            row(2, 110.0, Some(0.1)),
            row(3, 99.0, Some(-0.1)),
            row(4, 103.5, Some(103.5 / 99.0 - 1.0)),
        ];
        let a = analyze(&rows, date(1), date(4));
        let b = analyze(&rows, date(1), date(4));
        assert_eq!(a, b);
    }
}

//! Forecast accuracy per forecast horizon.
//!
//! Forecasts are scored as a weeks x days matrix. Each day of the week gets
//! its own RMSE across all test weeks, and the overall score is the RMSE of
//! every cell pooled together.
//!
//! # Example
//! ```
//! use powercast_core::scoring::evaluate_forecasts;
//! let actual = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]];
//! let predicted = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0]];
//! let score = evaluate_forecasts(&actual, &predicted).unwrap();
//! assert_eq!(score.per_day[6], 1.0);
//! assert!((score.overall - (1.0_f64 / 7.0).sqrt()).abs() < 1e-12);
//! ```

use crate::error::{ForecastError, Result};
use std::fmt;

/// Overall and per-horizon RMSE of a set of weekly forecasts.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastScore {
    /// RMSE over all (week, day) cells
    pub overall: f64,
    /// RMSE of each horizon step across weeks
    pub per_day: Vec<f64>,
}

/// Score of one named model, printable as a summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore {
    pub name: String,
    pub score: ForecastScore,
}

impl fmt::Display for ModelScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_day = self
            .score
            .per_day
            .iter()
            .map(|s| format!("{:.1}", s))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}: [{:.3}] {}", self.name, self.score.overall, per_day)
    }
}

/// Compute overall and per-day RMSE.
///
/// # Arguments
/// * `actual` - Observed values, one row per week
/// * `predicted` - Forecasts with the same shape as `actual`
///
/// # Formula
/// per_day[d] = sqrt(mean_w (a[w][d] - p[w][d])²)
/// overall = sqrt(mean_{w,d} (a[w][d] - p[w][d])²)
///
/// # Errors
/// * `InsufficientData` when there are no weeks or the rows are empty
/// * `ShapeMismatch` when row counts or any row length disagree
pub fn evaluate_forecasts(actual: &[Vec<f64>], predicted: &[Vec<f64>]) -> Result<ForecastScore> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::ShapeMismatch(format!(
            "{} actual weeks but {} forecasts",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    let horizon = actual[0].len();
    if horizon == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    for (w, (a, p)) in actual.iter().zip(predicted.iter()).enumerate() {
        if a.len() != horizon || p.len() != horizon {
            return Err(ForecastError::ShapeMismatch(format!(
                "week {}: {} actual and {} predicted values, expected {}",
                w,
                a.len(),
                p.len(),
                horizon
            )));
        }
    }

    let mut day_sums = vec![0.0; horizon];
    for (a, p) in actual.iter().zip(predicted.iter()) {
        for (d, (av, pv)) in a.iter().zip(p.iter()).enumerate() {
            day_sums[d] += (av - pv).powi(2);
        }
    }

    let n_weeks = actual.len() as f64;
    let per_day = day_sums.iter().map(|s| (s / n_weeks).sqrt()).collect();
    let overall = (day_sums.iter().sum::<f64>() / (n_weeks * horizon as f64)).sqrt();

    Ok(ForecastScore { overall, per_day })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_week_one_miss() {
        let actual = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]];
        let predicted = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0]];
        let score = evaluate_forecasts(&actual, &predicted).unwrap();

        assert_eq!(score.per_day, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(score.overall, (1.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_overall_is_pooled_not_mean_of_days() {
        let actual = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        let predicted = vec![vec![3.0, 0.0], vec![1.0, 0.0]];
        let score = evaluate_forecasts(&actual, &predicted).unwrap();

        // day 0: sqrt((9 + 1) / 2)
        assert_relative_eq!(score.per_day[0], 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(score.per_day[1], 0.0);
        assert_relative_eq!(score.overall, 2.5_f64.sqrt(), epsilon = 1e-12);
        let mean_of_days = score.per_day.iter().sum::<f64>() / 2.0;
        assert!((score.overall - mean_of_days).abs() > 1e-3);
    }

    #[test]
    fn test_perfect_forecast() {
        let rows = vec![vec![5.0; 7]; 4];
        let score = evaluate_forecasts(&rows, &rows).unwrap();
        assert_eq!(score.overall, 0.0);
        assert!(score.per_day.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_shape_mismatch() {
        let actual = vec![vec![1.0; 7]; 2];
        assert!(matches!(
            evaluate_forecasts(&actual, &[vec![1.0; 7]]),
            Err(ForecastError::ShapeMismatch(_))
        ));
        assert!(matches!(
            evaluate_forecasts(&actual, &[vec![1.0; 7], vec![1.0; 6]]),
            Err(ForecastError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            evaluate_forecasts(&[], &[]),
            Err(ForecastError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_empty_actual_with_forecasts_is_shape_mismatch() {
        assert!(matches!(
            evaluate_forecasts(&[], &[vec![1.0; 7]]),
            Err(ForecastError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_summary_line() {
        let line = ModelScore {
            name: "lr".to_string(),
            score: ForecastScore {
                overall: 0.37796,
                per_day: vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            },
        }
        .to_string();
        assert_eq!(line, "lr: [0.378] 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0");
    }
}

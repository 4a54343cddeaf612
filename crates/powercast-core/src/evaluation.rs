//! Walk-forward evaluation of one-step regressors on weekly forecasts.
//!
//! For every test week the model is refit on the training history and a
//! seven-day forecast is produced recursively. History is never extended
//! with test observations, so each week is forecast from the same seed.

use crate::dataset::{split_values, Dataset, SplitOptions, WeeklyBlock};
use crate::error::{ForecastError, Result};
use crate::model::Estimator;
use crate::preprocessing::{make_pipeline, ScalingMode};
use crate::recursive::{forecast_recursive, Forecast};
use crate::regressors::ModelKind;
use crate::scoring::{evaluate_forecasts, ForecastScore, ModelScore};
use crate::series::{to_series, to_supervised};
use tracing::{debug, info, warn};

/// Options for a full evaluation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOptions {
    /// Width of the input window in days
    pub n_input: usize,
    /// How the raw series is cut into train and test weeks
    pub split: SplitOptions,
    /// Scalers placed before every model
    pub scaling: ScalingMode,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            n_input: 7,
            split: SplitOptions::default(),
            scaling: ScalingMode::default(),
        }
    }
}

/// Forecasts and their score for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub forecasts: Vec<Forecast>,
    pub score: ForecastScore,
}

/// Outcome of one model inside [`evaluate_models`].
#[derive(Debug)]
pub struct ModelEvaluation {
    pub name: String,
    pub result: Result<ModelScore>,
}

/// Produce one forecast per test week.
///
/// Before every week the samples are rebuilt from `train` alone and the
/// model is refit on them. Each forecast is seeded with the input window of
/// the last training sample.
///
/// # Errors
/// * `InsufficientData` if the flattened history has no more than `n_input` days
/// * Any fit or predict error raised by the model
pub fn forecast_test_weeks<M: Estimator + ?Sized>(
    model: &mut M,
    train: &[WeeklyBlock],
    test: &[WeeklyBlock],
    n_input: usize,
) -> Result<Vec<Forecast>> {
    let mut forecasts = Vec::with_capacity(test.len());
    for week in 0..test.len() {
        let data = to_supervised(train, n_input)?;
        let seed = data
            .last_window()
            .ok_or_else(|| ForecastError::InsufficientData {
                needed: n_input + 1,
                got: to_series(train).len(),
            })?;

        debug!(model = model.name(), week, samples = data.len(), "fitting");
        model.fit(&data.inputs, &data.targets)?;
        forecasts.push(forecast_recursive(&*model, seed, n_input)?);
    }
    Ok(forecasts)
}

/// Forecast every test week and score the result.
pub fn evaluate_model<M: Estimator + ?Sized>(
    model: &mut M,
    dataset: &Dataset,
    n_input: usize,
) -> Result<EvaluationReport> {
    let forecasts = forecast_test_weeks(model, &dataset.train, &dataset.test, n_input)?;
    let predicted: Vec<Vec<f64>> = forecasts.iter().map(|f| f.to_vec()).collect();
    let score = evaluate_forecasts(&dataset.test_targets(), &predicted)?;
    Ok(EvaluationReport { forecasts, score })
}

/// Evaluate several models independently, in order.
///
/// A failing model is logged and reported; the remaining models still run.
pub fn evaluate_models(
    models: Vec<(String, Box<dyn Estimator>)>,
    dataset: &Dataset,
    n_input: usize,
) -> Vec<ModelEvaluation> {
    models
        .into_iter()
        .map(|(name, mut model)| {
            let result = evaluate_model(&mut model, dataset, n_input).map(|report| ModelScore {
                name: name.clone(),
                score: report.score,
            });
            match &result {
                Ok(score) => info!(model = %name, overall = score.score.overall, "{}", score),
                Err(e) => warn!(model = %name, error = %e, "model evaluation failed"),
            }
            ModelEvaluation { name, result }
        })
        .collect()
}

/// Split a raw daily series and evaluate the given catalogue models on it.
///
/// Every model is wrapped in the scalers selected by `options.scaling`.
pub fn run_benchmark(
    values: &[f64],
    kinds: &[ModelKind],
    options: &EvaluationOptions,
) -> Result<Vec<ModelEvaluation>> {
    let dataset = split_values(values, &options.split)?;
    debug!(
        train_weeks = dataset.train.len(),
        test_weeks = dataset.test.len(),
        models = kinds.len(),
        "starting benchmark"
    );
    let models = kinds
        .iter()
        .map(|kind| {
            let pipeline: Box<dyn Estimator> =
                Box::new(make_pipeline(kind.build(), options.scaling));
            (kind.name().to_string(), pipeline)
        })
        .collect();
    Ok(evaluate_models(models, &dataset, options.n_input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regressors::{MeanRegressor, Ridge};

    /// Predicts the last value of each window.
    struct LastValue;

    impl Estimator for LastValue {
        fn name(&self) -> &str {
            "last"
        }

        fn fit(&mut self, _inputs: &[Vec<f64>], _targets: &[f64]) -> Result<()> {
            Ok(())
        }

        fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
            Ok(inputs.iter().map(|r| r[r.len() - 1]).collect())
        }
    }

    struct FailingFit;

    impl Estimator for FailingFit {
        fn name(&self) -> &str {
            "failing"
        }

        fn fit(&mut self, _inputs: &[Vec<f64>], _targets: &[f64]) -> Result<()> {
            Err(ForecastError::fit("failing", "singular matrix"))
        }

        fn predict(&self, _inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
            Ok(vec![0.0])
        }
    }

    struct FailingPredict;

    impl Estimator for FailingPredict {
        fn name(&self) -> &str {
            "broken"
        }

        fn fit(&mut self, _inputs: &[Vec<f64>], _targets: &[f64]) -> Result<()> {
            Ok(())
        }

        fn predict(&self, _inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
            Err(ForecastError::predict("broken", "solver state lost"))
        }
    }

    /// Deterministic pseudo-random series around 100.
    fn noisy_series(n: usize) -> Vec<f64> {
        let mut state: u64 = 42;
        (0..n)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let noise = (state >> 33) as f64 / (1u64 << 31) as f64;
                100.0 + 5.0 * ((i % 7) as f64) + 10.0 * noise
            })
            .collect()
    }

    fn weeks_from(values: &[f64]) -> Vec<WeeklyBlock> {
        values
            .chunks(7)
            .map(|c| WeeklyBlock::from_values(c).unwrap())
            .collect()
    }

    #[test]
    fn test_constant_series_scores_zero() {
        let values = vec![5.0; 1113];
        let dataset = split_values(&values, &SplitOptions::default()).unwrap();
        let mut model = make_pipeline(Box::new(MeanRegressor::new()), ScalingMode::default());

        let report = evaluate_model(&mut model, &dataset, 7).unwrap();
        assert_eq!(report.forecasts.len(), 46);
        assert_eq!(report.score.overall, 0.0);
        assert_eq!(report.score.per_day, vec![0.0; 7]);
    }

    #[test]
    fn test_history_is_not_extended() {
        let values = noisy_series(1113);
        let dataset = split_values(&values, &SplitOptions::default()).unwrap();
        let mut model = make_pipeline(Box::new(Ridge::new()), ScalingMode::default());

        let forecasts =
            forecast_test_weeks(&mut model, &dataset.train, &dataset.test, 7).unwrap();
        assert_eq!(forecasts.len(), dataset.test.len());
        assert!(forecasts.iter().all(|f| *f == forecasts[0]));
    }

    #[test]
    fn test_seed_is_last_training_window() {
        let values: Vec<f64> = (0..28).map(|i| i as f64).collect();
        let train = weeks_from(&values[..21]);
        let test = weeks_from(&values[21..]);

        let forecasts = forecast_test_weeks(&mut LastValue, &train, &test, 7).unwrap();
        // Last training window is days 13..20, so its last value is day 19
        assert_eq!(forecasts, vec![[19.0; 7]]);
    }

    #[test]
    fn test_short_history_is_insufficient_data() {
        let values: Vec<f64> = (0..14).map(|i| i as f64).collect();
        let train = weeks_from(&values[..7]);
        let test = weeks_from(&values[7..]);

        let result = forecast_test_weeks(&mut LastValue, &train, &test, 7);
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { needed: 8, got: 7 })
        ));
    }

    /// Records the sample count of every fit.
    #[derive(Default)]
    struct FitLog {
        sample_counts: Vec<usize>,
    }

    impl Estimator for FitLog {
        fn name(&self) -> &str {
            "log"
        }

        fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
            assert_eq!(inputs.len(), targets.len());
            self.sample_counts.push(targets.len());
            Ok(())
        }

        fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
            Ok(vec![0.0; inputs.len()])
        }
    }

    #[test]
    fn test_refits_on_full_history_every_week() {
        let values: Vec<f64> = (0..42).map(|i| i as f64).collect();
        let train = weeks_from(&values[..21]);
        let test = weeks_from(&values[21..]);

        let mut model = FitLog::default();
        forecast_test_weeks(&mut model, &train, &test, 7).unwrap();
        assert_eq!(model.sample_counts, vec![14, 14, 14]);
    }

    #[test]
    fn test_predict_error_is_passed_through() {
        let values: Vec<f64> = (0..28).map(|i| i as f64).collect();
        let train = weeks_from(&values[..21]);
        let test = weeks_from(&values[21..]);

        match forecast_test_weeks(&mut FailingPredict, &train, &test, 7) {
            Err(ForecastError::ModelPredict { model, reason }) => {
                assert_eq!(model, "broken");
                assert_eq!(reason, "solver state lost");
            }
            other => panic!("expected a predict error, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_models_continues_after_failure() {
        let values = vec![5.0; 1113];
        let dataset = split_values(&values, &SplitOptions::default()).unwrap();
        let models: Vec<(String, Box<dyn Estimator>)> = vec![
            ("failing".to_string(), Box::new(FailingFit)),
            ("mean".to_string(), Box::new(MeanRegressor::new())),
        ];

        let results = evaluate_models(models, &dataset, 7);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "failing");
        assert!(matches!(
            results[0].result,
            Err(ForecastError::ModelFit { .. })
        ));
        let score = results[1].result.as_ref().unwrap();
        assert_eq!(score.score.overall, 0.0);
        assert_eq!(score.name, "mean");
    }

    #[test]
    fn test_run_benchmark_rejects_misaligned_series() {
        let result = run_benchmark(&[1.0; 1443], ModelKind::all(), &EvaluationOptions::default());
        assert!(matches!(result, Err(ForecastError::Configuration(_))));
    }

    #[test]
    fn test_run_benchmark_reports_every_model() {
        let values = noisy_series(1113);
        let kinds = [ModelKind::Ridge, ModelKind::Mean];
        let results = run_benchmark(&values, &kinds, &EvaluationOptions::default()).unwrap();

        assert_eq!(results.len(), 2);
        for (kind, evaluation) in kinds.iter().zip(results.iter()) {
            assert_eq!(evaluation.name, kind.name());
            let score = evaluation.result.as_ref().unwrap();
            assert!(score.score.overall.is_finite());
            assert_eq!(score.score.per_day.len(), 7);
        }
    }
}

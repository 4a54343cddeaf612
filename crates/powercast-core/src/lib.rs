//! Core library for evaluating recursive weekly power-consumption forecasts.
//!
//! A daily series is cut into whole train and test weeks, reframed as a
//! sliding-window regression problem, and each candidate regressor is turned
//! into a seven-day forecaster by feeding its predictions back as inputs.
//! Forecasts are scored with per-day and overall RMSE.

pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod preprocessing;
pub mod recursive;
pub mod regressors;
pub mod scoring;
pub mod series;

// Re-exports for convenience
pub use dataset::{
    split_dataset, split_values, DailyObservation, Dataset, SplitOptions, WeeklyBlock,
    DAYS_PER_WEEK,
};
pub use error::{ForecastError, Result};
pub use evaluation::{
    evaluate_model, evaluate_models, forecast_test_weeks, run_benchmark, EvaluationOptions,
    EvaluationReport, ModelEvaluation,
};
pub use model::{Estimator, Pipeline, Transformer};
pub use preprocessing::{make_pipeline, MinMaxScaler, ScalingMode, StandardScaler};
pub use recursive::{forecast_recursive, Forecast};
pub use regressors::{
    list_models, ElasticNet, HuberRegressor, Lars, LinearModel, LinearRegression, MeanRegressor,
    ModelKind, PassiveAggressiveRegressor, RansacRegression, Ridge, SgdRegressor,
};
pub use scoring::{evaluate_forecasts, ForecastScore, ModelScore};
pub use series::{to_series, to_supervised, windows, SupervisedData};

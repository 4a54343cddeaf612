//! Error types for the forecasting evaluator.

use thiserror::Error;

/// Result type for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Error types for splitting, fitting, forecasting and scoring.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Model '{model}' failed to fit: {reason}")]
    ModelFit { model: String, reason: String },

    #[error("Model '{model}' failed to predict: {reason}")]
    ModelPredict { model: String, reason: String },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid parameter '{param}' = '{value}': {reason}")]
    InvalidParameter {
        param: String,
        value: String,
        reason: String,
    },
}

impl ForecastError {
    /// Convert to an error code for FFI.
    pub fn to_code(&self) -> i32 {
        match self {
            ForecastError::Configuration(_) => 1,
            ForecastError::InsufficientData { .. } => 2,
            ForecastError::ModelFit { .. } => 3,
            ForecastError::ModelPredict { .. } => 4,
            ForecastError::ShapeMismatch(_) => 5,
            ForecastError::InvalidInput(_) => 6,
            ForecastError::InvalidModel(_) => 7,
            ForecastError::InvalidParameter { .. } => 8,
        }
    }

    pub(crate) fn fit(model: &str, reason: impl Into<String>) -> Self {
        ForecastError::ModelFit {
            model: model.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn predict(model: &str, reason: impl Into<String>) -> Self {
        ForecastError::ModelPredict {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}

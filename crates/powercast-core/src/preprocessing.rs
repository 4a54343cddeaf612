//! Column-wise feature scaling composed in front of a regressor.

use crate::error::{ForecastError, Result};
use crate::model::{check_rows, Estimator, Pipeline, Transformer};
use statrs::statistics::Statistics;

/// Which scalers to place before the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingMode {
    /// Raw windows go straight to the model
    None,
    /// Zero mean, unit variance per column
    Standardize,
    /// Rescale each column to [0, 1]
    Normalize,
    /// Standardize, then rescale to [0, 1]
    #[default]
    StandardizeThenNormalize,
}

impl std::str::FromStr for ScalingMode {
    type Err = ForecastError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "raw" => Ok(ScalingMode::None),
            "standardize" | "standard" => Ok(ScalingMode::Standardize),
            "normalize" | "minmax" | "min_max" => Ok(ScalingMode::Normalize),
            "standardize_normalize" | "both" | "default" => {
                Ok(ScalingMode::StandardizeThenNormalize)
            }
            _ => Err(ForecastError::InvalidParameter {
                param: "scaling".to_string(),
                value: s.to_string(),
                reason: "expected none, standardize, normalize or standardize_normalize"
                    .to_string(),
            }),
        }
    }
}

/// Wrap a model with the scalers selected by `mode`.
pub fn make_pipeline(model: Box<dyn Estimator>, mode: ScalingMode) -> Pipeline {
    let pipeline = Pipeline::new(model);
    match mode {
        ScalingMode::None => pipeline,
        ScalingMode::Standardize => pipeline.with_step(Box::new(StandardScaler::new())),
        ScalingMode::Normalize => pipeline.with_step(Box::new(MinMaxScaler::new())),
        ScalingMode::StandardizeThenNormalize => pipeline
            .with_step(Box::new(StandardScaler::new()))
            .with_step(Box::new(MinMaxScaler::new())),
    }
}

/// Standardize each column to zero mean and unit (population) variance.
///
/// Constant columns keep a scale of 1 so they map to zero instead of NaN.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}

impl Transformer for StandardScaler {
    fn name(&self) -> &str {
        "standardize"
    }

    fn fit_transform(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let columns = columns_of(self.name(), inputs)?;
        self.means = columns.iter().map(|c| c.iter().mean()).collect();
        self.scales = columns
            .iter()
            .map(|c| {
                let sd = c.iter().population_std_dev();
                if sd > f64::EPSILON {
                    sd
                } else {
                    1.0
                }
            })
            .collect();
        self.transform(inputs)
    }

    fn transform(&self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        apply_affine(self.name(), inputs, &self.means, &self.scales)
    }
}

/// Rescale each column to the [0, 1] range seen during fitting.
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    mins: Vec<f64>,
    ranges: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transformer for MinMaxScaler {
    fn name(&self) -> &str {
        "normalize"
    }

    fn fit_transform(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let columns = columns_of(self.name(), inputs)?;
        self.mins.clear();
        self.ranges.clear();
        for column in &columns {
            let min = column.iter().copied().fold(f64::INFINITY, f64::min);
            let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            self.mins.push(min);
            self.ranges.push(if range > f64::EPSILON { range } else { 1.0 });
        }
        self.transform(inputs)
    }

    fn transform(&self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        apply_affine(self.name(), inputs, &self.mins, &self.ranges)
    }
}

/// Split a row-major matrix into columns.
fn columns_of(step: &str, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    if inputs.is_empty() {
        return Err(ForecastError::fit(step, "cannot fit a scaler on zero rows"));
    }
    let width = check_rows(inputs)?;
    Ok((0..width)
        .map(|j| inputs.iter().map(|row| row[j]).collect())
        .collect())
}

/// Compute `(x - offset) / scale` per column.
fn apply_affine(step: &str, inputs: &[Vec<f64>], offsets: &[f64], scales: &[f64]) -> Result<Vec<Vec<f64>>> {
    if offsets.is_empty() {
        return Err(ForecastError::predict(step, "transform called before fit"));
    }
    inputs
        .iter()
        .map(|row| {
            if row.len() != offsets.len() {
                return Err(ForecastError::ShapeMismatch(format!(
                    "{} was fitted on {} columns, got {}",
                    step,
                    offsets.len(),
                    row.len()
                )));
            }
            Ok(row
                .iter()
                .zip(offsets.iter().zip(scales.iter()))
                .map(|(x, (o, s))| (x - o) / s)
                .collect())
        })
        .collect()
}

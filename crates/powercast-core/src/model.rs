//! Capability interfaces for regression models and feature preprocessing.
//!
//! The evaluation loop never knows which algorithm it drives. It only sees
//! an [`Estimator`], which may be a bare regressor or a [`Pipeline`] that
//! runs one or more [`Transformer`]s over the input windows first.

use crate::error::{ForecastError, Result};

/// A refittable one-output regression model.
///
/// `inputs` is a design matrix with one row per sample. Implementations
/// must accept repeated calls to `fit`, each replacing the previous state.
pub trait Estimator: Send {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Fit the model on `inputs` (n_samples x n_features) and `targets`.
    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()>;

    /// Predict one value per input row.
    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>>;
}

/// A learned feature transform applied before an estimator.
pub trait Transformer: Send {
    fn name(&self) -> &str;

    /// Learn transform parameters from `inputs` and return the transformed rows.
    fn fit_transform(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Apply previously learned parameters.
    fn transform(&self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;
}

impl<E: Estimator + ?Sized> Estimator for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        (**self).fit(inputs, targets)
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        (**self).predict(inputs)
    }
}

/// Transformers composed strictly before a final estimator.
pub struct Pipeline {
    steps: Vec<Box<dyn Transformer>>,
    model: Box<dyn Estimator>,
}

impl Pipeline {
    /// Create a pipeline with no preprocessing.
    pub fn new(model: Box<dyn Estimator>) -> Self {
        Self {
            steps: Vec::new(),
            model,
        }
    }

    /// Append a preprocessing step (applied in insertion order).
    pub fn with_step(mut self, step: Box<dyn Transformer>) -> Self {
        self.steps.push(step);
        self
    }

    /// Names of the preprocessing steps.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Estimator for Pipeline {
    fn name(&self) -> &str {
        self.model.name()
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let mut current = inputs.to_vec();
        for step in self.steps.iter_mut() {
            current = step.fit_transform(&current)?;
        }
        self.model.fit(&current, targets)
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        let mut current = inputs.to_vec();
        for step in &self.steps {
            current = step.transform(&current)?;
        }
        self.model.predict(&current)
    }
}

/// Check a design matrix and target vector before fitting.
///
/// Returns the number of features.
pub(crate) fn check_fit_inputs(model: &str, inputs: &[Vec<f64>], targets: &[f64]) -> Result<usize> {
    if inputs.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if inputs.len() != targets.len() {
        return Err(ForecastError::ShapeMismatch(format!(
            "{} input rows but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    let n_features = check_rows(inputs)?;
    if n_features == 0 {
        return Err(ForecastError::fit(model, "inputs have no features"));
    }
    Ok(n_features)
}

/// Check that every row has the same width and return it.
pub(crate) fn check_rows(inputs: &[Vec<f64>]) -> Result<usize> {
    let width = inputs.first().map_or(0, Vec::len);
    if let Some((i, row)) = inputs.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ForecastError::ShapeMismatch(format!(
            "row {} has {} columns, expected {}",
            i,
            row.len(),
            width
        )));
    }
    Ok(width)
}

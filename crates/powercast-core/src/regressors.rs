//! Linear regression algorithms usable as one-step forecasters.
//!
//! Closed-form and path solvers (OLS, ridge, elastic net, LARS) and RANSAC
//! are delegated to anofox-regression on faer matrices. Huber regression is iteratively
//! reweighted least squares on top of the OLS solver. The stochastic
//! learners (SGD, passive-aggressive) are small online loops over the
//! samples in chronological order.

use crate::error::{ForecastError, Result};
use crate::model::{check_fit_inputs, check_rows, Estimator};
use anofox_regression::prelude::*;
use anofox_regression::solvers::{LarsMethod, LarsRegressor, RansacRegressor};
use faer::{Col, Mat};
use tracing::debug;

/// Fitted intercept and weights of a linear model.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearModel {
    fn zeros(n_features: usize) -> Self {
        Self {
            intercept: 0.0,
            weights: vec![0.0; n_features],
        }
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(self.weights.iter())
                .map(|(x, w)| x * w)
                .sum::<f64>()
    }

    fn predict(&self, model: &str, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        let width = check_rows(inputs)?;
        if !inputs.is_empty() && width != self.weights.len() {
            return Err(ForecastError::ShapeMismatch(format!(
                "{} was fitted on {} features, got {}",
                model,
                self.weights.len(),
                width
            )));
        }
        Ok(inputs.iter().map(|row| self.predict_row(row)).collect())
    }
}

/// Pull intercept and coefficients out of an anofox-regression fit.
///
/// Aliased columns come back as NaN and are dropped from the prediction.
fn linear_model_from<F: FittedRegressor>(fitted: &F) -> LinearModel {
    let coeffs_col = fitted.coefficients();
    LinearModel {
        intercept: fitted.intercept().unwrap_or(0.0),
        weights: (0..coeffs_col.nrows())
            .map(|i| {
                let c = coeffs_col[i];
                if c.is_finite() {
                    c
                } else {
                    0.0
                }
            })
            .collect(),
    }
}

/// Build the n_samples x n_features design matrix.
fn design_matrix(inputs: &[Vec<f64>], n_features: usize) -> Mat<f64> {
    Mat::from_fn(inputs.len(), n_features, |i, j| inputs[i][j])
}

fn target_column(targets: &[f64]) -> Col<f64> {
    Col::from_fn(targets.len(), |i| targets[i])
}

fn fitted_model<'a>(name: &str, fitted: &'a Option<LinearModel>) -> Result<&'a LinearModel> {
    fitted
        .as_ref()
        .ok_or_else(|| ForecastError::predict(name, "model has not been fitted"))
}

// ============================================================================
// Closed-form solvers
// ============================================================================

/// Ordinary least squares with intercept.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    fitted: Option<LinearModel>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Estimator for LinearRegression {
    fn name(&self) -> &str {
        "lr"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let x_mat = design_matrix(inputs, n_features);
        let y_col = target_column(targets);

        let fitted = OlsRegressor::builder()
            .with_intercept(true)
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| ForecastError::fit(self.name(), e.to_string()))?;
        self.fitted = Some(linear_model_from(&fitted));
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

/// L2-penalized least squares.
#[derive(Debug, Clone)]
pub struct Ridge {
    alpha: f64,
    fitted: Option<LinearModel>,
}

impl Ridge {
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            fitted: None,
        }
    }

    /// Penalty strength (default 1.0).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Default for Ridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for Ridge {
    fn name(&self) -> &str {
        "ridge"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let x_mat = design_matrix(inputs, n_features);
        let y_col = target_column(targets);

        let fitted = RidgeRegressor::builder()
            .with_intercept(true)
            .lambda(self.alpha)
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| ForecastError::fit(self.name(), e.to_string()))?;
        self.fitted = Some(linear_model_from(&fitted));
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

/// Elastic net: mixed L1/L2 penalty. With `l1_ratio = 1` this is the lasso.
#[derive(Debug, Clone)]
pub struct ElasticNet {
    name: &'static str,
    alpha: f64,
    l1_ratio: f64,
    fitted: Option<LinearModel>,
}

impl ElasticNet {
    pub fn new() -> Self {
        Self {
            name: "en",
            alpha: 1.0,
            l1_ratio: 0.5,
            fitted: None,
        }
    }

    /// Pure L1 penalty.
    pub fn lasso() -> Self {
        Self {
            name: "lasso",
            l1_ratio: 1.0,
            ..Self::new()
        }
    }

    /// Overall penalty strength (default 1.0).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Share of the L1 term in the penalty, in [0, 1].
    pub fn with_l1_ratio(mut self, l1_ratio: f64) -> Self {
        self.l1_ratio = l1_ratio;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Default for ElasticNet {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for ElasticNet {
    fn name(&self) -> &str {
        self.name
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        if !(0.0..=1.0).contains(&self.l1_ratio) {
            return Err(ForecastError::InvalidParameter {
                param: "l1_ratio".to_string(),
                value: self.l1_ratio.to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let x_mat = design_matrix(inputs, n_features);
        let y_col = target_column(targets);

        let fitted = ElasticNetRegressor::builder()
            .with_intercept(true)
            .lambda(self.alpha)
            .alpha(self.l1_ratio)
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| ForecastError::fit(self.name(), e.to_string()))?;
        self.fitted = Some(linear_model_from(&fitted));
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

/// Least angle regression. The lasso variant drops a feature from the active
/// set when its coefficient crosses zero.
#[derive(Debug, Clone)]
pub struct Lars {
    name: &'static str,
    method: LarsMethod,
    alpha: f64,
    fitted: Option<LinearModel>,
}

impl Lars {
    /// Plain LARS, run to the end of the path.
    pub fn new() -> Self {
        Self {
            name: "lars",
            method: LarsMethod::Lar,
            alpha: 0.0,
            fitted: None,
        }
    }

    /// LassoLars, stopped where the path reaches `alpha` (default 1.0).
    pub fn lasso() -> Self {
        Self {
            name: "llars",
            method: LarsMethod::Lasso,
            alpha: 1.0,
            fitted: None,
        }
    }

    /// Path stopping point; plain LARS ignores it.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Default for Lars {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for Lars {
    fn name(&self) -> &str {
        self.name
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        if self.alpha < 0.0 {
            return Err(ForecastError::InvalidParameter {
                param: "alpha".to_string(),
                value: self.alpha.to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let x_mat = design_matrix(inputs, n_features);
        let y_col = target_column(targets);

        let fitted = LarsRegressor::builder()
            .method(self.method)
            .fit_intercept(true)
            .alpha(self.alpha)
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| ForecastError::fit(self.name(), e.to_string()))?;
        debug!(model = self.name, steps = fitted.alphas().len(), "lars path computed");
        self.fitted = Some(linear_model_from(&fitted));
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

// ============================================================================
// Robust regression
// ============================================================================

/// Huber regression via iteratively reweighted least squares.
///
/// Residuals larger than `epsilon` robust standard deviations are
/// down-weighted by `epsilon * scale / |r|`. The scale is re-estimated on
/// every pass from the median absolute residual.
#[derive(Debug, Clone)]
pub struct HuberRegressor {
    epsilon: f64,
    max_iter: usize,
    tol: f64,
    fitted: Option<LinearModel>,
}

impl HuberRegressor {
    pub fn new() -> Self {
        Self {
            epsilon: 1.35,
            max_iter: 100,
            tol: 1e-6,
            fitted: None,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }

    /// Weighted least squares: scale each row (and a constant column) by sqrt(w).
    fn weighted_fit(&self, inputs: &[Vec<f64>], targets: &[f64], weights: &[f64]) -> Result<LinearModel> {
        let n_features = inputs[0].len();
        let roots: Vec<f64> = weights.iter().map(|w| w.sqrt()).collect();
        let x_mat = Mat::from_fn(inputs.len(), n_features + 1, |i, j| {
            if j == 0 {
                roots[i]
            } else {
                roots[i] * inputs[i][j - 1]
            }
        });
        let y_col = Col::from_fn(targets.len(), |i| roots[i] * targets[i]);

        let fitted = OlsRegressor::builder()
            .with_intercept(false)
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| ForecastError::fit(self.name(), e.to_string()))?;
        let raw = linear_model_from(&fitted);
        Ok(LinearModel {
            intercept: raw.weights[0],
            weights: raw.weights[1..].to_vec(),
        })
    }
}

impl Default for HuberRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for HuberRegressor {
    fn name(&self) -> &str {
        "huber"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        check_fit_inputs(self.name(), inputs, targets)?;

        let mut weights = vec![1.0; targets.len()];
        let mut model = self.weighted_fit(inputs, targets, &weights)?;

        for iteration in 0..self.max_iter {
            let residuals: Vec<f64> = inputs
                .iter()
                .zip(targets.iter())
                .map(|(row, y)| y - model.predict_row(row))
                .collect();
            let scale = median_abs(&residuals) / 0.6745;
            if scale < 1e-12 {
                break;
            }
            let threshold = self.epsilon * scale;
            for (w, r) in weights.iter_mut().zip(residuals.iter()) {
                *w = if r.abs() <= threshold {
                    1.0
                } else {
                    threshold / r.abs()
                };
            }

            let next = self.weighted_fit(inputs, targets, &weights)?;
            let change = std::iter::once((next.intercept - model.intercept).abs())
                .chain(
                    next.weights
                        .iter()
                        .zip(model.weights.iter())
                        .map(|(a, b)| (a - b).abs()),
                )
                .fold(0.0, f64::max);
            model = next;
            if change < self.tol {
                debug!(iterations = iteration + 1, "huber converged");
                break;
            }
        }

        self.fitted = Some(model);
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

/// RANSAC: OLS fits on random minimal subsets, then a final OLS fit on the
/// largest consensus set.
///
/// The inlier threshold defaults to the median absolute deviation of the
/// targets. Subsets are drawn from a fixed seed, so refits are repeatable.
#[derive(Debug, Clone)]
pub struct RansacRegression {
    max_trials: usize,
    residual_threshold: Option<f64>,
    seed: u64,
    fitted: Option<LinearModel>,
}

impl RansacRegression {
    pub fn new() -> Self {
        Self {
            max_trials: 100,
            residual_threshold: None,
            seed: 0,
            fitted: None,
        }
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// Absolute residual at or below which a sample counts as an inlier.
    pub fn with_residual_threshold(mut self, threshold: f64) -> Self {
        self.residual_threshold = Some(threshold);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Default for RansacRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for RansacRegression {
    fn name(&self) -> &str {
        "ransac"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let x_mat = design_matrix(inputs, n_features);
        let y_col = target_column(targets);

        let mut builder = RansacRegressor::builder()
            .with_intercept(true)
            .max_trials(self.max_trials)
            .random_state(self.seed);
        if let Some(threshold) = self.residual_threshold {
            builder = builder.residual_threshold(threshold);
        }
        let fitted = builder
            .build()
            .fit(&x_mat, &y_col)
            .map_err(|e| ForecastError::fit(self.name(), e.to_string()))?;
        debug!(
            inliers = fitted.n_inliers(),
            trials = fitted.n_trials(),
            "ransac consensus"
        );
        self.fitted = Some(linear_model_from(&fitted));
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

fn median_abs(values: &[f64]) -> f64 {
    let mut abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    abs.sort_by(|a, b| a.total_cmp(b));
    let n = abs.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        abs[n / 2]
    } else {
        (abs[n / 2 - 1] + abs[n / 2]) / 2.0
    }
}

// ============================================================================
// Online learners
// ============================================================================

/// Early stopping on the mean per-epoch loss.
#[derive(Debug, Clone)]
struct EpochStopper {
    tol: Option<f64>,
    patience: usize,
    best: f64,
    stale: usize,
}

impl EpochStopper {
    fn new(tol: Option<f64>, patience: usize) -> Self {
        Self {
            tol,
            patience,
            best: f64::INFINITY,
            stale: 0,
        }
    }

    /// Record an epoch loss; returns true when training should stop.
    fn update(&mut self, loss: f64) -> bool {
        let Some(tol) = self.tol else {
            return false;
        };
        if loss > self.best - tol {
            self.stale += 1;
        } else {
            self.stale = 0;
        }
        self.best = self.best.min(loss);
        self.stale >= self.patience
    }
}

fn check_finite(name: &str, model: &LinearModel) -> Result<()> {
    if model.intercept.is_finite() && model.weights.iter().all(|w| w.is_finite()) {
        Ok(())
    } else {
        Err(ForecastError::fit(name, "weights diverged"))
    }
}

/// Stochastic gradient descent on squared loss with an L2 penalty.
///
/// Uses an inverse-scaling learning rate `eta0 / t^power_t`, where `t`
/// counts samples seen across epochs.
#[derive(Debug, Clone)]
pub struct SgdRegressor {
    alpha: f64,
    eta0: f64,
    power_t: f64,
    max_iter: usize,
    tol: Option<f64>,
    n_iter_no_change: usize,
    fitted: Option<LinearModel>,
}

impl SgdRegressor {
    pub fn new() -> Self {
        Self {
            alpha: 1e-4,
            eta0: 0.01,
            power_t: 0.25,
            max_iter: 1000,
            tol: Some(1e-3),
            n_iter_no_change: 5,
            fitted: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_eta0(mut self, eta0: f64) -> Self {
        self.eta0 = eta0;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Stopping tolerance on the epoch loss; `None` runs all `max_iter` epochs.
    pub fn with_tol(mut self, tol: Option<f64>) -> Self {
        self.tol = tol;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Default for SgdRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for SgdRegressor {
    fn name(&self) -> &str {
        "sgd"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let mut model = LinearModel::zeros(n_features);
        let mut stopper = EpochStopper::new(self.tol, self.n_iter_no_change);
        let mut t = 1.0_f64;
        let mut epochs = 0;

        for _ in 0..self.max_iter {
            epochs += 1;
            let mut sum_loss = 0.0;
            for (row, &y) in inputs.iter().zip(targets.iter()) {
                let err = model.predict_row(row) - y;
                sum_loss += 0.5 * err * err;

                let eta = self.eta0 / t.powf(self.power_t);
                let shrink = 1.0 - eta * self.alpha;
                for (w, x) in model.weights.iter_mut().zip(row.iter()) {
                    *w = *w * shrink - eta * err * x;
                }
                model.intercept -= eta * err;
                t += 1.0;
            }
            check_finite(self.name(), &model)?;
            if stopper.update(sum_loss / targets.len() as f64) {
                break;
            }
        }

        debug!(epochs, "sgd finished");
        self.fitted = Some(model);
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

/// Passive-aggressive regression (PA-I) with an epsilon-insensitive loss.
#[derive(Debug, Clone)]
pub struct PassiveAggressiveRegressor {
    c: f64,
    epsilon: f64,
    max_iter: usize,
    tol: Option<f64>,
    n_iter_no_change: usize,
    fitted: Option<LinearModel>,
}

impl PassiveAggressiveRegressor {
    pub fn new() -> Self {
        Self {
            c: 1.0,
            epsilon: 0.1,
            max_iter: 1000,
            tol: Some(1e-3),
            n_iter_no_change: 5,
            fitted: None,
        }
    }

    /// Maximum step size (aggressiveness).
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tol(mut self, tol: Option<f64>) -> Self {
        self.tol = tol;
        self
    }

    pub fn coefficients(&self) -> Option<&LinearModel> {
        self.fitted.as_ref()
    }
}

impl Default for PassiveAggressiveRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for PassiveAggressiveRegressor {
    fn name(&self) -> &str {
        "pa"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let n_features = check_fit_inputs(self.name(), inputs, targets)?;
        let mut model = LinearModel::zeros(n_features);
        let mut stopper = EpochStopper::new(self.tol, self.n_iter_no_change);

        for _ in 0..self.max_iter {
            let mut sum_loss = 0.0;
            for (row, &y) in inputs.iter().zip(targets.iter()) {
                let residual = y - model.predict_row(row);
                let loss = (residual.abs() - self.epsilon).max(0.0);
                if loss > 0.0 {
                    // +1 accounts for the intercept's constant feature
                    let norm_sq = row.iter().map(|x| x * x).sum::<f64>() + 1.0;
                    let step = (loss / norm_sq).min(self.c) * residual.signum();
                    for (w, x) in model.weights.iter_mut().zip(row.iter()) {
                        *w += step * x;
                    }
                    model.intercept += step;
                }
                sum_loss += loss;
            }
            check_finite(self.name(), &model)?;
            if stopper.update(sum_loss / targets.len() as f64) {
                break;
            }
        }

        self.fitted = Some(model);
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        fitted_model(self.name(), &self.fitted)?.predict(self.name(), inputs)
    }
}

// ============================================================================
// Baseline
// ============================================================================

/// Predicts the mean training target for every input.
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor {
    mean: Option<f64>,
}

impl MeanRegressor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Estimator for MeanRegressor {
    fn name(&self) -> &str {
        "mean"
    }

    fn fit(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        check_fit_inputs(self.name(), inputs, targets)?;
        self.mean = Some(targets.iter().sum::<f64>() / targets.len() as f64);
        Ok(())
    }

    fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        let mean = self
            .mean
            .ok_or_else(|| ForecastError::predict(self.name(), "model has not been fitted"))?;
        Ok(vec![mean; inputs.len()])
    }
}

// ============================================================================
// Catalogue
// ============================================================================

/// Regression algorithms available to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    LinearRegression,
    Lasso,
    Ridge,
    ElasticNet,
    Huber,
    Lars,
    LassoLars,
    Ransac,
    PassiveAggressive,
    Sgd,
    Mean,
}

impl ModelKind {
    /// Every model, in the order the evaluator runs them by default.
    pub fn all() -> &'static [ModelKind] {
        &[
            ModelKind::LinearRegression,
            ModelKind::Lasso,
            ModelKind::Ridge,
            ModelKind::ElasticNet,
            ModelKind::Huber,
            ModelKind::Lars,
            ModelKind::LassoLars,
            ModelKind::PassiveAggressive,
            ModelKind::Ransac,
            ModelKind::Sgd,
            ModelKind::Mean,
        ]
    }

    /// Short model name.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::LinearRegression => "lr",
            ModelKind::Lasso => "lasso",
            ModelKind::Ridge => "ridge",
            ModelKind::ElasticNet => "en",
            ModelKind::Huber => "huber",
            ModelKind::Lars => "lars",
            ModelKind::LassoLars => "llars",
            ModelKind::Ransac => "ransac",
            ModelKind::PassiveAggressive => "pa",
            ModelKind::Sgd => "sgd",
            ModelKind::Mean => "mean",
        }
    }

    /// Build an untrained estimator with default hyperparameters.
    pub fn build(&self) -> Box<dyn Estimator> {
        match self {
            ModelKind::LinearRegression => Box::new(LinearRegression::new()),
            ModelKind::Lasso => Box::new(ElasticNet::lasso()),
            ModelKind::Ridge => Box::new(Ridge::new()),
            ModelKind::ElasticNet => Box::new(ElasticNet::new()),
            ModelKind::Huber => Box::new(HuberRegressor::new()),
            ModelKind::Lars => Box::new(Lars::new()),
            ModelKind::LassoLars => Box::new(Lars::lasso()),
            ModelKind::Ransac => Box::new(RansacRegression::new()),
            ModelKind::PassiveAggressive => Box::new(PassiveAggressiveRegressor::new()),
            ModelKind::Sgd => Box::new(SgdRegressor::new()),
            ModelKind::Mean => Box::new(MeanRegressor::new()),
        }
    }
}

impl std::str::FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "linear" | "linear_regression" | "ols" => Ok(ModelKind::LinearRegression),
            "lasso" => Ok(ModelKind::Lasso),
            "ridge" => Ok(ModelKind::Ridge),
            "en" | "elasticnet" | "elastic_net" => Ok(ModelKind::ElasticNet),
            "huber" => Ok(ModelKind::Huber),
            "lars" => Ok(ModelKind::Lars),
            "llars" | "lasso_lars" | "lassolars" => Ok(ModelKind::LassoLars),
            "ransac" => Ok(ModelKind::Ransac),
            "pa" | "passive_aggressive" | "passiveaggressive" => {
                Ok(ModelKind::PassiveAggressive)
            }
            "sgd" => Ok(ModelKind::Sgd),
            "mean" | "baseline" => Ok(ModelKind::Mean),
            _ => Err(ForecastError::InvalidModel(format!("Unknown model: {}", s))),
        }
    }
}

/// Short names of all available models.
pub fn list_models() -> Vec<String> {
    ModelKind::all().iter().map(|m| m.name().to_string()).collect()
}

//! Recursive multi-step forecasting.
//!
//! A one-step model is turned into a seven-step forecaster by feeding each
//! prediction back into the input window as if it had been observed.

use crate::dataset::DAYS_PER_WEEK;
use crate::error::{ForecastError, Result};
use crate::model::Estimator;
use crate::series::validate_n_input;

/// Seven predicted daily values, one per day of the target week.
pub type Forecast = [f64; DAYS_PER_WEEK];

/// Forecast one week ahead from a seed window.
///
/// Only the last `n_input` values of `seed` are used. Each step predicts
/// from the last `n_input` values of a local working buffer and appends the
/// prediction to it, so later steps see earlier predictions as history.
///
/// # Errors
/// * `InvalidInput` if `seed` is shorter than `n_input`
/// * `ModelPredict` if the model returns no value, or any error the model raises
pub fn forecast_recursive<M: Estimator + ?Sized>(
    model: &M,
    seed: &[f64],
    n_input: usize,
) -> Result<Forecast> {
    validate_n_input(n_input)?;
    if seed.len() < n_input {
        return Err(ForecastError::InvalidInput(format!(
            "Seed window has {} values but the model needs {}",
            seed.len(),
            n_input
        )));
    }

    let mut buffer: Vec<f64> = Vec::with_capacity(n_input + DAYS_PER_WEEK);
    buffer.extend_from_slice(&seed[seed.len() - n_input..]);

    let mut forecast = [0.0; DAYS_PER_WEEK];
    for slot in forecast.iter_mut() {
        let window = buffer[buffer.len() - n_input..].to_vec();
        let yhat = model
            .predict(&[window])?
            .first()
            .copied()
            .ok_or_else(|| ForecastError::predict(model.name(), "no prediction returned"))?;
        *slot = yhat;
        buffer.push(yhat);
    }

    Ok(forecast)
}

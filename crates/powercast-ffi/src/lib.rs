//! FFI boundary layer for the powercast evaluator.
//!
//! This crate exposes dataset splitting, single-model evaluation, forecast
//! scoring and the model catalogue as C-compatible functions. Every function
//! returns `true` on success and fills the caller's `PowercastError`
//! otherwise. Buffers handed out are released with `powercast_free_*`.

pub mod allocation;
pub mod conversion;
pub mod error_handling;
pub mod types;

use allocation::{alloc_and_copy_array, alloc_string_array, free_string_array};
use conversion::{copy_string_to_buffer, evaluation_options};
use error_handling::{init_error, set_error};
use libc::{c_char, c_double, size_t};
use powercast_core::{
    evaluate_forecasts, evaluate_model, list_models, make_pipeline, split_values, to_series,
    ForecastError,
};

pub use types::*;

// ============================================================================
// Dataset Functions
// ============================================================================

/// Split a daily series into whole train and test weeks.
///
/// Only the split offsets of `options` are used.
///
/// # Safety
/// `values` must point to `length` doubles. All other pointers must be valid
/// and non-null.
#[no_mangle]
pub unsafe extern "C" fn powercast_split_dataset(
    values: *const c_double,
    length: size_t,
    options: *const EvaluationOptions,
    out_result: *mut SplitResult,
    out_error: *mut PowercastError,
) -> bool {
    let dataset = ffi_execute!(out_error, [values, options, out_result], {
        let series = std::slice::from_raw_parts(values, length);
        let (_, opts) = evaluation_options(&*options)?;
        split_values(series, &opts.split)
    });

    let r = &mut *out_result;
    *r = SplitResult::default();
    r.n_train_weeks = dataset.train.len();
    r.n_test_weeks = dataset.test.len();

    if !alloc_and_copy_array(&to_series(&dataset.train), &mut r.train, out_error)
        || !alloc_and_copy_array(&to_series(&dataset.test), &mut r.test, out_error)
    {
        free_fields!(r, train, test);
        return false;
    }
    true
}

// ============================================================================
// Evaluation Functions
// ============================================================================

/// Evaluate one catalogue model on a daily series.
///
/// The series is split, the model named in `options` is wrapped in the
/// selected scalers, and every test week is forecast and scored.
///
/// # Safety
/// `values` must point to `length` doubles. All other pointers must be valid
/// and non-null.
#[no_mangle]
pub unsafe extern "C" fn powercast_evaluate_model(
    values: *const c_double,
    length: size_t,
    options: *const EvaluationOptions,
    out_result: *mut ModelScoreResult,
    out_error: *mut PowercastError,
) -> bool {
    let (name, report) = ffi_execute!(out_error, [values, options, out_result], {
        let series = std::slice::from_raw_parts(values, length);
        let (kind, opts) = evaluation_options(&*options)?;
        let dataset = split_values(series, &opts.split)?;
        let mut model = make_pipeline(kind.build(), opts.scaling);
        evaluate_model(&mut model, &dataset, opts.n_input).map(|report| (kind.name(), report))
    });

    let r = &mut *out_result;
    *r = ModelScoreResult::default();
    r.overall_rmse = report.score.overall;
    for (slot, value) in r.per_day_rmse.iter_mut().zip(report.score.per_day.iter()) {
        *slot = *value;
    }
    r.n_weeks = report.forecasts.len();
    copy_string_to_buffer(name, &mut r.model_name);

    let flat: Vec<f64> = report.forecasts.iter().flatten().copied().collect();
    alloc_and_copy_array(&flat, &mut r.forecasts, out_error)
}

/// Score caller-supplied forecasts against observed values.
///
/// Both matrices are row-major with `n_weeks` rows of `horizon` values.
///
/// # Safety
/// `actual` and `predicted` must each point to `n_weeks * horizon` doubles.
/// All pointers must be valid and non-null.
#[no_mangle]
pub unsafe extern "C" fn powercast_score_forecasts(
    actual: *const c_double,
    predicted: *const c_double,
    n_weeks: size_t,
    horizon: size_t,
    out_result: *mut ScoreResult,
    out_error: *mut PowercastError,
) -> bool {
    let score = ffi_execute!(out_error, [actual, predicted, out_result], {
        let cells = n_weeks.checked_mul(horizon).ok_or_else(|| {
            ForecastError::InvalidInput(format!("{} x {} overflows", n_weeks, horizon))
        })?;
        if horizon == 0 {
            return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
        }
        let to_rows = |data: *const c_double| -> Vec<Vec<f64>> {
            std::slice::from_raw_parts(data, cells)
                .chunks(horizon)
                .map(<[f64]>::to_vec)
                .collect()
        };
        evaluate_forecasts(&to_rows(actual), &to_rows(predicted))
    });

    let r = &mut *out_result;
    *r = ScoreResult::default();
    r.overall_rmse = score.overall;
    r.n_days = score.per_day.len();
    alloc_and_copy_array(&score.per_day, &mut r.per_day_rmse, out_error)
}

// ============================================================================
// Model Catalogue
// ============================================================================

/// List the short names of all available models.
///
/// # Safety
/// `out_names` and `out_count` must be valid and non-null. Release the names
/// with `powercast_free_string_array`.
#[no_mangle]
pub unsafe extern "C" fn powercast_list_models(
    out_names: *mut *mut *mut c_char,
    out_count: *mut size_t,
    out_error: *mut PowercastError,
) -> bool {
    if out_names.is_null() || out_count.is_null() {
        set_error(out_error, ErrorCode::NullPointer, "Null pointer argument");
        return false;
    }

    init_error(out_error);
    let names = list_models();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    if !alloc_string_array(&refs, out_names) {
        set_error(out_error, ErrorCode::AllocationError, "Memory allocation failed");
        return false;
    }
    *out_count = refs.len();
    true
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a SplitResult.
///
/// # Safety
/// The result pointer must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn powercast_free_split_result(result: *mut SplitResult) {
    if result.is_null() {
        return;
    }
    let r = &mut *result;
    free_fields!(r, train, test);
}

/// Free a ModelScoreResult.
///
/// # Safety
/// The result pointer must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn powercast_free_model_score_result(result: *mut ModelScoreResult) {
    if result.is_null() {
        return;
    }
    let r = &mut *result;
    free_fields!(r, forecasts);
}

/// Free a ScoreResult.
///
/// # Safety
/// The result pointer must be valid or null.
#[no_mangle]
pub unsafe extern "C" fn powercast_free_score_result(result: *mut ScoreResult) {
    if result.is_null() {
        return;
    }
    let r = &mut *result;
    free_fields!(r, per_day_rmse);
}

/// Free a name array returned by `powercast_list_models`.
///
/// # Safety
/// `names` must be null or come from `powercast_list_models` with `count` entries.
#[no_mangle]
pub unsafe extern "C" fn powercast_free_string_array(names: *mut *mut c_char, count: size_t) {
    free_string_array(names, count);
}

// ============================================================================
// Version
// ============================================================================

#[no_mangle]
pub extern "C" fn powercast_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    #[test]
    fn test_version_is_null_terminated() {
        let version = unsafe { CStr::from_ptr(powercast_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_split_null_pointer() {
        let mut result = SplitResult::default();
        let mut error = PowercastError::default();
        let ok = unsafe {
            powercast_split_dataset(
                ptr::null(),
                0,
                &EvaluationOptions::default(),
                &mut result,
                &mut error,
            )
        };
        assert!(!ok);
        assert_eq!(error.code, ErrorCode::NullPointer);
    }

    #[test]
    fn test_split_misaligned_length() {
        let values = vec![1.0; 1443];
        let mut result = SplitResult::default();
        let mut error = PowercastError::default();
        let ok = unsafe {
            powercast_split_dataset(
                values.as_ptr(),
                values.len(),
                &EvaluationOptions::default(),
                &mut result,
                &mut error,
            )
        };
        assert!(!ok);
        assert_eq!(error.code, ErrorCode::Configuration);
        assert!(result.train.is_null());
    }

    #[test]
    fn test_score_forecasts_literal() {
        let actual = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let predicted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0];
        let mut result = ScoreResult::default();
        let mut error = PowercastError::default();
        let ok = unsafe {
            powercast_score_forecasts(
                actual.as_ptr(),
                predicted.as_ptr(),
                1,
                7,
                &mut result,
                &mut error,
            )
        };
        assert!(ok);
        assert_eq!(result.n_days, 7);
        let per_day = unsafe { std::slice::from_raw_parts(result.per_day_rmse, 7) };
        assert_eq!(per_day, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert!((result.overall_rmse - (1.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        unsafe { powercast_free_score_result(&mut result) };
        assert!(result.per_day_rmse.is_null());
    }

    #[test]
    fn test_score_forecasts_zero_weeks() {
        let data = [0.0];
        let mut result = ScoreResult::default();
        let mut error = PowercastError::default();
        let ok = unsafe {
            powercast_score_forecasts(data.as_ptr(), data.as_ptr(), 0, 7, &mut result, &mut error)
        };
        assert!(!ok);
        assert_eq!(error.code, ErrorCode::InsufficientData);
    }

    #[test]
    fn test_list_models_clears_stale_error() {
        let mut names: *mut *mut c_char = ptr::null_mut();
        let mut count = 0;
        let mut error = PowercastError::default();
        error.set_error(ErrorCode::InvalidModel, "stale");
        let ok = unsafe { powercast_list_models(&mut names, &mut count, &mut error) };
        assert!(ok);
        assert_eq!(error.code, ErrorCode::Success);
        assert_eq!(count, list_models().len());
        unsafe { powercast_free_string_array(names, count) };
    }

    #[test]
    fn test_list_models_null_output() {
        let mut error = PowercastError::default();
        let ok = unsafe { powercast_list_models(ptr::null_mut(), ptr::null_mut(), &mut error) };
        assert!(!ok);
        assert_eq!(error.code, ErrorCode::NullPointer);
    }

    #[test]
    fn test_free_functions_accept_null() {
        unsafe {
            powercast_free_split_result(ptr::null_mut());
            powercast_free_model_score_result(ptr::null_mut());
            powercast_free_score_result(ptr::null_mut());
            powercast_free_string_array(ptr::null_mut(), 0);
        }
    }
}

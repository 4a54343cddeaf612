//! Parameter conversion utilities for FFI functions.

use crate::types::{EvaluationOptions as FfiEvaluationOptions, ScalingCode};
use core::ffi::{c_char, c_int};
use powercast_core::{EvaluationOptions, ForecastError, ModelKind, Result, ScalingMode, SplitOptions};
use std::ffi::CStr;

/// Convert a `c_int` to a positive `usize`, rejecting zero and negatives.
#[inline]
pub fn to_positive_usize(value: c_int, param: &str) -> Result<usize> {
    if value > 0 {
        Ok(value as usize)
    } else {
        Err(invalid(param, value, "must be positive"))
    }
}

/// Convert a `c_int` to a `usize`, rejecting negatives.
#[inline]
pub fn to_non_negative_usize(value: c_int, param: &str) -> Result<usize> {
    if value >= 0 {
        Ok(value as usize)
    } else {
        Err(invalid(param, value, "must not be negative"))
    }
}

fn invalid(param: &str, value: c_int, reason: &str) -> ForecastError {
    ForecastError::InvalidParameter {
        param: param.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Map a `ScalingCode` integer to the core scaling mode.
pub fn scaling_from_code(code: c_int) -> Result<ScalingMode> {
    match code {
        c if c == ScalingCode::None as c_int => Ok(ScalingMode::None),
        c if c == ScalingCode::Standardize as c_int => Ok(ScalingMode::Standardize),
        c if c == ScalingCode::Normalize as c_int => Ok(ScalingMode::Normalize),
        c if c == ScalingCode::StandardizeThenNormalize as c_int => {
            Ok(ScalingMode::StandardizeThenNormalize)
        }
        _ => Err(invalid("scaling", code, "expected 0, 1, 2 or 3")),
    }
}

/// Convert a C string pointer to a Rust `&str` with a default value.
///
/// # Safety
/// The pointer must be null or point to a valid null-terminated string.
#[inline]
pub unsafe fn c_str_to_str(ptr: *const c_char, default: &str) -> &str {
    if ptr.is_null() {
        default
    } else {
        CStr::from_ptr(ptr).to_str().unwrap_or(default)
    }
}

/// Copy a string to a fixed-size, null-terminated char buffer.
pub fn copy_string_to_buffer(s: &str, buffer: &mut [c_char]) {
    if buffer.is_empty() {
        return;
    }
    let bytes = s.as_bytes();
    let len = bytes.len().min(buffer.len() - 1);
    for (i, &b) in bytes[..len].iter().enumerate() {
        buffer[i] = b as c_char;
    }
    buffer[len] = 0;
}

/// Translate FFI options into a model choice and core options.
///
/// An empty model name selects linear regression.
///
/// # Safety
/// `opts.model` must contain a null terminator.
pub unsafe fn evaluation_options(
    opts: &FfiEvaluationOptions,
) -> Result<(ModelKind, EvaluationOptions)> {
    let name = c_str_to_str(opts.model.as_ptr(), "lr");
    let kind: ModelKind = if name.is_empty() { "lr" } else { name }.parse()?;

    let options = EvaluationOptions {
        n_input: to_positive_usize(opts.n_input, "n_input")?,
        split: SplitOptions {
            leading_offset: to_non_negative_usize(opts.leading_offset, "leading_offset")?,
            test_days: to_non_negative_usize(opts.test_days, "test_days")?,
            trailing_days: to_non_negative_usize(opts.trailing_days, "trailing_days")?,
        },
        scaling: scaling_from_code(opts.scaling)?,
    };
    Ok((kind, options))
}

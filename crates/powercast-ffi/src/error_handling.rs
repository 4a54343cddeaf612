//! Standardized error handling utilities for FFI functions.

use crate::types::{ErrorCode, PowercastError};
use powercast_core::ForecastError;

/// Initialize error output to success state.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn init_error(out_error: *mut PowercastError) {
    if !out_error.is_null() {
        *out_error = PowercastError::success();
    }
}

/// Set an error on the output error pointer.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn set_error(out_error: *mut PowercastError, code: ErrorCode, message: &str) {
    if !out_error.is_null() {
        (*out_error).set_error(code, message);
    }
}

/// Record a core error with its matching code.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn set_forecast_error(out_error: *mut PowercastError, err: &ForecastError) {
    set_error(out_error, ErrorCode::from(err), &err.to_string());
}

/// Check if any of the given pointers are null, and set an error if so.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn check_null_pointers(
    out_error: *mut PowercastError,
    ptrs: &[*const core::ffi::c_void],
) -> bool {
    for ptr in ptrs {
        if ptr.is_null() {
            set_error(out_error, ErrorCode::NullPointer, "Null pointer argument");
            return true;
        }
    }
    false
}

/// Null-check the pointers, then run the body under `catch_unwind`.
///
/// The body must evaluate to `Result<T, ForecastError>`. On success the macro
/// yields `T`; otherwise it fills `out_error` and returns `false` from the
/// enclosing function.
///
/// Usage:
/// ```ignore
/// let dataset = ffi_execute!(out_error, [values, out_result], {
///     split_values(series, &options)
/// });
/// ```
#[macro_export]
macro_rules! ffi_execute {
    ($out_error:expr, [$($ptr:expr),+ $(,)?], $body:block) => {{
        use $crate::error_handling::{check_null_pointers, init_error, set_error, set_forecast_error};
        use $crate::types::ErrorCode;
        use std::panic::{catch_unwind, AssertUnwindSafe};

        unsafe {
            init_error($out_error);

            let ptrs: &[*const core::ffi::c_void] = &[
                $($ptr as *const core::ffi::c_void),+
            ];

            if check_null_pointers($out_error, ptrs) {
                return false;
            }

            let result = catch_unwind(AssertUnwindSafe(|| $body));

            match result {
                Ok(Ok(value)) => value,
                Ok(Err(e)) => {
                    set_forecast_error($out_error, &e);
                    return false;
                }
                Err(_) => {
                    set_error($out_error, ErrorCode::PanicCaught, "Panic in Rust code");
                    return false;
                }
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_error() {
        let mut error = PowercastError::default();
        error.set_error(ErrorCode::InvalidInput, "stale");
        unsafe {
            init_error(&mut error);
        }
        assert_eq!(error.code, ErrorCode::Success);
        assert_eq!(error.message[0], 0);
    }

    #[test]
    fn test_set_forecast_error_keeps_kind() {
        let mut error = PowercastError::default();
        let err = ForecastError::ShapeMismatch("2 vs 3".to_string());
        unsafe { set_forecast_error(&mut error, &err) };
        assert_eq!(error.code, ErrorCode::ShapeMismatch);
        assert_eq!(error.message[0], b'S' as core::ffi::c_char);
    }

    #[test]
    fn test_null_pointer_check() {
        let mut error = PowercastError::default();
        let value = 1.0_f64;
        let ptrs = [
            &value as *const f64 as *const core::ffi::c_void,
            std::ptr::null(),
        ];
        assert!(unsafe { check_null_pointers(&mut error, &ptrs) });
        assert_eq!(error.code, ErrorCode::NullPointer);
    }
}

//! C-compatible type definitions for the FFI boundary.

use libc::{c_char, c_double, c_int, size_t};
use powercast_core::ForecastError;

/// Days per forecast, exported to the C header.
pub const POWERCAST_HORIZON: usize = 7;

/// Error codes for FFI boundary.
///
/// Codes 1 through 8 match `ForecastError::to_code`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    Configuration = 1,
    InsufficientData = 2,
    ModelFit = 3,
    ModelPredict = 4,
    ShapeMismatch = 5,
    InvalidInput = 6,
    InvalidModel = 7,
    InvalidParameter = 8,
    NullPointer = 9,
    AllocationError = 10,
    PanicCaught = 11,
}

impl From<&ForecastError> for ErrorCode {
    fn from(err: &ForecastError) -> Self {
        match err {
            ForecastError::Configuration(_) => ErrorCode::Configuration,
            ForecastError::InsufficientData { .. } => ErrorCode::InsufficientData,
            ForecastError::ModelFit { .. } => ErrorCode::ModelFit,
            ForecastError::ModelPredict { .. } => ErrorCode::ModelPredict,
            ForecastError::ShapeMismatch(_) => ErrorCode::ShapeMismatch,
            ForecastError::InvalidInput(_) => ErrorCode::InvalidInput,
            ForecastError::InvalidModel(_) => ErrorCode::InvalidModel,
            ForecastError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }
}

/// Error structure with message buffer for FFI.
#[repr(C)]
pub struct PowercastError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl PowercastError {
    /// Create a success error (no error).
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    /// Set an error with code and message.
    pub fn set_error(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0; // Null terminator
    }
}

impl Default for PowercastError {
    fn default() -> Self {
        Self::success()
    }
}

/// Scaling applied before the model.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingCode {
    None = 0,
    Standardize = 1,
    Normalize = 2,
    StandardizeThenNormalize = 3,
}

/// Evaluation options.
#[repr(C)]
pub struct EvaluationOptions {
    /// Model name (null-terminated string)
    pub model: [c_char; 32],
    /// Input window width in days
    pub n_input: c_int,
    /// One of the `ScalingCode` values
    pub scaling: c_int,
    /// Days dropped from the start of the series
    pub leading_offset: c_int,
    /// Days counted back from the end that start the test span
    pub test_days: c_int,
    /// Most recent days excluded from both spans
    pub trailing_days: c_int,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        let mut model = [0 as c_char; 32];
        b"lr"
            .iter()
            .enumerate()
            .for_each(|(i, &b)| model[i] = b as c_char);
        Self {
            model,
            n_input: 7,
            scaling: ScalingCode::StandardizeThenNormalize as c_int,
            leading_offset: 1,
            test_days: 328,
            trailing_days: 6,
        }
    }
}

/// Train and test target values, flattened week by week.
#[repr(C)]
pub struct SplitResult {
    /// n_train_weeks * 7 values
    pub train: *mut c_double,
    pub n_train_weeks: size_t,
    /// n_test_weeks * 7 values
    pub test: *mut c_double,
    pub n_test_weeks: size_t,
}

impl Default for SplitResult {
    fn default() -> Self {
        Self {
            train: std::ptr::null_mut(),
            n_train_weeks: 0,
            test: std::ptr::null_mut(),
            n_test_weeks: 0,
        }
    }
}

/// Scores and forecasts of one evaluated model.
#[repr(C)]
pub struct ModelScoreResult {
    /// RMSE over all forecast cells
    pub overall_rmse: c_double,
    /// RMSE of each day of the week
    pub per_day_rmse: [c_double; POWERCAST_HORIZON],
    /// n_weeks * 7 forecast values, week by week
    pub forecasts: *mut c_double,
    /// Number of test weeks
    pub n_weeks: size_t,
    /// Model name
    pub model_name: [c_char; 64],
}

impl Default for ModelScoreResult {
    fn default() -> Self {
        Self {
            overall_rmse: f64::NAN,
            per_day_rmse: [f64::NAN; POWERCAST_HORIZON],
            forecasts: std::ptr::null_mut(),
            n_weeks: 0,
            model_name: [0; 64],
        }
    }
}

/// Scores of caller-supplied forecasts.
#[repr(C)]
pub struct ScoreResult {
    pub overall_rmse: c_double,
    /// One RMSE per horizon step
    pub per_day_rmse: *mut c_double,
    pub n_days: size_t,
}

impl Default for ScoreResult {
    fn default() -> Self {
        Self {
            overall_rmse: f64::NAN,
            per_day_rmse: std::ptr::null_mut(),
            n_days: 0,
        }
    }
}

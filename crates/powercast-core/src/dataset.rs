//! Daily observations, weekly blocks and the train/test splitter.
//!
//! The raw series is one row per day. The splitter drops the first day and
//! the most recent unlabeled days, then cuts the remainder into a training
//! span and a test span of whole weeks.

use crate::error::{ForecastError, Result};
use tracing::debug;

/// Number of days in a weekly block (and in a forecast).
pub const DAYS_PER_WEEK: usize = 7;

/// One row of the raw daily series.
///
/// Only the first field is used as the univariate target; the remaining
/// fields are carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    fields: Vec<f64>,
}

impl DailyObservation {
    /// Create an observation from its numeric fields (target first).
    pub fn new(fields: Vec<f64>) -> Result<Self> {
        if fields.is_empty() {
            return Err(ForecastError::InvalidInput(
                "Daily observation must have at least one numeric field".to_string(),
            ));
        }
        Ok(Self { fields })
    }

    /// Create a single-field observation.
    pub fn from_value(value: f64) -> Self {
        Self {
            fields: vec![value],
        }
    }

    /// The target scalar (first field).
    pub fn target(&self) -> f64 {
        self.fields[0]
    }

    /// All numeric fields of the row.
    pub fn fields(&self) -> &[f64] {
        &self.fields
    }
}

/// Exactly seven consecutive daily observations.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBlock {
    days: Vec<DailyObservation>,
}

impl WeeklyBlock {
    /// Build a block, rejecting anything that is not exactly one week long.
    pub fn new(days: Vec<DailyObservation>) -> Result<Self> {
        if days.len() != DAYS_PER_WEEK {
            return Err(ForecastError::InvalidInput(format!(
                "Weekly block must contain {} days, got {}",
                DAYS_PER_WEEK,
                days.len()
            )));
        }
        Ok(Self { days })
    }

    /// Build a block of single-field observations.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        Self::new(values.iter().map(|&v| DailyObservation::from_value(v)).collect())
    }

    /// Days of the block in chronological order.
    pub fn days(&self) -> &[DailyObservation] {
        &self.days
    }

    /// Target column of the block.
    pub fn targets(&self) -> [f64; DAYS_PER_WEEK] {
        let mut out = [0.0; DAYS_PER_WEEK];
        for (slot, day) in out.iter_mut().zip(self.days.iter()) {
            *slot = day.target();
        }
        out
    }
}

/// Offsets used to carve train and test weeks out of the raw series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Days dropped from the start of the series
    pub leading_offset: usize,
    /// Days counted back from the end that start the test span
    pub test_days: usize,
    /// Most recent days excluded from both spans
    pub trailing_days: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            leading_offset: 1,
            test_days: 328,
            trailing_days: 6,
        }
    }
}

/// Train and test weeks, train strictly before test.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub train: Vec<WeeklyBlock>,
    pub test: Vec<WeeklyBlock>,
}

impl Dataset {
    /// Target matrix (weeks x 7) of the test span.
    pub fn test_targets(&self) -> Vec<Vec<f64>> {
        self.test.iter().map(|w| w.targets().to_vec()).collect()
    }
}

/// Split a daily series into weekly train and test blocks.
///
/// With the default options, `train` covers `series[1 .. L-328]` and `test`
/// covers `series[L-328 .. L-6]`. Both spans must be whole weeks.
///
/// # Errors
/// `ForecastError::Configuration` when the series is too short for the
/// offsets or when either span is not a multiple of seven days.
pub fn split_dataset(series: &[DailyObservation], options: &SplitOptions) -> Result<Dataset> {
    let len = series.len();
    let min_len = options.leading_offset + options.test_days;
    if options.test_days < options.trailing_days || len < min_len {
        return Err(ForecastError::Configuration(format!(
            "Series of {} days cannot hold a {}-day offset and a {}-day test window",
            len, options.leading_offset, options.test_days
        )));
    }

    let test_start = len - options.test_days;
    let test_end = len - options.trailing_days;
    let train = &series[options.leading_offset..test_start];
    let test = &series[test_start..test_end];

    if train.len() % DAYS_PER_WEEK != 0 {
        return Err(ForecastError::Configuration(format!(
            "Train span of {} days is not a whole number of weeks",
            train.len()
        )));
    }
    if test.len() % DAYS_PER_WEEK != 0 {
        return Err(ForecastError::Configuration(format!(
            "Test span of {} days is not a whole number of weeks",
            test.len()
        )));
    }

    let dataset = Dataset {
        train: into_weeks(train)?,
        test: into_weeks(test)?,
    };
    debug!(
        days = len,
        train_weeks = dataset.train.len(),
        test_weeks = dataset.test.len(),
        "split daily series"
    );
    Ok(dataset)
}

/// Split a single-column daily series.
pub fn split_values(values: &[f64], options: &SplitOptions) -> Result<Dataset> {
    let series: Vec<DailyObservation> = values
        .iter()
        .map(|&v| DailyObservation::from_value(v))
        .collect();
    split_dataset(&series, options)
}

fn into_weeks(days: &[DailyObservation]) -> Result<Vec<WeeklyBlock>> {
    days.chunks(DAYS_PER_WEEK)
        .map(|chunk| WeeklyBlock::new(chunk.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_split_full_dataset_length() {
        // 1442 days: the length of the household consumption daily series
        let dataset = split_values(&ramp(1442), &SplitOptions::default()).unwrap();
        assert_eq!(dataset.train.len(), 159);
        assert_eq!(dataset.test.len(), 46);
    }

    #[test]
    fn test_split_1113_days() {
        let dataset = split_values(&ramp(1113), &SplitOptions::default()).unwrap();
        // train: 1113 - 1 - 328 = 784 days, test: 322 days
        assert_eq!(dataset.train.len(), 112);
        assert_eq!(dataset.test.len(), 46);
    }

    #[test]
    fn test_split_boundaries() {
        let values = ramp(1442);
        let dataset = split_values(&values, &SplitOptions::default()).unwrap();

        // First training day is index 1, first test day is L - 328
        assert_eq!(dataset.train[0].days()[0].target(), 1.0);
        assert_eq!(dataset.test[0].days()[0].target(), (1442 - 328) as f64);

        // Last training day directly precedes the first test day
        let last_train = dataset.train.last().unwrap().targets();
        assert_eq!(last_train[6], (1442 - 329) as f64);

        // Last test day is L - 7 (final 6 days excluded)
        let last_test = dataset.test.last().unwrap().targets();
        assert_eq!(last_test[6], (1442 - 7) as f64);
    }

    #[test]
    fn test_split_misaligned_length() {
        let result = split_values(&ramp(1443), &SplitOptions::default());
        assert!(matches!(result, Err(ForecastError::Configuration(_))));
    }

    #[test]
    fn test_split_too_short() {
        let result = split_values(&ramp(100), &SplitOptions::default());
        assert!(matches!(result, Err(ForecastError::Configuration(_))));
    }

    #[test]
    fn test_split_keeps_extra_fields() {
        let series: Vec<DailyObservation> = (0..1442)
            .map(|i| DailyObservation::new(vec![i as f64, -(i as f64)]).unwrap())
            .collect();
        let dataset = split_dataset(&series, &SplitOptions::default()).unwrap();
        assert_eq!(dataset.train[0].days()[0].fields(), &[1.0, -1.0]);
    }

    #[test]
    fn test_weekly_block_rejects_wrong_length() {
        assert!(WeeklyBlock::from_values(&[1.0; 6]).is_err());
        assert!(WeeklyBlock::from_values(&[1.0; 8]).is_err());
        assert!(WeeklyBlock::from_values(&[1.0; 7]).is_ok());
    }

    #[test]
    fn test_empty_observation_rejected() {
        assert!(DailyObservation::new(vec![]).is_err());
    }
}

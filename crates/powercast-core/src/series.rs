//! Reframing weekly blocks as a supervised-learning problem.
//!
//! History is flattened into one daily sequence and a fixed-width window is
//! slid over it one day at a time. Each window is paired with the value that
//! immediately follows it.

use crate::dataset::WeeklyBlock;
use crate::error::{ForecastError, Result};

/// Flatten weekly blocks into one daily series of target values.
pub fn to_series(blocks: &[WeeklyBlock]) -> Vec<f64> {
    blocks.iter().flat_map(|block| block.targets()).collect()
}

/// Supervised samples laid out as a design matrix and a target vector.
///
/// Row `i` of `inputs` is the window whose next value is `targets[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupervisedData {
    /// Input windows, one row per sample
    pub inputs: Vec<Vec<f64>>,
    /// Value following each window
    pub targets: Vec<f64>,
}

impl SupervisedData {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Input window of the most recent sample.
    pub fn last_window(&self) -> Option<&[f64]> {
        self.inputs.last().map(Vec::as_slice)
    }
}

/// Slide a window of width `n_input` over a flat daily series.
///
/// A sample starting at `i` exists while `i + n_input < series.len()`, so
/// the last sample's target is the final value of the series and that value
/// never appears inside an input window. Series no longer than `n_input`
/// yield no samples.
pub fn windows(series: &[f64], n_input: usize) -> Result<SupervisedData> {
    validate_n_input(n_input)?;

    let mut data = SupervisedData::default();
    let mut start = 0;
    while start + n_input < series.len() {
        let end = start + n_input;
        data.inputs.push(series[start..end].to_vec());
        data.targets.push(series[end]);
        start += 1;
    }
    Ok(data)
}

/// Build supervised samples from a history of weekly blocks.
pub fn to_supervised(history: &[WeeklyBlock], n_input: usize) -> Result<SupervisedData> {
    windows(&to_series(history), n_input)
}

pub(crate) fn validate_n_input(n_input: usize) -> Result<()> {
    if n_input == 0 {
        return Err(ForecastError::InvalidParameter {
            param: "n_input".to_string(),
            value: n_input.to_string(),
            reason: "window width must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weeks(n: usize) -> Vec<WeeklyBlock> {
        (0..n)
            .map(|w| {
                let values: Vec<f64> = (0..7).map(|d| (w * 7 + d) as f64).collect();
                WeeklyBlock::from_values(&values).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_to_series_order_and_length() {
        let series = to_series(&weeks(3));
        assert_eq!(series.len(), 21);
        for (i, v) in series.iter().enumerate() {
            assert_eq!(*v, i as f64);
        }
    }

    #[test]
    fn test_to_series_empty() {
        assert!(to_series(&[]).is_empty());
    }

    #[test]
    fn test_windows_too_short() {
        for n in 0..=7 {
            let series: Vec<f64> = (0..n).map(|i| i as f64).collect();
            assert!(windows(&series, 7).unwrap().is_empty());
        }
    }

    #[test]
    fn test_windows_count() {
        let series: Vec<f64> = (0..21).map(|i| i as f64).collect();
        let data = windows(&series, 7).unwrap();
        assert_eq!(data.len(), 21 - 7);
        assert_eq!(data.inputs.len(), data.targets.len());
    }

    #[test]
    fn test_windows_content() {
        let series: Vec<f64> = (0..10).map(|i| i as f64 * 10.0).collect();
        let data = windows(&series, 3).unwrap();

        assert_eq!(data.inputs[0], vec![0.0, 10.0, 20.0]);
        assert_eq!(data.targets[0], 30.0);

        // Last window stops one short of the final value, which is its target
        assert_eq!(data.last_window().unwrap(), &[60.0, 70.0, 80.0]);
        assert_eq!(*data.targets.last().unwrap(), 90.0);
    }

    #[test]
    fn test_windows_one_sample() {
        let data = windows(&[1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.inputs[0], vec![1.0, 2.0]);
        assert_eq!(data.targets[0], 3.0);
    }

    #[test]
    fn test_windows_zero_width() {
        let result = windows(&[1.0, 2.0], 0);
        assert!(matches!(
            result,
            Err(ForecastError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_to_supervised_from_weeks() {
        let data = to_supervised(&weeks(2), 7).unwrap();
        assert_eq!(data.len(), 7);
        assert_eq!(data.inputs[6], vec![6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        assert_eq!(data.targets[6], 13.0);
    }
}

//! Numeric transforms shared by every telemetry channel.
//!
//! All functions here are pure: they never mutate their input and hold no
//! state between calls.

use crate::error::{Result, SimError};

/// Simple moving average of `values` over a sliding `window`.
///
/// Element `i` of the result is the arithmetic mean of
/// `values[i..i + window]`, so the output has `values.len() - window + 1`
/// elements.  When the input is shorter than the window (including an empty
/// input) the result is empty rather than an error.
///
/// `NaN` samples are not special-cased: any window that contains one
/// averages to `NaN`.
///
/// # Errors
/// [`SimError::InvalidArgument`] when `window` is zero.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(SimError::InvalidArgument(
            "moving average window must be at least 1".into(),
        ));
    }

    Ok(values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect())
}

/// Element-wise mean of several equally-indexed channels.
///
/// The output is as long as the first channel.  A position that any other
/// channel lacks becomes `NaN`, so callers that chart the result should pass
/// it through [`finite`] first.
pub fn mean_across(channels: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = channels.first() else {
        return Vec::new();
    };
    let count = channels.len() as f64;

    (0..first.len())
        .map(|idx| {
            channels
                .iter()
                .map(|c| c.get(idx).copied().unwrap_or(f64::NAN))
                .sum::<f64>()
                / count
        })
        .collect()
}

/// Copy of `values` with every `NaN` / infinite sample removed.
pub fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Plain sum of a sequence.  `NaN` propagates.
pub fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_of_three() {
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3).unwrap();
        assert_eq!(out, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn window_longer_than_input_is_empty() {
        assert!(moving_average(&[10.0, 20.0], 5).unwrap().is_empty());
    }

    #[test]
    fn single_sample_single_window() {
        assert_eq!(moving_average(&[5.0], 1).unwrap(), vec![5.0]);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(moving_average(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = moving_average(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
    }

    #[test]
    fn output_length_matches_window_positions() {
        let values: Vec<f64> = (0..17).map(f64::from).collect();
        for w in 1..=values.len() {
            let out = moving_average(&values, w).unwrap();
            assert_eq!(out.len(), values.len() - w + 1, "window {w}");
        }
    }

    #[test]
    fn unit_window_is_identity() {
        let values = vec![3.5, -1.0, 0.25, 8.0];
        assert_eq!(moving_average(&values, 1).unwrap(), values);
    }

    #[test]
    fn constant_input_stays_constant() {
        let values = vec![4.2; 9];
        for w in 1..=9 {
            let out = moving_average(&values, w).unwrap();
            assert!(out.iter().all(|v| (v - 4.2).abs() < 1e-12));
        }
        assert_eq!(moving_average(&values, 9).unwrap().len(), 1);
    }

    #[test]
    fn input_is_not_mutated() {
        let values = vec![1.0, 2.0, 3.0];
        let before = values.clone();
        let _ = moving_average(&values, 2).unwrap();
        assert_eq!(values, before);
    }

    #[test]
    fn nan_poisons_only_windows_that_contain_it() {
        let out = moving_average(&[1.0, f64::NAN, 3.0, 5.0, 7.0], 2).unwrap();
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 4.0);
        assert_eq!(out[3], 6.0);
    }

    #[test]
    fn mean_across_pads_short_channels_with_nan() {
        let out = mean_across(&[vec![2.0, 4.0, 6.0], vec![4.0, 8.0]]);
        assert_eq!(out[0], 3.0);
        assert_eq!(out[1], 6.0);
        assert!(out[2].is_nan());
        assert_eq!(finite(&out), vec![3.0, 6.0]);
    }

    #[test]
    fn mean_across_nothing_is_empty() {
        assert!(mean_across(&[]).is_empty());
    }

    #[test]
    fn total_sums_everything() {
        assert_eq!(total(&[1.0, 2.5, 3.5]), 7.0);
        assert!(total(&[1.0, f64::NAN]).is_nan());
    }
}

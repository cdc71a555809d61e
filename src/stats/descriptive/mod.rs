// Descriptive statistics

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::stats::DescriptiveStats;

/// Internal implementation of `stats::describe`
pub(crate) fn describe_impl(data: &[f64]) -> Result<DescriptiveStats> {
    if data.is_empty() {
        return Err(Error::InsufficientData(
            "describe needs at least one value".into(),
        ));
    }

    let count = data.len();
    let mean = mean(data);
    let std = if count > 1 { variance(data).sqrt() } else { 0.0 };

    let sorted = sorted_copy(data);

    Ok(DescriptiveStats {
        count,
        mean,
        std,
        min: sorted[0],
        q1: percentile_sorted(&sorted, 0.25),
        median: percentile_sorted(&sorted, 0.5),
        q3: percentile_sorted(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Arithmetic mean; NaN for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Unbiased sample variance; NaN with fewer than two values
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Smallest and largest value, ignoring NaN
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Quantile `q` in [0, 1] with linear interpolation between order statistics
pub fn quantile(data: &[f64], q: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::InvalidInput(format!(
            "quantile must be between 0 and 1, got {}",
            q
        )));
    }
    if data.is_empty() {
        return Err(Error::InsufficientData(
            "cannot compute the quantile of an empty column".into(),
        ));
    }
    Ok(percentile_sorted(&sorted_copy(data), q))
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let idx = p * (n - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let weight = idx - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_basic() {
        let stats = describe_impl(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(stats.count, 5);
        assert!((stats.mean - 3.0).abs() < 1e-10);
        assert!((stats.std - 1.5811388300841898).abs() < 1e-10);
        assert!((stats.min - 1.0).abs() < 1e-10);
        assert!((stats.max - 5.0).abs() < 1e-10);
        assert!((stats.q1 - 2.0).abs() < 1e-10);
        assert!((stats.q3 - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_describe_empty() {
        assert!(describe_impl(&[]).is_err());
    }

    #[test]
    fn test_quantile_interpolates() {
        // positions 0..3, q=0.75 -> index 2.25
        let q = quantile(&[40.0, 10.0, 30.0, 20.0], 0.75).unwrap();
        assert!((q - 32.5).abs() < 1e-10);
        assert!(quantile(&[1.0], 1.5).is_err());
        assert!(quantile(&[], 0.5).is_err());
    }

    #[test]
    fn test_variance_degenerate() {
        assert!(variance(&[1.0]).is_nan());
        assert!(mean(&[]).is_nan());
        assert_eq!(min_max(&[3.0, f64::NAN, -1.0]), Some((-1.0, 3.0)));
    }
}

//! Statistics used by the exploration and feature-selection stages.
//!
//! Descriptive statistics, Pearson correlation with significance, one-sample
//! t-tests, univariate regression F-tests and seeded row sampling.

pub mod descriptive;
pub mod inference;
pub mod sampling;

use serde::Serialize;

use crate::error::Result;
use crate::table::RecordTable;

/// Significance threshold used when none is configured
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Summary statistics of a numeric sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of observations
    pub count: usize,
    pub mean: f64,
    /// Standard deviation (unbiased estimator)
    pub std: f64,
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    pub max: f64,
}

/// Computes count, mean, std, min, quartiles and max
///
/// # Example
/// ```rust
/// use zillow_prep::stats;
///
/// let summary = stats::describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(summary.median, 3.0);
/// ```
pub fn describe<T: AsRef<[f64]>>(data: T) -> Result<DescriptiveStats> {
    descriptive::describe_impl(data.as_ref())
}

/// Pearson correlation coefficient with its two-sided p-value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Correlation coefficient in [-1, 1]; NaN when either input is constant
    pub r: f64,
    pub p_value: f64,
    /// Number of observations used
    pub n: usize,
}

/// Pearson correlation between two equally long samples
///
/// # Example
/// ```rust
/// use zillow_prep::stats;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// let result = stats::pearson(&x, &y).unwrap();
/// assert!((result.r - 1.0).abs() < 1e-12);
/// assert!(result.p_value < 1e-6);
/// ```
pub fn pearson<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<CorrelationResult> {
    inference::pearson_impl(x.as_ref(), y.as_ref())
}

/// Result of a t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestResult {
    /// t statistic; NaN when undefined
    pub statistic: f64,
    /// two-sided p-value; NaN when undefined
    pub pvalue: f64,
    /// degrees of freedom
    pub df: usize,
}

/// One-sample t-test of `sample` against the reference mean `popmean`.
///
/// Degenerate samples (fewer than two values) yield NaN instead of an error.
pub fn ttest_1samp<T: AsRef<[f64]>>(sample: T, popmean: f64) -> TTestResult {
    inference::ttest_1samp_impl(sample.as_ref(), popmean)
}

/// Univariate regression F-test of one predictor against a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FTestResult {
    pub f_statistic: f64,
    pub p_value: f64,
}

/// F-statistic of the linear relation between `x` and `target`
pub fn f_regression<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, target: U) -> Result<FTestResult> {
    inference::f_regression_impl(x.as_ref(), target.as_ref())
}

/// Draws `n` rows without replacement using a seeded generator
///
/// # Example
/// ```rust
/// use zillow_prep::column::Float64Column;
/// use zillow_prep::stats;
/// use zillow_prep::table::RecordTable;
///
/// let mut table = RecordTable::new();
/// table.add_column("x", Float64Column::new(vec![1.0, 2.0, 3.0, 4.0])).unwrap();
/// let sample = stats::sample_rows(&table, 2, 7).unwrap();
/// assert_eq!(sample.row_count(), 2);
/// ```
pub fn sample_rows(table: &RecordTable, n: usize, seed: u64) -> Result<RecordTable> {
    sampling::sample_rows_impl(table, n, seed)
}

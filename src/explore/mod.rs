//! Association analyses between property attributes.
//!
//! Pairwise Pearson correlation over a numeric column set, and one-sample
//! t-tests of each categorical subgroup against the mean of the remaining
//! rows. Results are reported per test without any multiple-comparison
//! correction.

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::stats::descriptive::mean;
use crate::stats::{self, DEFAULT_ALPHA};
use crate::table::RecordTable;

/// One tested pair or subgroup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationResult {
    /// `"a x b"` for pairs, `"category=value x column"` for subgroups
    pub label: String,
    /// Pearson r or t statistic
    pub statistic: f64,
    pub p_value: f64,
    /// `p_value < alpha`; false when the p-value is NaN
    pub reject_null: bool,
    /// Observations used
    pub n: usize,
}

impl AssociationResult {
    pub fn new(label: String, statistic: f64, p_value: f64, n: usize, alpha: f64) -> Self {
        AssociationResult {
            label,
            statistic,
            p_value,
            reject_null: p_value < alpha,
            n,
        }
    }
}

/// Runs association tests at a fixed significance level
#[derive(Debug, Clone, Copy)]
pub struct AssociationEngine {
    alpha: f64,
}

impl AssociationEngine {
    pub fn new(alpha: f64) -> Self {
        AssociationEngine { alpha }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.alpha)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Pearson correlation for every unordered pair of `columns`, in
    /// combination order. Rows with a null in either column are skipped.
    pub fn pairwise_correlations<S: AsRef<str>>(
        &self,
        table: &RecordTable,
        columns: &[S],
    ) -> Result<Vec<AssociationResult>> {
        let values = columns
            .iter()
            .map(|name| table.numeric_values_opt(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut results = Vec::new();
        for i in 0..columns.len() {
            for j in (i + 1)..columns.len() {
                let (x, y): (Vec<f64>, Vec<f64>) = values[i]
                    .iter()
                    .zip(values[j].iter())
                    .filter_map(|(&a, &b)| a.zip(b))
                    .unzip();

                let label = format!("{} x {}", columns[i].as_ref(), columns[j].as_ref());
                let result = if x.len() < 2 {
                    warn!("{}: fewer than two complete rows", label);
                    AssociationResult::new(label, f64::NAN, f64::NAN, x.len(), self.alpha)
                } else {
                    let corr = stats::pearson(&x, &y)?;
                    AssociationResult::new(label, corr.r, corr.p_value, corr.n, self.alpha)
                };
                debug!("{}: r = {:.4}, p = {:.4}", result.label, result.statistic, result.p_value);
                results.push(result);
            }
        }

        Ok(results)
    }

    /// One-sample t-test of every subgroup of every category column against
    /// the mean of its complement, for each continuous column.
    ///
    /// Subgroups are visited in sorted order. Degenerate subgroups (one row,
    /// or no spread around a mean equal to the reference) give NaN results.
    pub fn subgroup_ttests<S: AsRef<str>, T: AsRef<str>>(
        &self,
        table: &RecordTable,
        category_columns: &[S],
        continuous_columns: &[T],
    ) -> Result<Vec<AssociationResult>> {
        let continuous = continuous_columns
            .iter()
            .map(|name| table.numeric_values_opt(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut results = Vec::new();
        for category in category_columns {
            let category = category.as_ref();
            let keys = table.display_values(category)?;
            let subgroups: BTreeSet<&str> = keys.iter().flatten().map(String::as_str).collect();

            for subgroup in subgroups {
                for (column, values) in continuous_columns.iter().zip(continuous.iter()) {
                    let mut inside = Vec::new();
                    let mut outside = Vec::new();
                    for (key, value) in keys.iter().zip(values.iter()) {
                        if let Some(v) = value {
                            if key.as_deref() == Some(subgroup) {
                                inside.push(*v);
                            } else {
                                outside.push(*v);
                            }
                        }
                    }

                    let label = format!("{}={} x {}", category, subgroup, column.as_ref());
                    let test = stats::ttest_1samp(&inside, mean(&outside));
                    if test.pvalue.is_nan() {
                        warn!("{}: t-test undefined for {} rows", label, inside.len());
                    }
                    results.push(AssociationResult::new(
                        label,
                        test.statistic,
                        test.pvalue,
                        inside.len(),
                        self.alpha,
                    ));
                }
            }
        }

        Ok(results)
    }

    /// Both analyses with the columns named in `config`
    pub fn run(&self, table: &RecordTable, config: &AnalysisConfig) -> Result<AssociationReport> {
        if config.correlation_columns.len() < 2 {
            return Err(Error::InvalidInput(
                "pairwise correlation needs at least two columns".into(),
            ));
        }
        Ok(AssociationReport {
            correlations: self.pairwise_correlations(table, &config.correlation_columns)?,
            subgroup_tests: self.subgroup_ttests(
                table,
                &config.category_columns,
                &config.continuous_columns,
            )?,
        })
    }
}

impl Default for AssociationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

/// Output of `AssociationEngine::run`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationReport {
    pub correlations: Vec<AssociationResult>,
    pub subgroup_tests: Vec<AssociationResult>,
}

//! Univariate feature selection by regression F-test

use std::cmp::Ordering;

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::stats::f_regression;
use crate::table::RecordTable;

/// F-test score of one predictor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureScore {
    pub column: String,
    pub f_statistic: f64,
    pub p_value: f64,
    pub selected: bool,
}

/// Outcome of a selection: chosen columns in table order plus every score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRanking {
    pub selected: Vec<String>,
    pub scores: Vec<FeatureScore>,
}

/// Keeps the `k` predictors with the highest F-statistic against a target
#[derive(Debug, Clone, Copy)]
pub struct SelectKBest {
    k: usize,
}

impl SelectKBest {
    pub fn new(k: usize) -> Self {
        SelectKBest { k }
    }

    /// Scores every column of `predictors` against `target`.
    ///
    /// Columns must be numeric and free of nulls. NaN scores (constant columns)
    /// rank below every finite score; among equal scores the later column wins.
    pub fn fit(&self, predictors: &RecordTable, target: &[f64]) -> Result<FeatureRanking> {
        let available = predictors.column_count();
        if self.k == 0 || self.k > available {
            return Err(Error::InvalidK {
                k: self.k,
                available,
            });
        }
        if target.len() != predictors.row_count() {
            return Err(Error::LengthMismatch {
                expected: predictors.row_count(),
                actual: target.len(),
            });
        }

        let mut scores = predictors
            .column_names()
            .iter()
            .map(|name| {
                let values = predictors.numeric_values(name)?;
                let test = f_regression(&values, target)?;
                Ok(FeatureScore {
                    column: name.clone(),
                    f_statistic: test.f_statistic,
                    p_value: test.p_value,
                    selected: false,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| compare_scores(scores[a].f_statistic, scores[b].f_statistic));
        for &i in &order[order.len() - self.k..] {
            scores[i].selected = true;
        }

        let selected: Vec<String> = scores
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.column.clone())
            .collect();
        debug!("select_k_best: kept {:?}", selected);

        Ok(FeatureRanking { selected, scores })
    }
}

// NaN sorts below every score
fn compare_scores(a: f64, b: f64) -> Ordering {
    let key = |score: f64| if score.is_nan() { f64::NEG_INFINITY } else { score };
    key(a).total_cmp(&key(b))
}

/// Names of the `k` best predictors, in table order
pub fn select_k_best(predictors: &RecordTable, target: &[f64], k: usize) -> Result<Vec<String>> {
    Ok(SelectKBest::new(k).fit(predictors, target)?.selected)
}

//! Preprocessing transformers: min-max scaling and drop-first one-hot encoding

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::column::{ColumnType, Float64Column, UInt64Column};
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::stats::descriptive::min_max;
use crate::table::RecordTable;

/// Suffix appended to the names of scaled columns
pub const SCALED_SUFFIX: &str = "_scaled";

/// Fitted min-max parameters of one column.
///
/// A binding fitted on one table can be applied unchanged to any other table
/// holding the same column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerBinding {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

impl ScalerBinding {
    /// Observes min and max of `column` in `table`, ignoring nulls
    pub fn fit(table: &RecordTable, column: &str) -> Result<Self> {
        let values: Vec<f64> = table
            .numeric_values_opt(column)?
            .into_iter()
            .flatten()
            .collect();

        let (min, max) = min_max(&values).ok_or_else(|| {
            Error::InsufficientData(format!("column {} has no values to scale", column))
        })?;

        if max == min {
            return Err(Error::DegenerateColumn(column.to_string()));
        }

        Ok(Self {
            column: column.to_string(),
            min,
            max,
        })
    }

    /// `(x - min) / (max - min)`
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    pub fn inverse(&self, scaled: f64) -> f64 {
        scaled * (self.max - self.min) + self.min
    }

    /// Scales the bound column of `table` into a new column
    pub fn transform_column(&self, table: &RecordTable) -> Result<Float64Column> {
        let values = table.numeric_values_opt(&self.column)?;
        Ok(Float64Column::from_options(
            values
                .into_iter()
                .map(|v| v.map(|x| self.scale(x)))
                .collect(),
        ))
    }
}

/// Min-max scaler writing `{column}{suffix}` columns
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    columns: Vec<String>,
    bindings: Vec<ScalerBinding>,
    suffix: String,
    drop_original: bool,
}

impl MinMaxScaler {
    /// Scaler over `columns`; originals are dropped after scaling
    pub fn new(columns: Vec<String>) -> Self {
        MinMaxScaler {
            columns,
            bindings: Vec::new(),
            suffix: SCALED_SUFFIX.to_string(),
            drop_original: true,
        }
    }

    /// Transform-only scaler built from bindings fitted elsewhere
    pub fn from_bindings(bindings: Vec<ScalerBinding>) -> Self {
        MinMaxScaler {
            columns: bindings.iter().map(|b| b.column.clone()).collect(),
            bindings,
            suffix: SCALED_SUFFIX.to_string(),
            drop_original: true,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn drop_original(mut self, drop: bool) -> Self {
        self.drop_original = drop;
        self
    }

    /// Fitted bindings, empty before `fit`
    pub fn bindings(&self) -> &[ScalerBinding] {
        &self.bindings
    }

    pub fn into_bindings(self) -> Vec<ScalerBinding> {
        self.bindings
    }

    pub fn is_fitted(&self) -> bool {
        self.bindings.len() == self.columns.len()
    }
}

impl Transformer for MinMaxScaler {
    fn fit(&mut self, table: &RecordTable) -> Result<()> {
        self.bindings = self
            .columns
            .iter()
            .map(|column| ScalerBinding::fit(table, column))
            .collect::<Result<Vec<_>>>()?;

        for binding in &self.bindings {
            debug!(
                "scaler: {} in [{}, {}]",
                binding.column, binding.min, binding.max
            );
        }
        Ok(())
    }

    fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        if !self.is_fitted() {
            return Err(Error::InvalidInput("scaler has not been fitted".into()));
        }

        let mut result = table.clone();
        for binding in &self.bindings {
            let scaled = binding.transform_column(table)?;
            result.add_column(format!("{}{}", binding.column, self.suffix), scaled)?;
        }

        if self.drop_original {
            result.drop_columns(&self.columns)?;
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "min_max_scaler"
    }
}

/// Fits a scaler on `table` and returns the scaled table with its bindings
pub fn scale_columns(
    table: &RecordTable,
    columns: &[String],
    drop_original: bool,
) -> Result<(RecordTable, Vec<ScalerBinding>)> {
    let mut scaler = MinMaxScaler::new(columns.to_vec()).drop_original(drop_original);
    let scaled = scaler.fit_transform(table)?;
    Ok((scaled, scaler.into_bindings()))
}

/// One-hot encoder producing `{column}_{value}` indicator columns.
///
/// Categories are sorted (numerically for unsigned columns, lexically
/// otherwise) so that naming and the dropped reference level depend only on the
/// set of values present.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    // per column, in `columns` order
    categories: Vec<Vec<String>>,
    drop_first: bool,
}

impl OneHotEncoder {
    pub fn new(columns: Vec<String>, drop_first: bool) -> Self {
        OneHotEncoder {
            columns,
            categories: Vec::new(),
            drop_first,
        }
    }

    /// Sorted categories observed for `column` during `fit`
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.categories.get(i))
            .map(Vec::as_slice)
    }

    /// Names of the indicator columns `transform` adds
    pub fn output_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.categories.iter())
            .flat_map(|(column, values)| {
                self.kept(values)
                    .iter()
                    .map(move |value| format!("{}_{}", column, value))
            })
            .collect()
    }

    fn kept<'a>(&self, values: &'a [String]) -> &'a [String] {
        if self.drop_first && !values.is_empty() {
            &values[1..]
        } else {
            values
        }
    }

    fn distinct_values(table: &RecordTable, column: &str) -> Result<Vec<String>> {
        let column_type = table.column_type(column)?;
        if column_type == ColumnType::Float64 {
            return Err(Error::ColumnTypeMismatch {
                name: column.to_string(),
                expected: ColumnType::String,
                found: column_type,
            });
        }

        let distinct: BTreeSet<String> = table
            .display_values(column)?
            .into_iter()
            .flatten()
            .collect();
        let mut values: Vec<String> = distinct.into_iter().collect();

        if column_type == ColumnType::UInt64 {
            values.sort_by_key(|v| v.parse::<u64>().unwrap_or(u64::MAX));
        }
        Ok(values)
    }
}

impl Transformer for OneHotEncoder {
    fn fit(&mut self, table: &RecordTable) -> Result<()> {
        self.categories = self
            .columns
            .iter()
            .map(|column| Self::distinct_values(table, column))
            .collect::<Result<Vec<_>>>()?;

        for (column, values) in self.columns.iter().zip(self.categories.iter()) {
            if values.len() < 2 && self.drop_first {
                warn!(
                    "encoder: column {} has {} level(s), no indicator remains after dropping the reference",
                    column,
                    values.len()
                );
            }
        }
        Ok(())
    }

    fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        if self.categories.len() != self.columns.len() {
            return Err(Error::InvalidInput("encoder has not been fitted".into()));
        }

        let mut result = table.clone();
        for (column, values) in self.columns.iter().zip(self.categories.iter()) {
            let observed = table.display_values(column)?;

            for value in self.kept(values) {
                let indicator: Vec<u64> = observed
                    .iter()
                    .map(|v| u64::from(v.as_deref() == Some(value.as_str())))
                    .collect();
                result.add_column(format!("{}_{}", column, value), UInt64Column::new(indicator))?;
            }
        }

        result.drop_columns(&self.columns)?;
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "one_hot_encoder"
    }
}

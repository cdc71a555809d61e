//! Row-level plausibility filters and unsigned coercion

use std::ops::Bound;

use log::{debug, info};

use crate::column::{Column, UInt64Column};
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::table::RecordTable;
use crate::zillow::columns;

/// Interval condition on one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    pub column: String,
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl FilterPredicate {
    pub fn new(column: impl Into<String>, lower: Bound<f64>, upper: Bound<f64>) -> Self {
        FilterPredicate {
            column: column.into(),
            lower,
            upper,
        }
    }

    /// `lower < x < upper`
    pub fn open(column: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self::new(column, Bound::Excluded(lower), Bound::Excluded(upper))
    }

    pub fn matches(&self, value: f64) -> bool {
        let above = match self.lower {
            Bound::Included(lo) => value >= lo,
            Bound::Excluded(lo) => value > lo,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Included(hi) => value <= hi,
            Bound::Excluded(hi) => value < hi,
            Bound::Unbounded => true,
        };
        above && below
    }

    /// Row mask of `table`; nulls never match
    pub fn evaluate(&self, table: &RecordTable) -> Result<Vec<bool>> {
        Ok(table
            .numeric_values_opt(&self.column)?
            .into_iter()
            .map(|v| v.map_or(false, |x| self.matches(x)))
            .collect())
    }
}

/// Drops rows with nulls, keeps rows satisfying every predicate, then coerces
/// count-like columns to unsigned integers.
#[derive(Debug, Clone)]
pub struct OutlierFilter {
    predicates: Vec<FilterPredicate>,
    unsigned_columns: Vec<String>,
}

impl OutlierFilter {
    pub fn new(predicates: Vec<FilterPredicate>, unsigned_columns: Vec<String>) -> Self {
        OutlierFilter {
            predicates,
            unsigned_columns,
        }
    }

    /// Bounds for single-family homes in the Zillow extract
    pub fn zillow() -> Self {
        Self::new(
            vec![
                FilterPredicate::open(columns::BEDROOMS, 0.0, 7.0),
                FilterPredicate::open(columns::BATHROOMS, 0.0, 7.0),
                FilterPredicate::new(
                    columns::FINISHED_AREA,
                    Bound::Excluded(149.0),
                    Bound::Included(6000.0),
                ),
                FilterPredicate::new(
                    columns::LOT_SIZE,
                    Bound::Unbounded,
                    Bound::Excluded(217_800.2),
                ),
            ],
            vec![
                columns::BEDROOMS.to_string(),
                columns::FINISHED_AREA.to_string(),
                columns::YEAR_BUILT.to_string(),
                columns::TAX_VALUE.to_string(),
            ],
        )
    }

    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    pub fn apply(&self, table: &RecordTable) -> Result<RecordTable> {
        for name in self
            .predicates
            .iter()
            .map(|p| p.column.as_str())
            .chain(self.unsigned_columns.iter().map(String::as_str))
        {
            table.column(name)?;
        }

        let mut result = table.drop_nulls()?;
        info!(
            "dropped {} rows with nulls, {} remain",
            table.row_count() - result.row_count(),
            result.row_count()
        );

        for predicate in &self.predicates {
            let before = result.row_count();
            result = result.filter(&predicate.evaluate(&result)?)?;
            debug!(
                "{} {:?}..{:?}: {} -> {} rows",
                predicate.column,
                predicate.lower,
                predicate.upper,
                before,
                result.row_count()
            );
        }

        for name in &self.unsigned_columns {
            let coerced = coerce_unsigned(&result, name)?;
            result.replace_column(name, coerced)?;
        }

        info!(
            "outlier filter kept {} of {} rows",
            result.row_count(),
            table.row_count()
        );
        Ok(result)
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::zillow()
    }
}

impl Transformer for OutlierFilter {
    fn fit(&mut self, _table: &RecordTable) -> Result<()> {
        Ok(())
    }

    fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        self.apply(table)
    }

    fn name(&self) -> &'static str {
        "outlier_filter"
    }
}

/// Converts a numeric column to `u64`, failing on negative, fractional,
/// non-finite or null values
pub fn coerce_unsigned(table: &RecordTable, name: &str) -> Result<UInt64Column> {
    if let Column::UInt64(col) = table.column(name)? {
        return Ok(col.clone());
    }

    let conversion_error = |value: String| Error::ValueConversion {
        column: name.to_string(),
        value,
        target: "u64",
    };

    table
        .numeric_values_opt(name)?
        .into_iter()
        .map(|value| match value {
            Some(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
                Ok(v as u64)
            }
            Some(v) => Err(conversion_error(v.to_string())),
            None => Err(conversion_error("null".into())),
        })
        .collect::<Result<Vec<u64>>>()
        .map(UInt64Column::new)
}

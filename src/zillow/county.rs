//! FIPS code to county name mapping

use std::collections::BTreeMap;

use log::{info, warn};

use crate::column::StringColumn;
use crate::config::CountyCode;
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::table::RecordTable;
use crate::zillow::columns;

/// County assigned to codes missing from the lookup
pub const UNKNOWN_COUNTY: &str = "Unknown";

/// Finite mapping from FIPS code to county name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountyLookup {
    codes: BTreeMap<u64, String>,
}

impl CountyLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Los Angeles, Orange and Ventura
    pub fn zillow() -> Self {
        Self::from_codes(&crate::config::PrepareConfig::default().counties)
    }

    pub fn from_codes(codes: &[CountyCode]) -> Self {
        CountyLookup {
            codes: codes.iter().map(|c| (c.code, c.name.clone())).collect(),
        }
    }

    pub fn insert(&mut self, code: u64, name: impl Into<String>) -> Option<String> {
        self.codes.insert(code, name.into())
    }

    /// County for `code`; codes must match exactly, so 6037.5 has no county
    pub fn county_for(&self, code: f64) -> Option<&str> {
        if !code.is_finite() || code < 0.0 || code.fract() != 0.0 {
            return None;
        }
        self.codes.get(&(code as u64)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.codes.iter().map(|(code, name)| (*code, name.as_str()))
    }

    /// Distinct non-null codes of `column` that the lookup does not cover,
    /// in ascending order
    pub fn unmapped_codes(&self, table: &RecordTable, column: &str) -> Result<Vec<f64>> {
        let mut missing: Vec<f64> = table
            .numeric_values_opt(column)?
            .into_iter()
            .flatten()
            .filter(|&code| self.county_for(code).is_none())
            .collect();
        missing.sort_by(f64::total_cmp);
        missing.dedup();
        Ok(missing)
    }
}

/// Replaces the FIPS code column with a county name column
#[derive(Debug, Clone)]
pub struct CountyMapper {
    lookup: CountyLookup,
    source_column: String,
    target_column: String,
}

impl CountyMapper {
    pub fn new(lookup: CountyLookup) -> Self {
        CountyMapper {
            lookup,
            source_column: columns::FIPS.to_string(),
            target_column: columns::COUNTY.to_string(),
        }
    }

    pub fn with_columns(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_column = source.into();
        self.target_column = target.into();
        self
    }

    pub fn lookup(&self) -> &CountyLookup {
        &self.lookup
    }

    /// Appends the county column and removes the code column. Unknown or null
    /// codes map to `UNKNOWN_COUNTY`.
    pub fn map(&self, table: &RecordTable) -> Result<RecordTable> {
        let codes = table.numeric_values_opt(&self.source_column)?;

        let mut unmapped = 0usize;
        let counties: Vec<String> = codes
            .iter()
            .map(|code| match code.and_then(|c| self.lookup.county_for(c)) {
                Some(name) => name.to_string(),
                None => {
                    unmapped += 1;
                    UNKNOWN_COUNTY.to_string()
                }
            })
            .collect();

        if unmapped > 0 {
            let missing = self.lookup.unmapped_codes(table, &self.source_column)?;
            warn!(
                "{} rows have no county for {} (codes {:?})",
                unmapped, self.source_column, missing
            );
        }

        let mut result = table.clone();
        result.add_column(self.target_column.clone(), StringColumn::new(counties))?;
        result.drop_column(&self.source_column)?;

        info!("mapped {} to {}", self.source_column, self.target_column);
        Ok(result)
    }
}

impl Default for CountyMapper {
    fn default() -> Self {
        Self::new(CountyLookup::zillow())
    }
}

impl Transformer for CountyMapper {
    fn fit(&mut self, _table: &RecordTable) -> Result<()> {
        if self.lookup.is_empty() {
            return Err(Error::Config("county lookup is empty".into()));
        }
        Ok(())
    }

    fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        self.map(table)
    }

    fn name(&self) -> &'static str {
        "county_mapper"
    }
}

//! Column roles and schema validation at stage boundaries

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::ColumnType;
use crate::error::{Error, Result};
use crate::table::RecordTable;
use crate::zillow::columns;

/// Semantic role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Identifier,
    NumericContinuous,
    NumericDiscrete,
    Categorical,
    Derived,
    Target,
}

impl ColumnRole {
    /// Identifier and target columns are never dropped without explicit intent
    pub fn is_protected(&self) -> bool {
        matches!(self, ColumnRole::Identifier | ColumnRole::Target)
    }

    fn requires_numeric(&self) -> bool {
        matches!(
            self,
            ColumnRole::NumericContinuous | ColumnRole::NumericDiscrete | ColumnRole::Target
        )
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Identifier => "identifier",
            ColumnRole::NumericContinuous => "numeric-continuous",
            ColumnRole::NumericDiscrete => "numeric-discrete",
            ColumnRole::Categorical => "categorical",
            ColumnRole::Derived => "derived",
            ColumnRole::Target => "target",
        };
        f.write_str(name)
    }
}

/// A named column with its semantic role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub role: ColumnRole,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Expected columns of a table at one stage of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn with(mut self, name: impl Into<String>, role: ColumnRole) -> Self {
        self.columns.push(ColumnSpec::new(name, role));
        self
    }

    /// Role of `name`, if the schema knows the column
    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        self.columns
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.role)
    }

    /// Checks presence and type compatibility of every column in the schema
    pub fn validate(&self, table: &RecordTable) -> Result<()> {
        for spec in &self.columns {
            let found = table.column_type(&spec.name)?;
            let ok = if spec.role.requires_numeric() {
                found.is_numeric()
            } else if spec.role == ColumnRole::Categorical {
                matches!(
                    found,
                    ColumnType::String | ColumnType::Boolean | ColumnType::UInt64
                )
            } else {
                true
            };

            if !ok {
                let expected = if spec.role == ColumnRole::Categorical {
                    ColumnType::String
                } else {
                    ColumnType::Float64
                };
                return Err(Error::ColumnTypeMismatch {
                    name: spec.name.clone(),
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Columns kept after pruning the raw Zillow extract
    pub fn zillow_raw() -> Self {
        Self::default()
            .with(columns::PARCEL_ID, ColumnRole::Identifier)
            .with(columns::BATHROOMS, ColumnRole::NumericDiscrete)
            .with(columns::BEDROOMS, ColumnRole::NumericDiscrete)
            .with(columns::FINISHED_AREA, ColumnRole::NumericContinuous)
            .with(columns::FIPS, ColumnRole::NumericDiscrete)
            .with(columns::LATITUDE, ColumnRole::NumericContinuous)
            .with(columns::LONGITUDE, ColumnRole::NumericContinuous)
            .with(columns::LOT_SIZE, ColumnRole::NumericContinuous)
            .with(columns::YEAR_BUILT, ColumnRole::NumericDiscrete)
            .with(columns::TAX_VALUE, ColumnRole::Target)
    }

    /// Columns of a wrangled table (FIPS code replaced by county name)
    pub fn zillow_prepared() -> Self {
        let mut schema = Self::zillow_raw();
        schema.columns.retain(|spec| spec.name != columns::FIPS);
        schema.with(columns::COUNTY, ColumnRole::Categorical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, StringColumn};

    #[test]
    fn test_validate_reports_missing_and_mistyped() {
        let schema = TableSchema::default()
            .with("value", ColumnRole::Target)
            .with("county", ColumnRole::Categorical);

        let mut table = RecordTable::new();
        table
            .add_column("value", StringColumn::new(vec!["1".into()]))
            .unwrap();
        assert!(matches!(
            schema.validate(&table),
            Err(Error::ColumnTypeMismatch { .. })
        ));

        let mut table = RecordTable::new();
        table
            .add_column("value", Float64Column::new(vec![1.0]))
            .unwrap();
        assert!(matches!(
            schema.validate(&table),
            Err(Error::ColumnNotFound(name)) if name == "county"
        ));
    }

    #[test]
    fn test_protected_roles() {
        let schema = TableSchema::zillow_raw();
        assert!(schema.role_of(columns::PARCEL_ID).unwrap().is_protected());
        assert!(schema.role_of(columns::TAX_VALUE).unwrap().is_protected());
        assert!(!schema.role_of(columns::LATITUDE).unwrap().is_protected());
        assert_eq!(
            TableSchema::zillow_prepared().role_of(columns::COUNTY),
            Some(ColumnRole::Categorical)
        );
        assert_eq!(TableSchema::zillow_prepared().role_of(columns::FIPS), None);
    }
}

use crate::column::{ColumnType, Float64Column};
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::table::RecordTable;
use crate::zillow::columns;

/// Rescales integer micro-degree coordinates to degrees
#[derive(Debug, Clone)]
pub struct GeoUnitNormalizer {
    columns: Vec<String>,
    factor: f64,
}

impl GeoUnitNormalizer {
    pub fn new(columns: Vec<String>, factor: f64) -> Self {
        GeoUnitNormalizer { columns, factor }
    }

    pub fn normalize(&self, table: &RecordTable) -> Result<RecordTable> {
        let mut result = table.clone();
        for name in &self.columns {
            let column = table.column(name)?;
            let scaled: Float64Column = if let Some(col) = column.as_float64() {
                col.map(|x| x * self.factor)
            } else if let Some(col) = column.as_uint64() {
                col.map(|&x| x as f64 * self.factor)
            } else {
                return Err(Error::ColumnTypeMismatch {
                    name: name.clone(),
                    expected: ColumnType::Float64,
                    found: column.column_type(),
                });
            };
            result.replace_column(name, scaled)?;
        }
        Ok(result)
    }
}

impl Default for GeoUnitNormalizer {
    fn default() -> Self {
        Self::new(
            vec![columns::LATITUDE.to_string(), columns::LONGITUDE.to_string()],
            1e-6,
        )
    }
}

impl Transformer for GeoUnitNormalizer {
    fn fit(&mut self, _table: &RecordTable) -> Result<()> {
        Ok(())
    }

    fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        self.normalize(table)
    }

    fn name(&self) -> &'static str {
        "geo_unit_normalizer"
    }
}

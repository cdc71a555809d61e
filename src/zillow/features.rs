//! Derived modeling features and the predictor/target split

use log::info;

use crate::column::{BooleanColumn, Float64Column};
use crate::error::{Error, Result};
use crate::ml::pipeline::Transformer;
use crate::stats::descriptive::quantile;
use crate::table::RecordTable;
use crate::zillow::columns;

/// Adds `bed_bath_ratio`, `min_rooms` and `luxury_house`.
///
/// The luxury threshold is the configured quantile of the target, recomputed
/// from every table passed to `derive`.
#[derive(Debug, Clone)]
pub struct FeatureDeriver {
    luxury_quantile: f64,
}

impl FeatureDeriver {
    pub fn new(luxury_quantile: f64) -> Self {
        FeatureDeriver { luxury_quantile }
    }

    pub fn derive(&self, table: &RecordTable) -> Result<RecordTable> {
        let bedrooms = table.numeric_values(columns::BEDROOMS)?;
        let bathrooms = table.numeric_values(columns::BATHROOMS)?;
        let value = table.numeric_values(columns::TAX_VALUE)?;

        let ratio = bedrooms
            .iter()
            .zip(bathrooms.iter())
            .enumerate()
            .map(|(row, (&bed, &bath))| {
                if bath == 0.0 {
                    Err(Error::DivisionByZero {
                        column: columns::BED_BATH_RATIO.to_string(),
                        row,
                    })
                } else {
                    Ok(bed / bath)
                }
            })
            .collect::<Result<Vec<f64>>>()?;

        let rooms: Vec<f64> = bedrooms
            .iter()
            .zip(bathrooms.iter())
            .map(|(bed, bath)| bed + bath)
            .collect();

        let threshold = quantile(&value, self.luxury_quantile)?;
        let luxury: Vec<bool> = value.iter().map(|&v| v >= threshold).collect();
        info!(
            "luxury threshold {:.2} (q{}), {} of {} houses",
            threshold,
            self.luxury_quantile,
            luxury.iter().filter(|&&l| l).count(),
            luxury.len()
        );

        let mut result = table.clone();
        result.add_column(columns::BED_BATH_RATIO, Float64Column::new(ratio))?;
        result.add_column(columns::MIN_ROOMS, Float64Column::new(rooms))?;
        result.add_column(columns::LUXURY_HOUSE, BooleanColumn::new(luxury))?;
        Ok(result)
    }
}

impl Default for FeatureDeriver {
    fn default() -> Self {
        Self::new(0.75)
    }
}

impl Transformer for FeatureDeriver {
    fn fit(&mut self, _table: &RecordTable) -> Result<()> {
        Ok(())
    }

    fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        self.derive(table)
    }

    fn name(&self) -> &'static str {
        "feature_deriver"
    }
}

/// Predictors (everything but the target and identifier columns) and the
/// target values
pub fn split_features_target<S: AsRef<str>>(
    table: &RecordTable,
    target: &str,
    identifiers: &[S],
) -> Result<(RecordTable, Vec<f64>)> {
    let y = table.numeric_values(target)?;

    let mut excluded: Vec<&str> = vec![target];
    excluded.extend(identifiers.iter().map(AsRef::as_ref));
    let x = table.without(&excluded)?;

    Ok((x, y))
}

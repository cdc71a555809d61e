//! Zillow single-family property preparation.
//!
//! Stages run in a fixed order: prune columns, filter outliers, map FIPS codes
//! to counties, normalize coordinates. `prepare` additionally derives modeling
//! features and `model_ready` encodes and scales split partitions with
//! parameters fitted on the training rows only.

pub mod audit;
pub mod columns;
pub mod county;
pub mod features;
pub mod geo;
pub mod outliers;
pub mod prune;

pub use audit::{null_report, NullAudit};
pub use county::{CountyLookup, CountyMapper, UNKNOWN_COUNTY};
pub use features::{split_features_target, FeatureDeriver};
pub use geo::GeoUnitNormalizer;
pub use outliers::{FilterPredicate, OutlierFilter};
pub use prune::ColumnPruner;

use log::info;

use crate::config::{PipelineConfig, PrepareConfig};
use crate::error::Result;
use crate::ml::pipeline::{Pipeline, Transformer};
use crate::ml::preprocessing::{MinMaxScaler, OneHotEncoder, ScalerBinding};
use crate::ml::TrainValidateTest;
use crate::table::{RecordTable, TableSchema};

/// Cleans a raw extract into the prepared column set
pub fn wrangle(raw: &RecordTable, config: &PrepareConfig) -> Result<RecordTable> {
    let pruned = ColumnPruner::new(config.drop_columns.clone())
        .allow_protected(config.allow_protected_drop)
        .prune(raw)?;
    TableSchema::zillow_raw().validate(&pruned)?;

    let mut pipeline = Pipeline::new();
    pipeline
        .add_transformer(OutlierFilter::zillow())
        .add_transformer(CountyMapper::new(CountyLookup::from_codes(&config.counties)))
        .add_transformer(GeoUnitNormalizer::new(
            vec![columns::LATITUDE.to_string(), columns::LONGITUDE.to_string()],
            config.coordinate_scale,
        ));
    let prepared = pipeline.fit_transform(&pruned)?;

    TableSchema::zillow_prepared().validate(&prepared)?;
    info!(
        "wrangled {} raw rows into {} rows",
        raw.row_count(),
        prepared.row_count()
    );
    Ok(prepared)
}

/// `wrangle` followed by the derived modeling features
pub fn prepare(raw: &RecordTable, config: &PrepareConfig) -> Result<RecordTable> {
    let wrangled = wrangle(raw, config)?;
    FeatureDeriver::new(config.luxury_quantile).derive(&wrangled)
}

/// Encoded and scaled partitions plus the scaler bindings fitted on train
#[derive(Debug, Clone)]
pub struct ModelFrames {
    pub frames: TrainValidateTest,
    pub bindings: Vec<ScalerBinding>,
}

/// Fits the encoder and scaler on the training partition and applies both,
/// unchanged, to validate and test
pub fn model_ready(split: &TrainValidateTest, config: &PipelineConfig) -> Result<ModelFrames> {
    let mut encoder = OneHotEncoder::new(config.encode.columns.clone(), config.encode.drop_first);
    let mut scaler = MinMaxScaler::new(config.scale.columns.clone())
        .with_suffix(config.scale.suffix.clone())
        .drop_original(config.scale.drop_original);

    let train = scaler.fit_transform(&encoder.fit_transform(&split.train)?)?;
    let apply = |table: &RecordTable| -> Result<RecordTable> {
        scaler.transform(&encoder.transform(table)?)
    };

    let frames = TrainValidateTest {
        validate: apply(&split.validate)?,
        test: apply(&split.test)?,
        train,
    };

    Ok(ModelFrames {
        frames,
        bindings: scaler.bindings().to_vec(),
    })
}

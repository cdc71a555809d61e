//! Data preparation and statistical feature analysis for the Zillow 2017
//! single-family property extract.
//!
//! The crate acquires the raw extract, cleans it into a typed `RecordTable`,
//! derives modeling features, explores associations between attributes and
//! produces reproducible train/validate/test partitions.

#![allow(clippy::needless_return)]
#![allow(clippy::too_many_arguments)]

pub mod column;
pub mod config;
pub mod error;
pub mod explore;
pub mod io;
pub mod ml;
pub mod stats;
pub mod table;
pub mod zillow;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use explore::{AssociationEngine, AssociationResult};
pub use ml::{Splitter, TrainValidateTest};
pub use table::{ColumnRole, ColumnSpec, RecordTable, TableSchema};

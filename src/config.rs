//! Pipeline configuration
//!
//! Every stage receives its settings explicitly. `PipelineConfig` groups them
//! and round-trips through TOML so a run can be reproduced from a file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats::DEFAULT_ALPHA;
use crate::zillow::columns::{self, owned};

/// Seed shared by both split stages
pub const DEFAULT_SEED: u64 = 987;

/// Single-family residences with a 2017 transaction
pub const DEFAULT_QUERY: &str = "SELECT properties_2017.* \
     FROM properties_2017 \
     JOIN propertylandusetype USING (propertylandusetypeid) \
     JOIN predictions_2017 USING (parcelid) \
     WHERE propertylandusedesc = 'Single Family Residential' \
     AND predictions_2017.transactiondate LIKE '2017%'";

/// Where the raw extract comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// SQLite database holding the Zillow tables
    pub db_path: PathBuf,
    /// Flat-file cache of the query result
    pub cache_path: PathBuf,
    pub query: String,
    /// Ignore the cache and query the database again
    pub refresh: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            db_path: PathBuf::from("zillow.db"),
            cache_path: PathBuf::from("zillow_data.csv"),
            query: DEFAULT_QUERY.to_string(),
            refresh: false,
        }
    }
}

/// A FIPS code and the county it names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyCode {
    pub code: u64,
    pub name: String,
}

/// Cleaning of the raw extract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    /// Columns removed by the pruner
    pub drop_columns: Vec<String>,
    /// Permit the pruner to drop identifier and target columns
    pub allow_protected_drop: bool,
    /// FIPS lookup used to derive the county column
    pub counties: Vec<CountyCode>,
    /// Multiplier turning integer micro-degrees into degrees
    pub coordinate_scale: f64,
    /// Upper percentile of the target marking a luxury house
    pub luxury_quantile: f64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        PrepareConfig {
            drop_columns: owned(columns::DROPPED_COLUMNS),
            allow_protected_drop: false,
            counties: vec![
                CountyCode {
                    code: 6037,
                    name: "Los Angeles".into(),
                },
                CountyCode {
                    code: 6059,
                    name: "Orange".into(),
                },
                CountyCode {
                    code: 6111,
                    name: "Ventura".into(),
                },
            ],
            coordinate_scale: 1e-6,
            luxury_quantile: 0.75,
        }
    }
}

/// Train/validate/test proportions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub seed: u64,
    /// Share of rows kept for train+validate; the rest is test
    pub train_validate_fraction: f64,
    /// Share of train+validate kept for train; the rest is validate
    pub train_fraction: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            seed: DEFAULT_SEED,
            train_validate_fraction: 0.8,
            train_fraction: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub columns: Vec<String>,
    pub drop_original: bool,
    pub suffix: String,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        ScaleConfig {
            columns: owned(columns::SCALED_COLUMNS),
            drop_original: true,
            suffix: crate::ml::preprocessing::SCALED_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub columns: Vec<String>,
    pub drop_first: bool,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        EncodeConfig {
            columns: owned(columns::ENCODED_COLUMNS),
            drop_first: true,
        }
    }
}

/// Statistical exploration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance threshold for `reject_null`
    pub alpha: f64,
    pub correlation_columns: Vec<String>,
    pub category_columns: Vec<String>,
    pub continuous_columns: Vec<String>,
    pub target_column: String,
    /// Columns never used as predictors
    pub identifier_columns: Vec<String>,
    /// Number of predictors kept by the selector
    pub k: usize,
    /// Upper bound on the null fraction reported by the null audit
    pub max_null_percent: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            alpha: DEFAULT_ALPHA,
            correlation_columns: owned(columns::CORRELATION_COLUMNS),
            category_columns: vec![columns::COUNTY.to_string()],
            continuous_columns: owned(columns::CONTINUOUS_COLUMNS),
            target_column: columns::TAX_VALUE.to_string(),
            identifier_columns: vec![columns::PARCEL_ID.to_string()],
            k: 3,
            max_null_percent: 1.0,
        }
    }
}

/// Settings of a complete run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub prepare: PrepareConfig,
    pub split: SplitConfig,
    pub scale: ScaleConfig,
    pub encode: EncodeConfig,
    pub analysis: AnalysisConfig,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges that the type system cannot express
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if !(analysis.alpha > 0.0 && analysis.alpha < 1.0) {
            return Err(Error::Config(format!(
                "alpha must be in (0, 1), got {}",
                analysis.alpha
            )));
        }
        if analysis.k == 0 {
            return Err(Error::Config("k must be at least 1".into()));
        }
        if !(analysis.max_null_percent >= 0.0) {
            return Err(Error::Config(format!(
                "max_null_percent must be non-negative, got {}",
                analysis.max_null_percent
            )));
        }

        for (name, fraction) in [
            ("train_validate_fraction", self.split.train_validate_fraction),
            ("train_fraction", self.split.train_fraction),
        ] {
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(Error::Config(format!(
                    "{} must be in (0, 1), got {}",
                    name, fraction
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.prepare.luxury_quantile) {
            return Err(Error::Config(format!(
                "luxury_quantile must be in [0, 1], got {}",
                self.prepare.luxury_quantile
            )));
        }
        if !self.prepare.coordinate_scale.is_finite() {
            return Err(Error::Config("coordinate_scale must be finite".into()));
        }

        Ok(())
    }
}

/// Builder for PipelineConfig
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        PipelineConfigBuilder {
            config: PipelineConfig::default(),
        }
    }

    /// Sets the database path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source.db_path = path.into();
        self
    }

    /// Sets the CSV cache path
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source.cache_path = path.into();
        self
    }

    pub fn refresh(mut self, refresh: bool) -> Self {
        self.config.source.refresh = refresh;
        self
    }

    pub fn drop_columns(mut self, columns: Vec<String>) -> Self {
        self.config.prepare.drop_columns = columns;
        self
    }

    pub fn allow_protected_drop(mut self, allow: bool) -> Self {
        self.config.prepare.allow_protected_drop = allow;
        self
    }

    /// Sets the split seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.split.seed = seed;
        self
    }

    pub fn split_fractions(mut self, train_validate: f64, train: f64) -> Self {
        self.config.split.train_validate_fraction = train_validate;
        self.config.split.train_fraction = train;
        self
    }

    pub fn scale_columns(mut self, columns: Vec<String>) -> Self {
        self.config.scale.columns = columns;
        self
    }

    pub fn encode_columns(mut self, columns: Vec<String>) -> Self {
        self.config.encode.columns = columns;
        self
    }

    /// Sets the significance threshold
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.analysis.alpha = alpha;
        self
    }

    pub fn k(mut self, k: usize) -> Self {
        self.config.analysis.k = k;
        self
    }

    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.config.analysis.target_column = column.into();
        self
    }

    /// Validates and returns the config
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

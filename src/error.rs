use thiserror::Error;

use crate::column::ColumnType;

/// Error type shared by every stage of the preparation pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("column type mismatch: column {name}, expected {expected:?}, found {found:?}")]
    ColumnTypeMismatch {
        name: String,
        expected: ColumnType,
        found: ColumnType,
    },

    #[error("column {column} is protected ({role}) and cannot be dropped")]
    ProtectedColumn { column: String, role: String },

    #[error("null value in column {column} at row {row}")]
    NullValue { column: String, row: usize },

    #[error("cannot convert value {value} in column {column} to {target}")]
    ValueConversion {
        column: String,
        value: String,
        target: &'static str,
    },

    #[error("column {0} has zero range and cannot be scaled")]
    DegenerateColumn(String),

    #[error("invalid k: {k} (available predictors: {available})")]
    InvalidK { k: usize, available: usize },

    #[error("division by zero deriving {column} at row {row}")]
    DivisionByZero { column: String, row: usize },

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub mod csv;
pub mod report;
pub mod source;
pub mod sql;

// Re-export commonly used functions
pub use self::csv::{read_csv, write_csv};
pub use report::{write_json, write_records_csv};
pub use source::{CachedSource, CsvSource, DataSource, SqliteSource};
pub use sql::{execute_sql, read_sql};

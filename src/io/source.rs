//! Acquisition of the raw property extract

use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::io::csv::{read_csv, write_csv};
use crate::io::sql::read_sql;
use crate::table::RecordTable;

/// Supplies a complete raw table in one call
pub trait DataSource {
    fn fetch(&self) -> Result<RecordTable>;

    /// Human-readable origin used in logs
    fn describe(&self) -> String;
}

/// Runs a query against a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteSource {
    db_path: PathBuf,
    query: String,
}

impl SqliteSource {
    pub fn new(db_path: impl Into<PathBuf>, query: impl Into<String>) -> Self {
        SqliteSource {
            db_path: db_path.into(),
            query: query.into(),
        }
    }
}

impl DataSource for SqliteSource {
    fn fetch(&self) -> Result<RecordTable> {
        read_sql(&self.query, &self.db_path)
    }

    fn describe(&self) -> String {
        format!("sqlite database {}", self.db_path.display())
    }
}

/// Reads a CSV file
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSource { path: path.into() }
    }
}

impl DataSource for CsvSource {
    fn fetch(&self) -> Result<RecordTable> {
        read_csv(&self.path)
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

/// Serves a CSV cache when present, otherwise fetches from `inner` and writes
/// the cache
pub struct CachedSource<S: DataSource> {
    inner: S,
    cache_path: PathBuf,
    refresh: bool,
}

impl<S: DataSource> CachedSource<S> {
    pub fn new(inner: S, cache_path: impl Into<PathBuf>) -> Self {
        CachedSource {
            inner,
            cache_path: cache_path.into(),
            refresh: false,
        }
    }

    /// Bypass an existing cache and overwrite it
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    // A failed write must not leave a partial file where the cache is expected
    fn write_cache(&self, table: &RecordTable) -> Result<()> {
        let dir = match self.cache_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir)?;
        write_csv(table, staged.path())?;
        staged
            .persist(&self.cache_path)
            .map_err(|err| Error::Io(err.error))?;
        Ok(())
    }
}

impl CachedSource<SqliteSource> {
    pub fn from_config(config: &SourceConfig) -> Self {
        CachedSource::new(
            SqliteSource::new(&config.db_path, &config.query),
            &config.cache_path,
        )
        .refresh(config.refresh)
    }
}

impl<S: DataSource> DataSource for CachedSource<S> {
    fn fetch(&self) -> Result<RecordTable> {
        if self.cache_path.is_file() && !self.refresh {
            info!("returning cached {}", self.cache_path.display());
            return read_csv(&self.cache_path);
        }

        info!("querying {}", self.inner.describe());
        let table = self.inner.fetch()?;
        self.write_cache(&table)?;
        info!(
            "cached {} rows to {}",
            table.row_count(),
            self.cache_path.display()
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        format!(
            "{} cached at {}",
            self.inner.describe(),
            self.cache_path.display()
        )
    }
}

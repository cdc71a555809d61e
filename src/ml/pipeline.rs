//! Table transformation pipeline
//!
//! Chains fit/transform stages the way a modeling workflow applies them: each
//! stage is fitted on the output of the previous one.

use log::{debug, info};

use crate::error::Result;
use crate::table::RecordTable;

/// A stage that learns parameters from a table and applies them
pub trait Transformer {
    /// Learns parameters from `table`
    fn fit(&mut self, table: &RecordTable) -> Result<()>;

    /// Applies learned parameters, producing a new table
    fn transform(&self, table: &RecordTable) -> Result<RecordTable>;

    /// Fits on `table`, then transforms it
    fn fit_transform(&mut self, table: &RecordTable) -> Result<RecordTable> {
        self.fit(table)?;
        self.transform(table)
    }

    /// Short name used in log output
    fn name(&self) -> &'static str;
}

/// Ordered chain of transformers
pub struct Pipeline {
    transformers: Vec<Box<dyn Transformer>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline {
            transformers: Vec::new(),
        }
    }

    /// Appends a stage
    pub fn add_transformer<T: Transformer + 'static>(&mut self, transformer: T) -> &mut Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Runs every stage's `transform` in order
    pub fn transform(&self, table: &RecordTable) -> Result<RecordTable> {
        let mut result = table.clone();

        for transformer in &self.transformers {
            result = transformer.transform(&result)?;
            debug!(
                "{}: {} rows x {} columns",
                transformer.name(),
                result.row_count(),
                result.column_count()
            );
        }

        Ok(result)
    }

    /// Fits and transforms every stage in order
    pub fn fit_transform(&mut self, table: &RecordTable) -> Result<RecordTable> {
        let mut result = table.clone();

        for transformer in &mut self.transformers {
            let before = result.row_count();
            result = transformer.fit_transform(&result)?;
            info!(
                "{}: {} -> {} rows, {} columns",
                transformer.name(),
                before,
                result.row_count(),
                result.column_count()
            );
        }

        Ok(result)
    }

    /// Fits every stage, feeding each the previous stage's output
    pub fn fit(&mut self, table: &RecordTable) -> Result<()> {
        let mut temp = table.clone();

        for transformer in &mut self.transformers {
            transformer.fit(&temp)?;
            temp = transformer.transform(&temp)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

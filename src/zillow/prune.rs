use log::info;

use crate::error::{Error, Result};
use crate::table::{RecordTable, TableSchema};

/// Drops a fixed set of columns.
///
/// Every listed column must exist. Columns whose schema role is identifier or
/// target are refused unless `allow_protected` is set.
#[derive(Debug, Clone)]
pub struct ColumnPruner {
    columns: Vec<String>,
    schema: TableSchema,
    allow_protected: bool,
}

impl ColumnPruner {
    pub fn new(columns: Vec<String>) -> Self {
        ColumnPruner {
            columns,
            schema: TableSchema::zillow_raw(),
            allow_protected: false,
        }
    }

    /// Schema consulted for protected roles
    pub fn with_schema(mut self, schema: TableSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn allow_protected(mut self, allow: bool) -> Self {
        self.allow_protected = allow;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn prune(&self, table: &RecordTable) -> Result<RecordTable> {
        if !self.allow_protected {
            for column in &self.columns {
                if let Some(role) = self.schema.role_of(column).filter(|r| r.is_protected()) {
                    return Err(Error::ProtectedColumn {
                        column: column.clone(),
                        role: role.to_string(),
                    });
                }
            }
        }

        let result = table.without(&self.columns)?;
        info!(
            "pruned {} columns, {} remain",
            self.columns.len(),
            result.column_count()
        );
        Ok(result)
    }
}

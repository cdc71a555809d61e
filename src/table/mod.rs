// RecordTable and its schema
mod base;
pub mod schema;
mod select;

pub use base::RecordTable;
pub use schema::{ColumnRole, ColumnSpec, TableSchema};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::table::RecordTable;

/// Null share of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullAudit {
    pub column_name: String,
    /// Fraction of null rows, rounded to four decimals
    pub percent_null: f64,
    pub count_null: usize,
}

/// Null audit of every column whose null fraction is at most
/// `max_null_percent`, in column order
pub fn null_report(table: &RecordTable, max_null_percent: f64) -> Result<Vec<NullAudit>> {
    if table.is_empty() {
        return Err(Error::InsufficientData(
            "cannot audit nulls of an empty table".into(),
        ));
    }

    let rows = table.row_count() as f64;
    Ok(table
        .columns()
        .map(|(name, column)| {
            let count_null = column.null_count();
            NullAudit {
                column_name: name.to_string(),
                percent_null: round4(count_null as f64 / rows),
                count_null,
            }
        })
        .filter(|audit| audit.percent_null <= max_null_percent)
        .collect())
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

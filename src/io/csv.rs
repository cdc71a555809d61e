use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer};
use log::debug;

use crate::column::{BooleanColumn, Column, Float64Column, StringColumn};
use crate::error::{Error, Result};
use crate::table::RecordTable;

/// Reads a headed CSV file into a `RecordTable`.
///
/// Column types are inferred from the non-empty cells: all numeric gives
/// Float64, all `true`/`false` (any case) gives Boolean, anything else String.
/// Empty and `NaN` cells are nulls; a column with no values at all reads as
/// Float64.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<RecordTable> {
    let file = File::open(path.as_ref())?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for result in rdr.records() {
        let record = result?;
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut table = RecordTable::new();
    for (header, values) in headers.into_iter().zip(cells) {
        let column = infer_column(values);
        debug!("read_csv: {} as {:?}", header, column.column_type());
        table.add_column(header, column)?;
    }

    Ok(table)
}

pub(crate) fn infer_column(values: Vec<String>) -> Column {
    let present = || values.iter().filter(|v| !v.is_empty());

    if present().all(|v| v.parse::<f64>().is_ok()) {
        let parsed = values
            .iter()
            .map(|v| v.parse::<f64>().ok().filter(|x| !x.is_nan()))
            .collect();
        return Float64Column::from_options(parsed).into();
    }

    if present().all(|v| parse_bool(v).is_some()) {
        let parsed = values.iter().map(|v| parse_bool(v)).collect();
        return BooleanColumn::from_options(parsed).into();
    }

    let strings = values
        .into_iter()
        .map(|v| if v.is_empty() { None } else { Some(v) })
        .collect();
    StringColumn::from_options(strings).into()
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Writes `table` with a header row; nulls become empty cells
pub fn write_csv<P: AsRef<Path>>(table: &RecordTable, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(table.column_names())?;

    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns()
            .map(|(_, column)| column.display_at(row).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    #[test]
    fn test_infer_column_types() {
        let numbers = infer_column(vec!["1".into(), "".into(), "2.5".into()]);
        assert_eq!(numbers.column_type(), ColumnType::Float64);
        assert!(numbers.is_null(1));

        let flags = infer_column(vec!["True".into(), "false".into()]);
        assert_eq!(flags.column_type(), ColumnType::Boolean);

        let text = infer_column(vec!["Orange".into(), "".into(), "3".into()]);
        assert_eq!(text.column_type(), ColumnType::String);
        assert!(text.is_null(1));

        let missing = infer_column(vec!["NaN".into(), "3".into(), "nan".into()]);
        assert_eq!(missing.column_type(), ColumnType::Float64);
        assert_eq!(missing.null_count(), 2);
        assert_eq!(missing.numeric_at(1), Some(3.0));

        let empty = infer_column(vec!["".into(), "".into()]);
        assert_eq!(empty.column_type(), ColumnType::Float64);
        assert_eq!(empty.null_count(), 2);
    }
}

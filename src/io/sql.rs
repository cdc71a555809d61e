use std::path::Path;

use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::column::{Column, Float64Column, StringColumn};
use crate::error::Result;
use crate::table::RecordTable;

/// Cell read from SQLite before the column type is known
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Null,
    Number(f64),
    Text(String),
}

/// Runs `query` against the SQLite database at `db_path` and returns the result
/// set as a table.
///
/// Columns holding only integers, reals and NULLs become Float64; any text or
/// blob value makes the whole column String.
///
/// ```no_run
/// use zillow_prep::io::read_sql;
///
/// let table = read_sql("SELECT parcelid, fips FROM properties_2017", "zillow.db").unwrap();
/// ```
pub fn read_sql<P: AsRef<Path>>(query: &str, db_path: P) -> Result<RecordTable> {
    let conn = Connection::open(db_path)?;
    let mut stmt = conn.prepare(query)?;

    let column_names: Vec<String> = stmt.column_names().iter().map(|&n| n.to_string()).collect();
    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); column_names.len()];

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (idx, column) in cells.iter_mut().enumerate() {
            let cell = match row.get_ref(idx)? {
                ValueRef::Null => Cell::Null,
                ValueRef::Integer(v) => Cell::Number(v as f64),
                ValueRef::Real(v) => Cell::Number(v),
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    Cell::Text(String::from_utf8_lossy(bytes).into_owned())
                }
            };
            column.push(cell);
        }
    }

    let mut table = RecordTable::new();
    for (name, values) in column_names.into_iter().zip(cells) {
        table.add_column(name, build_column(values))?;
    }
    debug!(
        "read_sql: {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );

    Ok(table)
}

fn build_column(cells: Vec<Cell>) -> Column {
    if cells.iter().any(|c| matches!(c, Cell::Text(_))) {
        let values = cells
            .into_iter()
            .map(|c| match c {
                Cell::Null => None,
                Cell::Number(v) => Some(v.to_string()),
                Cell::Text(s) => Some(s),
            })
            .collect();
        return StringColumn::from_options(values).into();
    }

    let values = cells
        .into_iter()
        .map(|c| match c {
            Cell::Number(v) => Some(v),
            _ => None,
        })
        .collect();
    Float64Column::from_options(values).into()
}

/// Executes a statement that returns no rows; returns the affected row count
pub fn execute_sql<P: AsRef<Path>>(sql: &str, db_path: P) -> Result<usize> {
    let conn = Connection::open(db_path)?;
    Ok(conn.execute(sql, [])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use tempfile::tempdir;

    #[test]
    fn test_read_sql_types() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("test.db");

        execute_sql(
            "CREATE TABLE t (id INTEGER, area REAL, zoning TEXT)",
            &db,
        )
        .unwrap();
        let inserted = execute_sql(
            "INSERT INTO t VALUES (1, 1500.5, 'LAR1'), (2, NULL, NULL), (3, 900, 'LCA11')",
            &db,
        )
        .unwrap();
        assert_eq!(inserted, 3);

        let table = read_sql("SELECT * FROM t ORDER BY id", &db).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_type("id").unwrap(), ColumnType::Float64);
        assert_eq!(table.column_type("zoning").unwrap(), ColumnType::String);
        assert_eq!(
            table.numeric_values_opt("area").unwrap(),
            vec![Some(1500.5), None, Some(900.0)]
        );
    }

    #[test]
    fn test_read_sql_bad_query() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("empty.db");
        assert!(read_sql("SELECT * FROM missing", &db).is_err());
    }
}

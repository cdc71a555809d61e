use std::collections::HashMap;
use std::fmt::{self, Debug};

use crate::column::{Column, ColumnType};
use crate::error::{Error, Result};

/// Columnar in-memory table of property records.
///
/// Columns are named and typed; every row carries a label (its position in the
/// table it was first built as) that survives `take`/`filter`, so partitions
/// produced by the splitter can be traced back to the input rows.
#[derive(Clone, PartialEq)]
pub struct RecordTable {
    // column data
    columns: Vec<Column>,
    // name -> position
    column_indices: HashMap<String, usize>,
    // column order
    column_names: Vec<String>,
    row_count: usize,
    // row labels
    index: Vec<usize>,
}

impl Debug for RecordTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_ROWS: usize = 10;

        if self.columns.is_empty() {
            return write!(f, "RecordTable (0 rows x 0 columns)");
        }

        writeln!(
            f,
            "RecordTable ({} rows x {} columns):",
            self.row_count,
            self.columns.len()
        )?;

        write!(f, "{:<5} |", "idx")?;
        for name in &self.column_names {
            write!(f, " {:<15} |", name)?;
        }
        writeln!(f)?;

        for row in 0..self.row_count.min(MAX_ROWS) {
            write!(f, "{:<5} |", self.index[row])?;
            for col in &self.columns {
                let value = match col {
                    Column::Float64(c) => c
                        .get(row)
                        .map(|v| format!("{:.3}", v))
                        .unwrap_or_else(|| "NULL".to_string()),
                    Column::String(c) => c
                        .get(row)
                        .map(|v| format!("\"{}\"", v))
                        .unwrap_or_else(|| "NULL".to_string()),
                    other => other.display_at(row).unwrap_or_else(|| "NULL".to_string()),
                };
                write!(f, " {:<15} |", value)?;
            }
            writeln!(f)?;
        }

        if self.row_count > MAX_ROWS {
            writeln!(f, "... ({} more rows)", self.row_count - MAX_ROWS)?;
        }

        Ok(())
    }
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            column_indices: HashMap::new(),
            column_names: Vec::new(),
            row_count: 0,
            index: Vec::new(),
        }
    }

    /// Appends a column. The first column fixes the row count.
    pub fn add_column<C: Into<Column>>(&mut self, name: impl Into<String>, column: C) -> Result<()> {
        let name = name.into();
        let column = column.into();

        if self.column_indices.contains_key(&name) {
            return Err(Error::DuplicateColumnName(name));
        }

        let column_len = column.len();
        if !self.columns.is_empty() && column_len != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column_len,
            });
        }

        if self.columns.is_empty() {
            self.row_count = column_len;
            if self.index.len() != column_len {
                self.index = (0..column_len).collect();
            }
        }

        self.column_indices.insert(name.clone(), self.columns.len());
        self.columns.push(column);
        self.column_names.push(name);

        Ok(())
    }

    /// Replaces an existing column in place, keeping its position
    pub fn replace_column<C: Into<Column>>(&mut self, name: &str, column: C) -> Result<()> {
        let column = column.into();
        let position = *self
            .column_indices
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;

        if column.len() != self.row_count {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count,
                found: column.len(),
            });
        }

        self.columns[position] = column;
        Ok(())
    }

    /// Removes a column and returns it
    pub fn drop_column(&mut self, name: &str) -> Result<Column> {
        let position = self
            .column_indices
            .remove(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;

        let column = self.columns.remove(position);
        self.column_names.remove(position);
        for idx in self.column_indices.values_mut() {
            if *idx > position {
                *idx -= 1;
            }
        }

        Ok(column)
    }

    /// Removes several columns. All names are checked before anything is dropped.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        for name in names {
            self.column(name.as_ref())?;
        }
        for name in names {
            self.drop_column(name.as_ref())?;
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        let position = self
            .column_indices
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(&self.columns[*position])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_indices.contains_key(name)
    }

    pub fn column_type(&self, name: &str) -> Result<ColumnType> {
        Ok(self.column(name)?.column_type())
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Row labels in current row order
    pub fn row_labels(&self) -> &[usize] {
        &self.index
    }

    /// Numeric values of a column as `f64`. Fails on string columns and on nulls.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.numeric_column(name)?;
        (0..self.row_count)
            .map(|row| {
                column.numeric_at(row).ok_or_else(|| Error::NullValue {
                    column: name.to_string(),
                    row,
                })
            })
            .collect()
    }

    /// Numeric values of a column as `f64`, nulls as `None`
    pub fn numeric_values_opt(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.numeric_column(name)?;
        Ok((0..self.row_count).map(|row| column.numeric_at(row)).collect())
    }

    /// Values of a column rendered as text, nulls as `None`
    pub fn display_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self.column(name)?;
        Ok((0..self.row_count).map(|row| column.display_at(row)).collect())
    }

    /// Values of a string column, nulls as `None`
    pub fn string_values(&self, name: &str) -> Result<Vec<Option<String>>> {
        let column = self.column(name)?;
        let strings = column.as_string().ok_or_else(|| Error::ColumnTypeMismatch {
            name: name.to_string(),
            expected: ColumnType::String,
            found: column.column_type(),
        })?;
        Ok(strings.iter().map(|v| v.cloned()).collect())
    }

    fn numeric_column(&self, name: &str) -> Result<&Column> {
        let column = self.column(name)?;
        if !column.column_type().is_numeric() {
            return Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: ColumnType::Float64,
                found: column.column_type(),
            });
        }
        Ok(column)
    }

    /// Builds a table from parts already known to be consistent
    pub(crate) fn from_parts(names: Vec<String>, columns: Vec<Column>, index: Vec<usize>) -> Self {
        let column_indices = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            row_count: index.len(),
            columns,
            column_indices,
            column_names: names,
            index,
        }
    }

    pub(crate) fn raw_columns(&self) -> &[Column] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Float64Column, StringColumn, UInt64Column};

    fn sample() -> RecordTable {
        let mut table = RecordTable::new();
        table
            .add_column("a", Float64Column::new(vec![1.0, 2.0, 3.0]))
            .unwrap();
        table
            .add_column("b", UInt64Column::new(vec![4, 5, 6]))
            .unwrap();
        table
            .add_column(
                "c",
                StringColumn::new(vec!["x".into(), "y".into(), "z".into()]),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_add_column_checks() {
        let mut table = sample();
        assert!(matches!(
            table.add_column("a", Float64Column::new(vec![0.0; 3])),
            Err(Error::DuplicateColumnName(_))
        ));
        assert!(matches!(
            table.add_column("d", Float64Column::new(vec![0.0; 2])),
            Err(Error::InconsistentRowCount { expected: 3, found: 2 })
        ));
        assert_eq!(table.row_labels(), &[0, 1, 2]);
    }

    #[test]
    fn test_drop_column_reindexes() {
        let mut table = sample();
        table.drop_column("a").unwrap();
        assert_eq!(table.column_names(), &["b".to_string(), "c".to_string()]);
        assert_eq!(table.numeric_values("b").unwrap(), vec![4.0, 5.0, 6.0]);
        assert!(table.column("c").unwrap().as_string().is_some());
    }

    #[test]
    fn test_string_values_requires_string_column() {
        let table = sample();
        assert_eq!(
            table.string_values("c").unwrap(),
            vec![Some("x".to_string()), Some("y".to_string()), Some("z".to_string())]
        );
        assert!(matches!(
            table.string_values("a"),
            Err(Error::ColumnTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_drop_columns_is_all_or_nothing() {
        let mut table = sample();
        let result = table.drop_columns(&["a", "missing"]);
        assert!(matches!(result, Err(Error::ColumnNotFound(name)) if name == "missing"));
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_numeric_values_rejects_strings_and_nulls() {
        let mut table = sample();
        assert!(matches!(
            table.numeric_values("c"),
            Err(Error::ColumnTypeMismatch { .. })
        ));

        table
            .add_column("n", Float64Column::from_options(vec![Some(1.0), None, Some(2.0)]))
            .unwrap();
        assert!(matches!(
            table.numeric_values("n"),
            Err(Error::NullValue { row: 1, .. })
        ));
        assert_eq!(
            table.numeric_values_opt("n").unwrap(),
            vec![Some(1.0), None, Some(2.0)]
        );
    }
}

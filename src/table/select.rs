//! Row and column selection on `RecordTable`

use log::debug;

use crate::error::{Error, Result};
use crate::table::RecordTable;

impl RecordTable {
    /// Gathers the rows at `indices` (positions, not labels) into a new table
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.row_count()) {
            return Err(Error::IndexOutOfBounds {
                index: bad,
                size: self.row_count(),
            });
        }

        let columns = self.raw_columns().iter().map(|c| c.take(indices)).collect();
        let index = indices.iter().map(|&i| self.row_labels()[i]).collect();

        Ok(Self::from_parts(self.column_names().to_vec(), columns, index))
    }

    /// Keeps the rows where `mask` is true
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.row_count() {
            return Err(Error::LengthMismatch {
                expected: self.row_count(),
                actual: mask.len(),
            });
        }

        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(i, _)| i)
            .collect();

        self.take(&indices)
    }

    /// Deletes every row holding a null in any column
    pub fn drop_nulls(&self) -> Result<Self> {
        let mask: Vec<bool> = (0..self.row_count())
            .map(|row| self.raw_columns().iter().all(|c| !c.is_null(row)))
            .collect();

        let result = self.filter(&mask)?;
        debug!(
            "drop_nulls: {} -> {} rows",
            self.row_count(),
            result.row_count()
        );
        Ok(result)
    }

    /// New table holding only `names`, in the given order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut columns = Vec::with_capacity(names.len());
        let mut column_names = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            if column_names.iter().any(|n: &String| n == name) {
                return Err(Error::DuplicateColumnName(name.to_string()));
            }
            columns.push(self.column(name)?.clone());
            column_names.push(name.to_string());
        }

        Ok(Self::from_parts(column_names, columns, self.row_labels().to_vec()))
    }

    /// Copy of the table without `names`
    pub fn without<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut result = self.clone();
        result.drop_columns(names)?;
        Ok(result)
    }
}

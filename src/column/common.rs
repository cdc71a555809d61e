use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::column::{BooleanColumn, Float64Column, StringColumn, UInt64Column};

/// Identifies the physical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Float64,
    UInt64,
    Boolean,
    String,
}

impl ColumnType {
    /// Whether values of this type can be read as `f64`
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float64 | ColumnType::UInt64 | ColumnType::Boolean)
    }
}

/// A typed column of a `RecordTable`
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float64(Float64Column),
    UInt64(UInt64Column),
    Boolean(BooleanColumn),
    String(StringColumn),
}

/// Bit mask tracking null positions
#[derive(Debug, Clone, PartialEq)]
pub struct BitMask {
    pub(crate) data: Arc<[u8]>,
    pub(crate) len: usize,
}

impl BitMask {
    /// Creates a mask from booleans, `true` marking a set bit
    pub fn from_bools(bools: &[bool]) -> Self {
        let length = bools.len();
        let bytes_needed = (length + 7) / 8;
        let mut data = vec![0u8; bytes_needed];

        for (i, &is_set) in bools.iter().enumerate() {
            if is_set {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        Self {
            data: data.into(),
            len: length,
        }
    }

    /// Whether bit `index` is set; out-of-range positions read as unset
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.data[index / 8] & (1 << (index % 8))) != 0
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        (0..self.len).filter(|&i| self.get(i)).count()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Column {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Float64(col) => col.len(),
            Column::UInt64(col) => col.len(),
            Column::Boolean(col) => col.len(),
            Column::String(col) => col.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Float64(_) => ColumnType::Float64,
            Column::UInt64(_) => ColumnType::UInt64,
            Column::Boolean(_) => ColumnType::Boolean,
            Column::String(_) => ColumnType::String,
        }
    }

    /// Whether the value at `row` is null
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Column::Float64(col) => col.is_null(row),
            Column::UInt64(col) => col.is_null(row),
            Column::Boolean(col) => col.is_null(row),
            Column::String(col) => col.is_null(row),
        }
    }

    pub fn null_count(&self) -> usize {
        match self {
            Column::Float64(col) => col.null_count(),
            Column::UInt64(col) => col.null_count(),
            Column::Boolean(col) => col.null_count(),
            Column::String(col) => col.null_count(),
        }
    }

    /// Gathers the rows at `indices` into a new column
    pub(crate) fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Float64(col) => Column::Float64(col.take(indices)),
            Column::UInt64(col) => Column::UInt64(col.take(indices)),
            Column::Boolean(col) => Column::Boolean(col.take(indices)),
            Column::String(col) => Column::String(col.take(indices)),
        }
    }

    /// Reads the value at `row` as `f64`; `None` for nulls and string columns
    pub fn numeric_at(&self, row: usize) -> Option<f64> {
        match self {
            Column::Float64(col) => col.get(row).copied(),
            Column::UInt64(col) => col.get(row).map(|&v| v as f64),
            Column::Boolean(col) => col.get(row).map(|&v| if v { 1.0 } else { 0.0 }),
            Column::String(_) => None,
        }
    }

    /// Renders the value at `row` as text; `None` for nulls
    pub fn display_at(&self, row: usize) -> Option<String> {
        match self {
            Column::Float64(col) => col.get(row).map(|v| v.to_string()),
            Column::UInt64(col) => col.get(row).map(|v| v.to_string()),
            Column::Boolean(col) => col.get(row).map(|v| v.to_string()),
            Column::String(col) => col.get(row).cloned(),
        }
    }

    pub fn as_float64(&self) -> Option<&Float64Column> {
        match self {
            Column::Float64(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_uint64(&self) -> Option<&UInt64Column> {
        match self {
            Column::UInt64(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringColumn> {
        match self {
            Column::String(col) => Some(col),
            _ => None,
        }
    }
}

impl From<Float64Column> for Column {
    fn from(col: Float64Column) -> Self {
        Column::Float64(col)
    }
}

impl From<UInt64Column> for Column {
    fn from(col: UInt64Column) -> Self {
        Column::UInt64(col)
    }
}

impl From<BooleanColumn> for Column {
    fn from(col: BooleanColumn) -> Self {
        Column::Boolean(col)
    }
}

impl From<StringColumn> for Column {
    fn from(col: StringColumn) -> Self {
        Column::String(col)
    }
}

use crate::column::common::BitMask;

/// Values of one physical type plus an optional null mask.
///
/// Null positions still hold a placeholder value in `data` (the type's default)
/// so that positional access stays O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn<T> {
    pub(crate) data: Vec<T>,
    pub(crate) null_mask: Option<BitMask>,
}

/// Float64 column
pub type Float64Column = TypedColumn<f64>;
/// Unsigned integer column
pub type UInt64Column = TypedColumn<u64>;
/// Boolean column
pub type BooleanColumn = TypedColumn<bool>;
/// String column
pub type StringColumn = TypedColumn<String>;

impl<T: Clone + Default> TypedColumn<T> {
    /// Creates a column without nulls
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            null_mask: None,
        }
    }

    /// Creates a column from optional values, `None` becoming null
    pub fn from_options(values: Vec<Option<T>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data = values.into_iter().map(|v| v.unwrap_or_default()).collect();
        Self::with_nulls(data, nulls)
    }

    /// Creates a column with an explicit null vector (`true` = null)
    pub fn with_nulls(data: Vec<T>, nulls: Vec<bool>) -> Self {
        let null_mask = if nulls.iter().any(|&is_null| is_null) {
            Some(BitMask::from_bools(&nulls))
        } else {
            None
        };

        Self { data, null_mask }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.null_mask.as_ref().map_or(false, |mask| mask.get(index))
    }

    pub fn null_count(&self) -> usize {
        self.null_mask.as_ref().map_or(0, |mask| mask.count_ones())
    }

    /// Value at `index`, `None` when null or out of range
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.is_null(index) {
            return None;
        }
        self.data.get(index)
    }

    /// Iterates values with nulls as `None`
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        (0..self.data.len()).map(move |i| self.get(i))
    }

    /// Gathers `indices` into a new column. Indices must be in range.
    pub(crate) fn take(&self, indices: &[usize]) -> Self {
        let data = indices.iter().map(|&i| self.data[i].clone()).collect();
        let null_mask = self.null_mask.as_ref().and_then(|mask| {
            let nulls: Vec<bool> = indices.iter().map(|&i| mask.get(i)).collect();
            if nulls.iter().any(|&n| n) {
                Some(BitMask::from_bools(&nulls))
            } else {
                None
            }
        });

        Self { data, null_mask }
    }

    /// Applies `f` to every non-null value, keeping the null mask
    pub fn map<U, F>(&self, f: F) -> TypedColumn<U>
    where
        F: Fn(&T) -> U,
        U: Clone + Default,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| if self.is_null(i) { U::default() } else { f(v) })
            .collect();

        TypedColumn {
            data,
            null_mask: self.null_mask.clone(),
        }
    }
}

mod common;
mod typed_column;

pub use common::{BitMask, Column, ColumnType};
pub use typed_column::{BooleanColumn, Float64Column, StringColumn, TypedColumn, UInt64Column};

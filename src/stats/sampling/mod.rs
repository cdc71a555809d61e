// Seeded sampling and row permutations

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::table::RecordTable;

/// Permutation of `0..n` drawn from a generator seeded with `seed`
pub fn shuffled_indices(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    indices
}

/// Internal implementation of `stats::sample_rows`.
///
/// A request larger than the table returns every row in shuffled order.
pub(crate) fn sample_rows_impl(table: &RecordTable, n: usize, seed: u64) -> Result<RecordTable> {
    if table.is_empty() {
        return Err(Error::InsufficientData("cannot sample an empty table".into()));
    }
    if n == 0 {
        return Err(Error::InvalidInput("sample size must be positive".into()));
    }

    let mut indices = shuffled_indices(table.row_count(), seed);
    indices.truncate(n.min(table.row_count()));
    table.take(&indices)
}

//! Seeded train/validate/test partitioning

use log::info;

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::stats::sampling::shuffled_indices;
use crate::table::RecordTable;

/// Smallest table the three-way split accepts
pub const MIN_SPLIT_ROWS: usize = 3;

/// The three partitions of a prepared table
#[derive(Debug, Clone)]
pub struct TrainValidateTest {
    pub train: RecordTable,
    pub validate: RecordTable,
    pub test: RecordTable,
}

impl TrainValidateTest {
    /// Row counts as (train, validate, test)
    pub fn sizes(&self) -> (usize, usize, usize) {
        (
            self.train.row_count(),
            self.validate.row_count(),
            self.test.row_count(),
        )
    }
}

/// Splits `table` into (train, test).
///
/// `floor(train_fraction * n)` rows go to train. Rows are drawn from a
/// permutation seeded with `seed`; the first `n - n_train` positions of the
/// permutation form the test partition.
pub fn train_test_split(
    table: &RecordTable,
    train_fraction: f64,
    seed: u64,
) -> Result<(RecordTable, RecordTable)> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(Error::InvalidInput(format!(
            "train fraction must be in (0, 1), got {}",
            train_fraction
        )));
    }

    let n = table.row_count();
    let n_train = (train_fraction * n as f64).floor() as usize;
    let n_test = n - n_train;
    if n_train == 0 || n_test == 0 {
        return Err(Error::InsufficientData(format!(
            "{} rows cannot be split {:.2}/{:.2} into two non-empty partitions",
            n,
            train_fraction,
            1.0 - train_fraction
        )));
    }

    let permutation = shuffled_indices(n, seed);
    let (test_rows, train_rows) = permutation.split_at(n_test);

    Ok((table.take(train_rows)?, table.take(test_rows)?))
}

/// Three-way splitter driven by a `SplitConfig`
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    pub fn new(config: SplitConfig) -> Self {
        Splitter { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Splits off test, then splits the remainder into train and validate.
    /// Both steps use the configured seed.
    pub fn split(&self, table: &RecordTable) -> Result<TrainValidateTest> {
        if table.row_count() < MIN_SPLIT_ROWS {
            return Err(Error::InsufficientData(format!(
                "splitting needs at least {} rows, got {}",
                MIN_SPLIT_ROWS,
                table.row_count()
            )));
        }

        let (train_validate, test) =
            train_test_split(table, self.config.train_validate_fraction, self.config.seed)?;
        let (train, validate) =
            train_test_split(&train_validate, self.config.train_fraction, self.config.seed)?;

        let split = TrainValidateTest {
            train,
            validate,
            test,
        };
        let (n_train, n_validate, n_test) = split.sizes();
        info!(
            "split {} rows: train {}, validate {}, test {}",
            table.row_count(),
            n_train,
            n_validate,
            n_test
        );

        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Float64Column;

    fn table(n: usize) -> RecordTable {
        let mut table = RecordTable::new();
        table
            .add_column("x", Float64Column::new((0..n).map(|v| v as f64).collect()))
            .unwrap();
        table
    }

    #[test]
    fn test_train_test_split_sizes() {
        let (train, test) = train_test_split(&table(10), 0.8, 987).unwrap();
        assert_eq!(train.row_count(), 8);
        assert_eq!(test.row_count(), 2);

        // floor(0.8 * 7) = 5
        let (train, test) = train_test_split(&table(7), 0.8, 987).unwrap();
        assert_eq!(train.row_count(), 5);
        assert_eq!(test.row_count(), 2);
    }

    #[test]
    fn test_train_test_split_rejects_bad_input() {
        assert!(train_test_split(&table(10), 1.0, 1).is_err());
        assert!(train_test_split(&table(10), 0.0, 1).is_err());
        assert!(matches!(
            train_test_split(&table(1), 0.8, 1),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_splitter_minimum_rows() {
        let splitter = Splitter::default();
        assert!(splitter.split(&table(2)).is_err());

        let split = splitter.split(&table(3)).unwrap();
        assert_eq!(split.sizes(), (1, 1, 1));
    }

    #[test]
    fn test_splitter_partitions_cover_input() {
        let split = Splitter::default().split(&table(100)).unwrap();
        assert_eq!(split.sizes(), (56, 24, 20));

        let mut labels: Vec<usize> = split
            .train
            .row_labels()
            .iter()
            .chain(split.validate.row_labels())
            .chain(split.test.row_labels())
            .copied()
            .collect();
        labels.sort_unstable();
        assert_eq!(labels, (0..100).collect::<Vec<_>>());
    }
}

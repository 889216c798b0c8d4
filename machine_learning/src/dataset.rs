use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{MlErr, Result, record::CustomerRecord};

/// An in-memory labelled dataset of customers.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<CustomerRecord>,
    targets: Vec<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `records` - The model inputs.
    /// * `targets` - The label of each record.
    ///
    /// # Panics
    /// If `records` and `targets` have different lengths.
    pub fn new(records: Vec<CustomerRecord>, targets: Vec<f64>) -> Self {
        assert_eq!(
            records.len(),
            targets.len(),
            "records and targets must have the same length"
        );

        Self { records, targets }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    #[inline]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Builds a new dataset out of the rows at `indices`, in that order.
    ///
    /// # Panics
    /// If any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Self {
        let records = indices.iter().map(|&i| self.records[i].clone()).collect();
        let targets = indices.iter().map(|&i| self.targets[i]).collect();
        Self { records, targets }
    }

    /// Splits the dataset in a train and a test partition.
    ///
    /// The rows are permuted with an rng seeded by `seed`, the first `ceil(test_ratio * len)`
    /// rows of the permutation make up the test partition and the rest the train partition.
    ///
    /// # Arguments
    /// * `test_ratio` - The proportion of rows that go into the test partition.
    /// * `seed` - The seed of the permutation.
    ///
    /// # Returns
    /// A `(train, test)` tuple or an error if either partition would be empty.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> Result<(Self, Self)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(MlErr::InvalidParameter {
                name: "test_ratio",
                reason: format!("expected a value in (0, 1), got {test_ratio}"),
            });
        }

        let n = self.len();
        let n_test = (test_ratio * n as f64).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(MlErr::EmptyDataset {
                what: "train/test partition",
            });
        }

        let mut permutation: Vec<usize> = (0..n).collect();
        permutation.shuffle(&mut StdRng::seed_from_u64(seed));

        let (test, train) = permutation.split_at(n_test);
        Ok((self.select(train), self.select(test)))
    }
}

use crate::{MlErr, Result};

/// Contiguous, unshuffled, k-fold cross-validation splitter.
///
/// The first `n % k` folds hold one extra sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    k: usize,
}

/// The row indices of one cross-validation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl KFold {
    /// Creates a new `KFold` splitter.
    ///
    /// # Errors
    /// If `k` is lower than 2.
    pub fn new(k: usize) -> Result<Self> {
        if k < 2 {
            return Err(MlErr::InvalidParameter {
                name: "cv_folds",
                reason: format!("expected at least 2 folds, got {k}"),
            });
        }

        Ok(Self { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Splits `0..n` in `k` rounds, each leaving a different fold out for testing.
    ///
    /// # Errors
    /// If there are fewer samples than folds.
    pub fn split(&self, n: usize) -> Result<Vec<Fold>> {
        if n < self.k {
            return Err(MlErr::InvalidParameter {
                name: "cv_folds",
                reason: format!("cannot split {n} samples in {} folds", self.k),
            });
        }

        let base = n / self.k;
        let extra = n % self.k;

        let mut folds = Vec::with_capacity(self.k);
        let mut start = 0;
        for i in 0..self.k {
            let size = base + usize::from(i < extra);
            let end = start + size;

            let test = (start..end).collect();
            let train = (0..start).chain(end..n).collect();
            folds.push(Fold { train, test });

            start = end;
        }

        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_folds_take_the_remainder() {
        let folds = KFold::new(3).unwrap().split(10).unwrap();

        let sizes: Vec<_> = folds.iter().map(|f| f.test.len()).collect();
        assert_eq!(sizes, [4, 3, 3]);
        assert_eq!(folds[0].test, [0, 1, 2, 3]);
        assert_eq!(folds[1].test, [4, 5, 6]);
        assert_eq!(folds[1].train, [0, 1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn every_sample_is_tested_once() {
        let folds = KFold::new(3).unwrap().split(16_000).unwrap();

        let mut tested: Vec<usize> = folds.iter().flat_map(|f| f.test.clone()).collect();
        tested.sort_unstable();
        assert_eq!(tested, (0..16_000).collect::<Vec<_>>());

        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), 16_000);
        }
    }

    #[test]
    fn rejects_too_few_folds_or_samples() {
        assert!(KFold::new(1).is_err());
        assert!(KFold::new(3).unwrap().split(2).is_err());
    }
}

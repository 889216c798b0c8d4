use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// One-hot encoder of a single categorical column.
///
/// Categories are kept sorted. A value that wasn't seen during `fit` is encoded as an
/// all-zero indicator row instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Returns a new, unfitted, `OneHotEncoder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns the distinct categories among `values`.
    pub fn fit<'a, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let categories: BTreeSet<&str> = values.into_iter().collect();
        if categories.is_empty() {
            return Err(MlErr::EmptyDataset {
                what: "encoder input",
            });
        }

        self.categories = categories.into_iter().map(String::from).collect();
        Ok(())
    }

    /// The amount of indicator columns this encoder produces.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// The learnt categories, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Writes the indicator row of `value` into `out`.
    ///
    /// # Arguments
    /// * `value` - The category to encode.
    /// * `out` - A buffer of exactly `width()` elements.
    pub fn encode_into(&self, value: &str, out: &mut [f64]) -> Result<()> {
        if self.categories.is_empty() {
            return Err(MlErr::NotFitted {
                estimator: "OneHotEncoder",
            });
        }

        if out.len() != self.width() {
            return Err(MlErr::SizeMismatch {
                what: "one-hot buffer",
                got: out.len(),
                expected: self.width(),
            });
        }

        out.fill(0.0);
        if let Ok(i) = self
            .categories
            .binary_search_by(|c| c.as_str().cmp(value))
        {
            out[i] = 1.0;
        }

        Ok(())
    }
}

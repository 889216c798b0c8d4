use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The numeric input columns, in frame order.
pub const NUMERIC_COLUMNS: [&str; 4] = ["age", "income", "loyalty_score", "visits_per_month"];

/// The categorical input columns, in frame order.
pub const CATEGORICAL_COLUMNS: [&str; 1] = ["region"];

/// The full column order of a one-row inference frame.
pub const FRAME_COLUMNS: [&str; 5] = [
    "age",
    "income",
    "loyalty_score",
    "region",
    "visits_per_month",
];

/// A single customer, the input of both training and inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub age: i64,
    pub income: f64,
    pub loyalty_score: f64,
    pub region: String,
    pub visits_per_month: i64,
}

impl CustomerRecord {
    /// Returns the numeric features of this record, following `NUMERIC_COLUMNS`.
    pub fn numeric_features(&self) -> [f64; 4] {
        [
            self.age as f64,
            self.income,
            self.loyalty_score,
            self.visits_per_month as f64,
        ]
    }

    /// Returns the categorical features of this record, following `CATEGORICAL_COLUMNS`.
    pub fn categorical_features(&self) -> [&str; 1] {
        [self.region.as_str()]
    }
}

/// The names of the columns a pipeline was fitted on.
///
/// It's persisted alongside the fitted pipeline so the serving side can refuse an artifact
/// trained on a different set of features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl FeatureSchema {
    /// The schema of a `CustomerRecord`.
    pub fn customer() -> Self {
        Self {
            numeric: NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
            categorical: CATEGORICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Display for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "numeric={:?} categorical={:?}",
            self.numeric, self.categorical
        )
    }
}

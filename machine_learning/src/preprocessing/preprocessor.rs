use std::fmt::{self, Display};

use ndarray::{Array2, ArrayView1, s};
use serde::{Deserialize, Serialize};

use super::{OneHotEncoder, StandardScaler};
use crate::{
    MlErr, Result,
    record::{CATEGORICAL_COLUMNS, CustomerRecord, FeatureSchema, NUMERIC_COLUMNS},
};

/// Turns customer records into a feature matrix: the numeric columns are standardized and
/// the categorical ones one-hot encoded, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    schema: FeatureSchema,
    scaler: StandardScaler,
    encoders: Vec<OneHotEncoder>,
}

impl Preprocessor {
    /// Fits a new `Preprocessor` over `records`.
    pub fn fit(records: &[CustomerRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(MlErr::EmptyDataset {
                what: "preprocessor input",
            });
        }

        let mut scaler = StandardScaler::new();
        scaler.fit(numeric_matrix(records).view())?;

        let encoders = (0..CATEGORICAL_COLUMNS.len())
            .map(|j| {
                let mut encoder = OneHotEncoder::new();
                encoder.fit(records.iter().map(|r| r.categorical_features()[j]))?;
                Ok(encoder)
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            schema: FeatureSchema::customer(),
            scaler,
            encoders,
        })
    }

    /// The schema this preprocessor was fitted on.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The one-hot encoders, one per categorical column.
    pub fn encoders(&self) -> &[OneHotEncoder] {
        &self.encoders
    }

    /// The width of the produced feature matrix.
    pub fn n_features(&self) -> usize {
        NUMERIC_COLUMNS.len() + self.encoders.iter().map(|e| e.width()).sum::<usize>()
    }

    /// Builds the feature matrix of `records`, one row per record.
    pub fn transform(&self, records: &[CustomerRecord]) -> Result<Array2<f64>> {
        let numeric = self.scaler.transform(numeric_matrix(records).view())?;
        let nnum = numeric.ncols();

        let mut x = Array2::zeros((records.len(), self.n_features()));
        x.slice_mut(s![.., ..nnum]).assign(&numeric);

        let mut indicators = vec![0.0; self.n_features() - nnum];
        for (i, record) in records.iter().enumerate() {
            let mut offset = 0;
            for (encoder, value) in self.encoders.iter().zip(record.categorical_features()) {
                let width = encoder.width();
                encoder.encode_into(value, &mut indicators[offset..offset + width])?;
                offset += width;
            }

            x.slice_mut(s![i, nnum..])
                .assign(&ArrayView1::from(indicators.as_slice()));
        }

        Ok(x)
    }
}

impl Display for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColumnTransformer(transformers=[('num', StandardScaler(), {:?}), \
             ('cat', OneHotEncoder(handle_unknown='ignore'), {:?})])",
            self.schema.numeric, self.schema.categorical
        )
    }
}

fn numeric_matrix(records: &[CustomerRecord]) -> Array2<f64> {
    let mut x = Array2::zeros((records.len(), NUMERIC_COLUMNS.len()));
    for (mut row, record) in x.rows_mut().into_iter().zip(records) {
        for (cell, value) in row.iter_mut().zip(record.numeric_features()) {
            *cell = value;
        }
    }

    x
}

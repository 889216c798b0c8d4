use std::{
    fmt::{self, Display},
    slice,
};

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{
    MlErr, Result,
    dataset::Dataset,
    estimators::{Estimator, EstimatorBuilder, Regressor},
    metrics,
    preprocessing::Preprocessor,
    record::{CustomerRecord, FeatureSchema},
    specs::EstimatorSpec,
};

/// Held-out scores of a fitted pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub r2: f64,
    pub mse: f64,
}

/// A fitted preprocessing stage followed by a fitted regressor, applied as a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    preprocessor: Preprocessor,
    estimator: Estimator,
}

impl Pipeline {
    /// Fits the preprocessing and the regressor described by `spec` over `data`.
    ///
    /// # Arguments
    /// * `spec` - The regressor and its hyperparameters.
    /// * `data` - The training data.
    pub fn fit(spec: &EstimatorSpec, data: &Dataset) -> Result<Self> {
        let preprocessor = Preprocessor::fit(data.records())?;
        let x = preprocessor.transform(data.records())?;

        let mut estimator = EstimatorBuilder::new().build(spec)?;
        estimator.fit(x.view(), ArrayView1::from(data.targets()))?;

        Ok(Self {
            preprocessor,
            estimator,
        })
    }

    /// Predicts the target of every record.
    pub fn predict(&self, records: &[CustomerRecord]) -> Result<Array1<f64>> {
        let x = self.preprocessor.transform(records)?;
        self.estimator.predict(x.view())
    }

    /// Predicts the target of a single record.
    pub fn predict_one(&self, record: &CustomerRecord) -> Result<f64> {
        let prediction = self.predict(slice::from_ref(record))?;
        prediction.first().copied().ok_or(MlErr::SizeMismatch {
            what: "predictions",
            got: 0,
            expected: 1,
        })
    }

    /// Scores the pipeline's predictions over `data`.
    pub fn evaluate(&self, data: &Dataset) -> Result<Scores> {
        let y_pred = self.predict(data.records())?;
        let y_true = ArrayView1::from(data.targets());

        Ok(Scores {
            r2: metrics::r2_score(y_true, y_pred.view())?,
            mse: metrics::mean_squared_error(y_true, y_pred.view())?,
        })
    }

    /// The schema of the records this pipeline was fitted on.
    pub fn schema(&self) -> &FeatureSchema {
        self.preprocessor.schema()
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }
}

impl Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pipeline(steps=[('pre', {}), ('model', {})])",
            self.preprocessor, self.estimator
        )
    }
}

use axum::{Json, body::Bytes, extract::State};
use log::{debug, info};
use serde::Serialize;

use crate::{AppState, error::ApiError, validation};

/// The body of the liveness endpoint.
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub message: &'static str,
}

/// The body of a successful prediction.
#[derive(Debug, Serialize)]
pub struct Prediction {
    #[serde(rename = "Inference Prediction ")]
    pub value: f64,
}

/// `GET /`
pub async fn liveness() -> Json<Liveness> {
    info!("API is live now...");
    Json(Liveness {
        message: "Our Regression Model API is live",
    })
}

/// `POST /predict`
///
/// Validates the body as a customer record and feeds it through the loaded pipeline as a
/// single row.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Prediction>, ApiError> {
    let record = validation::parse_customer(&body).map_err(ApiError::Validation)?;
    debug!("predicting for {record:?}");

    let value = state.pipeline().predict_one(&record)?;
    if !value.is_finite() {
        return Err(ApiError::NonFinitePrediction(value));
    }

    Ok(Json(Prediction { value }))
}

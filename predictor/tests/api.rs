use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use machine_learning::{
    Pipeline, artifact,
    estimators::{Estimator, GradientBoosting},
    specs::EstimatorSpec,
    synthetic::CustomerGenerator,
};
use predictor::AppState;

fn mk_pipeline() -> Pipeline {
    let data = CustomerGenerator::new(42).unwrap().dataset(1_000);
    Pipeline::fit(&EstimatorSpec::Linear, &data).unwrap()
}

/// A pipeline whose regressor was never fitted, so every prediction fails.
fn mk_broken_pipeline() -> Pipeline {
    let mut doc = serde_json::to_value(mk_pipeline()).unwrap();
    let unfitted = Estimator::GradientBoosting(GradientBoosting::new(10, 0.1, 3, 1.0, 42));
    doc["estimator"] = serde_json::to_value(unfitted).unwrap();
    serde_json::from_value(doc).unwrap()
}

fn mk_app(pipeline: Pipeline) -> Router {
    predictor::router(AppState::new(pipeline))
}

fn reference_body() -> Value {
    json!({
        "age": 32,
        "income": 72000,
        "loyalty_score": 7,
        "region": "North",
        "visits_per_month": 5
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_predict(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_root() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn liveness_payload_is_fixed() {
    let app = mk_app(mk_pipeline());

    for _ in 0..3 {
        let (status, body) = send(&app, get_root()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Our Regression Model API is live" }));
    }
}

#[tokio::test]
async fn reference_customer_gets_a_plausible_prediction() {
    let app = mk_app(mk_pipeline());

    let (status, body) = send(&app, post_predict(&reference_body())).await;
    assert_eq!(status, StatusCode::OK);

    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    let value = object["Inference Prediction "].as_f64().unwrap();
    // the noiseless target of this customer is 167
    assert!(value > 100.0 && value < 250.0, "prediction {value}");
}

#[tokio::test]
async fn response_matches_direct_pipeline_prediction() {
    let pipeline = mk_pipeline();
    let record = serde_json::from_value(reference_body()).unwrap();
    let expected = pipeline.predict_one(&record).unwrap();

    let (_, body) = send(&mk_app(pipeline), post_predict(&reference_body())).await;
    assert_eq!(body["Inference Prediction "].as_f64().unwrap(), expected);
}

#[tokio::test]
async fn unseen_region_is_served() {
    let app = mk_app(mk_pipeline());
    let mut request = reference_body();
    request["region"] = json!("Atlantis");

    let (status, body) = send(&app, post_predict(&request)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["Inference Prediction "].as_f64().unwrap().is_finite());
}

#[tokio::test]
async fn missing_age_never_reaches_the_pipeline() {
    // any request reaching this pipeline would fail with a 500
    let app = mk_app(mk_broken_pipeline());
    let mut request = reference_body();
    request.as_object_mut().unwrap().remove("age");

    let (status, body) = send(&app, post_predict(&request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{ "loc": ["body", "age"], "msg": "Field required", "type": "missing" }]
        })
    );
}

#[tokio::test]
async fn invalid_fields_are_reported_together() {
    let app = mk_app(mk_pipeline());
    let request = json!({
        "age": "thirty",
        "income": 72000,
        "loyalty_score": 7,
        "region": ["North"],
        "visits_per_month": 5.5
    });

    let (status, body) = send(&app, post_predict(&request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: Vec<_> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"][1].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, ["age", "region", "visits_per_month"]);
}

#[tokio::test]
async fn pipeline_failure_is_an_internal_error() {
    let app = mk_app(mk_broken_pipeline());

    let (status, body) = send(&app, post_predict(&reference_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Internal Server Error" }));
}

#[tokio::test]
async fn state_loads_from_a_saved_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regression_model.json");
    let pipeline = mk_pipeline();
    artifact::save(&path, &pipeline).unwrap();

    let state = AppState::from_artifact(&path).unwrap();
    assert_eq!(state.pipeline(), &pipeline);

    assert!(AppState::from_artifact(dir.path().join("absent.json")).is_err());
}

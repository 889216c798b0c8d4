use std::{
    error::Error,
    fmt::{self, Display},
};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use machine_learning::MlErr;
use serde::Serialize;
use serde_json::json;

/// A malformed environment variable.
#[derive(Debug)]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.var, self.reason)
    }
}

impl Error for ConfigError {}

/// One segment of the location of a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Loc {
    Key(&'static str),
    Offset(usize),
}

/// The diagnostic of a single invalid part of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<Loc>,
    pub msg: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn field(name: &'static str, msg: &'static str, kind: &'static str) -> Self {
        Self {
            loc: vec![Loc::Key("body"), Loc::Key(name)],
            msg,
            kind,
        }
    }

    pub fn body(msg: &'static str, kind: &'static str) -> Self {
        Self {
            loc: vec![Loc::Key("body")],
            msg,
            kind,
        }
    }
}

/// The errors a request handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// The body was rejected before reaching the pipeline.
    Validation(Vec<FieldError>),
    /// The pipeline failed on a valid record.
    Inference(MlErr),
    /// The pipeline produced a value that can't be represented in JSON.
    NonFinitePrediction(f64),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "Request validation failed with {} errors", errors.len())
            }
            ApiError::Inference(e) => write!(f, "Inference failed: {e}"),
            ApiError::NonFinitePrediction(v) => write!(f, "Inference produced {v}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Inference(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for ApiError {
    fn from(value: MlErr) -> Self {
        Self::Inference(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": errors })),
            )
                .into_response(),
            e => {
                error!("prediction failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

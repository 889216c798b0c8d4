use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyDataset {
        what: &'static str,
    },
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    NotFitted {
        estimator: &'static str,
    },
    NoCandidates,
    NotPositiveDefinite {
        what: &'static str,
    },
    SchemaMismatch {
        expected: String,
        got: String,
    },
    Artifact {
        path: PathBuf,
        source: io::Error,
    },
    Codec(serde_json::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::EmptyDataset { what } => write!(f, "Cannot operate on an empty {what}"),
            MlErr::InvalidParameter { name, reason } => {
                write!(f, "Invalid value for parameter `{name}`: {reason}")
            }
            MlErr::NotFitted { estimator } => {
                write!(f, "This {estimator} instance is not fitted yet")
            }
            MlErr::NoCandidates => {
                write!(f, "No candidate produced a finite score, nothing to select")
            }
            MlErr::NotPositiveDefinite { what } => {
                write!(f, "The {what} is not positive definite, cannot solve the system")
            }
            MlErr::SchemaMismatch { expected, got } => write!(
                f,
                "The artifact was fitted on features {got} but the serving schema is {expected}"
            ),
            MlErr::Artifact { path, .. } => {
                write!(f, "Artifact i/o failed at {}", path.display())
            }
            MlErr::Codec(_) => write!(f, "Artifact codec error"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Artifact { source, .. } => Some(source),
            MlErr::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MlErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

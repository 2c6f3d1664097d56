use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification label produced by an anomaly model.
///
/// The integer codes are fixed by the offline training process: `-1` marks an
/// anomaly, `1` a normal transaction. Callers should compare against the
/// associated constants rather than the raw code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnomalyLabel(i32);

impl AnomalyLabel {
    pub const NORMAL: Self = Self(1);
    pub const ANOMALY: Self = Self(-1);

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_anomaly(self) -> bool {
        self == Self::ANOMALY
    }
}

/// The request body could not be turned into a feature vector.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing feature `{0}`")]
    MissingFeature(&'static str),

    #[error("feature `{column}` is not numeric: {found}")]
    NotNumeric { column: &'static str, found: String },

    #[error("feature `{0}` must be a finite number")]
    NonFinite(&'static str),
}

/// The model rejected a well-formed feature vector.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("feature vector has {found} features, but the model expects {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("feature names {found:?} do not match the names seen at fit time {expected:?}")]
    FeatureNames {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Failure while reading a model artifact from disk.
///
/// A missing artifact is *not* an error (see [`crate::load_model`]).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

impl LoadError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

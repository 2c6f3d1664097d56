use std::sync::Arc;

use crate::features::FeatureVector;
use crate::result::{AnomalyLabel, ModelError};

/// A loaded, immutable anomaly classifier.
///
/// Implementations are shared read-only across concurrent requests, so
/// `predict` takes `&self` and must not mutate internal state.
pub trait AnomalyModel: Send + Sync + 'static {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Classify a single row.
    fn predict(&self, features: &FeatureVector) -> Result<AnomalyLabel, ModelError>;
}

/// Handle injected into request handlers.
pub type SharedModel = Arc<dyn AnomalyModel>;

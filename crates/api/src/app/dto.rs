use serde::{Deserialize, Serialize};

use sniper_ai::AnomalyLabel;

/// Successful `/predict` body.
///
/// `is_anomaly` carries the model's raw label: `-1` anomaly, `1` normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub is_anomaly: i32,
}

impl From<AnomalyLabel> for PredictResponse {
    fn from(label: AnomalyLabel) -> Self {
        Self {
            is_anomaly: label.code(),
        }
    }
}

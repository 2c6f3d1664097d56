use axum::body::Bytes;
use axum::{Extension, Json};

use sniper_ai::FeatureVector;

use crate::app::ModelState;
use crate::app::dto::PredictResponse;
use crate::app::errors::PredictError;

/// `POST /predict`: classify one transaction.
///
/// The body is parsed as JSON whatever the declared content type. The model
/// check comes first, so a server without a model answers the same way for
/// every body.
pub async fn predict(
    Extension(state): Extension<ModelState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, PredictError> {
    let result = classify(&state, &body);

    match &result {
        Ok(response) => tracing::debug!(is_anomaly = response.is_anomaly, "prediction served"),
        Err(err) => tracing::warn!(kind = err.kind(), error = %err, "prediction failed"),
    }

    result.map(Json)
}

fn classify(state: &ModelState, body: &[u8]) -> Result<PredictResponse, PredictError> {
    let model = state.model().ok_or(PredictError::ModelUnavailable)?;
    let features = FeatureVector::from_slice(body)?;
    let label = model.predict(&features)?;
    Ok(label.into())
}

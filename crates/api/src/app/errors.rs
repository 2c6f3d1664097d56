use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use sniper_ai::{InputError, ModelError};

/// Everything that can go wrong while serving `/predict`.
///
/// All variants surface as `500 {"error": "<message>"}` so existing clients see
/// a single error shape; the variants exist for logs and tests.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("Modelo de IA não foi carregado.")]
    ModelUnavailable,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PredictError {
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::ModelUnavailable => "model_unavailable",
            PredictError::Input(_) => "input_error",
            PredictError::Model(_) => "model_error",
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        json_error(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_unavailable_keeps_the_client_facing_message() {
        assert_eq!(
            PredictError::ModelUnavailable.to_string(),
            "Modelo de IA não foi carregado."
        );
    }

    #[test]
    fn wrapped_errors_display_their_cause() {
        let err = PredictError::from(InputError::MissingFeature("gas_limit"));
        assert_eq!(err.to_string(), "missing feature `gas_limit`");
        assert_eq!(err.kind(), "input_error");

        let err = PredictError::from(ModelError::ShapeMismatch {
            expected: 2,
            found: 3,
        });
        assert_eq!(err.kind(), "model_error");
        assert!(err.to_string().contains("expects 2"));
    }

    #[test]
    fn every_variant_maps_to_internal_server_error() {
        for err in [
            PredictError::ModelUnavailable,
            PredictError::Input(InputError::NonFinite("value")),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

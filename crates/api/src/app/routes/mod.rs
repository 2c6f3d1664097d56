use axum::{routing::post, Router};

pub mod predict;

/// Router for the prediction surface.
pub fn router() -> Router {
    Router::new().route("/predict", post(predict::predict))
}

//! HTTP API application wiring (Axum router + model injection).
//!
//! - `routes/`: HTTP handlers
//! - `dto.rs`: response DTOs
//! - `errors.rs`: typed handler errors and their JSON shape

use axum::{Extension, Router};
use tower::ServiceBuilder;

use sniper_ai::SharedModel;

pub mod dto;
pub mod errors;
pub mod routes;

/// Model handle shared by every request.
///
/// Built once at startup and never mutated; `None` means the artifact was
/// missing and the server runs in degraded mode.
#[derive(Clone)]
pub struct ModelState {
    model: Option<SharedModel>,
}

impl ModelState {
    pub fn new(model: Option<SharedModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> Option<&SharedModel> {
        self.model.as_ref()
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(model: Option<SharedModel>) -> Router {
    routes::router().layer(ServiceBuilder::new().layer(Extension(ModelState::new(model))))
}

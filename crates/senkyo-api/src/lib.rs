//! # senkyo-api: Candidate Information Service
//!
//! Axum service over a read-only [`senkyo_core::CandidateStore`]. Serves a
//! server-rendered HTML site whose screens are driven entirely by URL query
//! state, plus a JSON API over the same domain functions.
//!
//! ## Surface
//!
//! | Path                           | Module                  | Content          |
//! |--------------------------------|-------------------------|------------------|
//! | `/`                            | [`routes::pages`]       | list / detail / compare HTML |
//! | `/v1/candidates`               | [`routes::candidates`]  | filtered list    |
//! | `/v1/candidates/{id}`          | [`routes::candidates`]  | one candidate    |
//! | `/v1/candidates/{id}/stances`  | [`routes::candidates`]  | stance table     |
//! | `/v1/stances`                  | [`routes::candidates`]  | stance legend    |
//! | `/v1/compare`                  | [`routes::compare`]     | comparison table |
//! | `/openapi.json`                | [`openapi`]             | OpenAPI document |
//! | `/health/*`                    | this module             | probes           |
//!
//! ## Middleware
//!
//! `TraceLayer` wraps every route.
//!
//! ## Crate Policy
//!
//! - No domain logic in handlers; filtering, normalisation and table
//!   building live in `senkyo-core`.
//! - All JSON errors map to structured responses via [`AppError`].

pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod nav;
pub mod openapi;
mod render;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::pages::router())
        .merge(routes::candidates::router())
        .merge(routes::compare::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 "ready" once at least one candidate is loaded.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.store.is_empty() {
        tracing::warn!("readiness probe failed: candidate store is empty");
        return (StatusCode::SERVICE_UNAVAILABLE, "no candidates loaded");
    }
    (StatusCode::OK, "ready")
}

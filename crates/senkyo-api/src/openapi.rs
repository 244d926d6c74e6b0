//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented JSON routes into a single OpenAPI
//! document served at `/openapi.json`. The HTML page route is not part of
//! the document.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "senkyo API",
        version = "0.1.0",
        description = "Read-only candidate information: filtered listing, candidate profiles, normalised stances and side-by-side comparison."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::candidates::list_candidates,
        crate::routes::candidates::get_candidate,
        crate::routes::candidates::get_candidate_stances,
        crate::routes::candidates::list_stances,
        crate::routes::compare::compare,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::candidates::CandidateListResponse,
        crate::routes::candidates::CandidateResponse,
        crate::routes::candidates::PartyResponse,
        crate::routes::candidates::PromiseResponse,
        crate::routes::candidates::RawStanceResponse,
        crate::routes::candidates::StanceMetaResponse,
        crate::routes::candidates::StanceRowResponse,
        crate::routes::compare::ComparisonResponse,
        crate::routes::compare::ComparisonRowResponse,
    )),
    tags(
        (name = "candidates", description = "Candidate listing and profiles"),
        (name = "stances", description = "Stance legend"),
        (name = "compare", description = "Side-by-side comparison"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

//! # Candidate API
//!
//! Read-only JSON views over the candidate store: the filtered list, single
//! candidates, a candidate's normalised stances and the stance legend.
//! Filtering uses the same [`FilterState`] as the HTML list screen, so both
//! surfaces always agree on what matches.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use senkyo_core::{normalize, order_topics, Candidate, CandidateId, FilterState, Stance};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::{extract_validated_query, Validate};
use crate::state::AppState;

const MAX_SEARCH_LEN: usize = 100;

/// Filter parameters for the candidate list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CandidateFilterParams {
    /// Party name; `all`, `すべて` or blank mean no restriction.
    pub party: Option<String>,
    /// Key-policy theme; `all`, `すべて` or blank mean no restriction.
    pub policy: Option<String>,
    /// Case-sensitive substring of the candidate name.
    pub q: Option<String>,
}

impl Validate for CandidateFilterParams {
    fn validate(&self) -> Result<(), String> {
        if let Some(q) = &self.q {
            if q.chars().count() > MAX_SEARCH_LEN {
                return Err(format!("q must not exceed {MAX_SEARCH_LEN} characters"));
            }
        }
        Ok(())
    }
}

/// A numbered pledge.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromiseResponse {
    pub slot: u32,
    pub text: String,
}

/// A raw, non-normalised stance as recorded in the dataset.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RawStanceResponse {
    pub topic: String,
    pub raw: String,
}

/// Party badge presentation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PartyResponse {
    pub name: String,
    /// CSS class slug, e.g. `party-ldp`.
    pub class: String,
    pub icon: String,
}

/// Full candidate record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: u32,
    pub name: String,
    pub party: PartyResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_policy: Option<String>,
    pub brief: String,
    pub career: String,
    /// Every recorded pledge slot in ascending order, blanks included.
    pub promises: Vec<PromiseResponse>,
    /// Stances in dataset order.
    pub comparisons: Vec<RawStanceResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Placeholder glyph for the photo slot.
    pub initial: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl From<&Candidate> for CandidateResponse {
    fn from(c: &Candidate) -> Self {
        let style = c.party.style();
        Self {
            id: c.id.get(),
            name: c.name.clone(),
            party: PartyResponse {
                name: c.party.name().to_string(),
                class: style.class.to_string(),
                icon: style.icon.to_string(),
            },
            region: c.region.clone(),
            key_policy: c.key_policy.clone(),
            brief: c.brief.clone(),
            career: c.career.clone(),
            promises: c
                .promises
                .iter()
                .map(|(slot, text)| PromiseResponse {
                    slot,
                    text: text.to_string(),
                })
                .collect(),
            comparisons: c
                .comparisons
                .iter()
                .map(|(topic, raw)| RawStanceResponse {
                    topic: topic.clone(),
                    raw: raw.clone(),
                })
                .collect(),
            age: c.age,
            initial: c.initial(),
            photo: c.photo.clone(),
        }
    }
}

/// Filtered candidate list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CandidateListResponse {
    /// Number of matching candidates.
    pub count: usize,
    /// Total candidates in the store.
    pub total: usize,
    pub candidates: Vec<CandidateResponse>,
}

/// Stance display metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StanceMetaResponse {
    /// Canonical slug, e.g. `partial-agree`.
    pub stance: String,
    /// Display label, e.g. `一部賛成`.
    pub label: String,
    pub icon: String,
    /// CSS class of the badge.
    pub class: String,
    pub description: String,
}

impl From<Stance> for StanceMetaResponse {
    fn from(stance: Stance) -> Self {
        let meta = stance.meta();
        Self {
            stance: stance.slug().to_string(),
            label: stance.label().to_string(),
            icon: meta.icon.to_string(),
            class: meta.style_class.to_string(),
            description: meta.description.to_string(),
        }
    }
}

/// One topic of a candidate's stance table.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StanceRowResponse {
    pub topic: String,
    /// Label as recorded in the dataset.
    pub raw: String,
    /// Normalised stance.
    pub normalized: StanceMetaResponse,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/candidates", get(list_candidates))
        .route("/v1/candidates/{id}", get(get_candidate))
        .route("/v1/candidates/{id}/stances", get(get_candidate_stances))
        .route("/v1/stances", get(list_stances))
}

/// Parse a path id, rejecting non-numeric and zero values with 400.
fn parse_id(raw: &str) -> Result<CandidateId, AppError> {
    Ok(raw.parse::<CandidateId>()?)
}

fn lookup<'a>(state: &'a AppState, raw: &str) -> Result<&'a Candidate, AppError> {
    let id = parse_id(raw)?;
    state
        .store
        .by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("candidate {id}")))
}

/// GET /v1/candidates: Filtered candidate list in dataset order.
#[utoipa::path(
    get,
    path = "/v1/candidates",
    params(CandidateFilterParams),
    responses(
        (status = 200, description = "Matching candidates", body = CandidateListResponse),
        (status = 400, description = "Malformed query", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid filter", body = crate::error::ErrorBody),
    ),
    tag = "candidates"
)]
pub(crate) async fn list_candidates(
    State(state): State<AppState>,
    query: Result<Query<CandidateFilterParams>, QueryRejection>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let params = extract_validated_query(query)?;
    let filters = FilterState::from_query(
        params.party.as_deref(),
        params.policy.as_deref(),
        params.q.as_deref(),
    );
    let matched = filters.apply(state.store.all());
    tracing::debug!(?filters, matched = matched.len(), "candidate list filtered");
    Ok(Json(CandidateListResponse {
        count: matched.len(),
        total: state.store.len(),
        candidates: matched.into_iter().map(CandidateResponse::from).collect(),
    }))
}

/// GET /v1/candidates/{id}: One candidate.
#[utoipa::path(
    get,
    path = "/v1/candidates/{id}",
    params(("id" = u32, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate found", body = CandidateResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "candidates"
)]
pub(crate) async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateResponse>, AppError> {
    lookup(&state, &id).map(|c| Json(CandidateResponse::from(c)))
}

/// GET /v1/candidates/{id}/stances: Normalised stances in display order.
#[utoipa::path(
    get,
    path = "/v1/candidates/{id}/stances",
    params(("id" = u32, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Stance table", body = Vec<StanceRowResponse>),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "candidates"
)]
pub(crate) async fn get_candidate_stances(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StanceRowResponse>>, AppError> {
    let candidate = lookup(&state, &id)?;
    let rows = order_topics(candidate.comparisons.keys().map(String::as_str))
        .into_iter()
        .map(|topic| {
            let raw = candidate.stance_on(topic).unwrap_or_default();
            StanceRowResponse {
                topic: topic.to_string(),
                raw: raw.to_string(),
                normalized: normalize(raw).into(),
            }
        })
        .collect();
    Ok(Json(rows))
}

/// GET /v1/stances: Stance legend in canonical order.
#[utoipa::path(
    get,
    path = "/v1/stances",
    responses(
        (status = 200, description = "Stance legend", body = Vec<StanceMetaResponse>),
    ),
    tag = "stances"
)]
pub(crate) async fn list_stances() -> Json<Vec<StanceMetaResponse>> {
    Json(Stance::ALL.into_iter().map(StanceMetaResponse::from).collect())
}

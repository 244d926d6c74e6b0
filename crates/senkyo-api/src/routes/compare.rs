//! # Comparison API
//!
//! JSON rendition of the comparison table. Unlike the HTML compare screen,
//! which drops malformed picker values, this endpoint is strict: malformed
//! ids or unknown section names answer 400, and ids missing from the store
//! answer 404.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use senkyo_core::{build_table, parse_id_list, ComparisonRow, RowKind, Sections};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

/// Comparison query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompareParams {
    /// Comma-separated candidate ids, in column order.
    pub ids: Option<String>,
    /// Comma-separated subset of `career,promises,stances`. Absent means
    /// `stances`; present but empty means no section.
    pub sections: Option<String>,
}

/// One table row. `cells` is aligned with the response `columns`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComparisonRowResponse {
    /// One of `age`, `career`, `key_policy`, `brief`, `promise`, `topic`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub label: String,
    pub cells: Vec<String>,
}

/// Comparison table. Empty `rows` means nothing was selected.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComparisonResponse {
    pub columns: Vec<String>,
    pub sections: Vec<String>,
    pub rows: Vec<ComparisonRowResponse>,
}

impl ComparisonRowResponse {
    fn from_row(row: ComparisonRow, columns: &[String]) -> Self {
        let (kind, slot, topic) = match row.kind {
            RowKind::Age => ("age", None, None),
            RowKind::Career => ("career", None, None),
            RowKind::KeyPolicy => ("key_policy", None, None),
            RowKind::Brief => ("brief", None, None),
            RowKind::Promise(n) => ("promise", Some(n), None),
            RowKind::Topic(t) => ("topic", None, Some(t)),
        };
        let cells = columns
            .iter()
            .map(|col| row.values.get(col).cloned().unwrap_or_default())
            .collect();
        Self {
            kind: kind.to_string(),
            slot,
            topic,
            label: row.label,
            cells,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/compare", get(compare))
}

/// GET /v1/compare: Side-by-side comparison table.
#[utoipa::path(
    get,
    path = "/v1/compare",
    params(CompareParams),
    responses(
        (status = 200, description = "Comparison table", body = ComparisonResponse),
        (status = 400, description = "Malformed ids or sections", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown candidate id", body = crate::error::ErrorBody),
    ),
    tag = "compare"
)]
pub(crate) async fn compare(
    State(state): State<AppState>,
    query: Result<Query<CompareParams>, QueryRejection>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let params = extract_query(query)?;
    let ids = parse_id_list(params.ids.as_deref().unwrap_or_default())?;
    let sections = Sections::parse(params.sections.as_deref())?;

    if let Some(missing) = ids.iter().find(|id| state.store.by_id(**id).is_none()) {
        return Err(AppError::NotFound(format!("candidate {missing}")));
    }

    let selected = state.store.select(&ids);
    let table = build_table(&selected, &sections);
    tracing::debug!(candidates = selected.len(), rows = table.rows.len(), "comparison built");

    let columns = table.columns;
    let rows = table
        .rows
        .into_iter()
        .map(|row| ComparisonRowResponse::from_row(row, &columns))
        .collect();
    Ok(Json(ComparisonResponse {
        sections: sections.iter().map(|s| s.as_str().to_string()).collect(),
        columns,
        rows,
    }))
}

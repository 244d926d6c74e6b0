//! # HTML Page Route
//!
//! `GET /` is the whole site. The query string is decoded into a
//! [`NavState`], a pending `clear` is consumed with a `303 See Other` to the
//! reset URL, and otherwise the resolved screen is rendered.

use axum::extract::{RawQuery, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use url::form_urlencoded;

use crate::nav::{NavState, PageQuery, Route};
use crate::render;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(page))
}

/// GET /: Render the list, detail or compare screen.
async fn page(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let raw = raw.unwrap_or_default();
    let pairs = form_urlencoded::parse(raw.as_bytes()).into_owned();
    let nav = NavState::from_query(&PageQuery::from_pairs(pairs));

    let (nav, cleared) = nav.consume_clear();
    if cleared {
        let target = nav.href();
        tracing::debug!(%target, "clear flag consumed");
        return Redirect::to(&target).into_response();
    }

    let route = nav.route();
    tracing::debug!(view = %nav.view, ?route, "rendering page");
    let (title, body) = match route {
        Route::List => (
            "候補者一覧".to_string(),
            render::list::render(&state.store, &nav),
        ),
        Route::Detail(id) => render::detail::render(&state.store, &nav, id),
        Route::Compare => (
            "候補者比較".to_string(),
            render::compare::render(&state.store, &nav),
        ),
    };

    Html(render::layout(&title, state.region.as_ref(), body)).into_response()
}

//! # Pseudo Screen Transitions
//!
//! The site is one page, `GET /`, whose screen is chosen by URL query state.
//! Every render pass starts by parsing the query into a [`NavState`]; links
//! are produced by applying a transition to that state and encoding the
//! result with [`NavState::href`]. Nothing is kept on the server between
//! requests.
//!
//! ## Screens
//!
//! ```text
//!            select(id)                 compare()
//!   ┌──────┐ ─────────▶ ┌────────┐   ┌──────┐ ────────▶ ┌─────────┐
//!   │ list │            │ detail │   │ list │           │ compare │
//!   └──────┘ ◀───────── └────────┘   └──────┘ ◀──────── └─────────┘
//!              back()                           back()
//!
//!   clear_all() from any screen ──▶ list, with every filter reset
//! ```
//!
//! A `view` value outside `list | detail | compare` falls back to `list`.
//!
//! ## The `clear` flag
//!
//! `clear_all()` sets a transient `clear` parameter. The page handler calls
//! [`NavState::consume_clear`] before anything else, resets all widget
//! state, and redirects to the same URL without `clear`, so a later render
//! can never re-trigger the reset.

use std::fmt;

use senkyo_core::{CandidateId, FilterState, Section, Sections};
use url::form_urlencoded;

/// Which screen to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Filterable candidate grid.
    #[default]
    List,
    /// One candidate's full profile.
    Detail,
    /// Side-by-side comparison table.
    Compare,
}

impl View {
    /// Parse the `view` parameter. Absent or unknown values mean [`View::List`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("detail") => Self::Detail,
            Some("compare") => Self::Compare,
            _ => Self::List,
        }
    }

    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Compare => "compare",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw page query parameters, as sent by links and forms.
///
/// Built from the decoded pair list rather than a derived struct so that
/// repeated keys from checkbox groups (`ids=1&ids=3`) are accepted: `ids`
/// and `sections` accumulate comma-joined, every other key keeps its last
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub view: Option<String>,
    pub id: Option<String>,
    pub party: Option<String>,
    pub policy: Option<String>,
    pub q: Option<String>,
    pub ids: Option<String>,
    pub sections: Option<String>,
    pub clear: Option<String>,
}

impl PageQuery {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        fn join(slot: &mut Option<String>, value: String) {
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }

        let mut q = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "view" => q.view = Some(value),
                "id" => q.id = Some(value),
                "party" => q.party = Some(value),
                "policy" => q.policy = Some(value),
                "q" => q.q = Some(value),
                "ids" => join(&mut q.ids, value),
                "sections" => join(&mut q.sections, value),
                "clear" => q.clear = Some(value),
                _ => {}
            }
        }
        q
    }
}

/// The screen a [`NavState`] resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Candidate grid.
    List,
    /// Profile page. `None` when the `id` is missing or malformed; the page
    /// then shows a not-found message without leaving the detail screen.
    Detail(Option<CandidateId>),
    /// Comparison table.
    Compare,
}

/// Complete UI state for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavState {
    pub view: View,
    /// Raw `id` parameter. Only meaningful on the detail screen.
    pub id: Option<String>,
    pub filters: FilterState,
    /// Candidates chosen for comparison, in selection order.
    pub selected: Vec<CandidateId>,
    pub sections: Sections,
    /// Pending reset request.
    pub clear: bool,
}

impl NavState {
    /// Parse query parameters. Malformed compare ids and unknown section
    /// names are dropped rather than rejected.
    pub fn from_query(query: &PageQuery) -> Self {
        let selected = query
            .ids
            .as_deref()
            .map(|raw| {
                let mut ids: Vec<CandidateId> = Vec::new();
                for id in raw.split(',').filter_map(|part| part.parse().ok()) {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                ids
            })
            .unwrap_or_default();

        let sections = match query.sections.as_deref() {
            None => Sections::default(),
            Some(raw) => Sections::of(raw.split(',').filter_map(|part| part.parse::<Section>().ok())),
        };

        Self {
            view: View::parse(query.view.as_deref()),
            id: query.id.clone(),
            filters: FilterState::from_query(
                query.party.as_deref(),
                query.policy.as_deref(),
                query.q.as_deref(),
            ),
            selected,
            sections,
            clear: query.clear.is_some(),
        }
    }

    /// Resolve the screen to render.
    pub fn route(&self) -> Route {
        match self.view {
            View::List => Route::List,
            View::Detail => Route::Detail(self.id.as_deref().and_then(|raw| raw.parse().ok())),
            View::Compare => Route::Compare,
        }
    }

    /// If a reset is pending, return the reset state (on the list screen,
    /// defaults everywhere, no `clear`) and `true`. Otherwise return `self`
    /// unchanged and `false`.
    pub fn consume_clear(self) -> (Self, bool) {
        if !self.clear {
            return (self, false);
        }
        (Self::default(), true)
    }

    /// list → detail for `id`.
    pub fn select(&self, id: CandidateId) -> Self {
        Self {
            view: View::Detail,
            id: Some(id.to_string()),
            clear: false,
            ..self.clone()
        }
    }

    /// detail/compare → list, keeping filters.
    pub fn back(&self) -> Self {
        Self {
            view: View::List,
            id: None,
            clear: false,
            ..self.clone()
        }
    }

    /// list → compare.
    pub fn compare(&self) -> Self {
        Self {
            view: View::Compare,
            id: None,
            clear: false,
            ..self.clone()
        }
    }

    /// Any screen → list with a pending reset.
    pub fn clear_all(&self) -> Self {
        Self {
            view: View::List,
            id: None,
            clear: true,
            ..self.clone()
        }
    }

    /// Encode as a query string. Defaults are omitted; `sections` is written
    /// whenever it differs from the default, even when empty, so that
    /// "nothing enabled" survives a round trip.
    pub fn to_query(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        ser.append_pair("view", self.view.as_str());
        if self.view == View::Detail {
            if let Some(id) = &self.id {
                ser.append_pair("id", id);
            }
        }
        if let Some(party) = self.filters.party.value() {
            ser.append_pair("party", party);
        }
        if let Some(policy) = self.filters.policy.value() {
            ser.append_pair("policy", policy);
        }
        if !self.filters.search_term().is_empty() {
            ser.append_pair("q", &self.filters.search);
        }
        if !self.selected.is_empty() {
            let ids = self
                .selected
                .iter()
                .map(CandidateId::to_string)
                .collect::<Vec<_>>()
                .join(",");
            ser.append_pair("ids", &ids);
        }
        if self.sections != Sections::default() {
            ser.append_pair("sections", &self.sections.to_query_value());
        }
        if self.clear {
            ser.append_pair("clear", "1");
        }
        ser.finish()
    }

    /// Link target for this state.
    pub fn href(&self) -> String {
        format!("/?{}", self.to_query())
    }
}

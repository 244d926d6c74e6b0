//! # Application State
//!
//! Shared state for the Axum application. The candidate store is read-only
//! after bootstrap, so handlers share it through an `Arc` without locking.

use std::path::PathBuf;
use std::sync::Arc;

use senkyo_core::{CandidateStore, RegionSummary};

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; everything else is text.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Application configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// JSON or YAML dataset to load. `None` selects the built-in dataset.
    pub candidates_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            candidates_path: None,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `CANDIDATES_PATH` and `LOG_FORMAT` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparsable or blank values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(8080);
        let candidates_path = lookup("CANDIDATES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let log_format = LogFormat::parse(lookup("LOG_FORMAT").as_deref());
        Self {
            port,
            candidates_path,
            log_format,
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<CandidateStore>,
    /// Dominant electoral district, computed once for the header badge.
    pub region: Option<RegionSummary>,
}

impl AppState {
    pub fn new(store: CandidateStore) -> Self {
        let region = store.region_summary();
        Self {
            store: Arc::new(store),
            region,
        }
    }

    /// State over the built-in dataset.
    pub fn builtin() -> Result<Self, senkyo_core::DatasetError> {
        Ok(Self::new(CandidateStore::builtin()?))
    }
}

//! # Dataset Bootstrap
//!
//! Loads the candidate dataset once at startup and builds [`AppState`].
//!
//! If `CANDIDATES_PATH` is unset the built-in dataset is served. Otherwise
//! the file is parsed as JSON or YAML by extension, and any load failure
//! aborts startup.

use std::path::Path;

use senkyo_core::{CandidateStore, DatasetError};

use crate::state::{AppConfig, AppState};

/// Errors during startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Dataset file not found at the configured path.
    #[error("candidate dataset not found: {path}")]
    DatasetNotFound { path: String },

    /// Dataset file exists but could not be loaded.
    #[error("failed to load candidate dataset {origin}: {error}")]
    Dataset {
        origin: String,
        #[source]
        error: DatasetError,
    },
}

/// Load the configured dataset and assemble the application state.
pub fn bootstrap(config: &AppConfig) -> Result<AppState, BootstrapError> {
    let (store, origin) = match &config.candidates_path {
        Some(path) => (load_file(path)?, path.display().to_string()),
        None => {
            let store = CandidateStore::builtin().map_err(|error| BootstrapError::Dataset {
                origin: "builtin".to_string(),
                error,
            })?;
            (store, "builtin".to_string())
        }
    };

    if store.is_empty() {
        tracing::warn!(origin = %origin, "candidate dataset is empty");
    }
    tracing::info!(origin = %origin, candidates = store.len(), "candidate dataset loaded");

    let state = AppState::new(store);
    match &state.region {
        Some(region) => tracing::info!(
            region = %region.label,
            differing = region.others,
            "electoral district detected"
        ),
        None => tracing::debug!("no electoral district labels in dataset"),
    }
    Ok(state)
}

fn load_file(path: &Path) -> Result<CandidateStore, BootstrapError> {
    if !path.exists() {
        return Err(BootstrapError::DatasetNotFound {
            path: path.display().to_string(),
        });
    }
    CandidateStore::from_path(path).map_err(|error| BootstrapError::Dataset {
        origin: path.display().to_string(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_for(path: &Path) -> AppConfig {
        AppConfig {
            candidates_path: Some(path.to_path_buf()),
            ..AppConfig::default()
        }
    }

    #[test]
    fn builtin_when_no_path() {
        let state = bootstrap(&AppConfig::default()).unwrap();
        assert_eq!(state.store.len(), CandidateStore::builtin().unwrap().len());
    }

    #[test]
    fn loads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "- id: 10\n  name: 山田一郎\n  party: 共産党\n  region: 大阪府第3区\n- id: 11\n  name: 川口二葉"
        )
        .unwrap();
        let state = bootstrap(&config_for(file.path())).unwrap();
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.region.unwrap().label, "大阪府第3区");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = bootstrap(&config_for(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, BootstrapError::DatasetNotFound { .. }));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"id": 1, "name": "a"}}, {{"id": 1, "name": "b"}}]"#).unwrap();
        let err = bootstrap(&config_for(file.path())).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Dataset {
                error: DatasetError::DuplicateId(1),
                ..
            }
        ));
    }
}

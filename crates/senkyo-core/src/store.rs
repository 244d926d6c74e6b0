//! # Candidate Store
//!
//! Ordered, read-only collection of candidates, populated once at startup.
//! Source order is preserved and is the order every listing uses.
//!
//! An id index sits alongside the ordered `Vec` so that [`CandidateStore::by_id`]
//! is O(1); behaviour is identical to a linear scan because ids are unique.
//!
//! ## Dataset formats
//!
//! A dataset is a JSON or YAML array of candidate records (see
//! [`crate::candidate`]). [`CandidateStore::builtin`] loads the dataset
//! compiled into this crate.

use std::collections::HashMap;
use std::path::Path;

use crate::candidate::{Candidate, CandidateId, CandidateRecord};
use crate::error::DatasetError;
use crate::party::Party;
use crate::region::RegionSummary;

const BUILTIN_DATASET: &str = include_str!("../data/candidates.json");

/// Read-only candidate store.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    candidates: Vec<Candidate>,
    index: HashMap<CandidateId, usize>,
}

impl CandidateStore {
    /// Build a store from validated candidates, rejecting duplicate ids.
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(candidates.len());
        for (pos, candidate) in candidates.iter().enumerate() {
            if index.insert(candidate.id, pos).is_some() {
                return Err(DatasetError::DuplicateId(candidate.id.get()));
            }
        }
        Ok(Self { candidates, index })
    }

    fn from_records(records: Vec<CandidateRecord>) -> Result<Self, DatasetError> {
        let candidates = records
            .into_iter()
            .map(Candidate::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(candidates)
    }

    /// Parse a JSON array of candidate records.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Self::from_records(serde_json::from_str(json)?)
    }

    /// Parse a YAML sequence of candidate records.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DatasetError> {
        Self::from_records(serde_yaml::from_str(yaml)?)
    }

    /// Load a dataset file, choosing the parser by extension
    /// (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = match ext.as_str() {
            "json" | "yaml" | "yml" => std::fs::read_to_string(path)?,
            _ => return Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        };
        let store = if ext == "json" {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), count = store.len(), "parsed candidate dataset");
        Ok(store)
    }

    /// The dataset compiled into this crate.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json_str(BUILTIN_DATASET)
    }

    /// All candidates in source order.
    pub fn all(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Look up a candidate by id. `None` means "not found"; it is not an error.
    pub fn by_id(&self, id: CandidateId) -> Option<&Candidate> {
        self.index.get(&id).map(|pos| &self.candidates[*pos])
    }

    /// Look up several candidates, preserving the requested order and
    /// silently skipping unknown or repeated ids.
    pub fn select(&self, ids: &[CandidateId]) -> Vec<&Candidate> {
        let mut out: Vec<&Candidate> = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(candidate) = self.by_id(*id) {
                if !out.iter().any(|c| c.id == candidate.id) {
                    out.push(candidate);
                }
            }
        }
        out
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the store holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Distinct parties in first-seen order, for filter options.
    pub fn parties(&self) -> Vec<&Party> {
        let mut out: Vec<&Party> = Vec::new();
        for c in &self.candidates {
            if !out.contains(&&c.party) {
                out.push(&c.party);
            }
        }
        out
    }

    /// Distinct key-policy themes in first-seen order, for filter options.
    pub fn key_policies(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for policy in self.candidates.iter().filter_map(|c| c.key_policy.as_deref()) {
            if !out.contains(&policy) {
                out.push(policy);
            }
        }
        out
    }

    /// Other candidates sharing `candidate`'s party, in source order.
    pub fn same_party(&self, candidate: &Candidate) -> Vec<&Candidate> {
        self.candidates
            .iter()
            .filter(|c| c.party == candidate.party && c.id != candidate.id)
            .collect()
    }

    /// The dominant electoral district across the store, if any.
    pub fn region_summary(&self) -> Option<RegionSummary> {
        RegionSummary::detect(self.candidates.iter().filter_map(|c| c.region.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sample() -> CandidateStore {
        CandidateStore::from_json_str(
            r#"[
                {"id": 3, "name": "田中三郎", "party": "社民党", "keyPolicy": "医療"},
                {"id": 1, "name": "佐藤太郎", "party": "自民党", "keyPolicy": "経済"},
                {"id": 7, "name": "加藤花", "party": "自民党", "keyPolicy": "経済"},
                {"id": 2, "name": "鈴木次郎"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn by_id_finds_every_candidate() {
        let store = sample();
        for c in store.all() {
            assert_eq!(store.by_id(c.id), Some(c));
        }
    }

    #[test]
    fn by_id_unknown_is_none() {
        let store = sample();
        assert!(store.by_id(CandidateId::new(99).unwrap()).is_none());
    }

    #[test]
    fn all_preserves_source_order() {
        let ids: Vec<u32> = sample().all().iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 7, 2]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = CandidateStore::from_json_str(
            r#"[{"id": 1, "name": "a"}, {"id": 1, "name": "b"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateId(1)));
    }

    #[test]
    fn select_keeps_request_order_and_skips_unknown() {
        let store = sample();
        let ids: Vec<CandidateId> = [7, 99, 3, 7]
            .into_iter()
            .filter_map(CandidateId::new)
            .collect();
        let picked: Vec<u32> = store.select(&ids).iter().map(|c| c.id.get()).collect();
        assert_eq!(picked, vec![7, 3]);
    }

    #[test]
    fn parties_and_policies_distinct_first_seen() {
        let store = sample();
        let parties: Vec<&str> = store.parties().iter().map(|p| p.name()).collect();
        assert_eq!(parties, vec!["社民党", "自民党", "無所属"]);
        assert_eq!(store.key_policies(), vec!["医療", "経済"]);
    }

    #[test]
    fn same_party_excludes_self() {
        let store = sample();
        let sato = store.by_id(CandidateId::new(1).unwrap()).unwrap();
        let others: Vec<u32> = store.same_party(sato).iter().map(|c| c.id.get()).collect();
        assert_eq!(others, vec![7]);
    }

    #[test]
    fn builtin_dataset_loads() {
        let store = CandidateStore::builtin().unwrap();
        assert!(!store.is_empty());
        assert!(store.all().iter().any(|c| !c.comparisons.is_empty()));
    }

    #[test]
    fn yaml_dataset_loads() {
        let store = CandidateStore::from_yaml_str(
            "- id: 1\n  name: 佐藤太郎\n  party: 自民党\n  promise1: 減税\n  comparisons:\n    同性婚: 反対\n",
        )
        .unwrap();
        let c = store.by_id(CandidateId::new(1).unwrap()).unwrap();
        assert_eq!(c.promises.slot(1), Some("減税"));
        assert_eq!(c.stance_on("同性婚"), Some("反対"));
    }

    #[test]
    fn from_path_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"id": 5, "name": "石原さくら"}}]"#).unwrap();
        let store = CandidateStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), 1);

        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(file, "- id: 6\n  name: 柳澤悠人\n").unwrap();
        let store = CandidateStore::from_path(file.path()).unwrap();
        assert_eq!(store.all()[0].name, "柳澤悠人");
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        assert!(matches!(
            CandidateStore::from_path(file.path()),
            Err(DatasetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        assert!(matches!(
            CandidateStore::from_path(&missing),
            Err(DatasetError::Io(_))
        ));
    }
}

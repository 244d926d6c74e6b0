//! # Filter / Search Engine
//!
//! Three predicates over the candidate list, ANDed together:
//!
//! - **party**: exact match on the party display name, or [`Selection::All`]
//! - **key policy**: exact match on `keyPolicy`, or [`Selection::All`]
//! - **search**: case-sensitive substring of the candidate's `name`;
//!   surrounding whitespace is ignored and a blank search matches everyone
//!
//! The result keeps the relative order of the input and may be empty.

use std::fmt;

use serde::Serialize;

use crate::candidate::Candidate;

/// Sentinel spellings that mean "no restriction".
const ALL_SENTINELS: [&str; 3] = ["all", "すべて", ""];

/// One filter dropdown: everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No restriction.
    #[default]
    All,
    /// Exact-match restriction.
    Only(String),
}

impl Selection {
    /// Parse a query value. `all`, `すべて` and blank mean [`Selection::All`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Self::All,
            Some(v) if ALL_SENTINELS.contains(&v) => Self::All,
            Some(v) => Self::Only(v.to_string()),
        }
    }

    /// Whether `value` passes this selection.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted.as_str()),
        }
    }

    /// The restricted value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }

    /// Whether this is the default, unrestricted selection.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or("all"))
    }
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Complete filter widget state for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    /// Party dropdown.
    pub party: Selection,
    /// Key-policy dropdown.
    pub policy: Selection,
    /// Name search box contents, stored as typed.
    pub search: String,
}

impl FilterState {
    /// Build from raw query values.
    pub fn from_query(party: Option<&str>, policy: Option<&str>, search: Option<&str>) -> Self {
        Self {
            party: Selection::parse(party),
            policy: Selection::parse(policy),
            search: search.unwrap_or_default().to_string(),
        }
    }

    /// The search text as matched.
    pub fn search_term(&self) -> &str {
        self.search.trim()
    }

    /// Whether every widget is at its default.
    pub fn is_default(&self) -> bool {
        self.party.is_all() && self.policy.is_all() && self.search_term().is_empty()
    }

    /// Whether `candidate` passes all three predicates.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let term = self.search_term();
        self.party.admits(Some(candidate.party.name()))
            && self.policy.admits(candidate.key_policy.as_deref())
            && (term.is_empty() || candidate.name.contains(term))
    }

    /// Apply this state to `candidates`.
    pub fn apply<'a, I>(&self, candidates: I) -> Vec<&'a Candidate>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        candidates.into_iter().filter(|c| self.matches(c)).collect()
    }
}

/// Filter `candidates` by party, key policy and name search.
pub fn apply<'a, I>(candidates: I, party: &Selection, policy: &Selection, search: &str) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let state = FilterState {
        party: party.clone(),
        policy: policy.clone(),
        search: search.to_string(),
    };
    state.apply(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CandidateStore;

    fn store() -> CandidateStore {
        CandidateStore::from_json_str(
            r#"[
                {"id": 1, "name": "佐藤太郎", "party": "X", "keyPolicy": "economy"},
                {"id": 2, "name": "鈴木次郎", "party": "Y", "keyPolicy": "education"},
                {"id": 3, "name": "Sato Hanako", "party": "X", "keyPolicy": "education"},
                {"id": 4, "name": "加藤花", "party": "無所属"}
            ]"#,
        )
        .unwrap()
    }

    fn ids(found: &[&Candidate]) -> Vec<u32> {
        found.iter().map(|c| c.id.get()).collect()
    }

    fn only(v: &str) -> Selection {
        Selection::Only(v.to_string())
    }

    #[test]
    fn identity_filter_returns_everything_in_order() {
        let s = store();
        let found = apply(s.all(), &Selection::All, &Selection::All, "");
        assert_eq!(ids(&found), vec![1, 2, 3, 4]);
    }

    #[test]
    fn party_filter_exact_match() {
        let s = store();
        assert_eq!(ids(&apply(s.all(), &only("X"), &Selection::All, "")), vec![1, 3]);
        assert!(apply(s.all(), &only("Z"), &Selection::All, "").is_empty());
        assert!(apply(s.all(), &only("x"), &Selection::All, "").is_empty());
    }

    #[test]
    fn independent_party_filter() {
        let s = store();
        assert_eq!(ids(&apply(s.all(), &only("無所属"), &Selection::All, "")), vec![4]);
    }

    #[test]
    fn policy_filter_excludes_missing_key_policy() {
        let s = store();
        assert_eq!(
            ids(&apply(s.all(), &Selection::All, &only("education"), "")),
            vec![2, 3]
        );
    }

    #[test]
    fn search_is_case_sensitive_substring_of_name() {
        let s = store();
        assert_eq!(ids(&apply(s.all(), &Selection::All, &Selection::All, "次郎")), vec![2]);
        assert_eq!(ids(&apply(s.all(), &Selection::All, &Selection::All, "Sato")), vec![3]);
        assert!(apply(s.all(), &Selection::All, &Selection::All, "sato").is_empty());
    }

    #[test]
    fn search_does_not_match_party() {
        let s = store();
        assert!(apply(s.all(), &Selection::All, &Selection::All, "無所属").is_empty());
    }

    #[test]
    fn blank_search_bypasses() {
        let s = store();
        assert_eq!(apply(s.all(), &Selection::All, &Selection::All, "   ").len(), 4);
    }

    #[test]
    fn predicates_are_anded() {
        let s = store();
        assert_eq!(ids(&apply(s.all(), &only("X"), &only("education"), "")), vec![3]);
        assert!(apply(s.all(), &only("X"), &only("education"), "佐藤").is_empty());
    }

    #[test]
    fn selection_parse_sentinels() {
        assert_eq!(Selection::parse(None), Selection::All);
        assert_eq!(Selection::parse(Some("all")), Selection::All);
        assert_eq!(Selection::parse(Some("すべて")), Selection::All);
        assert_eq!(Selection::parse(Some(" ")), Selection::All);
        assert_eq!(Selection::parse(Some("自民党")), only("自民党"));
    }

    #[test]
    fn filter_state_default_detection() {
        assert!(FilterState::default().is_default());
        assert!(FilterState::from_query(Some("all"), None, Some("  ")).is_default());
        assert!(!FilterState::from_query(None, Some("経済"), None).is_default());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn selection() -> impl Strategy<Value = Selection> {
            prop_oneof![
                Just(Selection::All),
                Just(only("X")),
                Just(only("Y")),
                Just(only("economy")),
                Just(only("education")),
            ]
        }

        proptest! {
            /// Filtering a filtered result changes nothing.
            #[test]
            fn apply_is_idempotent(party in selection(), policy in selection(), search in "[佐藤鈴木a-zS ]{0,3}") {
                let s = store();
                let once = apply(s.all(), &party, &policy, &search);
                let twice = apply(once.iter().copied(), &party, &policy, &search);
                prop_assert_eq!(ids(&once), ids(&twice));
            }

            /// Results are an order-preserving subsequence of the input.
            #[test]
            fn apply_preserves_order(party in selection(), policy in selection()) {
                let s = store();
                let found = ids(&apply(s.all(), &party, &policy, ""));
                let mut sorted = found.clone();
                sorted.sort_unstable();
                prop_assert_eq!(found, sorted);
            }
        }
    }
}

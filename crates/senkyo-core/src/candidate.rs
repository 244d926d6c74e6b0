//! # Candidate Records
//!
//! The canonical candidate schema. Records are deserialized from the dataset
//! through [`CandidateRecord`], a permissive wire shape, and then validated
//! into [`Candidate`], where every optional field is an explicit `Option`.
//!
//! ## Promise slots
//!
//! Pledges arrive as a sparse family of fields named `promise1`, `promise2`,
//! ... (`promise_1` is accepted as an alternative spelling of the same slot).
//! They are collected into [`Promises`], keyed by slot number, so that
//! ordering follows the number in the field name rather than the order the
//! fields happen to appear in the source document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DatasetError, ParseError};
use crate::party::Party;

/// Stable identity key of a candidate. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateId(u32);

impl CandidateId {
    /// Create an id, rejecting zero.
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// The numeric value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CandidateId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ParseError::MalformedId(s.to_string()))
    }
}

/// Parse a comma-separated id list such as `1,4,2`. Blank entries are
/// skipped; any other malformed entry fails the whole list.
pub fn parse_id_list(raw: &str) -> Result<Vec<CandidateId>, ParseError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(CandidateId::from_str)
        .collect()
}

/// Ordered, sparse set of policy pledges keyed by slot number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Promises(BTreeMap<u32, String>);

impl Promises {
    /// The raw text of slot `n`, or `None` when the field was not present.
    ///
    /// An empty string is returned as `Some("")`.
    pub fn slot(&self, n: u32) -> Option<&str> {
        self.0.get(&n).map(String::as_str)
    }

    /// Non-empty pledges in ascending slot order, for list display.
    pub fn listed(&self) -> impl Iterator<Item = &str> {
        self.0
            .values()
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// All present slots in ascending order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(slot, text)| (*slot, text.as_str()))
    }

    /// Number of present slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no promise field was present at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, String)> for Promises {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Serialize)]
struct PromiseEntry<'a> {
    slot: u32,
    text: &'a str,
}

impl Serialize for Promises {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(slot, text)| PromiseEntry { slot, text }))
    }
}

/// A validated candidate record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Unique identity key.
    pub id: CandidateId,
    /// Full display name.
    pub name: String,
    /// Party affiliation; [`Party::Independent`] when unaffiliated.
    pub party: Party,
    /// Electoral district label, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Single policy theme used for filtering.
    #[serde(rename = "keyPolicy", skip_serializing_if = "Option::is_none")]
    pub key_policy: Option<String>,
    /// One-line summary.
    pub brief: String,
    /// Free-text biography.
    pub career: String,
    /// Pledges by slot number.
    pub promises: Promises,
    /// Topic name to raw, non-normalised stance label, in source order.
    pub comparisons: IndexMap<String, String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Explicit placeholder glyph for the photo slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    /// Optional photo asset URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Candidate {
    /// Placeholder text shown when no photo is available: the explicit
    /// `initial` field if set, otherwise the first character of the name.
    pub fn initial(&self) -> String {
        match self.initial.as_deref().map(str::trim) {
            Some(initial) if !initial.is_empty() => initial.to_string(),
            _ => self.name.trim().chars().next().map(String::from).unwrap_or_default(),
        }
    }

    /// Label used for this candidate in comparison tables: `name（party）`.
    pub fn compare_label(&self) -> String {
        format!("{}（{}）", self.name, self.party)
    }

    /// Raw stance for `topic`, if the candidate answered it at all.
    pub fn stance_on(&self, topic: &str) -> Option<&str> {
        self.comparisons.get(topic).map(String::as_str)
    }
}

/// Permissive wire shape of one dataset record.
///
/// Unknown fields are captured in `rest` so that promise slots, whose names
/// are not known in advance, can be picked out of them.
#[derive(Debug, Deserialize)]
pub(crate) struct CandidateRecord {
    id: u64,
    name: String,
    #[serde(default)]
    party: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default, rename = "keyPolicy")]
    key_policy: Option<String>,
    #[serde(default)]
    brief: Option<String>,
    #[serde(default)]
    career: Option<String>,
    #[serde(default)]
    comparisons: Option<IndexMap<String, Option<String>>>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    initial: Option<String>,
    #[serde(default)]
    photo: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

/// Parse a promise field name into its slot number.
///
/// Accepts `promise<N>` and `promise_<N>` with `N >= 1`.
fn promise_slot(key: &str) -> Option<u32> {
    let digits = key.strip_prefix("promise")?;
    let digits = digits.strip_prefix('_').unwrap_or(digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Treat blank optional strings as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = DatasetError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        let id = u32::try_from(record.id)
            .ok()
            .and_then(CandidateId::new)
            .ok_or(DatasetError::InvalidId(record.id))?;

        if record.name.trim().is_empty() {
            return Err(DatasetError::BlankName(id.get()));
        }

        let mut promises = BTreeMap::new();
        for (key, value) in record.rest {
            let Some(slot) = promise_slot(&key) else {
                continue;
            };
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => continue,
                other => {
                    tracing::warn!(candidate = %id, field = %key, "ignoring non-text promise value: {other}");
                    continue;
                }
            };
            if promises.insert(slot, text).is_some() {
                return Err(DatasetError::DuplicatePromiseSlot { id: id.get(), slot });
            }
        }

        let comparisons = record
            .comparisons
            .unwrap_or_default()
            .into_iter()
            .map(|(topic, stance)| (topic, stance.unwrap_or_default()))
            .collect();

        Ok(Self {
            id,
            name: record.name,
            party: Party::from_label(record.party.as_deref().unwrap_or_default()),
            region: non_blank(record.region),
            key_policy: non_blank(record.key_policy),
            brief: record.brief.unwrap_or_default(),
            career: record.career.unwrap_or_default(),
            promises: Promises(promises),
            comparisons,
            age: record.age,
            initial: record.initial,
            photo: non_blank(record.photo),
        })
    }
}

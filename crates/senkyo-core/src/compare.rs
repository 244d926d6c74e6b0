//! # Comparison Table Builder
//!
//! Lays selected candidates out side by side: one column per candidate, one
//! row per fact. Rows come in three optional sections, emitted in this order:
//!
//! | Section    | Rows                                                          |
//! |------------|---------------------------------------------------------------|
//! | `career`   | age, biography                                                |
//! | `promises` | key policy, policy description, biography, pledge 1..=4       |
//! | `stances`  | one per topic, first-seen order across the selected candidates |
//!
//! The biography row appears in both `career` and `promises`; that is the
//! published table layout. Stance cells hold the raw answer text, not the
//! normalised [`crate::Stance`], and topic order here is independent of
//! [`crate::TOPIC_ORDER`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::candidate::Candidate;
use crate::error::ParseError;

/// Number of pledge rows in the `promises` section.
pub const PROMISE_SLOTS: u32 = 4;

/// A toggleable block of comparison rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Basic information: age and biography.
    Career,
    /// Policy focus and pledges.
    Promises,
    /// Raw stances on issue topics.
    Stances,
}

impl Section {
    /// Sections in emission order.
    pub const ALL: [Section; 3] = [Section::Career, Section::Promises, Section::Stances];

    /// Query-string name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Promises => "promises",
            Self::Stances => "stances",
        }
    }

    /// Checkbox label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Career => "基本情報",
            Self::Promises => "行いたい政策",
            Self::Stances => "争点",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s.trim())
            .ok_or_else(|| ParseError::UnknownSection(s.to_string()))
    }
}

/// The set of enabled sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sections(BTreeSet<Section>);

impl Sections {
    /// No sections enabled.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Enable exactly the given sections.
    pub fn of(sections: impl IntoIterator<Item = Section>) -> Self {
        Self(sections.into_iter().collect())
    }

    /// Parse a comma-separated list. An absent parameter yields the default
    /// (stances only); a present but empty one yields no sections.
    pub fn parse(raw: Option<&str>) -> Result<Self, ParseError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        raw.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Section::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Whether `section` is enabled.
    pub fn contains(&self, section: Section) -> bool {
        self.0.contains(&section)
    }

    /// Whether nothing is enabled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enabled sections in emission order.
    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.iter().copied()
    }

    /// Toggle one section, returning the new set.
    pub fn toggled(&self, section: Section) -> Self {
        let mut set = self.0.clone();
        if !set.remove(&section) {
            set.insert(section);
        }
        Self(set)
    }

    /// Comma-separated query encoding, in emission order.
    pub fn to_query_value(&self) -> String {
        self.0.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(",")
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::of([Section::Stances])
    }
}

/// What a comparison row describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowKind {
    /// Age in years.
    Age,
    /// Biography text.
    Career,
    /// Key policy theme.
    KeyPolicy,
    /// One-line policy description.
    Brief,
    /// Pledge slot.
    Promise(u32),
    /// Raw stance on a topic.
    Topic(String),
}

impl RowKind {
    /// Row header text.
    pub fn label(&self) -> String {
        match self {
            Self::Age => "年齢".to_string(),
            Self::Career => "経歴".to_string(),
            Self::KeyPolicy => "重点政策".to_string(),
            Self::Brief => "政策説明".to_string(),
            Self::Promise(n) => format!("📋 公約{n}"),
            Self::Topic(topic) => format!("⚖️ {topic}"),
        }
    }

    fn cell(&self, candidate: &Candidate) -> String {
        match self {
            Self::Age => candidate.age.map(|a| a.to_string()).unwrap_or_default(),
            Self::Career => candidate.career.clone(),
            Self::KeyPolicy => candidate.key_policy.clone().unwrap_or_default(),
            Self::Brief => candidate.brief.clone(),
            Self::Promise(n) => candidate.promises.slot(*n).unwrap_or_default().to_string(),
            Self::Topic(topic) => candidate.stance_on(topic).unwrap_or_default().to_string(),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    /// What the row describes.
    pub kind: RowKind,
    /// Row header text.
    pub label: String,
    /// Candidate column label to cell text, in column order.
    pub values: IndexMap<String, String>,
}

/// A built comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComparisonTable {
    /// Column labels, one per selected candidate.
    pub columns: Vec<String>,
    /// Rows in section order.
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Whether there is nothing to show; callers should prompt instead.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column labels: `name（party）`, disambiguated by id on collision.
fn column_labels(candidates: &[&Candidate]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(candidates.len());
    for c in candidates {
        let base = c.compare_label();
        let label = if labels.contains(&base) {
            format!("{base} #{}", c.id)
        } else {
            base
        };
        labels.push(label);
    }
    labels
}

/// Distinct topics across `candidates`, in first-seen order.
fn topics_first_seen<'a>(candidates: &[&'a Candidate]) -> Vec<&'a str> {
    let mut topics: Vec<&str> = Vec::new();
    for topic in candidates.iter().copied().flat_map(|c| c.comparisons.keys()) {
        if !topics.contains(&topic.as_str()) {
            topics.push(topic);
        }
    }
    topics
}

/// Build the comparison table for `candidates` with `sections` enabled.
///
/// Returns an empty table when no candidate is selected or no section is
/// enabled.
pub fn build_table(candidates: &[&Candidate], sections: &Sections) -> ComparisonTable {
    if candidates.is_empty() || sections.is_empty() {
        return ComparisonTable::default();
    }

    let mut kinds: Vec<RowKind> = Vec::new();
    if sections.contains(Section::Career) {
        kinds.extend([RowKind::Age, RowKind::Career]);
    }
    if sections.contains(Section::Promises) {
        kinds.extend([RowKind::KeyPolicy, RowKind::Brief, RowKind::Career]);
        kinds.extend((1..=PROMISE_SLOTS).map(RowKind::Promise));
    }
    if sections.contains(Section::Stances) {
        kinds.extend(
            topics_first_seen(candidates)
                .into_iter()
                .map(|t| RowKind::Topic(t.to_string())),
        );
    }

    let columns = column_labels(candidates);
    let rows = kinds
        .into_iter()
        .map(|kind| ComparisonRow {
            label: kind.label(),
            values: columns
                .iter()
                .zip(candidates)
                .map(|(col, c)| (col.clone(), kind.cell(c)))
                .collect(),
            kind,
        })
        .collect();

    ComparisonTable { columns, rows }
}

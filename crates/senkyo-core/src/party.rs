//! # Parties
//!
//! Party affiliation as a closed set of known parties plus a fallback for
//! anything else. Presentation attributes come from a static lookup table
//! keyed by variant, so a party's raw display name never ends up inside a
//! CSS class or other presentation identifier.

use std::fmt;

use serde::{Serialize, Serializer};

/// Presentation attributes for a party badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyStyle {
    /// ASCII CSS class slug, e.g. `party-ldp`.
    pub class: &'static str,
    /// Badge icon.
    pub icon: &'static str,
}

/// Style used for any party not in the table.
pub const FALLBACK_STYLE: PartyStyle = PartyStyle {
    class: "party-other",
    icon: "🏛️",
};

/// A candidate's party affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Party {
    /// 自民党
    Ldp,
    /// 民主党
    Democratic,
    /// 立憲民主党
    ConstitutionalDemocratic,
    /// 立憲社会党
    ConstitutionalSocialist,
    /// 社民党
    SocialDemocratic,
    /// 共産党
    Communist,
    /// 社会党
    Socialist,
    /// 無所属: no party affiliation.
    Independent,
    /// Any party name not covered above, kept verbatim.
    Other(String),
}

impl Party {
    /// Every known (non-fallback) party, in display order.
    pub const KNOWN: [Party; 8] = [
        Party::Ldp,
        Party::Democratic,
        Party::ConstitutionalDemocratic,
        Party::ConstitutionalSocialist,
        Party::SocialDemocratic,
        Party::Communist,
        Party::Socialist,
        Party::Independent,
    ];

    /// Resolve a dataset label. Blank labels and the English spelling
    /// `independent` mean no affiliation.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        match label {
            "" | "無所属" | "independent" | "Independent" => Self::Independent,
            "自民党" => Self::Ldp,
            "民主党" => Self::Democratic,
            "立憲民主党" => Self::ConstitutionalDemocratic,
            "立憲社会党" => Self::ConstitutionalSocialist,
            "社民党" => Self::SocialDemocratic,
            "共産党" => Self::Communist,
            "社会党" => Self::Socialist,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Ldp => "自民党",
            Self::Democratic => "民主党",
            Self::ConstitutionalDemocratic => "立憲民主党",
            Self::ConstitutionalSocialist => "立憲社会党",
            Self::SocialDemocratic => "社民党",
            Self::Communist => "共産党",
            Self::Socialist => "社会党",
            Self::Independent => "無所属",
            Self::Other(name) => name,
        }
    }

    /// Presentation attributes for this party.
    pub fn style(&self) -> PartyStyle {
        let (class, icon) = match self {
            Self::Ldp => ("party-ldp", "🏛️"),
            Self::Democratic => ("party-dp", "👨‍👩‍👧"),
            Self::ConstitutionalDemocratic => ("party-cdp", "🏥"),
            Self::ConstitutionalSocialist => ("party-csp", "🏥"),
            Self::SocialDemocratic => ("party-sdp", "🌿"),
            Self::Communist => ("party-jcp", "🗣️"),
            Self::Socialist => ("party-sp", "🏫"),
            Self::Independent => ("party-independent", "🧭"),
            Self::Other(_) => return FALLBACK_STYLE,
        };
        PartyStyle { class, icon }
    }

    /// Whether the candidate has no party affiliation.
    pub fn is_independent(&self) -> bool {
        matches!(self, Self::Independent)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

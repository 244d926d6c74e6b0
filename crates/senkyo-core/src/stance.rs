//! # Stance Normalisation
//!
//! Candidates answer issue questionnaires in free text. This module maps
//! those answers onto six canonical [`Stance`] values, each with a fixed
//! icon, CSS class, and description.
//!
//! ```text
//! raw ──trim──▶ "" ──────────────────────────────▶ Unanswered
//!                └─▶ synonym table / canonical ──▶ Stance
//!                                      └─ miss ──▶ Unanswered
//! ```
//!
//! [`normalize`] is total: every input maps to some stance.

use serde::Serialize;

/// Fixed display priority for issue topics on the detail page.
pub const TOPIC_ORDER: [&str; 6] = [
    "消費税増税",
    "夫婦別姓",
    "外国人参政権",
    "原発再稼働",
    "憲法改正",
    "同性婚",
];

/// Canonical stance on an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stance {
    /// 賛成
    Pro,
    /// 一部賛成 (conditional or partial agreement)
    PartialAgree,
    /// 中立
    Neutral,
    /// 一部反対 (conditional or partial disagreement)
    PartialDisagree,
    /// 反対
    Against,
    /// 未回答 (no answer, or an answer that could not be recognised)
    Unanswered,
}

/// Display metadata for a stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StanceMeta {
    /// Badge icon.
    pub icon: &'static str,
    /// CSS class of the badge.
    #[serde(rename = "class")]
    pub style_class: &'static str,
    /// One-line description used as the badge tooltip.
    pub description: &'static str,
}

impl Stance {
    /// All stances in legend order.
    pub const ALL: [Stance; 6] = [
        Stance::Pro,
        Stance::PartialAgree,
        Stance::Neutral,
        Stance::PartialDisagree,
        Stance::Against,
        Stance::Unanswered,
    ];

    /// Japanese display label, which is also the canonical input spelling.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pro => "賛成",
            Self::PartialAgree => "一部賛成",
            Self::Neutral => "中立",
            Self::PartialDisagree => "一部反対",
            Self::Against => "反対",
            Self::Unanswered => "未回答",
        }
    }

    /// ASCII slug, also accepted by [`normalize`].
    pub fn slug(self) -> &'static str {
        match self {
            Self::Pro => "pro",
            Self::PartialAgree => "partial-agree",
            Self::Neutral => "neutral",
            Self::PartialDisagree => "partial-disagree",
            Self::Against => "against",
            Self::Unanswered => "unanswered",
        }
    }

    /// Display metadata.
    pub fn meta(self) -> StanceMeta {
        let (icon, style_class, description) = match self {
            Self::Pro => ("✅", "pro", "基本的に賛成の立場"),
            Self::PartialAgree => ("⚖️", "partial1", "条件付き・一部賛成"),
            Self::Neutral => ("➖", "neutral", "賛否を明確にせず"),
            Self::PartialDisagree => ("🤷‍♀️", "partial2", "条件付き・一部反対"),
            Self::Against => ("❌", "con", "基本的に反対の立場"),
            Self::Unanswered => ("❓", "unknown", "情報が見つからない／未回答"),
        };
        StanceMeta {
            icon,
            style_class,
            description,
        }
    }

    /// Look up metadata by canonical label or slug, defaulting to the
    /// [`Stance::Unanswered`] entry for anything unrecognised.
    pub fn meta_for(canonical: &str) -> StanceMeta {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == canonical || s.slug() == canonical)
            .unwrap_or(Self::Unanswered)
            .meta()
    }

    fn from_synonym(s: &str) -> Option<Self> {
        let stance = match s {
            "賛成" => Self::Pro,
            "一部賛成" | "条件付き賛成" | "部分賛成" => Self::PartialAgree,
            "中立" | "どちらとも言えない" | "どちらともいえない" | "保留" => Self::Neutral,
            "一部反対" | "条件付き反対" | "部分反対" => Self::PartialDisagree,
            "反対" => Self::Against,
            "未回答" | "不明" | "わからない" | "回答しない" | "無回答" => Self::Unanswered,
            _ => return None,
        };
        Some(stance)
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a free-text stance label to its canonical value.
pub fn normalize(raw: &str) -> Stance {
    let s = raw.trim();
    if s.is_empty() {
        return Stance::Unanswered;
    }
    Stance::from_synonym(s)
        .or_else(|| Stance::ALL.into_iter().find(|stance| stance.slug() == s))
        .unwrap_or(Stance::Unanswered)
}

/// Order topics for display: topics in [`TOPIC_ORDER`] first, in that order,
/// then every other topic in the order it was first encountered.
pub fn order_topics<'a, I>(topics: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ordered: Vec<(usize, usize, &str)> = Vec::new();
    for (seen, topic) in topics.into_iter().enumerate() {
        if ordered.iter().any(|(_, _, t)| *t == topic) {
            continue;
        }
        let rank = TOPIC_ORDER
            .iter()
            .position(|t| *t == topic)
            .unwrap_or(TOPIC_ORDER.len());
        ordered.push((rank, seen, topic));
    }
    ordered.sort_by_key(|(rank, seen, _)| (*rank, *seen));
    ordered.into_iter().map(|(_, _, topic)| topic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_unanswered() {
        assert_eq!(normalize(""), Stance::Unanswered);
        assert_eq!(normalize("  "), Stance::Unanswered);
        assert_eq!(normalize("\u{3000}"), Stance::Unanswered);
    }

    #[test]
    fn synonyms_collapse() {
        assert_eq!(normalize("賛成"), Stance::Pro);
        assert_eq!(normalize("条件付き賛成"), Stance::PartialAgree);
        assert_eq!(normalize("部分賛成"), Stance::PartialAgree);
        assert_eq!(normalize("どちらとも言えない"), Stance::Neutral);
        assert_eq!(normalize("どちらともいえない"), Stance::Neutral);
        assert_eq!(normalize("保留"), Stance::Neutral);
        assert_eq!(normalize("条件付き反対"), Stance::PartialDisagree);
        assert_eq!(normalize("部分反対"), Stance::PartialDisagree);
        assert_eq!(normalize("反対"), Stance::Against);
        assert_eq!(normalize("わからない"), Stance::Unanswered);
        assert_eq!(normalize("無回答"), Stance::Unanswered);
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(normalize("  反対 "), Stance::Against);
    }

    #[test]
    fn canonical_values_unchanged() {
        for stance in Stance::ALL {
            assert_eq!(normalize(stance.label()), stance);
            assert_eq!(normalize(stance.slug()), stance);
        }
    }

    #[test]
    fn unrecognised_is_unanswered() {
        assert_eq!(normalize("xyz-unrecognized"), Stance::Unanswered);
        assert_eq!(normalize("大賛成"), Stance::Unanswered);
    }

    #[test]
    fn meta_table_has_distinct_classes() {
        let mut classes: Vec<_> = Stance::ALL.iter().map(|s| s.meta().style_class).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), Stance::ALL.len());
    }

    #[test]
    fn meta_for_defaults_to_unanswered() {
        assert_eq!(Stance::meta_for("反対"), Stance::Against.meta());
        assert_eq!(Stance::meta_for("against"), Stance::Against.meta());
        assert_eq!(Stance::meta_for("???"), Stance::Unanswered.meta());
    }

    #[test]
    fn topic_order_priority_then_first_seen() {
        let ordered = order_topics(["同性婚", "年金改革", "消費税増税", "教育無償化", "憲法改正"]);
        assert_eq!(
            ordered,
            vec!["消費税増税", "憲法改正", "同性婚", "年金改革", "教育無償化"]
        );
    }

    #[test]
    fn topic_order_drops_duplicates() {
        let ordered = order_topics(["年金改革", "年金改革", "夫婦別姓"]);
        assert_eq!(ordered, vec!["夫婦別姓", "年金改革"]);
    }

    #[test]
    fn stance_serializes_as_slug() {
        assert_eq!(
            serde_json::to_string(&Stance::PartialDisagree).unwrap(),
            "\"partial-disagree\""
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Normalising is idempotent on the canonical label.
            #[test]
            fn normalize_idempotent(raw in ".{0,12}") {
                let once = normalize(&raw);
                prop_assert_eq!(normalize(once.label()), once);
            }

            /// Padding never changes the result.
            #[test]
            fn normalize_ignores_padding(raw in "[a-z賛反対成中立]{0,6}", pad in " {0,3}") {
                let padded = format!("{pad}{raw}{pad}");
                prop_assert_eq!(normalize(&padded), normalize(&raw));
            }
        }
    }
}

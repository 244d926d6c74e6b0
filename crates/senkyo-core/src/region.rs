//! # Electoral District Labels
//!
//! District labels are typed by hand and drift in formatting: full-width
//! versus half-width digits, stray spaces, `東京都` versus `東京`. Labels are
//! compared after NFKC normalisation with whitespace removed and the
//! `東京都` prefix folded to `東京`.

use unicode_normalization::UnicodeNormalization;

/// Normalise a district label for comparison.
pub fn normalize_region(raw: &str) -> String {
    let folded: String = raw.nfkc().filter(|c| !c.is_whitespace()).collect();
    folded.replace("東京都", "東京")
}

/// The dominant district across a set of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    /// Most frequent normalised label. Ties go to the label seen first.
    pub label: String,
    /// How many labels normalised to something else.
    pub others: usize,
}

impl RegionSummary {
    /// Detect the dominant label. Returns `None` when no label is non-blank.
    pub fn detect<'a, I>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut total = 0usize;
        for raw in labels {
            let label = normalize_region(raw);
            if label.is_empty() {
                continue;
            }
            total += 1;
            match counts.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label, 1)),
            }
        }

        // max_by_key keeps the last maximum; reverse so the first-seen label wins ties.
        let (label, top) = counts.into_iter().rev().max_by_key(|(_, n)| *n)?;
        Some(Self {
            label,
            others: total - top,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullwidth_digits_and_spaces_fold() {
        assert_eq!(normalize_region("東京都 第１区"), "東京第1区");
        assert_eq!(normalize_region("東京　第1区"), "東京第1区");
    }

    #[test]
    fn detects_majority_and_counts_others() {
        let summary =
            RegionSummary::detect(["東京都第１区", "東京第1区", "神奈川第2区", "東京 第1区"]).unwrap();
        assert_eq!(summary.label, "東京第1区");
        assert_eq!(summary.others, 1);
    }

    #[test]
    fn tie_goes_to_first_seen() {
        let summary = RegionSummary::detect(["大阪第3区", "京都第1区"]).unwrap();
        assert_eq!(summary.label, "大阪第3区");
        assert_eq!(summary.others, 1);
    }

    #[test]
    fn no_labels_no_summary() {
        assert!(RegionSummary::detect(Vec::<&str>::new()).is_none());
        assert!(RegionSummary::detect(["", "  "]).is_none());
    }
}

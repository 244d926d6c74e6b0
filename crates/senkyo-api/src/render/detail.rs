//! Detail screen: one candidate's profile, stance table and same-party strip.
//!
//! An `id` that is missing, malformed or unknown renders a warning in place
//! of the profile. The screen stays on `view=detail` in that case.

use senkyo_core::{normalize, order_topics, Candidate, CandidateId, CandidateStore, Stance};

use super::{esc, warning, write_back_actions, write_card, write_party_badge, write_photo, Html};
use crate::nav::NavState;

pub const NOT_FOUND_MESSAGE: &str = "対象の候補者が見つかりません。";

/// Render the screen. Returns the page title alongside the body.
pub fn render(store: &CandidateStore, nav: &NavState, id: Option<CandidateId>) -> (String, Html) {
    let mut w = Html::new();
    write_back_actions(&mut w, nav);

    let Some(candidate) = id.and_then(|id| store.by_id(id)) else {
        tracing::debug!(id = ?nav.id, "detail target not found");
        warning(&mut w, NOT_FOUND_MESSAGE);
        return ("候補者が見つかりません".to_string(), w);
    };

    write_profile(&mut w, candidate);

    let same_party = store.same_party(candidate);
    if !same_party.is_empty() {
        w.push("<section class=\"section\"><h3>同じ政党の候補者</h3><div class=\"grid\">");
        for other in same_party {
            write_card(&mut w, other, &nav.select(other.id).href(), "この候補を見る ➜");
        }
        w.push("</div></section>");
    }

    (candidate.name.clone(), w)
}

fn write_profile(w: &mut Html, c: &Candidate) {
    w.push("<article class=\"detail-card\"><div class=\"detail-header\">");
    write_photo(w, c, "modal-photo");
    w.push("<h2>");
    w.text(&c.name);
    w.push("</h2>");
    write_party_badge(w, c);
    let mut facts = Vec::new();
    if let Some(region) = c.region.as_deref().filter(|r| !r.trim().is_empty()) {
        facts.push(esc(region));
    }
    if let Some(age) = c.age {
        facts.push(format!("{age}歳"));
    }
    if !facts.is_empty() {
        w.push("<p class=\"facts\">");
        w.push(facts.join(" ・ "));
        w.push("</p>");
    }
    w.push("</div>");

    let promises: Vec<&str> = c.promises.listed().collect();
    if !promises.is_empty() {
        w.push("<section class=\"section\"><div class=\"section-title\">📋 主な公約</div><ul class=\"manifesto-list\">");
        for promise in promises {
            w.push("<li>");
            w.text(promise);
            w.push("</li>");
        }
        w.push("</ul></section>");
    }

    if !c.career.trim().is_empty() {
        w.push("<section class=\"section\"><div class=\"section-title\">💼 経歴・実績</div><div>");
        w.text(&c.career);
        w.push("</div></section>");
    }

    if !c.comparisons.is_empty() {
        write_stances(w, c);
    }

    let key_policy = c.key_policy.as_deref().unwrap_or_default();
    if !key_policy.trim().is_empty() || !c.brief.trim().is_empty() {
        w.push("<section class=\"section\"><div class=\"section-title\">🎯 重点政策</div>");
        if !key_policy.trim().is_empty() {
            w.push("<p><strong>分野：");
            w.text(key_policy);
            w.push("</strong></p>");
        }
        w.push("<div>");
        w.text(&c.brief);
        w.push("</div></section>");
    }

    w.push("</article>");
}

fn write_stances(w: &mut Html, c: &Candidate) {
    w.push("<section class=\"section\"><div class=\"section-title\">📌 主なスタンス</div>");

    w.push("<div class=\"stance-legend\">");
    for stance in Stance::ALL {
        write_badge(w, stance);
        w.push(" ");
    }
    w.push("</div>");

    w.push("<table class=\"stance-table\" aria-label=\"政策ごとの賛否一覧\"><tbody>");
    for topic in order_topics(c.comparisons.keys().map(String::as_str)) {
        let stance = normalize(c.stance_on(topic).unwrap_or_default());
        w.push("<tr><th class=\"stance-topic\">");
        w.text(topic);
        w.push("</th><td class=\"stance-value\">");
        write_badge(w, stance);
        w.push("</td></tr>");
    }
    w.push("</tbody></table></section>");
}

fn write_badge(w: &mut Html, stance: Stance) {
    let meta = stance.meta();
    w.push(format!(
        "<span class=\"stance-badge {}\" title=\"{}\">{} {}</span>",
        meta.style_class,
        esc(meta.description),
        meta.icon,
        stance.label()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CandidateStore {
        CandidateStore::builtin().unwrap()
    }

    fn id(n: u32) -> CandidateId {
        CandidateId::new(n).unwrap()
    }

    #[test]
    fn profile_shows_career_brief_and_promises() {
        let store = store();
        let (title, body) = render(&store, &NavState::default(), Some(id(1)));
        let html = body.finish();
        let c = store.by_id(id(1)).unwrap();
        assert_eq!(title, c.name);
        assert!(html.contains(&c.career));
        assert!(html.contains(&c.brief));
        assert!(html.contains("<li>中小企業向けの減税措置を拡大</li>"));
        assert!(!html.contains(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn blank_promise_is_not_listed() {
        let (_, body) = render(&store(), &NavState::default(), Some(id(3)));
        let html = body.finish();
        assert!(!html.contains("<li></li>"));
        assert!(html.contains("<li>がん検診の無料化</li>"));
    }

    #[test]
    fn stance_rows_follow_priority_order_and_normalise() {
        let (_, body) = render(&store(), &NavState::default(), Some(id(3)));
        let html = body.finish();
        let consumption = html.find("<th class=\"stance-topic\">消費税増税").unwrap();
        let marriage = html.find("<th class=\"stance-topic\">同性婚").unwrap();
        assert!(consumption < marriage);
        assert!(html.contains("⚖️ 一部賛成</span></td>"));
        assert!(html.contains("❓ 未回答</span></td>"));
    }

    #[test]
    fn unlisted_topic_sorts_last() {
        let (_, body) = render(&store(), &NavState::default(), Some(id(2)));
        let html = body.finish();
        let listed = html.find("<th class=\"stance-topic\">同性婚").unwrap();
        let extra = html.find("<th class=\"stance-topic\">教育国債").unwrap();
        assert!(listed < extra);
    }

    #[test]
    fn legend_lists_all_six_stances() {
        let (_, body) = render(&store(), &NavState::default(), Some(id(1)));
        let html = body.finish();
        let legend_start = html.find("stance-legend").unwrap();
        let legend = &html[legend_start..html[legend_start..].find("</div>").unwrap() + legend_start];
        for stance in Stance::ALL {
            assert!(legend.contains(stance.label()), "legend lacks {stance}");
        }
    }

    #[test]
    fn same_party_strip_lists_other_members() {
        let (_, body) = render(&store(), &NavState::default(), Some(id(1)));
        let html = body.finish();
        assert!(html.contains("同じ政党の候補者"));
        assert!(html.contains("村上美咲"));
        assert!(html.contains("/?view=detail&amp;id=7"));
    }

    #[test]
    fn unknown_or_missing_id_renders_warning() {
        let store = store();
        for target in [Some(id(999)), None] {
            let (_, body) = render(&store, &NavState::default(), target);
            let html = body.finish();
            assert!(html.contains(NOT_FOUND_MESSAGE));
            assert!(!html.contains("detail-card"));
        }
    }
}

//! Compare screen: candidate and section pickers above the comparison table.
//!
//! The picker is a plain GET form. Its hidden empty `sections` input keeps
//! "every box unchecked" distinguishable from "parameter absent", which
//! would otherwise bring back the default section.

use senkyo_core::{build_table, CandidateStore, ComparisonTable, Section};

use super::{notice, write_back_actions, Html};
use crate::nav::NavState;

pub const PICK_CANDIDATES_PROMPT: &str = "候補者を1人以上選んでね。";
pub const PICK_SECTIONS_PROMPT: &str = "上のチェックボックスで出したい“かたまり”を選んでね。";

/// Section checkboxes in display order.
const SECTION_PICKER: [Section; 3] = [Section::Stances, Section::Promises, Section::Career];

pub fn render(store: &CandidateStore, nav: &NavState) -> Html {
    let mut w = Html::new();
    w.push("<h2>候補者ごとの比較表</h2>");
    write_picker(&mut w, store, nav);
    write_back_actions(&mut w, nav);

    let selected = store.select(&nav.selected);
    if selected.is_empty() {
        notice(&mut w, PICK_CANDIDATES_PROMPT);
        return w;
    }

    let table = build_table(&selected, &nav.sections);
    tracing::debug!(
        candidates = selected.len(),
        rows = table.rows.len(),
        sections = %nav.sections.to_query_value(),
        "comparison table built"
    );
    if table.is_empty() {
        notice(&mut w, PICK_SECTIONS_PROMPT);
        return w;
    }
    write_table(&mut w, &table);
    w
}

fn write_picker(w: &mut Html, store: &CandidateStore, nav: &NavState) {
    w.push("<form class=\"compare-picker\" method=\"get\" action=\"/\">");
    w.push("<input type=\"hidden\" name=\"view\" value=\"compare\">");
    for (name, value) in [
        ("party", nav.filters.party.value()),
        ("policy", nav.filters.policy.value()),
        ("q", Some(nav.filters.search.as_str()).filter(|q| !q.trim().is_empty())),
    ] {
        if let Some(value) = value {
            w.push(format!("<input type=\"hidden\" name=\"{name}\" value=\""));
            w.text(value);
            w.push("\">");
        }
    }

    w.push("<fieldset><legend>比較したい候補者</legend>");
    for candidate in store.all() {
        w.push(format!(
            "<label><input type=\"checkbox\" name=\"ids\" value=\"{}\"",
            candidate.id
        ));
        if nav.selected.contains(&candidate.id) {
            w.push(" checked");
        }
        w.push("> ");
        w.text(candidate.compare_label());
        w.push("</label> ");
    }
    w.push("</fieldset>");

    w.push("<fieldset><legend>表示する項目</legend>");
    w.push("<input type=\"hidden\" name=\"sections\" value=\"\">");
    for section in SECTION_PICKER {
        w.push(format!(
            "<label><input type=\"checkbox\" name=\"sections\" value=\"{}\"",
            section.as_str()
        ));
        if nav.sections.contains(section) {
            w.push(" checked");
        }
        w.push("> ");
        w.push(section.label());
        w.push("</label> ");
    }
    w.push("</fieldset>");
    w.push("<button type=\"submit\" class=\"button\">表示を更新</button></form>");
}

fn write_table(w: &mut Html, table: &ComparisonTable) {
    w.push("<table class=\"compare-table\"><thead><tr><th>項目</th>");
    for column in &table.columns {
        w.push("<th>");
        w.text(column);
        w.push("</th>");
    }
    w.push("</tr></thead><tbody>");
    for row in &table.rows {
        w.push("<tr><th>");
        w.text(&row.label);
        w.push("</th>");
        for column in &table.columns {
            w.push("<td>");
            w.text(row.values.get(column).map(String::as_str).unwrap_or_default());
            w.push("</td>");
        }
        w.push("</tr>");
    }
    w.push("</tbody></table>");
}

#[cfg(test)]
mod tests {
    use senkyo_core::{CandidateId, Sections};

    use super::*;

    fn store() -> CandidateStore {
        CandidateStore::builtin().unwrap()
    }

    fn nav(ids: &[u32], sections: Sections) -> NavState {
        NavState {
            selected: ids.iter().map(|n| CandidateId::new(*n).unwrap()).collect(),
            sections,
            ..NavState::default()
        }
    }

    #[test]
    fn no_selection_prompts_for_candidates() {
        let html = render(&store(), &nav(&[], Sections::default())).finish();
        assert!(html.contains(PICK_CANDIDATES_PROMPT));
        assert!(!html.contains("compare-table"));
    }

    #[test]
    fn no_sections_prompts_for_sections() {
        let html = render(&store(), &nav(&[1], Sections::none())).finish();
        assert!(html.contains(PICK_SECTIONS_PROMPT));
        assert!(!html.contains("compare-table"));
    }

    #[test]
    fn stance_cells_are_raw_labels() {
        let html = render(&store(), &nav(&[1, 3], Sections::default())).finish();
        assert!(html.contains("<th>佐藤太郎（自民党）</th><th>田中三郎（立憲民主党）</th>"));
        assert!(html.contains("<td>どちらとも言えない</td>"));
        assert!(html.contains("<td>部分賛成</td>"));
    }

    #[test]
    fn promise_rows_cover_every_slot() {
        let html = render(&store(), &nav(&[3], Sections::of([Section::Promises]))).finish();
        for n in 1..=4 {
            assert!(html.contains(&format!("<th>📋 公約{n}</th>")));
        }
        assert!(html.contains("<th>📋 公約3</th><td></td>"));
    }

    #[test]
    fn picker_reflects_state() {
        let html = render(&store(), &nav(&[2], Sections::of([Section::Career]))).finish();
        assert!(html.contains("name=\"ids\" value=\"2\" checked"));
        assert!(html.contains("name=\"ids\" value=\"1\">"));
        assert!(html.contains("value=\"career\" checked"));
        assert!(html.contains("value=\"stances\">"));
        assert!(html.contains("name=\"sections\" value=\"\""));
    }
}

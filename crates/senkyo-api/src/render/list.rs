//! List screen: filter form, active-filter chips and the candidate grid.

use senkyo_core::{CandidateStore, Sections, Selection};

use super::{link_button, notice, write_card, Html};
use crate::nav::NavState;

/// Value submitted by the "everything" dropdown option.
const ALL_OPTION: &str = "all";

pub fn render(store: &CandidateStore, nav: &NavState) -> Html {
    let mut w = Html::new();
    write_filter_form(&mut w, store, nav);
    write_chips(&mut w, nav);

    let items = nav.filters.apply(store.all());
    tracing::debug!(matched = items.len(), total = store.len(), "list filtered");

    if items.is_empty() {
        notice(&mut w, "該当する候補者が見つかりません。条件を調整してください。");
    } else {
        w.push(format!("<p class=\"result-count\">{} 名の候補者</p>", items.len()));
        w.push("<section class=\"grid\">");
        for candidate in &items {
            write_card(&mut w, candidate, &nav.select(candidate.id).href(), "詳細を見る ➜");
        }
        w.push("</section>");
    }

    w.push("<nav class=\"actions\">");
    if items.is_empty() {
        link_button(&mut w, &nav.clear_all().href(), "🧹 条件をクリア", true);
    }
    link_button(&mut w, &nav.compare().href(), "比較する", false);
    w.push("</nav>");
    w
}

fn write_filter_form(w: &mut Html, store: &CandidateStore, nav: &NavState) {
    w.push("<form class=\"filters\" method=\"get\" action=\"/\">");
    w.push("<input type=\"hidden\" name=\"view\" value=\"list\">");
    write_carried_state(w, nav);

    let parties: Vec<&str> = store.parties().into_iter().map(|p| p.name()).collect();
    write_select(w, "政党", "party", &parties, &nav.filters.party);
    write_select(w, "政策テーマ", "policy", &store.key_policies(), &nav.filters.policy);

    w.push("<label>候補者名で検索<input type=\"search\" name=\"q\" placeholder=\"例：田中 / 佐藤 など\" value=\"");
    w.text(&nav.filters.search);
    w.push("\"></label>");
    w.push("<button type=\"submit\" class=\"button\">絞り込む</button>");
    link_button(w, &nav.clear_all().href(), "🧹 すべてクリア", true);
    w.push("</form>");
}

/// Compare selection and section toggles survive a filter submit.
fn write_carried_state(w: &mut Html, nav: &NavState) {
    if !nav.selected.is_empty() {
        let ids = nav
            .selected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        w.push(format!("<input type=\"hidden\" name=\"ids\" value=\"{ids}\">"));
    }
    if nav.sections != Sections::default() {
        w.push("<input type=\"hidden\" name=\"sections\" value=\"");
        w.text(&nav.sections.to_query_value());
        w.push("\">");
    }
}

fn write_select(w: &mut Html, label: &str, name: &str, options: &[&str], current: &Selection) {
    w.push("<label>");
    w.text(label);
    w.push(format!("<select name=\"{name}\">"));
    w.push(format!("<option value=\"{ALL_OPTION}\""));
    if current.is_all() {
        w.push(" selected");
    }
    w.push(">すべて</option>");
    for option in options {
        w.push("<option value=\"");
        w.text(option);
        w.push("\"");
        if current.value() == Some(*option) {
            w.push(" selected");
        }
        w.push(">");
        w.text(option);
        w.push("</option>");
    }
    w.push("</select></label>");
}

fn write_chips(w: &mut Html, nav: &NavState) {
    let filters = &nav.filters;
    if filters.is_default() {
        return;
    }
    w.push("<div class=\"chips\"><span class=\"chip-label\">現在の条件：</span>");
    if let Some(party) = filters.party.value() {
        w.push("<span class=\"chip\">政党：");
        w.text(party);
        w.push("</span>");
    }
    if let Some(policy) = filters.policy.value() {
        w.push("<span class=\"chip\">政策：");
        w.text(policy);
        w.push("</span>");
    }
    let term = filters.search_term();
    if !term.is_empty() {
        w.push("<span class=\"chip\">検索：『");
        w.text(term);
        w.push("』</span>");
    }
    w.push("</div>");
}

#[cfg(test)]
mod tests {
    use senkyo_core::{CandidateId, FilterState, Section};

    use super::*;

    fn store() -> CandidateStore {
        CandidateStore::builtin().unwrap()
    }

    fn nav_with(filters: FilterState) -> NavState {
        NavState {
            filters,
            ..NavState::default()
        }
    }

    #[test]
    fn unfiltered_list_shows_every_card_in_order() {
        let store = store();
        let html = render(&store, &NavState::default()).finish();
        let mut last = 0;
        for c in store.all() {
            let pos = html.find(&c.name).expect("card missing");
            assert!(pos >= last, "{} out of order", c.name);
            last = pos;
        }
        assert!(!html.contains("現在の条件"));
        assert!(html.contains("view=compare"));
    }

    #[test]
    fn party_filter_marks_option_and_shows_chip() {
        let html = render(
            &store(),
            &nav_with(FilterState::from_query(Some("自民党"), None, None)),
        )
        .finish();
        assert!(html.contains("<option value=\"自民党\" selected>"));
        assert!(html.contains("政党：自民党"));
        assert!(html.contains("佐藤太郎"));
        assert!(!html.contains("鈴木次郎"));
    }

    #[test]
    fn filter_form_keeps_compare_selection() {
        let nav = NavState {
            selected: vec![CandidateId::new(2).unwrap(), CandidateId::new(3).unwrap()],
            sections: Sections::of([Section::Career]),
            ..NavState::default()
        };
        let html = render(&store(), &nav).finish();
        let start = html.find("<form class=\"filters\"").unwrap();
        let end = start + html[start..].find("</form>").unwrap();
        let form = &html[start..end];
        assert!(form.contains("<input type=\"hidden\" name=\"ids\" value=\"2,3\">"));
        assert!(form.contains("<input type=\"hidden\" name=\"sections\" value=\"career\">"));
    }

    #[test]
    fn default_state_adds_no_hidden_selection() {
        let html = render(&store(), &NavState::default()).finish();
        assert!(!html.contains("name=\"ids\""));
        assert!(!html.contains("name=\"sections\""));
    }

    #[test]
    fn no_match_still_offers_next_steps() {
        let html = render(
            &store(),
            &nav_with(FilterState::from_query(None, None, Some("存在しない名前"))),
        )
        .finish();
        assert!(html.contains("条件をクリア"));
        assert!(html.contains("比較する"));
    }

    #[test]
    fn no_match_shows_notice_without_grid() {
        let html = render(
            &store(),
            &nav_with(FilterState::from_query(None, None, Some("存在しない名前"))),
        )
        .finish();
        assert!(html.contains("該当する候補者が見つかりません"));
        assert!(!html.contains("class=\"grid\""));
        assert!(html.contains("検索：『存在しない名前』"));
    }

    #[test]
    fn detail_links_carry_filters() {
        let html = render(
            &store(),
            &nav_with(FilterState::from_query(None, Some("経済"), None)),
        )
        .finish();
        assert!(html.contains("/?view=detail&amp;id=1&amp;policy=%E7%B5%8C%E6%B8%88"));
    }

    #[test]
    fn search_value_is_escaped() {
        let html = render(
            &store(),
            &nav_with(FilterState::from_query(None, None, Some("\"><script>"))),
        )
        .finish();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}

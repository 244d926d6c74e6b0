//! # HTML Rendering
//!
//! Server-side rendering of the three screens. Every renderer is a pure
//! function of the read-only store and the [`NavState`] parsed for the
//! current request; links are produced by applying a transition to that
//! state, never by string concatenation of query fragments.
//!
//! | Screen  | Module                |
//! |---------|-----------------------|
//! | list    | [`list`]              |
//! | detail  | [`detail`]            |
//! | compare | [`compare`]           |

pub mod compare;
pub mod detail;
pub mod list;

use senkyo_core::{Candidate, RegionSummary};

use crate::nav::NavState;

const SITE_TITLE: &str = "選挙候補者情報システム";
const SITE_SUBTITLE: &str = "候補者の公約・政策を確認して、あなたの一票を決めましょう";

const BASE_CSS: &str = "\
body{font-family:system-ui,'Hiragino Sans','Noto Sans JP',sans-serif;margin:0;background:#f5f6fa;color:#222}\
main{max-width:1100px;margin:0 auto;padding:16px}\
a{color:#1f5fbf}\
.app-header{background:#1f2a44;color:#fff;padding:16px 24px;display:flex;justify-content:space-between;align-items:center}\
.app-header h1{margin:0;font-size:1.5rem}\
.subtitle{margin:4px 0 0;opacity:.8}\
.region-badge{background:#fff;color:#1f2a44;border-radius:999px;padding:4px 12px;font-weight:bold}\
.region-note{display:block;font-size:.75rem;opacity:.8;margin-top:4px}\
.filters{display:flex;gap:12px;flex-wrap:wrap;align-items:flex-end;margin-bottom:12px}\
.filters label{display:flex;flex-direction:column;font-size:.85rem}\
.chips{margin:8px 0}\
.chip{display:inline-block;background:#e3e8f4;border-radius:999px;padding:2px 10px;margin-right:6px;font-size:.85rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(230px,1fr));gap:16px}\
.candidate-card,.detail-card{background:#fff;border-radius:12px;padding:16px;box-shadow:0 1px 3px rgba(0,0,0,.12)}\
.candidate-photo,.modal-photo{width:72px;height:72px;border-radius:50%;background:#cfd6e6;display:flex;align-items:center;justify-content:center;font-size:2rem;overflow:hidden}\
.candidate-photo img,.modal-photo img{width:100%;height:100%;object-fit:cover}\
.candidate-name{font-weight:bold;font-size:1.1rem;margin:8px 0 4px}\
.candidate-party{display:inline-block;border-radius:6px;padding:2px 8px;color:#fff;font-size:.85rem}\
.party-ldp{background:#c8102e}.party-dp{background:#1e50a2}.party-cdp{background:#004098}\
.party-csp{background:#6a3d9a}.party-sdp{background:#00a0e9}.party-jcp{background:#db001c}\
.party-sp{background:#e4007f}.party-independent{background:#7a7a7a}.party-other{background:#444}\
.tag{display:inline-block;background:#fff4d6;border-radius:6px;padding:1px 6px;font-size:.8rem}\
.candidate-brief{color:#555;font-size:.9rem;margin-top:8px}\
.section{margin-top:20px}\
.section-title{font-weight:bold;margin-bottom:8px}\
.stance-badge{display:inline-block;border-radius:6px;padding:2px 8px;font-size:.85rem;margin:2px}\
.stance-badge.pro{background:#d9f2dd}.stance-badge.partial1{background:#eaf5d5}\
.stance-badge.neutral{background:#eee}.stance-badge.partial2{background:#fbe8d3}\
.stance-badge.con{background:#f8d7da}.stance-badge.unknown{background:#e8e8f0}\
table{border-collapse:collapse;width:100%;background:#fff}\
th,td{border:1px solid #dde;padding:6px 10px;text-align:left;vertical-align:top}\
.actions{display:flex;gap:12px;margin:12px 0}\
.button{display:inline-block;background:#1f5fbf;color:#fff;border-radius:8px;padding:6px 14px;text-decoration:none}\
.button.secondary{background:#e3e8f4;color:#1f2a44}\
.notice{background:#eef4ff;border-left:4px solid #1f5fbf;padding:10px 14px}\
.notice.warning{background:#fff4e5;border-left-color:#e08a00}";

/// Append-only HTML buffer.
pub(crate) struct Html {
    buf: String,
}

impl Html {
    pub(crate) fn new() -> Self {
        Self {
            buf: String::with_capacity(16 * 1024),
        }
    }

    /// Append trusted markup as-is.
    pub(crate) fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    /// Append untrusted text, escaped.
    pub(crate) fn text<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(&esc(s));
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub(crate) fn esc<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a rendered screen body in the full document.
pub fn layout(title: &str, region: Option<&RegionSummary>, body: Html) -> String {
    let mut w = Html::new();
    w.push("<!DOCTYPE html><html lang=\"ja\"><head><meta charset=\"utf-8\">");
    w.push("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    w.push("<title>");
    w.text(title);
    w.push(" | ");
    w.push(SITE_TITLE);
    w.push("</title><style>");
    w.push(BASE_CSS);
    w.push("</style></head><body>");
    write_header(&mut w, region);
    w.push("<main>");
    w.push(body.finish());
    w.push("</main></body></html>");
    w.finish()
}

fn write_header(w: &mut Html, region: Option<&RegionSummary>) {
    w.push("<header class=\"app-header\"><div><h1>");
    w.push(SITE_TITLE);
    w.push("</h1><p class=\"subtitle\">");
    w.push(SITE_SUBTITLE);
    w.push("</p></div>");
    if let Some(region) = region {
        w.push("<div><span class=\"region-badge\">🗺 ");
        w.text(&region.label);
        w.push("</span>");
        if region.others > 0 {
            w.push("<span class=\"region-note\">");
            w.push(format!("ほか {} 名は別の選挙区表記です", region.others));
            w.push("</span>");
        }
        w.push("</div>");
    }
    w.push("</header>");
}

/// Informational box for empty results and prompts.
pub(crate) fn notice(w: &mut Html, message: &str) {
    w.push("<p class=\"notice\">");
    w.text(message);
    w.push("</p>");
}

/// Warning box for not-found states.
pub(crate) fn warning(w: &mut Html, message: &str) {
    w.push("<p class=\"notice warning\">");
    w.text(message);
    w.push("</p>");
}

/// Navigation link styled as a button.
pub(crate) fn link_button(w: &mut Html, href: &str, label: &str, secondary: bool) {
    w.push("<a class=\"button");
    if secondary {
        w.push(" secondary");
    }
    w.push("\" href=\"");
    w.text(href);
    w.push("\">");
    w.text(label);
    w.push("</a>");
}

/// Photo, or the textual initial when no photo is set.
pub(crate) fn write_photo(w: &mut Html, candidate: &Candidate, class: &str) {
    w.push(format!("<div class=\"{class}\">"));
    match candidate.photo.as_deref().map(str::trim) {
        Some(src) if !src.is_empty() => {
            w.push("<img src=\"");
            w.text(src);
            w.push("\" alt=\"");
            w.text(&candidate.name);
            w.push("\">");
        }
        _ => w.text(candidate.initial()),
    }
    w.push("</div>");
}

pub(crate) fn write_party_badge(w: &mut Html, candidate: &Candidate) {
    let style = candidate.party.style();
    w.push(format!(
        "<span class=\"candidate-party {}\"><span class=\"party-icon\">{}</span>",
        style.class, style.icon
    ));
    w.text(candidate.party.name());
    w.push("</span>");
}

/// Summary card shared by the list grid and the same-party strip.
pub(crate) fn write_card(w: &mut Html, candidate: &Candidate, href: &str, link_label: &str) {
    w.push("<article class=\"candidate-card\">");
    write_photo(w, candidate, "candidate-photo");
    w.push("<div class=\"candidate-name\">");
    w.text(&candidate.name);
    w.push("</div>");
    if let Some(policy) = candidate.key_policy.as_deref().filter(|p| !p.trim().is_empty()) {
        w.push("<div class=\"candidate-tags\"><span class=\"tag\">🎯 ");
        w.text(policy);
        w.push("</span></div>");
    }
    write_party_badge(w, candidate);
    if !candidate.brief.is_empty() {
        w.push("<div class=\"candidate-brief\">");
        w.text(&candidate.brief);
        w.push("</div>");
    }
    w.push("<p><a href=\"");
    w.text(href);
    w.push("\">");
    w.text(link_label);
    w.push("</a></p></article>");
}

/// Back-to-list and clear-all actions shown on the detail and compare screens.
pub(crate) fn write_back_actions(w: &mut Html, nav: &NavState) {
    w.push("<nav class=\"actions\">");
    link_button(w, &nav.back().href(), "← 一覧へ戻る", true);
    link_button(w, &nav.clear_all().href(), "🧹 すべてクリア", true);
    w.push("</nav>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_covers_markup_characters() {
        assert_eq!(
            esc(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(esc("佐藤太郎"), "佐藤太郎");
    }

    #[test]
    fn layout_shows_region_badge_and_note() {
        let region = RegionSummary {
            label: "東京第1区".into(),
            others: 2,
        };
        let html = layout("一覧", Some(&region), Html::new());
        assert!(html.contains("🗺 東京第1区"));
        assert!(html.contains("ほか 2 名"));
        assert!(html.contains("<title>一覧 | "));
    }

    #[test]
    fn layout_without_region_has_no_badge() {
        let html = layout("一覧", None, Html::new());
        assert!(!html.contains("region-badge\">"));
    }
}

//! Presentation Renderer.
//!
//! A pure projection from the dataset and a [`DemoSession`] to an HTML document. The renderer holds
//! no state. Interactive controls are plain links carrying the selection in the query string, so
//! each click is one discrete event handled by whoever serves the page.

pub mod copy;
pub mod html;

use crate::assets::{placeholder_message, AssetCatalog};
use crate::constants::ASSET_URL_PREFIX;
use crate::dataset::{DatasetStore, DemoCase, NavItem, ADIME_SECTIONS};
use crate::session::{DemoSession, UiEvent};
use crate::tooltip::Tooltip;
use crate::viewer::ViewMode;
use crate::{ShowcaseError, ShowcaseResult};
use html::{encode_query_value, escape_html, pretty_json, render_list, render_value};
use serde_json::{json, Value};
use showcase_types::{AssetName, NonEmptyText};

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;color:#1f2328;background:#fbfaf7;line-height:1.5}
nav{position:sticky;top:0;display:flex;gap:4px;padding:8px 24px;background:#fff;border-bottom:1px solid #e3dfd6;z-index:10}
nav a{padding:6px 12px;border-radius:6px;color:#5a5446;text-decoration:none}
nav a.active{background:#2f6f4f;color:#fff}
main{max-width:960px;margin:0 auto;padding:0 24px 64px}
section{padding-top:48px;scroll-margin-top:56px}
.tabs{display:flex;gap:6px;flex-wrap:wrap;margin:12px 0}
.tabs a{padding:4px 10px;border:1px solid #cfc9bb;border-radius:14px;text-decoration:none;color:#1f2328}
.tabs a.selected{background:#1f2328;color:#fff;border-color:#1f2328}
.badge{display:inline-block;margin-right:6px;padding:0 6px;border-radius:4px;background:#e8b931;font-size:.8em;font-weight:600}
.primary-focus{font-weight:600}
pre.code{background:#1f2328;color:#e6edf3;padding:16px;border-radius:8px;overflow:auto;font-size:.85em}
.asset-missing{padding:32px;border:2px dashed #b9b2a3;border-radius:8px;color:#5a5446;text-align:center;background:#f4f1ea}
.notice{margin:12px 0;padding:10px 14px;border-left:4px solid #2f6f4f;background:#eaf3ee}
.tip{position:relative;border-bottom:1px dotted #5a5446;cursor:help}
.tip-pop{position:absolute;left:0;width:280px;padding:8px 10px;border-radius:6px;background:#1f2328;color:#fff;font-size:.85em;visibility:hidden;pointer-events:none;z-index:20}
.tip-above{bottom:calc(100% + 6px)}
.tip-below{top:calc(100% + 6px)}
.tip:hover .tip-pop,.tip:focus .tip-pop,.tip-pop.tip-visible{visibility:visible}
dl{display:grid;grid-template-columns:max-content 1fr;gap:2px 12px}
dt{color:#5a5446}
dd{margin:0}
"#;

/// Inline `onerror` handler: hide the image, reveal the placeholder rendered after it.
const IMG_FALLBACK_SCRIPT: &str = "this.onerror=null;this.hidden=true;this.nextElementSibling.hidden=false";

/// Section ids the page mounts, in document order.
pub fn mounted_section_ids(store: &DatasetStore) -> Vec<String> {
    store.nav_ids().map(str::to_string).collect()
}

/// Selection carried in page links and query strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct PageQuery {
    pub section: Option<String>,
    pub case: Option<String>,
    pub view: Option<String>,
    pub link: Option<String>,
}

impl PageQuery {
    /// The events a request with this query represents, in the order they must be applied.
    ///
    /// The case is selected before the view because selecting a case resets the view.
    pub fn events(&self) -> ShowcaseResult<Vec<UiEvent>> {
        let mut events = Vec::new();
        if let Some(id) = &self.section {
            events.push(UiEvent::SelectSection { id: id.clone() });
        }
        if let Some(id) = &self.case {
            events.push(UiEvent::SelectCase { id: id.clone() });
        }
        if let Some(view) = &self.view {
            events.push(UiEvent::SelectView {
                mode: view.parse()?,
            });
        }
        if let Some(target) = &self.link {
            let target = NonEmptyText::new(target)
                .map_err(|_| ShowcaseError::InvalidInput("link target cannot be empty".into()))?;
            events.push(UiEvent::OutboundLinkRequested { target });
        }
        Ok(events)
    }
}

/// Builds a session for `store` with the page mounted and `query` applied.
pub fn session_for_query(
    store: std::sync::Arc<DatasetStore>,
    query: &PageQuery,
) -> ShowcaseResult<DemoSession> {
    let events = query.events()?;
    let mut session = DemoSession::new(store);
    let sections = mounted_section_ids(session.store());
    session.mount_sections(sections);
    session.replay(&events);
    Ok(session)
}

/// The data shown for a case in a given view mode.
pub fn project_case(case: &DemoCase, mode: ViewMode) -> ShowcaseResult<Value> {
    match mode {
        ViewMode::Primary => Ok(json!({
            "id": case.id,
            "title": case.title,
            "tags": case.tags,
            "profile": case.profile,
            "output": case.output,
            "evidence": case.evidence,
        })),
        ViewMode::Structured => Ok(case.structured_order.clone()),
        ViewMode::Raw => serde_json::to_value(case).map_err(ShowcaseError::Serialization),
    }
}

/// Renders the whole page for the session's current state.
pub fn render_page(session: &DemoSession, assets: &dyn AssetCatalog) -> String {
    let page = Page { session, assets };
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(copy::SITE_TITLE),
        STYLE
    ));

    page.nav_bar(&mut out);
    out.push_str("<main>\n");
    for item in session.store().nav_items() {
        page.section(&mut out, item);
    }
    out.push_str(&format!(
        "<footer><p>{}</p></footer>\n</main>\n</body>\n</html>\n",
        escape_html(copy::FOOTER_NOTE)
    ));
    out
}

struct Page<'a> {
    session: &'a DemoSession,
    assets: &'a dyn AssetCatalog,
}

impl Page<'_> {
    fn store(&self) -> &DatasetStore {
        self.session.store()
    }

    fn current_case(&self) -> &DemoCase {
        self.session.viewer().current_case(self.store())
    }

    /// Link preserving the current selection, with overrides.
    fn href(&self, section: &str, case: Option<&str>, view: Option<ViewMode>) -> String {
        let viewer = self.session.viewer();
        let case = case.unwrap_or(viewer.selected_case_id());
        let mut href = format!(
            "?section={}&case={}",
            encode_query_value(section),
            encode_query_value(case)
        );
        if let Some(view) = view {
            href.push_str(&format!("&view={}", view.as_str()));
        }
        href.push_str(&format!("#{}", encode_query_value(section)));
        escape_html(&href)
    }

    fn nav_bar(&self, out: &mut String) {
        let active = self.session.navigation().active_section();
        out.push_str("<nav>");
        for item in self.store().nav_items() {
            let class = if item.id == active { " class=\"active\"" } else { "" };
            out.push_str(&format!(
                "<a href=\"{}\"{}>{}</a>",
                self.href(&item.id, None, Some(self.session.viewer().view_mode())),
                class,
                escape_html(&item.label)
            ));
        }
        out.push_str("</nav>\n");
    }

    fn section(&self, out: &mut String, item: &NavItem) {
        out.push_str(&format!(
            "<section id=\"{}\">\n<h2>{}</h2>\n",
            escape_html(&item.id),
            escape_html(&item.label)
        ));
        if let Some(summary) = &item.summary {
            out.push_str(&format!("<p>{}</p>\n", escape_html(summary)));
        }

        match item.id.as_str() {
            "overview" => self.overview(out),
            "methodology" => self.methodology(out),
            "cases" => self.cases(out, &item.id),
            "safety" => self.safety(out),
            "team" => self.team(out),
            _ => {}
        }
        self.images_for(out, &item.id);
        out.push_str("</section>\n");
    }

    fn overview(&self, out: &mut String) {
        out.push_str(&format!(
            "<h1>{}</h1>\n<p>{}</p>\n",
            escape_html(copy::SITE_TITLE),
            escape_html(copy::HERO_TAGLINE)
        ));
        out.push_str("<p class=\"tabs\">");
        for (target, label) in [
            ("paper", copy::PAPER_LINK_LABEL),
            ("video", copy::VIDEO_LINK_LABEL),
        ] {
            out.push_str(&format!(
                "<a href=\"?section=overview&amp;link={}#overview\">{}</a>",
                target,
                escape_html(label)
            ));
        }
        out.push_str("</p>\n");
        if let Some(notice) = self.session.notice() {
            out.push_str(&format!(
                "<div class=\"notice\" role=\"status\">{} <a href=\"?section=overview#overview\">{}</a></div>\n",
                escape_html(notice),
                escape_html(copy::DISMISS_LABEL)
            ));
        }
    }

    fn methodology(&self, out: &mut String) {
        out.push_str("<p>Each plan follows the ");
        self.tooltip(out, "adime");
        out.push_str(" process. Screening uses ");
        self.tooltip(out, "must");
        out.push_str(", recommendations are grounded by ");
        self.tooltip(out, "retrieval");
        out.push_str(", and the final plan is projected into a ");
        self.tooltip(out, "nutrition-order");
        out.push_str(" record.</p>\n");
    }

    fn tooltip(&self, out: &mut String, id: &str) {
        let Some(tip) = self.session.tooltip(id) else {
            return;
        };
        out.push_str(&tooltip_html(tip));
    }

    fn cases(&self, out: &mut String, section_id: &str) {
        let viewer = self.session.viewer();
        let current = self.current_case();

        out.push_str(&format!(
            "<div class=\"tabs\" role=\"tablist\" aria-label=\"{}\">",
            escape_html(copy::CASE_PICKER_LABEL)
        ));
        for case in self.store().cases() {
            let class = if case.id == current.id { " class=\"selected\"" } else { "" };
            out.push_str(&format!(
                "<a role=\"tab\" href=\"{}\"{}>{}</a>",
                self.href(section_id, Some(&case.id), None),
                class,
                escape_html(&case.title)
            ));
        }
        out.push_str("</div>\n");

        out.push_str(&format!(
            "<div class=\"tabs\" role=\"tablist\" aria-label=\"{}\">",
            escape_html(copy::VIEW_PICKER_LABEL)
        ));
        for mode in ViewMode::ALL {
            let class = if mode == viewer.view_mode() { " class=\"selected\"" } else { "" };
            out.push_str(&format!(
                "<a role=\"tab\" href=\"{}\"{}>{}</a>",
                self.href(section_id, Some(&current.id), Some(mode)),
                class,
                escape_html(copy::view_label(mode))
            ));
        }
        out.push_str("</div>\n");

        out.push_str(&format!(
            "<article class=\"case\" data-case=\"{}\" data-view=\"{}\">\n<h3>{}</h3>\n",
            escape_html(&current.id),
            viewer.view_mode(),
            escape_html(&current.title)
        ));
        match viewer.view_mode() {
            ViewMode::Primary => primary_view(out, current),
            ViewMode::Structured => {
                out.push_str(&format!(
                    "<pre class=\"code\">{}</pre>\n",
                    escape_html(&pretty_json(&current.structured_order))
                ));
            }
            ViewMode::Raw => match project_case(current, ViewMode::Raw) {
                Ok(raw) => out.push_str(&format!(
                    "<pre class=\"code\">{}</pre>\n",
                    escape_html(&pretty_json(&raw))
                )),
                Err(e) => {
                    tracing::error!("raw view of '{}' failed: {}", current.id, e);
                    out.push_str(&format!(
                        "<p class=\"notice\" role=\"status\">{}</p>\n",
                        escape_html(copy::RECORD_UNAVAILABLE)
                    ));
                }
            },
        }
        out.push_str("</article>\n");
    }

    fn safety(&self, out: &mut String) {
        let current = self.current_case();
        out.push_str(&format!(
            "<h3>{}: {}</h3>\n",
            escape_html(copy::SAFETY_HEADING),
            escape_html(&current.title)
        ));
        let rules = current.safety_rules();
        if rules.is_empty() {
            out.push_str(&format!(
                "<p>{}</p>\n",
                escape_html(copy::NO_SAFETY_CONSTRAINTS)
            ));
            return;
        }
        out.push_str("<ul class=\"safety\">");
        for rule in rules {
            out.push_str(&format!("<li><strong>{}</strong>", escape_html(&rule.rule)));
            render_list(out, &rule.examples);
            if !rule.note.trim().is_empty() {
                out.push_str(&format!("<p>{}</p>", escape_html(&rule.note)));
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>\n");
    }

    fn team(&self, out: &mut String) {
        out.push_str("<dl>");
        for (role, focus) in copy::TEAM_ROLES {
            out.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(role),
                escape_html(focus)
            ));
        }
        out.push_str("</dl>\n");
    }

    fn images_for(&self, out: &mut String, section_id: &str) {
        for (_, file, alt) in copy::IMAGES
            .iter()
            .filter(|(section, _, _)| *section == section_id)
        {
            self.image(out, file, alt);
        }
    }

    fn image(&self, out: &mut String, file: &str, alt: &str) {
        let available = AssetName::parse(file)
            .map(|name| self.assets.contains(&name) && !self.session.asset_failed(file))
            .unwrap_or(false);

        let message = placeholder_message(file, &self.assets.location());
        if available {
            // A load failure in the browser swaps the image for the hidden placeholder.
            out.push_str(&format!(
                "<img src=\"{}/{}\" alt=\"{}\" loading=\"lazy\" onerror=\"{}\">\n",
                ASSET_URL_PREFIX,
                escape_html(file),
                escape_html(alt),
                IMG_FALLBACK_SCRIPT
            ));
            out.push_str(&format!(
                "<div class=\"asset-missing asset-fallback\" role=\"img\" aria-label=\"{}\" hidden>{}</div>\n",
                escape_html(alt),
                escape_html(&message)
            ));
        } else {
            tracing::warn!("image '{}' unavailable; rendering placeholder", file);
            out.push_str(&format!(
                "<div class=\"asset-missing\" role=\"img\" aria-label=\"{}\">{}</div>\n",
                escape_html(alt),
                escape_html(&message)
            ));
        }
    }
}

fn tooltip_html(tip: &Tooltip) -> String {
    let visible = if tip.is_visible() { " tip-visible" } else { "" };
    format!(
        "<span class=\"tip\" tabindex=\"0\" data-tooltip=\"{id}\" aria-describedby=\"tip-{id}\">{label}<span id=\"tip-{id}\" role=\"tooltip\" class=\"tip-pop tip-{placement}{visible}\" style=\"pointer-events:none\">{detail}</span></span>",
        id = escape_html(tip.id()),
        label = escape_html(tip.label()),
        placement = tip.placement().as_str(),
        visible = visible,
        detail = escape_html(tip.detail()),
    )
}

fn primary_view(out: &mut String, case: &DemoCase) {
    if !case.tags.is_empty() {
        out.push_str("<p class=\"tabs\">");
        for tag in &case.tags {
            out.push_str(&format!("<span class=\"badge\">{}</span>", escape_html(tag)));
        }
        out.push_str("</p>\n");
    }

    out.push_str(&format!("<h4>{}</h4>\n", escape_html(copy::PROFILE_HEADING)));
    render_value(out, &case.profile);

    out.push_str(&format!("\n<h4>{}</h4>\n", escape_html(copy::PLAN_HEADING)));
    for (key, heading) in ADIME_SECTIONS {
        let Some(section) = case.adime_section(key) else {
            continue;
        };
        out.push_str(&format!("<h5>{}</h5>\n", escape_html(heading)));
        if key == "diagnosis" {
            diagnoses(out, case);
        } else {
            render_value(out, section);
        }
        out.push('\n');
    }

    out.push_str(&format!("<h4>{}</h4>\n", escape_html(copy::EVIDENCE_HEADING)));
    for (label, items) in [
        (copy::EVIDENCE_GUIDELINES_LABEL, &case.evidence.guidelines),
        (copy::EVIDENCE_TOOLS_LABEL, &case.evidence.tools),
        (copy::EVIDENCE_POINTS_LABEL, &case.evidence.retrieved_points),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("<h5>{}</h5>", escape_html(label)));
        render_list(out, items);
        out.push('\n');
    }
}

fn diagnoses(out: &mut String, case: &DemoCase) {
    let entries = case.diagnoses();
    if entries.is_empty() {
        if let Some(section) = case.adime_section("diagnosis") {
            render_value(out, section);
        }
        return;
    }
    out.push_str("<ol class=\"diagnoses\">");
    for (i, entry) in entries.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!(
                "<li class=\"primary-focus\"><span class=\"badge\">{}</span>",
                escape_html(copy::PRIMARY_FOCUS_BADGE)
            ));
        } else {
            out.push_str("<li>");
        }
        render_value(out, entry);
        out.push_str("</li>");
    }
    out.push_str("</ol>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::dataset::tests::sample_store;
    use std::sync::Arc;

    fn builtin() -> Arc<DatasetStore> {
        Arc::new(DatasetStore::builtin().expect("builtin dataset"))
    }

    fn all_images() -> MemoryAssets {
        MemoryAssets::new(
            copy::IMAGES
                .iter()
                .map(|(_, file, _)| AssetName::parse(file).unwrap()),
        )
    }

    fn query(section: Option<&str>, case: Option<&str>, view: Option<&str>) -> PageQuery {
        PageQuery {
            section: section.map(Into::into),
            case: case.map(Into::into),
            view: view.map(Into::into),
            link: None,
        }
    }

    #[test]
    fn renders_every_section_once() {
        let store = builtin();
        let session = session_for_query(store.clone(), &PageQuery::default()).unwrap();
        let page = render_page(&session, &all_images());

        assert!(page.starts_with("<!DOCTYPE html>"));
        for id in mounted_section_ids(&store) {
            assert_eq!(
                page.matches(&format!("<section id=\"{id}\">")).count(),
                1,
                "{id}"
            );
        }
    }

    #[test]
    fn marks_active_section_and_selected_tabs() {
        let session = session_for_query(
            builtin(),
            &query(Some("results"), Some("case-2"), Some("structured")),
        )
        .unwrap();
        let page = render_page(&session, &all_images());

        assert!(page.contains("class=\"active\">Results</a>"));
        assert!(page.contains(
            "class=\"selected\">Post-operative malnutrition risk after bowel resection</a>"
        ));
        assert!(page.contains("class=\"selected\">Structured order</a>"));
        assert!(page.contains("data-case=\"case-2\" data-view=\"structured\""));
        assert!(page.contains("NutritionOrder"));
    }

    #[test]
    fn query_applies_case_before_view() {
        let session =
            session_for_query(builtin(), &query(None, Some("case-3"), Some("raw"))).unwrap();
        assert_eq!(session.viewer().selected_case_id(), "case-3");
        assert_eq!(session.viewer().view_mode(), ViewMode::Raw);
        assert!(session.scroller().last_scrolled().is_none());
    }

    #[test]
    fn unknown_query_case_falls_back_to_first() {
        let session = session_for_query(builtin(), &query(None, Some("case-99"), None)).unwrap();
        let page = render_page(&session, &all_images());
        assert!(page.contains("data-case=\"case-1\""));
    }

    #[test]
    fn invalid_view_in_query_is_rejected() {
        let err = session_for_query(builtin(), &query(None, None, Some("fancy")))
            .expect_err("should reject");
        assert!(matches!(err, ShowcaseError::InvalidInput(_)));
    }

    #[test]
    fn primary_view_marks_first_diagnosis() {
        let session = session_for_query(builtin(), &PageQuery::default()).unwrap();
        let page = render_page(&session, &all_images());
        assert_eq!(page.matches("class=\"primary-focus\"").count(), 1);
        let focus = page.find("class=\"primary-focus\"").unwrap();
        let first_problem = page.find("Excessive carbohydrate intake").unwrap();
        let second_problem = page.find("Excessive mineral intake").unwrap();
        assert!(focus < first_problem && first_problem < second_problem);
    }

    #[test]
    fn raw_view_includes_whole_record() {
        let session =
            session_for_query(builtin(), &query(None, Some("case-1"), Some("raw"))).unwrap();
        let page = render_page(&session, &all_images());
        assert!(page.contains("&quot;safety_constraints&quot;"));
        assert!(page.contains("&quot;structured_order&quot;"));
    }

    #[test]
    fn raw_view_matches_case_projection() {
        let store = builtin();
        let session =
            session_for_query(store.clone(), &query(None, Some("case-2"), Some("raw"))).unwrap();
        let page = render_page(&session, &all_images());
        let raw = project_case(store.case("case-2").unwrap(), ViewMode::Raw).unwrap();
        assert!(page.contains(&escape_html(&pretty_json(&raw))));
        assert!(!page.contains(copy::RECORD_UNAVAILABLE));
    }

    #[test]
    fn served_images_fall_back_to_placeholder_on_load_error() {
        let session = session_for_query(builtin(), &PageQuery::default()).unwrap();
        let page = render_page(&session, &all_images());
        let img = page
            .find("<img src=\"/assets/team.jpg\"")
            .expect("team image rendered");
        let rest = &page[img..];
        let tag_end = rest.find('>').unwrap();
        assert!(rest[..tag_end].contains("onerror=\"this.onerror=null;this.hidden=true"));

        let fallback = &rest[tag_end..];
        assert!(fallback
            .trim_start_matches(">\n")
            .starts_with("<div class=\"asset-missing asset-fallback\""));
        assert!(fallback.contains("expected &#39;team.jpg&#39;"));
        assert_eq!(
            page.matches("class=\"asset-missing asset-fallback\"").count(),
            copy::IMAGES.len()
        );
    }

    #[test]
    fn missing_images_render_placeholders() {
        let session = session_for_query(builtin(), &PageQuery::default()).unwrap();
        let page = render_page(&session, &MemoryAssets::default());
        assert_eq!(
            page.matches("class=\"asset-missing\"").count(),
            copy::IMAGES.len()
        );
        assert!(page.contains("expected &#39;team.jpg&#39;"));
        assert!(!page.contains("<img "));
    }

    #[test]
    fn failed_image_renders_placeholder_even_if_catalogued() {
        let mut session = session_for_query(builtin(), &PageQuery::default()).unwrap();
        session.dispatch(&UiEvent::AssetLoadFailed {
            asset: "team.jpg".into(),
        });
        let page = render_page(&session, &all_images());
        assert_eq!(page.matches("class=\"asset-missing\"").count(), 1);
        assert!(page.contains("src=\"/assets/pipeline-overview.png\""));
    }

    #[test]
    fn link_request_shows_inline_notice() {
        let q = PageQuery {
            link: Some("paper".into()),
            ..PageQuery::default()
        };
        let session = session_for_query(builtin(), &q).unwrap();
        let page = render_page(&session, &all_images());
        assert!(page.contains("class=\"notice\" role=\"status\""));
        assert!(page.contains("The paper link is not available yet."));
    }

    #[test]
    fn tooltips_render_with_placement_and_no_pointer_events() {
        let mut session = session_for_query(builtin(), &PageQuery::default()).unwrap();
        session.dispatch(&UiEvent::PointerEnter {
            tooltip: "adime".into(),
            anchor_top: Some(10.0),
        });
        let page = render_page(&session, &all_images());
        assert!(page.contains("class=\"tip-pop tip-below tip-visible\""));
        assert!(page.contains("class=\"tip-pop tip-above\""));
        assert_eq!(
            page.matches("style=\"pointer-events:none\"").count(),
            copy::TOOLTIPS.len()
        );
    }

    #[test]
    fn empty_safety_constraints_render_message() {
        let session = session_for_query(builtin(), &query(None, Some("case-3"), None)).unwrap();
        let page = render_page(&session, &all_images());
        assert!(page.contains(copy::NO_SAFETY_CONSTRAINTS));
    }

    #[test]
    fn dataset_text_is_escaped() {
        let mut store = sample_store();
        let mut cases = store.cases().to_vec();
        cases[0].title = "<script>alert(1)</script>".into();
        store = DatasetStore::new(store.nav_items().to_vec(), cases).unwrap();

        let session = session_for_query(Arc::new(store), &query(Some("cases"), None, None)).unwrap();
        let page = render_page(&session, &MemoryAssets::default());
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn projections_per_view_mode() {
        let store = builtin();
        let case = store.case("case-2").unwrap();

        let primary = project_case(case, ViewMode::Primary).unwrap();
        assert_eq!(primary["id"], "case-2");
        assert!(primary.get("structured_order").is_none());

        let structured = project_case(case, ViewMode::Structured).unwrap();
        assert_eq!(structured["resourceType"], "NutritionOrder");

        let raw = project_case(case, ViewMode::Raw).unwrap();
        assert!(raw["safety_constraints"].is_array());
    }
}

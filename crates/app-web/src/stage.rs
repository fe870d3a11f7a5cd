//! The three stage layers and the chrome around them.
//!
//! Every element is optional except the body; the page degrades to whatever
//! markup is present rather than failing init.

use app_core::{MapLayerStyle, StageStyles};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

pub(crate) struct StageElements {
    france: Option<web::HtmlElement>,
    region: Option<web::HtmlElement>,
    festival: Option<web::HtmlElement>,
    scroll_indicator: Option<web::HtmlElement>,
    scroll_hint: Option<web::HtmlElement>,
    stage1_notes: Option<web::HtmlElement>,
    stage2_notes: Option<web::HtmlElement>,
    header_title: Option<web::HtmlElement>,
    body: web::HtmlElement,
}

fn query_html(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

fn by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

impl StageElements {
    pub(crate) fn query(document: &web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
        Ok(Self {
            france: query_html(document, ".france-map"),
            region: query_html(document, ".region-map"),
            festival: query_html(document, ".festival-section"),
            scroll_indicator: query_html(document, ".scroll-indicator"),
            scroll_hint: by_id(document, "scrollHint"),
            stage1_notes: query_html(document, ".stage1-notes"),
            stage2_notes: query_html(document, ".stage2-notes"),
            header_title: by_id(document, "headerTitle"),
            body,
        })
    }

    /// Give the document enough scroll room for the whole progression and
    /// make programmatic scrolls glide.
    pub(crate) fn prepare_scroll_environment(&self, document: &web::Document) {
        dom::set_style(&self.body, "height", "500vh");
        if let Some(root) = document
            .document_element()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        {
            dom::set_style(&root, "scroll-behavior", "smooth");
        }
    }

    /// The static note containers predate the dynamic pool; park them once.
    pub(crate) fn retire_static_note_containers(&self) {
        for container in [&self.stage1_notes, &self.stage2_notes]
            .into_iter()
            .flatten()
        {
            dom::set_style(container, "opacity", "0");
            dom::set_style(container, "pointer-events", "none");
        }
    }

    /// Mirror one set of interpolated stage styles into the DOM.
    pub(crate) fn apply(&self, styles: &StageStyles, progress: f32) {
        if let Some(el) = &self.france {
            apply_map_layer(el, &styles.france);
        }
        if let Some(el) = &self.region {
            apply_map_layer(el, &styles.region);
        }
        if let Some(el) = &self.festival {
            dom::set_style(el, "opacity", &format!("{:.3}", styles.festival.opacity));
            dom::set_style(
                el,
                "transform",
                &format!("translateX({:.2}%)", styles.festival.translate_x_pct),
            );
            dom::set_style(el, "transition", "all 0.02s ease-out");
            if styles.festival.scrollable {
                dom::set_style(el, "overflow-y", "auto");
                dom::set_style(el, "max-height", "100vh");
            }
        }
        if let Some(el) = &self.scroll_indicator {
            let _ = el
                .style()
                .set_property("--scroll-progress", &format!("{progress:.1}%"));
        }
        self.body.set_class_name(styles.body_class);
        if let Some(el) = &self.header_title {
            el.set_text_content(Some(styles.header_title));
        }
    }

    /// Fade the scroll hint on first scroll and drop it shortly after.
    pub(crate) fn dismiss_scroll_hint(&self) {
        let Some(hint) = &self.scroll_hint else {
            return;
        };
        dom::set_style(hint, "opacity", "0");
        dom::set_style(hint, "pointer-events", "none");
        if let Some(window) = web::window() {
            let hint = hint.clone();
            dom::set_timeout(&window, 500, move || hint.remove());
        }
    }

    /// Whether an event originated inside the festival panel's subtree.
    pub(crate) fn event_in_festival_panel(&self, ev: &web::Event) -> bool {
        let Some(panel) = &self.festival else {
            return false;
        };
        let Some(target) = ev.target() else {
            return false;
        };
        match target.dyn_ref::<web::Node>() {
            Some(node) => panel.contains(Some(node)),
            None => false,
        }
    }
}

fn apply_map_layer(el: &web::HtmlElement, style: &MapLayerStyle) {
    dom::set_style(el, "opacity", &format!("{:.3}", style.opacity));
    let transform = if style.translate_x_pct.abs() > f32::EPSILON {
        format!(
            "scale({:.3}) translateX({:.2}%)",
            style.scale, style.translate_x_pct
        )
    } else {
        format!("scale({:.3})", style.scale)
    };
    dom::set_style(el, "transform", &transform);
    dom::set_style(el, "transition", "all 0.02s ease-out");
}

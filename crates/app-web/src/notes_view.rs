//! DOM rendering of the note pool.
//!
//! Each entity maps to one fixed-position element. The click closure
//! captures the typed `NoteId` at creation, so identity never depends on
//! inspecting rendered content.

use app_core::constants::FLOAT_DELAY_MS;
use app_core::{NoteId, NotePool, PagePoint, PoolEvent, ScreenRect};
use fnv::FnvHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::{dom, SharedApp};

pub(crate) struct NotesView {
    document: web::Document,
    elements: FnvHashMap<NoteId, web::HtmlElement>,
}

impl NotesView {
    pub(crate) fn new(document: web::Document) -> Self {
        Self {
            document,
            elements: FnvHashMap::default(),
        }
    }

    /// Mirror one pool event into the DOM.
    pub(crate) fn apply(&mut self, pool: &NotePool, event: &PoolEvent, app: &SharedApp) {
        match event {
            PoolEvent::Spawned {
                id, symbol, anchor, ..
            } => self.create_note(pool, *id, symbol.glyph(), *anchor, app),
            PoolEvent::Revealed { id, position } => self.reveal_note(pool, *id, *position),
            PoolEvent::Removed { id } => self.remove_note(*id),
        }
    }

    /// Materialize a note at its anchor, invisible until the reveal.
    fn create_note(
        &mut self,
        pool: &NotePool,
        id: NoteId,
        glyph: char,
        anchor: PagePoint,
        app: &SharedApp,
    ) {
        let Some(el) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            log::warn!("could not create an element for note {}", id.value());
            return;
        };
        el.set_class_name("note");
        el.set_id(&format!("dynamic-note-{}", id.value()));
        el.set_text_content(Some(&glyph.to_string()));

        dom::set_style(&el, "position", "fixed");
        dom::set_style(&el, "top", &format!("{:.2}%", anchor.top));
        dom::set_style(&el, "left", &format!("{:.2}%", anchor.left));
        dom::set_style(&el, "opacity", "0");
        let clickable = pool.is_interactive() && !pool.is_hidden();
        dom::set_style(&el, "pointer-events", if clickable { "auto" } else { "none" });
        dom::set_style(&el, "cursor", "pointer");
        dom::set_style(&el, "z-index", "9999");
        dom::set_style(&el, "font-size", "3rem");
        dom::set_style(&el, "color", "#d4af37");
        dom::set_style(&el, "text-shadow", "2px 2px 4px rgba(0, 0, 0, 0.8)");
        dom::set_style(&el, "transition", "all 0.5s ease-out");

        {
            let app = app.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                crate::handle_note_click(&app, id, &ev);
            }) as Box<dyn FnMut(_)>);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        wire_hover(&el);

        if let Some(body) = self.document.body() {
            let _ = body.append_child(&el);
        }
        let _ = self.elements.insert(id, el);
    }

    /// Slide the note out to its final position and fade it in; the idle
    /// float starts once that settles.
    fn reveal_note(&mut self, pool: &NotePool, id: NoteId, position: PagePoint) {
        let Some(el) = self.elements.get(&id) else {
            return;
        };
        let opacity = pool.display_opacity(id).unwrap_or(0.0);
        dom::set_style(el, "top", &format!("{:.2}%", position.top));
        dom::set_style(el, "left", &format!("{:.2}%", position.left));
        dom::set_style(el, "opacity", &format!("{opacity:.3}"));

        if let Some(window) = web::window() {
            let el = el.clone();
            dom::set_timeout(&window, FLOAT_DELAY_MS as i32, move || {
                dom::set_style(&el, "animation", "floatNoteToTop 6s ease-in-out infinite");
            });
        }
    }

    fn remove_note(&mut self, id: NoteId) {
        if let Some(el) = self.elements.remove(&id) {
            el.remove();
        }
    }

    /// Spin-and-fade exit on a consumed note; the element itself goes away
    /// with the pool's removal event.
    pub(crate) fn play_exit_animation(&self, id: NoteId) {
        let Some(el) = self.elements.get(&id) else {
            return;
        };
        dom::set_style(el, "animation", "none");
        dom::set_style(el, "transition", "all 0.5s ease-out");
        dom::set_style(el, "transform", "scale(3) rotate(360deg)");
        dom::set_style(el, "opacity", "0");
        dom::set_style(el, "z-index", "99999");
        dom::set_style(el, "pointer-events", "none");
    }

    /// Center of a note's rendered rectangle, in CSS pixels.
    pub(crate) fn element_center(&self, id: NoteId) -> Option<(f64, f64)> {
        let el = self.elements.get(&id)?;
        let rect = el.get_bounding_client_rect();
        Some((
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        ))
    }

    /// Screen rectangles of every rendered note, for the off-screen sweep.
    pub(crate) fn screen_rects(&self) -> Vec<(NoteId, ScreenRect)> {
        self.elements
            .iter()
            .map(|(id, el)| {
                let rect = el.get_bounding_client_rect();
                (
                    *id,
                    ScreenRect {
                        top: rect.top(),
                        left: rect.left(),
                        right: rect.right(),
                        bottom: rect.bottom(),
                    },
                )
            })
            .collect()
    }

    /// Re-apply opacity and interactivity after a broadcast toggle on the
    /// pool (festival latch, interactivity changes).
    pub(crate) fn sync_visibility(&self, pool: &NotePool) {
        let clickable = pool.is_interactive() && !pool.is_hidden();
        for (id, el) in &self.elements {
            let opacity = pool.display_opacity(*id).unwrap_or(0.0);
            dom::set_style(el, "opacity", &format!("{opacity:.3}"));
            dom::set_style(
                el,
                "visibility",
                if pool.is_hidden() { "hidden" } else { "visible" },
            );
            dom::set_style(el, "pointer-events", if clickable { "auto" } else { "none" });
            dom::set_style(el, "cursor", if clickable { "pointer" } else { "default" });
        }
    }
}

/// Gold glow while hovering an unconsumed note. Consumed notes drop their
/// pointer events, so these never fire again after a click.
fn wire_hover(el: &web::HtmlElement) {
    let target = el.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::set_style(&target, "filter", "brightness(1.5) drop-shadow(0 0 10px gold)");
    }) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
    closure.forget();

    let target = el.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::clear_style(&target, "filter");
    }) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

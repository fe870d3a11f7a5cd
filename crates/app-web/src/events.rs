//! Input wiring: passive scroll sampling, wheel and keyboard interception,
//! and the resize refresh. All routing decisions come from the core policy;
//! this module only registers listeners and executes the chosen action.

use app_core::{key_action, stage_styles, wheel_action, NavKey, RouterAction};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::{dom, App, SharedApp};

pub(crate) fn wire(
    window: &web::Window,
    document: &web::Document,
    app: &SharedApp,
) -> anyhow::Result<()> {
    wire_scroll(window, app.clone());
    wire_wheel(window, app.clone())?;
    wire_keyboard(document, app.clone());
    wire_resize(window, app.clone());
    Ok(())
}

/// Re-read the scroll offset and push it through the timeline, reacting to
/// any phase transition it reports.
fn update_from_scroll(app: &SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    let raw = window.page_y_offset().unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let scrollable = document_height - dom::inner_height(&window);

    let mut a = app.borrow_mut();
    let now = a.now_ms();
    let change = a.timeline.set_scroll_offset(raw, scrollable);

    if change.latch_set {
        log::info!("festival reached; notes hidden until scrolling back up");
        a.pool.hide_all();
        a.pool.set_interactive(false);
    }
    if change.latch_cleared {
        log::info!("back to the maps; notes resume");
        a.pool.show_all();
        a.pool.set_interactive(true);
    }

    // Keep the pool topped up while the map phases are on screen
    let gate = a.timeline.spawn_gate();
    if !gate.suppressed {
        a.pool.initialize_all(gate, now);
    }

    if !a.hint_dismissed {
        a.hint_dismissed = true;
        a.stage.dismiss_scroll_hint();
    }

    let styles = stage_styles(a.timeline.phase(), a.timeline.phase_fraction());
    let progress = a.timeline.progress();
    let App {
        stage, notes, pool, ..
    } = &mut *a;
    stage.apply(&styles, progress);
    if change.latch_set || change.latch_cleared {
        notes.sync_visibility(pool);
    }
}

fn wire_scroll(window: &web::Window, app: SharedApp) {
    let closure = Closure::wrap(Box::new(move || {
        let accepted = {
            let mut a = app.borrow_mut();
            let now = a.now_ms();
            a.sampler.accept(now)
        };
        if accepted {
            update_from_scroll(&app);
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(window: &web::Window, app: SharedApp) -> anyhow::Result<()> {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let (progress, within_panel) = {
            let a = app.borrow();
            (a.timeline.progress(), a.stage.event_in_festival_panel(&ev))
        };
        match wheel_action(progress, within_panel, ev.delta_y()) {
            RouterAction::Passthrough => {}
            RouterAction::ScrollBy { viewport_fraction } => {
                ev.prevent_default();
                smooth_scroll_by(viewport_fraction);
            }
        }
    }) as Box<dyn FnMut(_)>);
    // Must be non-passive or preventDefault is ignored
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| anyhow::anyhow!("wheel listener: {e:?}"))?;
    closure.forget();
    Ok(())
}

fn wire_keyboard(document: &web::Document, app: SharedApp) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let (progress, within_panel) = {
            let a = app.borrow();
            (a.timeline.progress(), a.stage.event_in_festival_panel(&ev))
        };
        let key = NavKey::from_key_name(&ev.key());
        match key_action(progress, within_panel, key) {
            RouterAction::Passthrough => {}
            RouterAction::ScrollBy { viewport_fraction } => {
                ev.prevent_default();
                smooth_scroll_by(viewport_fraction);
            }
        }
    }) as Box<dyn FnMut(_)>);
    let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(window: &web::Window, app: SharedApp) {
    let closure = Closure::wrap(Box::new(move || {
        // Let the layout settle before restyling
        let app = app.clone();
        if let Some(w) = web::window() {
            dom::set_timeout(&w, 100, move || {
                let a = app.borrow();
                let styles = stage_styles(a.timeline.phase(), a.timeline.phase_fraction());
                a.stage.apply(&styles, a.timeline.progress());
            });
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Programmatic smooth scroll by a fraction of the viewport height.
fn smooth_scroll_by(viewport_fraction: f32) {
    let Some(window) = web::window() else {
        return;
    };
    let step = dom::inner_height(&window) * viewport_fraction as f64;
    let options = web::ScrollToOptions::new();
    options.set_top(step);
    options.set_behavior(web::ScrollBehavior::Smooth);
    window.scroll_by_with_scroll_to_options(&options);
}

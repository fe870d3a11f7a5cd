#![cfg(target_arch = "wasm32")]
//! Browser front-end for the scroll-driven festival presentation.
//!
//! All state lives in [`App`] behind an `Rc<RefCell<..>>` shared by the
//! event listeners, the periodic intervals, and the frame pump. The core
//! crate makes every decision; this crate only reads the DOM, forwards
//! inputs, and mirrors pool events back into elements.

use app_core::{stage_styles, NoteId, NotePool, ScrollSampler, ScrollTimeline, ViewportSize};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod confetti;
mod dom;
mod events;
mod notes_view;
mod preload;
mod stage;

/// Shared mutable state behind every listener and timer closure.
pub(crate) struct App {
    pub(crate) timeline: ScrollTimeline,
    pub(crate) pool: NotePool,
    pub(crate) sampler: ScrollSampler,
    pub(crate) notes: notes_view::NotesView,
    pub(crate) stage: stage::StageElements,
    pub(crate) hint_dismissed: bool,
    epoch: Instant,
}

pub(crate) type SharedApp = Rc<RefCell<App>>;

impl App {
    /// Milliseconds since startup; the core's whole timeline runs on this.
    pub(crate) fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("festival page starting");

    if let Err(e) = init() {
        log::error!("init error: {e:?}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    preload::preload_hero_images();

    let stage = stage::StageElements::query(&document)?;
    stage.prepare_scroll_environment(&document);
    stage.retire_static_note_containers();

    // Seed once from the clock; everything downstream is deterministic per
    // pool instance.
    let seed = js_sys::Date::now() as u64;
    let app: SharedApp = Rc::new(RefCell::new(App {
        timeline: ScrollTimeline::new(),
        pool: NotePool::new(seed),
        sampler: ScrollSampler::new(),
        notes: notes_view::NotesView::new(document.clone()),
        stage,
        hint_dismissed: false,
        epoch: Instant::now(),
    }));

    // Force the initial phase-1 presentation and start filling the pool
    {
        let mut a = app.borrow_mut();
        let now = a.now_ms();
        let gate = a.timeline.spawn_gate();
        a.pool.initialize_all(gate, now);
        let styles = stage_styles(a.timeline.phase(), a.timeline.phase_fraction());
        a.stage.apply(&styles, a.timeline.progress());
    }

    events::wire(&window, &document, &app)?;
    start_frame_pump(app.clone());
    start_sweep_interval(&window, app.clone());
    start_stats_interval(&window, app);
    log::info!("festival page ready");
    Ok(())
}

/// Drive the pool's timer queue from requestAnimationFrame and mirror the
/// resulting lifecycle events into the DOM.
fn start_frame_pump(app: SharedApp) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let app_tick = app.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut a = app_tick.borrow_mut();
            let now = a.now_ms();
            let gate = a.timeline.spawn_gate();
            let events = a.pool.advance(gate, now);
            if !events.is_empty() {
                let App { pool, notes, .. } = &mut *a;
                for event in &events {
                    notes.apply(pool, event, &app_tick);
                }
            }
        }
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Recycle notes that drifted fully off-screen, every couple of seconds.
fn start_sweep_interval(window: &web::Window, app: SharedApp) {
    dom::set_interval(
        window,
        app_core::constants::SWEEP_INTERVAL_MS as i32,
        move || {
            let Some(w) = web::window() else {
                return;
            };
            let viewport = ViewportSize {
                width: dom::inner_width(&w),
                height: dom::inner_height(&w),
            };
            let mut a = app.borrow_mut();
            let now = a.now_ms();
            let gate = a.timeline.spawn_gate();
            let App { pool, notes, .. } = &mut *a;
            let rects = notes.screen_rects();
            let removed = pool.sweep_out_of_bounds(&rects, viewport, gate, now);
            if !removed.is_empty() {
                log::debug!("swept {} off-screen notes", removed.len());
            }
        },
    );
}

/// Periodic observability: how full the pool is.
fn start_stats_interval(window: &web::Window, app: SharedApp) {
    dom::set_interval(
        window,
        app_core::constants::STATS_INTERVAL_MS as i32,
        move || {
            let a = app.borrow();
            log::debug!(
                "active notes: {}/{}",
                a.pool.active_count(),
                app_core::constants::MAX_NOTES
            );
        },
    );
}

/// First click on a note: consume it in the pool, then fire the reward
/// side effects. Re-clicks are no-ops because the pool is idempotent.
pub(crate) fn handle_note_click(app: &SharedApp, id: NoteId, ev: &web::MouseEvent) {
    let center;
    {
        let mut a = app.borrow_mut();
        if !a.pool.is_interactive() || a.pool.is_hidden() {
            return;
        }
        let now = a.now_ms();
        if a.pool.click(id, now).is_none() {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        center = a.notes.element_center(id);
        a.notes.play_exit_animation(id);
    }
    // Reward side effects run outside the borrow and never feed back into
    // the entity transition that triggered them.
    if let Some((x, y)) = center {
        if let Some(document) = dom::window_document() {
            confetti::burst(&document, x, y);
        }
    }
    audio::play_jazz_chord();
    log::info!("note {} clicked", id.value());
}

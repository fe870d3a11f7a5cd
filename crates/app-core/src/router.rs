//! Input router policy.
//!
//! Pure decisions only; the web layer owns the actual listeners. Wheel and
//! keyboard input is intercepted and turned into fixed-step programmatic
//! scrolls while the page is still navigating between maps; once the
//! festival panel is fully in (progress 100) or the input originates inside
//! that panel, everything passes through so its internal content scrolls
//! natively.

use crate::constants::*;

/// Rate limiter for passive scroll-position sampling (~120 samples/sec).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollSampler {
    last_accept_ms: Option<f64>,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sample taken at `now_ms` should be processed.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_accept_ms {
            Some(last) if now_ms - last < SCROLL_SAMPLE_INTERVAL_MS => false,
            _ => {
                self.last_accept_ms = Some(now_ms);
                true
            }
        }
    }
}

/// What the frontend should do with an intercepted input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RouterAction {
    /// Leave the event to the browser's native scrolling.
    Passthrough,
    /// Suppress the default and scroll programmatically by this fraction of
    /// the viewport height (negative scrolls up).
    ScrollBy { viewport_fraction: f32 },
}

/// Keyboard keys that page through the presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    PageForward,
    PageBack,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` name; unrecognized keys are ignored.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "ArrowRight" | "Enter" | " " => Some(NavKey::PageForward),
            "ArrowUp" | "ArrowLeft" | "Escape" => Some(NavKey::PageBack),
            _ => None,
        }
    }
}

/// Route a wheel event. `delta_y > 0` scrolls toward the festival.
pub fn wheel_action(progress: f32, within_festival_panel: bool, delta_y: f64) -> RouterAction {
    if within_festival_panel || progress >= 100.0 {
        return RouterAction::Passthrough;
    }
    let direction = if delta_y > 0.0 { 1.0 } else { -1.0 };
    RouterAction::ScrollBy {
        viewport_fraction: direction * WHEEL_STEP_VIEWPORT_FRACTION,
    }
}

/// Route a key press that may page through the presentation.
pub fn key_action(progress: f32, within_festival_panel: bool, key: Option<NavKey>) -> RouterAction {
    if within_festival_panel || progress >= 100.0 {
        return RouterAction::Passthrough;
    }
    match key {
        Some(NavKey::PageForward) => RouterAction::ScrollBy {
            viewport_fraction: KEY_STEP_VIEWPORT_FRACTION,
        },
        Some(NavKey::PageBack) => RouterAction::ScrollBy {
            viewport_fraction: -KEY_STEP_VIEWPORT_FRACTION,
        },
        None => RouterAction::Passthrough,
    }
}

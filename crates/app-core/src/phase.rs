//! Scroll phase state machine.
//!
//! Maps the continuous scroll fraction onto the page's three discrete
//! presentation phases and owns the festival latch that gates note spawning.
//! The machine is presentation-agnostic: consumers read `(phase, fraction)`
//! and derive styles from it (see [`crate::stage`]).

use crate::constants::*;

/// Discrete presentation phase keyed by scroll progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Country map zooming in (progress 0-33).
    Map,
    /// Region map cross-fading in (progress 33-66).
    Region,
    /// Festival info panel sliding in (progress 66-100).
    Festival,
}

impl Phase {
    /// Phase for a clamped progress value. Step function with breakpoints at
    /// 33 and 66, both inclusive on the lower phase.
    pub fn for_progress(progress: f32) -> Self {
        if progress <= MAP_PHASE_END {
            Phase::Map
        } else if progress <= REGION_PHASE_END {
            Phase::Region
        } else {
            Phase::Festival
        }
    }
}

/// What a progress update changed, so the caller can react to transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub previous: Phase,
    pub current: Phase,
    /// The festival latch flipped on with this update.
    pub latch_set: bool,
    /// The festival latch flipped off with this update.
    pub latch_cleared: bool,
}

impl PhaseChange {
    pub fn phase_changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Inputs the note pool needs to decide whether a spawn is currently allowed.
#[derive(Clone, Copy, Debug)]
pub struct SpawnGate {
    pub phase: Phase,
    /// Spawning is suppressed: the festival latch is set or progress >= 66.
    pub suppressed: bool,
}

/// Owns the normalized scroll progress and the festival latch.
///
/// Mutated only through `set_scroll_offset` / `set_progress`; every
/// presentation consumer reads it. Out-of-range or non-finite inputs are
/// clamped or ignored, never surfaced as errors.
#[derive(Clone, Debug)]
pub struct ScrollTimeline {
    progress: f32,
    entered_festival: bool,
}

impl Default for ScrollTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTimeline {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            entered_festival: false,
        }
    }

    /// Normalize a raw scroll offset against the scrollable height.
    ///
    /// Defined no-op when the height is zero, negative, or either input is
    /// non-finite.
    pub fn set_scroll_offset(&mut self, raw_scroll_top: f64, scrollable_height: f64) -> PhaseChange {
        if !raw_scroll_top.is_finite() || !scrollable_height.is_finite() || scrollable_height <= 0.0
        {
            return self.no_change();
        }
        let pct = (raw_scroll_top / scrollable_height * 100.0).clamp(0.0, 100.0) as f32;
        self.apply_progress(pct)
    }

    /// Set progress directly as a percentage (programmatic jumps, tests).
    pub fn set_progress(&mut self, progress: f32) -> PhaseChange {
        if !progress.is_finite() {
            return self.no_change();
        }
        self.apply_progress(progress.clamp(0.0, 100.0))
    }

    fn apply_progress(&mut self, progress: f32) -> PhaseChange {
        let previous = self.phase();
        self.progress = progress;
        let current = self.phase();

        let mut change = PhaseChange {
            previous,
            current,
            latch_set: false,
            latch_cleared: false,
        };
        if current == Phase::Festival {
            if !self.entered_festival {
                self.entered_festival = true;
                change.latch_set = true;
            }
        } else if self.entered_festival {
            // Must clear the instant progress drops back to the map/region
            // range, not lazily on the next spawn attempt.
            self.entered_festival = false;
            change.latch_cleared = true;
        }
        change
    }

    fn no_change(&self) -> PhaseChange {
        let phase = self.phase();
        PhaseChange {
            previous: phase,
            current: phase,
            latch_set: false,
            latch_cleared: false,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        Phase::for_progress(self.progress)
    }

    /// Phase-local interpolation fraction in [0, 1].
    pub fn phase_fraction(&self) -> f32 {
        let p = self.progress;
        let f = match self.phase() {
            Phase::Map => p / MAP_PHASE_END,
            Phase::Region => (p - MAP_PHASE_END) / (REGION_PHASE_END - MAP_PHASE_END),
            Phase::Festival => (p - REGION_PHASE_END) / FESTIVAL_PHASE_SPAN,
        };
        f.clamp(0.0, 1.0)
    }

    /// True once festival has been reached and progress has not yet returned
    /// to the map/region range.
    pub fn entered_festival(&self) -> bool {
        self.entered_festival
    }

    pub fn spawn_gate(&self) -> SpawnGate {
        SpawnGate {
            phase: self.phase(),
            suppressed: self.entered_festival || self.progress >= REGION_PHASE_END,
        }
    }
}

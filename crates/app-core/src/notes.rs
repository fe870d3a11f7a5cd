//! Floating-note pool and spawner.
//!
//! Owns the bounded collection of decorative clickable notes, their
//! positions, and the timers that drive each entity through its lifecycle:
//! spawned at the phase anchor, revealed at a randomized offset, removed a
//! beat after being clicked, and recycled when it drifts off-screen. All
//! mutation goes through the pool's methods; the web layer only applies the
//! reported [`PoolEvent`]s to the DOM.

use fnv::FnvHashMap;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::constants::*;
use crate::geometry::{self, PagePoint};
use crate::phase::{Phase, SpawnGate};
use crate::scheduler::TimerQueue;

/// Unique note identity, monotonically assigned and never reused within a
/// pool instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(u64);

impl NoteId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// The four glyphs a note can render as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteSymbol {
    EighthNote,
    BeamedEighths,
    QuarterNote,
    BeamedSixteenths,
}

impl NoteSymbol {
    pub const ALL: [NoteSymbol; 4] = [
        NoteSymbol::EighthNote,
        NoteSymbol::BeamedEighths,
        NoteSymbol::QuarterNote,
        NoteSymbol::BeamedSixteenths,
    ];

    pub fn glyph(self) -> char {
        match self {
            NoteSymbol::EighthNote => '♪',
            NoteSymbol::BeamedEighths => '♫',
            NoteSymbol::QuarterNote => '♩',
            NoteSymbol::BeamedSixteenths => '♬',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteState {
    /// Created at the anchor, not yet moved to its final position.
    Spawning,
    /// Revealed at its final position and clickable.
    Active,
    /// Clicked; exit animation playing, removal pending.
    Clicked,
    /// Gone from the pool.
    Removed,
}

/// A single decorative note tracked by the pool.
#[derive(Clone, Debug)]
pub struct NoteEntity {
    pub id: NoteId,
    pub symbol: NoteSymbol,
    pub position: PagePoint,
    /// Assigned once at creation, in [0.75, 1.0].
    pub opacity: f32,
    pub state: NoteState,
}

/// Returned from the first click on a note; feeds the confetti/audio
/// side effects.
#[derive(Clone, Debug)]
pub struct ClickOutcome {
    pub id: NoteId,
    pub position: PagePoint,
    pub symbol: NoteSymbol,
}

/// Lifecycle transitions the presentation layer must mirror into the DOM.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolEvent {
    Spawned {
        id: NoteId,
        symbol: NoteSymbol,
        anchor: PagePoint,
        opacity: f32,
    },
    Revealed {
        id: NoteId,
        position: PagePoint,
    },
    Removed {
        id: NoteId,
    },
}

/// Screen rectangle of a rendered note, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ScreenRect {
    /// Entirely outside the viewport by more than `margin` on some side.
    fn is_fully_outside(&self, viewport: ViewportSize, margin: f64) -> bool {
        self.bottom < -margin
            || self.top > viewport.height + margin
            || self.right < -margin
            || self.left > viewport.width + margin
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// Delayed transitions owned by the pool's timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoteAction {
    /// Move a spawning note to its final position and make it active.
    Reveal(NoteId),
    /// Drop a clicked note from the pool.
    Remove(NoteId),
    /// Attempt one replacement spawn (after a click removal or a sweep).
    Replace,
    /// One slot of the staggered initial fill.
    InitialSpawn,
}

impl NoteAction {
    fn owner(&self) -> Option<NoteId> {
        match self {
            NoteAction::Reveal(id) | NoteAction::Remove(id) => Some(*id),
            NoteAction::Replace | NoteAction::InitialSpawn => None,
        }
    }

    fn is_pending_spawn(&self) -> bool {
        matches!(self, NoteAction::Replace | NoteAction::InitialSpawn)
    }
}

/// The phase-specific origin point notes visually emanate from.
pub fn anchor_for(phase: Phase) -> PagePoint {
    match phase {
        Phase::Map => PagePoint::new(45.0, 50.0),
        Phase::Region => PagePoint::new(50.0, 32.5),
        // Festival keeps the region map in the left column; notes near it
        // anchor there even though spawning is gated off in this phase.
        Phase::Festival => PagePoint::new(50.0, 22.5),
    }
}

/// Draw a note position around the phase anchor.
///
/// One uniform draw at distance 15-40; if it lands in a forbidden zone, one
/// retry on the opposite side at distance 30-50, accepted unconditionally so
/// placement always terminates. Both draws are clamped to the [5, 95] band.
/// Note positions are allowed to overlap each other.
pub fn generate_position(phase: Phase, rng: &mut impl Rng) -> PagePoint {
    let anchor = anchor_for(phase);
    let zones = geometry::forbidden_zones_for(phase);

    let angle = rng.gen_range(0.0..TAU);
    let dist = rng.gen_range(SPAWN_DISTANCE_MIN_PCT..=SPAWN_DISTANCE_MAX_PCT);
    let offset = Vec2::from_angle(angle) * dist;
    let point =
        PagePoint::new(anchor.top + offset.y, anchor.left + offset.x).clamp_to_viewport();
    if !geometry::is_forbidden(point, &zones) {
        return point;
    }

    let dist = rng.gen_range(RETRY_DISTANCE_MIN_PCT..=RETRY_DISTANCE_MAX_PCT);
    let offset = Vec2::from_angle(angle + PI) * dist;
    PagePoint::new(anchor.top + offset.y, anchor.left + offset.x).clamp_to_viewport()
}

/// Bounded pool of active notes with an explicit lifecycle; no ambient
/// global state.
pub struct NotePool {
    entities: FnvHashMap<NoteId, NoteEntity>,
    timers: TimerQueue<NoteAction>,
    events: Vec<PoolEvent>,
    rng: StdRng,
    next_id: u64,
    interactive: bool,
    hidden: bool,
}

impl NotePool {
    pub fn new(seed: u64) -> Self {
        Self {
            entities: FnvHashMap::default(),
            timers: TimerQueue::new(),
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
            interactive: true,
            hidden: false,
        }
    }

    /// Notes currently alive (spawning or active). Never exceeds
    /// [`MAX_NOTES`].
    pub fn active_count(&self) -> usize {
        self.entities
            .values()
            .filter(|e| matches!(e.state, NoteState::Spawning | NoteState::Active))
            .count()
    }

    pub fn get(&self, id: NoteId) -> Option<&NoteEntity> {
        self.entities.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteEntity> {
        self.entities.values()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Create one note if gating and capacity allow. A declined spawn is not
    /// an error; it returns `None`.
    pub fn spawn(&mut self, gate: SpawnGate, now_ms: f64) -> Option<NoteId> {
        if gate.suppressed || gate.phase == Phase::Festival {
            log::debug!("spawn declined: festival reached");
            return None;
        }
        if self.active_count() >= MAX_NOTES {
            log::debug!("spawn declined: pool at capacity {MAX_NOTES}");
            return None;
        }

        self.next_id += 1;
        let id = NoteId(self.next_id);
        let symbol = NoteSymbol::ALL[self.rng.gen_range(0..NoteSymbol::ALL.len())];
        let opacity = self.rng.gen_range(NOTE_OPACITY_MIN..=NOTE_OPACITY_MAX);
        let anchor = anchor_for(gate.phase);

        let _ = self.entities.insert(
            id,
            NoteEntity {
                id,
                symbol,
                position: anchor,
                opacity,
                state: NoteState::Spawning,
            },
        );
        let _ = self
            .timers
            .schedule(now_ms + REVEAL_DELAY_MS, NoteAction::Reveal(id));
        self.events.push(PoolEvent::Spawned {
            id,
            symbol,
            anchor,
            opacity,
        });
        log::debug!(
            "note {} spawned at anchor ({:.1}, {:.1})",
            id.value(),
            anchor.top,
            anchor.left
        );
        Some(id)
    }

    /// Consume a click. Idempotent: unknown ids and already-clicked notes
    /// return `None` and produce no further side effects.
    ///
    /// The first click transitions the note to `Clicked`, cancels its pending
    /// timers, and schedules removal; the removal in turn schedules at most
    /// one replacement spawn.
    pub fn click(&mut self, id: NoteId, now_ms: f64) -> Option<ClickOutcome> {
        let entity = self.entities.get_mut(&id)?;
        if !matches!(entity.state, NoteState::Spawning | NoteState::Active) {
            return None;
        }
        entity.state = NoteState::Clicked;
        let outcome = ClickOutcome {
            id,
            position: entity.position,
            symbol: entity.symbol,
        };
        let _ = self.timers.cancel_where(|a| a.owner() == Some(id));
        let _ = self
            .timers
            .schedule(now_ms + CLICK_REMOVE_DELAY_MS, NoteAction::Remove(id));
        Some(outcome)
    }

    /// Fire due timers and report the resulting transitions.
    ///
    /// A given note's own transitions are strictly ordered by its timers;
    /// there is no cross-note ordering guarantee and none is needed.
    pub fn advance(&mut self, gate: SpawnGate, now_ms: f64) -> Vec<PoolEvent> {
        for action in self.timers.take_due(now_ms) {
            match action {
                NoteAction::Reveal(id) => {
                    let position = generate_position(gate.phase, &mut self.rng);
                    if let Some(entity) = self.entities.get_mut(&id) {
                        if entity.state == NoteState::Spawning {
                            entity.position = position;
                            entity.state = NoteState::Active;
                            self.events.push(PoolEvent::Revealed { id, position });
                        }
                    }
                }
                NoteAction::Remove(id) => {
                    if self.entities.remove(&id).is_some() {
                        self.events.push(PoolEvent::Removed { id });
                        log::debug!("note {} removed after click", id.value());
                        self.schedule_replacement(
                            gate,
                            now_ms,
                            CLICK_REPLACE_MIN_MS,
                            CLICK_REPLACE_MAX_MS,
                        );
                    }
                }
                NoteAction::Replace | NoteAction::InitialSpawn => {
                    let _ = self.spawn(gate, now_ms);
                }
            }
        }
        std::mem::take(&mut self.events)
    }

    /// Recycle notes that drifted fully off-screen. Driven periodically by
    /// the caller; each removal schedules at most one replacement.
    pub fn sweep_out_of_bounds(
        &mut self,
        rects: &[(NoteId, ScreenRect)],
        viewport: ViewportSize,
        gate: SpawnGate,
        now_ms: f64,
    ) -> Vec<NoteId> {
        let mut removed = Vec::new();
        for (id, rect) in rects {
            let Some(entity) = self.entities.get(id) else {
                continue;
            };
            if entity.state != NoteState::Active {
                continue;
            }
            if !rect.is_fully_outside(viewport, SWEEP_MARGIN_PX) {
                continue;
            }
            log::debug!("note {} off-screen, recycling", id.value());
            self.remove_now(*id);
            removed.push(*id);
            self.schedule_replacement(gate, now_ms, SWEEP_REPLACE_MIN_MS, SWEEP_REPLACE_MAX_MS);
        }
        removed
    }

    fn schedule_replacement(&mut self, gate: SpawnGate, now_ms: f64, min_ms: f64, max_ms: f64) {
        if gate.suppressed || self.active_count() >= MAX_NOTES {
            return;
        }
        let delay = self.rng.gen_range(min_ms..max_ms);
        let _ = self.timers.schedule(now_ms + delay, NoteAction::Replace);
    }

    /// Remove an entity immediately, cancelling any timer it still owns so a
    /// destroyed id can never resurrect.
    fn remove_now(&mut self, id: NoteId) {
        let _ = self.timers.cancel_where(|a| a.owner() == Some(id));
        if self.entities.remove(&id).is_some() {
            self.events.push(PoolEvent::Removed { id });
        }
    }

    /// Broadcast interactivity toggle. Does not mutate entity state; a
    /// disabled pool reports the dimmed opacity for every note.
    pub fn set_interactive(&mut self, enabled: bool) {
        self.interactive = enabled;
    }

    /// Hide every note without destroying it (festival latch set).
    pub fn hide_all(&mut self) {
        self.hidden = true;
        log::debug!("{} notes hidden", self.entities.len());
    }

    /// Restore every note's originally assigned opacity (latch cleared).
    pub fn show_all(&mut self) {
        self.hidden = false;
        log::debug!("{} notes shown", self.entities.len());
    }

    /// Opacity the presentation layer should render for a note right now.
    pub fn display_opacity(&self, id: NoteId) -> Option<f32> {
        let entity = self.entities.get(&id)?;
        if self.hidden {
            return Some(0.0);
        }
        if !self.interactive {
            return Some(NOTE_DISABLED_OPACITY);
        }
        Some(match entity.state {
            NoteState::Active => entity.opacity,
            NoteState::Spawning | NoteState::Clicked | NoteState::Removed => 0.0,
        })
    }

    /// Fill the pool to capacity with spawns staggered so the notes don't
    /// all pop in on the same frame. Safe to call repeatedly; already
    /// scheduled fill slots are counted against the deficit.
    pub fn initialize_all(&mut self, gate: SpawnGate, now_ms: f64) {
        if gate.suppressed {
            return;
        }
        let pending = self.timers.count_where(NoteAction::is_pending_spawn);
        let deficit = MAX_NOTES.saturating_sub(self.active_count() + pending);
        for slot in 0..deficit {
            let _ = self.timers.schedule(
                now_ms + slot as f64 * SPAWN_STAGGER_MS,
                NoteAction::InitialSpawn,
            );
        }
        if deficit > 0 {
            log::debug!("initializing {deficit} notes");
        }
    }

    /// Drop every entity and pending timer. Returns the removed ids so the
    /// presentation layer can drop their elements. Ids are not reused.
    pub fn dispose_all(&mut self) -> Vec<NoteId> {
        let ids: Vec<NoteId> = self.entities.keys().copied().collect();
        self.entities.clear();
        self.timers.clear();
        for id in &ids {
            self.events.push(PoolEvent::Removed { id: *id });
        }
        ids
    }

    /// Dispose everything and restore the default flags.
    pub fn reset(&mut self) -> Vec<NoteId> {
        let ids = self.dispose_all();
        self.interactive = true;
        self.hidden = false;
        ids
    }
}

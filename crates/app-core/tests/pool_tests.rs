// Host-side tests for the note pool lifecycle: capacity, click idempotence,
// replacement scheduling, off-screen recycling, and festival gating.

use app_core::constants::MAX_NOTES;
use app_core::{
    NoteId, NotePool, NoteState, Phase, PoolEvent, ScreenRect, ScrollTimeline, SpawnGate,
    ViewportSize,
};

fn map_gate() -> SpawnGate {
    SpawnGate {
        phase: Phase::Map,
        suppressed: false,
    }
}

fn festival_gate() -> SpawnGate {
    SpawnGate {
        phase: Phase::Festival,
        suppressed: true,
    }
}

/// Drive the pool's timers over a synthetic time range, collecting events.
fn pump(pool: &mut NotePool, gate: SpawnGate, from_ms: f64, to_ms: f64) -> Vec<PoolEvent> {
    let mut events = Vec::new();
    let mut t = from_ms;
    while t <= to_ms {
        events.extend(pool.advance(gate, t));
        t += 50.0;
    }
    events
}

fn spawned_count(events: &[PoolEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PoolEvent::Spawned { .. }))
        .count()
}

#[test]
fn spawn_fills_up_to_capacity_then_declines() {
    let mut pool = NotePool::new(1);
    let gate = map_gate();
    for i in 0..MAX_NOTES {
        assert!(
            pool.spawn(gate, i as f64).is_some(),
            "spawn {i} should succeed below capacity"
        );
    }
    assert_eq!(pool.active_count(), MAX_NOTES);
    assert!(pool.spawn(gate, 100.0).is_none(), "capacity is a hard cap");
}

#[test]
fn spawned_ids_are_unique() {
    let mut pool = NotePool::new(2);
    let gate = map_gate();
    let mut ids: Vec<NoteId> = (0..MAX_NOTES)
        .filter_map(|i| pool.spawn(gate, i as f64))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), MAX_NOTES, "no two live notes share an id");
}

#[test]
fn spawn_is_gated_off_in_festival() {
    let mut pool = NotePool::new(3);
    assert!(pool.spawn(festival_gate(), 0.0).is_none());

    // Suppression alone is enough, whatever the phase says
    let suppressed = SpawnGate {
        phase: Phase::Region,
        suppressed: true,
    };
    assert!(pool.spawn(suppressed, 0.0).is_none());
}

#[test]
fn notes_reveal_at_a_randomized_position_after_the_anchor_stage() {
    let mut pool = NotePool::new(4);
    let gate = map_gate();
    let id = pool.spawn(gate, 0.0).expect("spawn");
    assert_eq!(pool.get(id).map(|e| e.state), Some(NoteState::Spawning));

    let events = pump(&mut pool, gate, 0.0, 300.0);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, PoolEvent::Revealed { id: r, .. } if *r == id)),
        "reveal must fire after the spawn delay"
    );
    let entity = pool.get(id).expect("still tracked");
    assert_eq!(entity.state, NoteState::Active);
    assert!((0.75..=1.0).contains(&entity.opacity));
}

#[test]
fn click_is_idempotent_and_removes_exactly_once() {
    let mut pool = NotePool::new(5);
    let gate = map_gate();
    let id = pool.spawn(gate, 0.0).expect("spawn");
    let _ = pump(&mut pool, gate, 0.0, 200.0);

    let outcome = pool.click(id, 200.0).expect("first click consumes the note");
    assert_eq!(outcome.id, id);
    assert!(pool.click(id, 210.0).is_none(), "second click is a no-op");
    assert_eq!(pool.get(id).map(|e| e.state), Some(NoteState::Clicked));

    let events = pump(&mut pool, gate, 200.0, 900.0);
    let removals = events
        .iter()
        .filter(|e| matches!(e, PoolEvent::Removed { id: r } if *r == id))
        .count();
    assert_eq!(removals, 1, "exactly one removal per clicked note");
    assert!(pool.get(id).is_none());
}

#[test]
fn clicking_a_note_still_spawning_cancels_its_reveal() {
    let mut pool = NotePool::new(6);
    let gate = map_gate();
    let id = pool.spawn(gate, 0.0).expect("spawn");

    // Click lands before the reveal timer fires
    let outcome = pool.click(id, 20.0).expect("click during spawn-in");
    let anchor = app_core::anchor_for(Phase::Map);
    assert_eq!(outcome.position, anchor, "last known position is the anchor");

    let events = pump(&mut pool, gate, 20.0, 800.0);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, PoolEvent::Revealed { id: r, .. } if *r == id)),
        "a clicked note must not come back to life via a stale reveal timer"
    );
    assert!(pool.get(id).is_none(), "note removed after the click delay");
}

#[test]
fn clicking_at_capacity_yields_exactly_one_replacement() {
    let mut pool = NotePool::new(42);
    let gate = map_gate();
    pool.initialize_all(gate, 0.0);
    let _ = pump(&mut pool, gate, 0.0, 1700.0);
    assert_eq!(pool.active_count(), MAX_NOTES);

    let id = pool.iter().next().map(|e| e.id).expect("a live note");
    let clicked_at = 1700.0;
    let _ = pool.click(id, clicked_at).expect("click");

    // Removal fires 500ms later, replacement 300-1000ms after that; both
    // land within 1.5s of the click.
    let events = pump(&mut pool, gate, clicked_at, clicked_at + 1600.0);
    assert_eq!(
        spawned_count(&events),
        1,
        "exactly one replacement, never more"
    );
    assert_eq!(pool.active_count(), MAX_NOTES, "pool refills to capacity");
}

#[test]
fn no_replacement_when_festival_is_reached_before_removal() {
    let mut pool = NotePool::new(43);
    let gate = map_gate();
    pool.initialize_all(gate, 0.0);
    let _ = pump(&mut pool, gate, 0.0, 1700.0);

    let id = pool.iter().next().map(|e| e.id).expect("a live note");
    let _ = pool.click(id, 1700.0).expect("click");

    // The user scrolls into the festival before the removal timer fires
    let gate = festival_gate();
    let events = pump(&mut pool, gate, 1700.0, 3400.0);
    assert_eq!(spawned_count(&events), 0, "gating wins over replacement");
    assert_eq!(pool.active_count(), MAX_NOTES - 1);
}

#[test]
fn sweep_recycles_a_note_fully_off_screen() {
    let mut pool = NotePool::new(7);
    let gate = map_gate();
    let id = pool.spawn(gate, 0.0).expect("spawn");
    let _ = pump(&mut pool, gate, 0.0, 200.0);
    assert_eq!(pool.get(id).map(|e| e.state), Some(NoteState::Active));

    let viewport = ViewportSize {
        width: 800.0,
        height: 600.0,
    };
    // Entire rectangle sits 60px below the bottom edge
    let rect = ScreenRect {
        top: 660.0,
        left: 100.0,
        right: 140.0,
        bottom: 700.0,
    };
    let removed = pool.sweep_out_of_bounds(&[(id, rect)], viewport, gate, 300.0);
    assert_eq!(removed, vec![id]);
    assert!(pool.get(id).is_none(), "off-screen notes are removed at once");

    let events = pump(&mut pool, gate, 300.0, 1400.0);
    assert_eq!(spawned_count(&events), 1, "one replacement per swept note");
}

#[test]
fn sweep_keeps_notes_inside_or_near_the_viewport() {
    let mut pool = NotePool::new(8);
    let gate = map_gate();
    let id = pool.spawn(gate, 0.0).expect("spawn");
    let _ = pump(&mut pool, gate, 0.0, 200.0);

    let viewport = ViewportSize {
        width: 800.0,
        height: 600.0,
    };
    // Straddling the edge: partially visible
    let straddling = ScreenRect {
        top: 590.0,
        left: 100.0,
        right: 140.0,
        bottom: 630.0,
    };
    // Fully outside but within the 50px margin
    let just_past = ScreenRect {
        top: 620.0,
        left: 100.0,
        right: 140.0,
        bottom: 645.0,
    };
    for rect in [straddling, just_past] {
        let removed = pool.sweep_out_of_bounds(&[(id, rect)], viewport, gate, 300.0);
        assert!(removed.is_empty(), "note {rect:?} should not be swept");
    }
    assert!(pool.get(id).is_some());
}

#[test]
fn festival_jump_hides_every_note() {
    let mut timeline = ScrollTimeline::new();
    let mut pool = NotePool::new(9);
    let _ = timeline.set_progress(10.0);
    pool.initialize_all(timeline.spawn_gate(), 0.0);
    let _ = pump(&mut pool, timeline.spawn_gate(), 0.0, 1700.0);
    assert_eq!(pool.active_count(), MAX_NOTES);

    // Fast programmatic scroll straight past the region phase
    let change = timeline.set_progress(70.0);
    assert!(change.latch_set);
    pool.hide_all();
    pool.set_interactive(false);

    assert!(pool.is_hidden());
    assert!(!pool.is_interactive());
    for entity in pool.iter() {
        assert_eq!(
            pool.display_opacity(entity.id),
            Some(0.0),
            "no note stays visible after the festival jump"
        );
    }
    assert!(
        pool.spawn(timeline.spawn_gate(), 1800.0).is_none(),
        "spawning stays suppressed while the latch is set"
    );
}

#[test]
fn show_all_restores_the_originally_assigned_opacity() {
    let mut timeline = ScrollTimeline::new();
    let mut pool = NotePool::new(10);
    let _ = timeline.set_progress(10.0);
    pool.initialize_all(timeline.spawn_gate(), 0.0);
    let _ = pump(&mut pool, timeline.spawn_gate(), 0.0, 1700.0);

    let _ = timeline.set_progress(70.0);
    pool.hide_all();
    let change = timeline.set_progress(20.0);
    assert!(change.latch_cleared);
    pool.show_all();

    for entity in pool.iter().filter(|e| e.state == NoteState::Active) {
        assert_eq!(pool.display_opacity(entity.id), Some(entity.opacity));
    }
}

#[test]
fn disabled_pool_reports_the_dimmed_opacity() {
    let mut pool = NotePool::new(11);
    let gate = map_gate();
    let id = pool.spawn(gate, 0.0).expect("spawn");
    let _ = pump(&mut pool, gate, 0.0, 200.0);

    pool.set_interactive(false);
    assert_eq!(pool.display_opacity(id), Some(0.2));
    assert_eq!(
        pool.get(id).map(|e| e.state),
        Some(NoteState::Active),
        "interactivity toggles never mutate entity state"
    );
    pool.set_interactive(true);
    let expected = pool.get(id).map(|e| e.opacity);
    assert_eq!(pool.display_opacity(id), expected);
}

#[test]
fn initialize_all_is_safe_to_call_repeatedly() {
    let mut pool = NotePool::new(12);
    let gate = map_gate();
    pool.initialize_all(gate, 0.0);
    pool.initialize_all(gate, 0.0);
    pool.initialize_all(gate, 10.0);

    let events = pump(&mut pool, gate, 0.0, 2500.0);
    assert_eq!(spawned_count(&events), MAX_NOTES, "no over-fill from re-init");
    assert_eq!(pool.active_count(), MAX_NOTES);
}

#[test]
fn pool_never_exceeds_capacity_under_random_interleavings() {
    use rand::prelude::*;

    let mut driver_rng = StdRng::seed_from_u64(777);
    let mut pool = NotePool::new(13);
    let gate = map_gate();
    let mut now_ms = 0.0;

    for _ in 0..2000 {
        match driver_rng.gen_range(0..4u8) {
            0 => {
                let _ = pool.spawn(gate, now_ms);
            }
            1 => {
                let ids: Vec<NoteId> = pool.iter().map(|e| e.id).collect();
                if let Some(id) = ids.choose(&mut driver_rng) {
                    let _ = pool.click(*id, now_ms);
                }
            }
            2 => {
                pool.initialize_all(gate, now_ms);
            }
            _ => {
                now_ms += driver_rng.gen_range(10.0..400.0);
                let _ = pool.advance(gate, now_ms);
            }
        }
        assert!(
            pool.active_count() <= MAX_NOTES,
            "capacity invariant violated at t={now_ms}"
        );
    }
}

#[test]
fn dispose_all_empties_the_pool_and_reports_removals() {
    let mut pool = NotePool::new(14);
    let gate = map_gate();
    for i in 0..4 {
        let _ = pool.spawn(gate, i as f64 * 10.0);
    }
    let _ = pump(&mut pool, gate, 0.0, 300.0);

    let ids = pool.dispose_all();
    assert_eq!(ids.len(), 4);
    assert_eq!(pool.active_count(), 0);

    let events = pool.advance(gate, 400.0);
    let removals = events
        .iter()
        .filter(|e| matches!(e, PoolEvent::Removed { .. }))
        .count();
    assert_eq!(removals, 4, "every disposed note is reported");

    // Pending reveals died with the entities
    let events = pump(&mut pool, gate, 400.0, 1000.0);
    assert!(events.is_empty(), "no timers survive disposal");
}

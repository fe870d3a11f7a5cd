// Host-side tests for the input-router policy and the scroll sampler.

use app_core::{key_action, wheel_action, NavKey, RouterAction, ScrollSampler};

#[test]
fn wheel_is_intercepted_while_navigating_between_maps() {
    for progress in [0.0, 10.0, 33.0, 50.0, 65.9] {
        assert_eq!(
            wheel_action(progress, false, 120.0),
            RouterAction::ScrollBy {
                viewport_fraction: 0.25
            },
            "wheel-down at progress {progress}"
        );
        assert_eq!(
            wheel_action(progress, false, -120.0),
            RouterAction::ScrollBy {
                viewport_fraction: -0.25
            },
            "wheel-up at progress {progress}"
        );
    }
}

#[test]
fn wheel_still_drives_the_festival_transition() {
    // Between 66 and 100 the festival panel is sliding in; the wheel keeps
    // paging rather than scrolling the document natively.
    for progress in [66.0, 80.0, 99.9] {
        assert!(matches!(
            wheel_action(progress, false, 120.0),
            RouterAction::ScrollBy { .. }
        ));
    }
}

#[test]
fn wheel_passes_through_once_the_panel_is_fully_in() {
    assert_eq!(wheel_action(100.0, false, 120.0), RouterAction::Passthrough);
    assert_eq!(wheel_action(100.0, false, -120.0), RouterAction::Passthrough);
}

#[test]
fn input_from_inside_the_festival_panel_always_passes_through() {
    assert_eq!(wheel_action(10.0, true, 120.0), RouterAction::Passthrough);
    assert_eq!(
        key_action(10.0, true, Some(NavKey::PageForward)),
        RouterAction::Passthrough
    );
}

#[test]
fn nav_keys_map_to_paging_directions() {
    for key in ["ArrowDown", "ArrowRight", "Enter", " "] {
        assert_eq!(NavKey::from_key_name(key), Some(NavKey::PageForward), "{key}");
    }
    for key in ["ArrowUp", "ArrowLeft", "Escape"] {
        assert_eq!(NavKey::from_key_name(key), Some(NavKey::PageBack), "{key}");
    }
    for key in ["Tab", "a", "Shift", "PageDown"] {
        assert_eq!(NavKey::from_key_name(key), None, "{key}");
    }
}

#[test]
fn key_steps_are_larger_than_wheel_steps() {
    let RouterAction::ScrollBy {
        viewport_fraction: key_step,
    } = key_action(10.0, false, Some(NavKey::PageForward))
    else {
        panic!("expected interception");
    };
    let RouterAction::ScrollBy {
        viewport_fraction: wheel_step,
    } = wheel_action(10.0, false, 120.0)
    else {
        panic!("expected interception");
    };
    assert!((key_step - 0.35).abs() < 1e-6);
    assert!(key_step > wheel_step);

    assert_eq!(
        key_action(10.0, false, Some(NavKey::PageBack)),
        RouterAction::ScrollBy {
            viewport_fraction: -0.35
        }
    );
    assert_eq!(key_action(10.0, false, None), RouterAction::Passthrough);
}

#[test]
fn sampler_limits_to_roughly_120_per_second() {
    let mut sampler = ScrollSampler::new();
    assert!(sampler.accept(0.0));
    assert!(!sampler.accept(4.0), "too soon after the last sample");
    assert!(!sampler.accept(7.9));
    assert!(sampler.accept(8.0), "8ms spacing is the accepted cadence");
    assert!(!sampler.accept(15.0));
    assert!(sampler.accept(16.0));

    // One accepted sample per 8ms window over a second
    let mut sampler = ScrollSampler::new();
    let mut accepted = 0;
    let mut t = 0.0;
    while t < 1000.0 {
        if sampler.accept(t) {
            accepted += 1;
        }
        t += 1.0;
    }
    assert_eq!(accepted, 125, "1ms polling collapses to the 8ms cadence");
}

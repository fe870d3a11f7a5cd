// Host-side tests for note placement around the phase anchors.

use app_core::{anchor_for, distance, generate_position, PagePoint, Phase};
use rand::rngs::StdRng;
use rand::SeedableRng;

const PHASES: [Phase; 3] = [Phase::Map, Phase::Region, Phase::Festival];

#[test]
fn anchors_match_the_page_layout() {
    assert_eq!(anchor_for(Phase::Map), PagePoint::new(45.0, 50.0));
    assert_eq!(anchor_for(Phase::Region), PagePoint::new(50.0, 32.5));
    assert_eq!(anchor_for(Phase::Festival), PagePoint::new(50.0, 22.5));
}

#[test]
fn generated_positions_stay_in_the_viewport_band() {
    // 10k draws per phase; every one must land in [5, 95] on both axes.
    for phase in PHASES {
        let mut rng = StdRng::seed_from_u64(9);
        for trial in 0..10_000 {
            let point = generate_position(phase, &mut rng);
            assert!(
                (5.0..=95.0).contains(&point.top) && (5.0..=95.0).contains(&point.left),
                "trial {trial} in {phase:?} escaped the viewport: {point:?}"
            );
        }
    }
}

#[test]
fn generated_positions_stay_within_reach_of_the_anchor() {
    // The retry draw caps the radial distance at 50; clamping only ever
    // pulls a coordinate back toward the anchor.
    for phase in PHASES {
        let anchor = anchor_for(phase);
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..1000 {
            let point = generate_position(phase, &mut rng);
            assert!(
                distance(anchor, point) <= 50.0 + 1e-3,
                "position {point:?} too far from anchor {anchor:?}"
            );
        }
    }
}

#[test]
fn generated_positions_scatter_rather_than_cluster() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut above = 0;
    let mut below = 0;
    let anchor = anchor_for(Phase::Map);
    for _ in 0..1000 {
        let point = generate_position(Phase::Map, &mut rng);
        if point.top > anchor.top {
            below += 1;
        } else {
            above += 1;
        }
    }
    // Uniform angles should put a meaningful share on each side.
    assert!(above > 200, "only {above} draws above the anchor");
    assert!(below > 200, "only {below} draws below the anchor");
}

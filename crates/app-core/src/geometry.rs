//! Geometry in viewport-percentage space: forbidden-zone lookup, distance,
//! and position clamping.

use glam::Vec2;
use smallvec::{smallvec, SmallVec};

use crate::constants::{VIEWPORT_MAX_PCT, VIEWPORT_MIN_PCT};
use crate::phase::Phase;

/// A point in viewport-percentage coordinates (top/left, 0-100).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagePoint {
    pub top: f32,
    pub left: f32,
}

impl PagePoint {
    pub const fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }

    /// Clamp both axes to the [5, 95] band so notes never hug the edge.
    pub fn clamp_to_viewport(self) -> Self {
        Self {
            top: self.top.clamp(VIEWPORT_MIN_PCT, VIEWPORT_MAX_PCT),
            left: self.left.clamp(VIEWPORT_MIN_PCT, VIEWPORT_MAX_PCT),
        }
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// Screen rectangle reserved for primary content, in percentage units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Zone {
    pub const fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Point-in-rectangle test, inclusive on all four bounds.
    pub fn contains(&self, point: PagePoint) -> bool {
        point.top >= self.top
            && point.top <= self.top + self.height
            && point.left >= self.left
            && point.left <= self.left + self.width
    }
}

pub type ZoneList = SmallVec<[Zone; 2]>;

/// Zones occupied by the maps / info panel for the given phase.
///
/// Map and region phases reserve the central map area; the festival phase
/// reserves the left map column and the right info column.
pub fn forbidden_zones_for(phase: Phase) -> ZoneList {
    match phase {
        Phase::Map | Phase::Region => smallvec![Zone::new(15.0, 15.0, 70.0, 70.0)],
        Phase::Festival => smallvec![
            Zone::new(5.0, 5.0, 40.0, 90.0),
            Zone::new(5.0, 55.0, 40.0, 90.0),
        ],
    }
}

/// True when the point falls inside any of the zones.
pub fn is_forbidden(point: PagePoint, zones: &[Zone]) -> bool {
    zones.iter().any(|zone| zone.contains(point))
}

/// Euclidean distance in percentage space.
#[inline]
pub fn distance(a: PagePoint, b: PagePoint) -> f32 {
    a.to_vec2().distance(b.to_vec2())
}

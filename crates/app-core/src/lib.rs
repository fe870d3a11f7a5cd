//! Core logic for the scroll-driven festival presentation.
//!
//! Everything here is pure, host-testable Rust: the scroll phase state
//! machine, the floating-note pool and spawner, the geometry helpers, and
//! the input-router policy. Time enters only as `now_ms` parameters and
//! randomness only through explicitly seeded generators, so the whole crate
//! runs deterministically under test without a browser or a wall clock.

pub mod constants;
pub mod geometry;
pub mod notes;
pub mod phase;
pub mod router;
pub mod scheduler;
pub mod stage;

pub use geometry::*;
pub use notes::*;
pub use phase::*;
pub use router::*;
pub use scheduler::*;
pub use stage::*;

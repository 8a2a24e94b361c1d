//! Prize wheel engine
//!
//! All outcome logic lives here and must stay pure and deterministic:
//! - Injected random source only
//! - Host-supplied timestamps only (no internal clocks)
//! - No rendering dependencies; `geometry` feeds renderers, nothing reads back
//!
//! The split mirrors the responsibilities: `segment` owns the angle math,
//! `engine` owns the spin lifecycle, `actions` owns what a landed outcome
//! means, `geometry` owns the wedge layout renderers draw.

pub mod actions;
pub mod engine;
pub mod geometry;
pub mod segment;

pub use actions::{ActionTable, OutcomeAction, SessionEvent, WheelSession};
pub use engine::{SpinState, WheelEngine, WheelEvent};
pub use segment::{Segment, Wheel};

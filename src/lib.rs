//! Nioi Games - interactive game logic for the site
//!
//! Core modules:
//! - `wheel`: prize wheel engine (spin decision, segment resolution, outcome actions)
//! - `clicky`: click-to-win game (weighted flip, cooldown, decoy download)
//! - `invite`: beta invite form state machine
//! - `rng`: injectable random sources
//!
//! All engines are pure and pull-driven: randomness comes from a seeded
//! source, timestamps come from the host through `spin`/`click`/`tick`
//! parameters, and state changes surface as drainable events. Nothing in
//! here touches a renderer, a clock, or the network.

pub mod clicky;
pub mod invite;
pub mod rng;
pub mod wheel;

pub use clicky::ClickyEngine;
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use wheel::{ActionTable, SpinState, Wheel, WheelEngine, WheelSession};

use glam::Vec2;

/// Timing and odds constants
pub mod consts {
    /// Spin animation duration (ms); resolution fires when this elapses
    pub const SPIN_DURATION_MS: u64 = 3_000;
    /// Minimum full rotations per spin
    pub const MIN_FULL_ROTATIONS: u32 = 3;
    /// Number of equally likely full-rotation counts (3 through 6)
    pub const FULL_ROTATION_CHOICES: u32 = 4;
    /// Delay before a chained re-spin kicks off (ms)
    pub const RESPIN_DELAY_MS: u64 = 100;

    /// Clicky button cooldown between presses (ms)
    pub const CLICK_COOLDOWN_MS: u64 = 3_000;
    /// Chance a click wins
    pub const CLICK_WIN_CHANCE: f64 = 0.25;
    /// Chance a non-first click starts the decoy download
    pub const DECOY_CHANCE: f64 = 0.10;
    /// Delay before the special win message opens the tip page (ms)
    pub const DEFERRED_LINK_DELAY_MS: u64 = 1_000;
    /// Decoy download fill time (ms)
    pub const DECOY_FILL_MS: u64 = 5_000;
    /// How long the decoy punchline stays up after the fill completes (ms)
    pub const DECOY_PUNCHLINE_MS: u64 = 2_000;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}

/// Convert polar (r, theta in radians) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-45.0), 315.0);
        assert_eq!(normalize_degrees(1125.0), 45.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert!((p.x - 2.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        let top = polar_to_cartesian(1.0, -std::f32::consts::FRAC_PI_2);
        assert!(top.x.abs() < 1e-6);
        assert!((top.y + 1.0).abs() < 1e-6);
    }
}

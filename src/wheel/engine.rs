//! Spin lifecycle: random draw, deferred resolution, observable state
//!
//! Two states, idle and spinning. `spin` draws the terminal rotation and
//! records a resolution deadline; the host pumps [`WheelEngine::tick`]
//! with wall-clock timestamps and the outcome lands once the deadline
//! passes, independent of how often the host pumps. Only one deadline can
//! exist at a time because `spin` is a no-op while spinning. Dropping the
//! engine discards a pending resolution; nothing outside the engine is
//! ever written.

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_ROTATION_CHOICES, MIN_FULL_ROTATIONS, SPIN_DURATION_MS};
use crate::rng::{PcgSource, RandomSource};

use super::segment::Wheel;

/// Observable spin state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    pub is_spinning: bool,
    /// Total rotation applied since engine creation. Never resets, so the
    /// visual rotation stays continuous across spins.
    pub cumulative_rotation_degrees: f64,
    /// Index of the resolved segment; present only while idle after a spin
    pub selected_outcome: Option<usize>,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            is_spinning: false,
            cumulative_rotation_degrees: 0.0,
            selected_outcome: None,
        }
    }
}

/// Notifications for the presentation layer, drained via
/// [`WheelEngine::drain_events`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WheelEvent {
    /// A spin was accepted. Animate to the new cumulative rotation over
    /// `SPIN_DURATION_MS` with an ease-out curve; the engine stores only
    /// the start/end rotation, never intermediate frames.
    SpinStarted { target_rotation_degrees: f64 },
    /// The spin resolved on a segment
    SpinResolved { index: usize },
}

/// Owns the spin decision and the timed reveal of the result
pub struct WheelEngine {
    wheel: Wheel,
    state: SpinState,
    rng: Box<dyn RandomSource>,
    resolve_at_ms: Option<u64>,
    events: Vec<WheelEvent>,
}

impl WheelEngine {
    pub fn new(wheel: Wheel, seed: u64) -> Self {
        Self::with_source(wheel, Box::new(PcgSource::new(seed)))
    }

    pub fn with_source(wheel: Wheel, rng: Box<dyn RandomSource>) -> Self {
        Self {
            wheel,
            state: SpinState::default(),
            rng,
            resolve_at_ms: None,
            events: Vec::new(),
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    /// Request a spin at `now_ms`.
    ///
    /// A spin already in flight makes this a silent no-op (double clicks
    /// are expected, not exceptional) and leaves the pending deadline
    /// untouched.
    pub fn spin(&mut self, now_ms: u64) {
        if self.state.is_spinning {
            log::debug!("spin ignored: already spinning");
            return;
        }
        self.state.is_spinning = true;
        self.state.selected_outcome = None;

        // 3-6 full rotations plus a uniform landing offset
        let full_rotations =
            (self.rng.next_f64() * f64::from(FULL_ROTATION_CHOICES)) as u32 + MIN_FULL_ROTATIONS;
        let final_offset_degrees = self.rng.next_f64() * 360.0;
        let target = self.state.cumulative_rotation_degrees
            + f64::from(full_rotations) * 360.0
            + final_offset_degrees;
        self.state.cumulative_rotation_degrees = target;

        self.resolve_at_ms = Some(now_ms + SPIN_DURATION_MS);
        self.events.push(WheelEvent::SpinStarted {
            target_rotation_degrees: target,
        });
        log::info!(
            "spin started: {} full rotations, landing offset {:.1}°",
            full_rotations,
            final_offset_degrees
        );
    }

    /// Advance to `now_ms`, firing the resolution once its deadline passes
    pub fn tick(&mut self, now_ms: u64) {
        let Some(deadline) = self.resolve_at_ms else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        self.resolve_at_ms = None;

        let index = self
            .wheel
            .resolve_index(self.state.cumulative_rotation_degrees);
        self.state.selected_outcome = Some(index);
        self.state.is_spinning = false;
        self.events.push(WheelEvent::SpinResolved { index });
        log::info!(
            "spin resolved: segment {} ({:?})",
            index,
            self.wheel.segments()[index].label
        );
    }

    /// Clear a presented outcome without touching the rotation
    pub fn clear_outcome(&mut self) {
        self.state.selected_outcome = None;
    }

    /// Drain pending notifications (the presentation layer pulls these
    /// each frame)
    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn resolve_deadline(&self) -> Option<u64> {
        self.resolve_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::wheel::Segment;

    fn seven_letters() -> Wheel {
        Wheel::new(
            ["A", "B", "C", "D", "E", "F", "G"]
                .iter()
                .map(|l| Segment::new(*l, "#000000"))
                .collect(),
        )
    }

    /// Engine whose first spin draws 3 full rotations and a 45° offset
    fn scripted_engine() -> WheelEngine {
        WheelEngine::with_source(
            seven_letters(),
            Box::new(ScriptedSource::new(vec![0.0, 45.0 / 360.0])),
        )
    }

    #[test]
    fn test_fresh_engine_is_idle() {
        let engine = WheelEngine::new(seven_letters(), 1);
        assert_eq!(*engine.state(), SpinState::default());
    }

    #[test]
    fn test_spin_resolves_after_duration() {
        let mut engine = scripted_engine();
        engine.spin(10_000);

        assert!(engine.state().is_spinning);
        assert_eq!(engine.state().selected_outcome, None);
        assert_eq!(engine.state().cumulative_rotation_degrees, 1125.0);

        // One tick short of the deadline changes nothing
        engine.tick(12_999);
        assert!(engine.state().is_spinning);
        assert_eq!(engine.state().selected_outcome, None);

        engine.tick(13_000);
        assert!(!engine.state().is_spinning);
        assert_eq!(engine.state().selected_outcome, Some(6));
    }

    #[test]
    fn test_spin_while_spinning_is_noop() {
        let mut engine = scripted_engine();
        engine.spin(0);
        let state_before = engine.state().clone();
        let deadline_before = engine.resolve_deadline();

        // Later double click: state unchanged, deadline not extended
        engine.spin(2_500);
        assert_eq!(*engine.state(), state_before);
        assert_eq!(engine.resolve_deadline(), deadline_before);

        engine.tick(3_000);
        assert_eq!(engine.state().selected_outcome, Some(6));
    }

    #[test]
    fn test_rotation_strictly_increases() {
        let mut engine = WheelEngine::new(seven_letters(), 99);
        let mut now = 0;
        let mut previous = 0.0;
        for _ in 0..50 {
            engine.spin(now);
            let total = engine.state().cumulative_rotation_degrees;
            // Each spin adds at least 3 full rotations
            assert!(total >= previous + 1080.0);
            previous = total;
            now += SPIN_DURATION_MS;
            engine.tick(now);
            assert!(!engine.state().is_spinning);
        }
    }

    #[test]
    fn test_zero_offset_lands_on_first_segment() {
        let mut engine = WheelEngine::with_source(
            seven_letters(),
            Box::new(ScriptedSource::new(vec![0.0, 0.0])),
        );
        engine.spin(0);
        assert_eq!(engine.state().cumulative_rotation_degrees, 1080.0);
        engine.tick(SPIN_DURATION_MS);
        assert_eq!(engine.state().selected_outcome, Some(0));
    }

    #[test]
    fn test_events_report_start_and_resolution() {
        let mut engine = scripted_engine();
        engine.spin(0);
        assert_eq!(
            engine.drain_events(),
            vec![WheelEvent::SpinStarted {
                target_rotation_degrees: 1125.0
            }]
        );
        engine.tick(SPIN_DURATION_MS);
        assert_eq!(engine.drain_events(), vec![WheelEvent::SpinResolved { index: 6 }]);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_late_tick_still_resolves() {
        // A host that stalls past the deadline resolves on its next pump
        let mut engine = scripted_engine();
        engine.spin(0);
        engine.tick(60_000);
        assert_eq!(engine.state().selected_outcome, Some(6));
        assert!(!engine.state().is_spinning);
    }

    #[test]
    fn test_rotation_choices_cover_three_to_six() {
        for (draw, expected) in [(0.0, 3.0), (0.2499, 3.0), (0.25, 4.0), (0.75, 6.0), (0.9999, 6.0)]
        {
            let mut engine = WheelEngine::with_source(
                seven_letters(),
                Box::new(ScriptedSource::new(vec![draw, 0.0])),
            );
            engine.spin(0);
            assert_eq!(
                engine.state().cumulative_rotation_degrees,
                expected * 360.0,
                "draw {draw}"
            );
        }
    }
}

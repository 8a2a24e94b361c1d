//! Outcome actions and session-level chaining
//!
//! What happens after a spin lands is data, not angle math: each segment
//! label maps to an [`OutcomeAction`] in a lookup table. The chained
//! re-spin in particular is a post-resolution policy - the resolver never
//! knows about it, [`WheelSession`] applies it after the fact.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::RESPIN_DELAY_MS;

use super::engine::{SpinState, WheelEngine, WheelEvent};

/// What the page should do with a resolved outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeAction {
    /// Terminal result with a link for the player to follow
    OpenLink { url: String },
    /// Not a terminal result: clear it and spin again after the delay
    Respin { delay_ms: u64 },
    /// Terminal result with no side effect
    Acknowledge,
}

/// Label-keyed action lookup; labels without an entry fall back to
/// [`OutcomeAction::Acknowledge`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionTable {
    entries: HashMap<String, OutcomeAction>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, label: impl Into<String>, action: OutcomeAction) {
        self.entries.insert(label.into(), action);
    }

    pub fn with(mut self, label: impl Into<String>, action: OutcomeAction) -> Self {
        self.set(label, action);
        self
    }

    pub fn action_for(&self, label: &str) -> OutcomeAction {
        self.entries
            .get(label)
            .cloned()
            .unwrap_or(OutcomeAction::Acknowledge)
    }

    /// Actions for [`Wheel::site_default`](super::Wheel::site_default)
    pub fn site_default() -> Self {
        let link = |url: &str| OutcomeAction::OpenLink { url: url.to_string() };
        Self::new()
            .with("Send Mommy $20", link("https://throne.com/mommynioi"))
            .with("Like 15 of Mommy's Posts", link("https://www.x.com/scamscent"))
            .with("Tweet this", link("https://ctt.ac/N3d8_"))
            .with("Buy a gift for Mommy", link("https://throne.com/mommynioi"))
            .with("Pretty link to click", link("https://bit.ly/pretty-click"))
            .with(
                "Two more spins!",
                OutcomeAction::Respin {
                    delay_ms: RESPIN_DELAY_MS,
                },
            )
            .with("Good girl!", OutcomeAction::Acknowledge)
    }
}

/// Session notifications, drained via [`WheelSession::drain_events`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Forwarded from the engine so the renderer can start its animation
    SpinStarted { target_rotation_degrees: f64 },
    /// Show this outcome to the player
    OutcomePresented { index: usize, label: String },
    /// Open the page tied to the presented outcome
    OpenLink { url: String },
    /// A re-spin outcome landed; another spin starts at `at_ms`
    RespinScheduled { at_ms: u64 },
}

/// A wheel engine plus the post-resolution policy
///
/// Re-spin outcomes never surface as presented results: the session clears
/// them and schedules the next spin itself. A player-initiated spin during
/// the re-spin gap simply wins the race; the scheduled spin then hits the
/// engine's in-flight no-op.
pub struct WheelSession {
    engine: WheelEngine,
    actions: ActionTable,
    respin_at_ms: Option<u64>,
    events: Vec<SessionEvent>,
}

impl WheelSession {
    pub fn new(engine: WheelEngine, actions: ActionTable) -> Self {
        Self {
            engine,
            actions,
            respin_at_ms: None,
            events: Vec::new(),
        }
    }

    /// Engine + site tables, seeded
    pub fn site_default(seed: u64) -> Self {
        Self::new(
            WheelEngine::new(super::Wheel::site_default(), seed),
            ActionTable::site_default(),
        )
    }

    pub fn engine(&self) -> &WheelEngine {
        &self.engine
    }

    pub fn state(&self) -> &SpinState {
        self.engine.state()
    }

    pub fn spin(&mut self, now_ms: u64) {
        self.engine.spin(now_ms);
    }

    /// Pump the engine and apply outcome actions
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(at) = self.respin_at_ms {
            if now_ms >= at {
                self.respin_at_ms = None;
                self.engine.spin(now_ms);
            }
        }
        self.engine.tick(now_ms);
        for event in self.engine.drain_events() {
            match event {
                WheelEvent::SpinStarted {
                    target_rotation_degrees,
                } => self.events.push(SessionEvent::SpinStarted {
                    target_rotation_degrees,
                }),
                WheelEvent::SpinResolved { index } => self.apply_outcome(index, now_ms),
            }
        }
    }

    fn apply_outcome(&mut self, index: usize, now_ms: u64) {
        let label = self.engine.wheel().segments()[index].label.clone();
        match self.actions.action_for(&label) {
            OutcomeAction::Respin { delay_ms } => {
                self.engine.clear_outcome();
                let at_ms = now_ms + delay_ms;
                self.respin_at_ms = Some(at_ms);
                self.events.push(SessionEvent::RespinScheduled { at_ms });
                log::debug!("re-spin outcome {label:?}: next spin at {at_ms}ms");
            }
            OutcomeAction::OpenLink { url } => {
                self.events
                    .push(SessionEvent::OutcomePresented { index, label });
                self.events.push(SessionEvent::OpenLink { url });
            }
            OutcomeAction::Acknowledge => {
                self.events
                    .push(SessionEvent::OutcomePresented { index, label });
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPIN_DURATION_MS;
    use crate::rng::ScriptedSource;
    use crate::wheel::{Segment, Wheel};

    fn two_segment_session(script: Vec<f64>) -> WheelSession {
        // Segment 0 at the pointer, segment 1 opposite; "again" chains
        let wheel = Wheel::new(vec![
            Segment::new("prize", "#FF6B9D"),
            Segment::new("again", "#C2185B"),
        ]);
        let actions = ActionTable::new()
            .with(
                "prize",
                OutcomeAction::OpenLink {
                    url: "https://example.com/prize".to_string(),
                },
            )
            .with(
                "again",
                OutcomeAction::Respin {
                    delay_ms: RESPIN_DELAY_MS,
                },
            );
        let engine = WheelEngine::with_source(wheel, Box::new(ScriptedSource::new(script)));
        WheelSession::new(engine, actions)
    }

    /// Pump in small steps, collecting events
    fn run(session: &mut WheelSession, from_ms: u64, to_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut now = from_ms;
        while now <= to_ms {
            session.tick(now);
            events.extend(session.drain_events());
            now += 25;
        }
        events
    }

    #[test]
    fn test_terminal_outcome_presents_and_links() {
        // Offset 270° on a 2-segment wheel: adjusted angle 90 -> index 0
        let mut session = two_segment_session(vec![0.0, 270.0 / 360.0]);
        session.spin(0);
        let events = run(&mut session, 0, SPIN_DURATION_MS);
        assert!(events.contains(&SessionEvent::OutcomePresented {
            index: 0,
            label: "prize".to_string()
        }));
        assert!(events.contains(&SessionEvent::OpenLink {
            url: "https://example.com/prize".to_string()
        }));
        assert_eq!(session.state().selected_outcome, Some(0));
    }

    #[test]
    fn test_respin_outcome_chains_and_is_never_presented() {
        // First spin lands "again" (offset 180° -> adjusted 180 -> index 1).
        // The chained spin adds 1080 + 90 on top of the 1260 already
        // accumulated: final angle 270, adjusted 90 -> index 0, "prize".
        let mut session = two_segment_session(vec![0.0, 0.5, 0.0, 90.0 / 360.0]);
        session.spin(0);
        let events = run(&mut session, 0, 2 * SPIN_DURATION_MS + 200);

        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::OutcomePresented { label, .. } if label == "again"
        )));
        // The chain: resolve -> scheduled -> second spin -> presented
        assert!(events.iter().any(|e| matches!(e, SessionEvent::RespinScheduled { .. })));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SessionEvent::SpinStarted { .. }))
                .count(),
            2
        );
        assert!(events.contains(&SessionEvent::OutcomePresented {
            index: 0,
            label: "prize".to_string()
        }));
    }

    #[test]
    fn test_respin_clears_outcome_during_gap() {
        let mut session = two_segment_session(vec![0.0, 0.5, 0.0, 270.0 / 360.0]);
        session.spin(0);
        session.tick(SPIN_DURATION_MS);
        session.drain_events();
        // Resolved on the re-spin segment: outcome cleared, not yet spinning
        assert_eq!(session.state().selected_outcome, None);
        assert!(!session.state().is_spinning);
        // Gap elapses: the chained spin starts
        session.tick(SPIN_DURATION_MS + RESPIN_DELAY_MS);
        assert!(session.state().is_spinning);
    }

    #[test]
    fn test_player_spin_during_gap_wins_the_race() {
        let mut session = two_segment_session(vec![0.0, 0.5, 0.0, 270.0 / 360.0]);
        session.spin(0);
        session.tick(SPIN_DURATION_MS);
        // Player clicks before the 100ms gap elapses
        session.spin(SPIN_DURATION_MS + 50);
        assert!(session.state().is_spinning);
        let rotation = session.state().cumulative_rotation_degrees;
        // The scheduled re-spin hits the in-flight no-op
        session.tick(SPIN_DURATION_MS + RESPIN_DELAY_MS);
        assert_eq!(session.state().cumulative_rotation_degrees, rotation);
    }

    #[test]
    fn test_respin_never_terminal_over_long_session() {
        // Seeded engine, site wheel: across many spins the re-spin label
        // must never be presented
        let mut session = WheelSession::site_default(0xFEED);
        let mut presented = 0;
        let mut now = 0u64;
        session.spin(now);
        while presented < 100 {
            now += 100;
            session.tick(now);
            for event in session.drain_events() {
                if let SessionEvent::OutcomePresented { label, .. } = event {
                    assert_ne!(label, "Two more spins!");
                    presented += 1;
                }
            }
            if !session.state().is_spinning && session.state().selected_outcome.is_some() {
                session.spin(now);
            }
        }
    }

    #[test]
    fn test_unmapped_label_defaults_to_acknowledge() {
        let table = ActionTable::site_default();
        assert_eq!(table.action_for("mystery"), OutcomeAction::Acknowledge);
        assert_eq!(
            table.action_for("Two more spins!"),
            OutcomeAction::Respin {
                delay_ms: RESPIN_DELAY_MS
            }
        );
    }
}

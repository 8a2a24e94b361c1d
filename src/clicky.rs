//! Click-to-win game
//!
//! One button. Each accepted press rolls a 25% win, pulls a message from a
//! fixed pool on a win, and starts a 3-second cooldown. One pool message
//! opens the tip page after a short delay instead of resolving inline. A
//! decoy "download" overlay runs on the very first press and occasionally
//! afterwards; its progress is a pure function of elapsed time.
//!
//! Same contract as the wheel engine: host-supplied timestamps, injected
//! randomness, drainable events, silent no-ops for presses that arrive too
//! early.

use serde::{Deserialize, Serialize};

use crate::consts::{
    CLICK_COOLDOWN_MS, CLICK_WIN_CHANCE, DECOY_CHANCE, DECOY_FILL_MS, DECOY_PUNCHLINE_MS,
    DEFERRED_LINK_DELAY_MS,
};
use crate::rng::{PcgSource, RandomSource};

/// Win messages, drawn uniformly
pub const WIN_MESSAGES: &[&str] = &[
    "Mommy loves you!",
    "Cool, cool, cool, cool, cool.",
    "Wow, this could have done anything, you know?",
    "Install successful.",
    ":3",
    "Well that sealed the deal, dummy.",
    "YESSSSS",
    "Sink4pink!",
    "Lose for mommy <3",
    "<3",
    "Your total hours spent on this app are cute.",
    "Only 4,552 clicks to go!",
    "You're a good boy, you know that?",
    "Clicking makes mommy happy.",
    "Clicking is fun!",
    "Clicking is good for you!",
    "Clicking is good for mommy!",
    "Clicking is good for the environment!",
    "Clicking is good for the world!",
    "Clicking is good for your finances!",
    "Clicking is good for your brain!",
    "Opening Mommy's Throne page...",
];

/// Shown on the 75% of presses that miss
pub const MISS_MESSAGE: &str = "Nothing happened, maybe try it again?";

/// The one pool entry that opens the tip page after a delay
pub const TIP_PAGE_MESSAGE: &str = "Opening Mommy's Throne page...";
pub const TIP_PAGE_URL: &str = "https://throne.com/mommynioi";

/// Outcome of one accepted press
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickResult {
    Win { message: String },
    Miss,
}

/// Phase of the decoy download overlay at a given time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoyPhase {
    /// Progress bar filling, 0-100
    Filling { percent: f64 },
    /// Bar full, punchline showing
    Punchline,
    /// Overlay should be gone
    Done,
}

/// A running decoy download; progress derives from elapsed time alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoyDownload {
    pub started_at_ms: u64,
}

impl DecoyDownload {
    pub fn phase(&self, now_ms: u64) -> DecoyPhase {
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        if elapsed < DECOY_FILL_MS {
            DecoyPhase::Filling {
                percent: elapsed as f64 / DECOY_FILL_MS as f64 * 100.0,
            }
        } else if elapsed < DECOY_FILL_MS + DECOY_PUNCHLINE_MS {
            DecoyPhase::Punchline
        } else {
            DecoyPhase::Done
        }
    }
}

/// Notifications drained via [`ClickyEngine::drain_events`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClickyEvent {
    Resolved { result: ClickResult },
    OpenLink { url: String },
    DecoyStarted,
    DecoyFinished,
}

pub struct ClickyEngine {
    rng: Box<dyn RandomSource>,
    cooldown_until_ms: Option<u64>,
    first_click: bool,
    last_result: Option<ClickResult>,
    decoy: Option<DecoyDownload>,
    deferred_link_at_ms: Option<u64>,
    events: Vec<ClickyEvent>,
}

impl ClickyEngine {
    pub fn new(seed: u64) -> Self {
        Self::with_source(Box::new(PcgSource::new(seed)))
    }

    pub fn with_source(rng: Box<dyn RandomSource>) -> Self {
        Self {
            rng,
            cooldown_until_ms: None,
            first_click: true,
            last_result: None,
            decoy: None,
            deferred_link_at_ms: None,
            events: Vec::new(),
        }
    }

    pub fn on_cooldown(&self, now_ms: u64) -> bool {
        self.cooldown_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Milliseconds left on the cooldown, 0 when pressable
    pub fn cooldown_remaining_ms(&self, now_ms: u64) -> u64 {
        self.cooldown_until_ms
            .map_or(0, |until| until.saturating_sub(now_ms))
    }

    pub fn last_result(&self) -> Option<&ClickResult> {
        self.last_result.as_ref()
    }

    /// The running decoy download, if the overlay should be visible
    pub fn decoy(&self) -> Option<&DecoyDownload> {
        self.decoy.as_ref()
    }

    /// Handle a press at `now_ms`. Presses during the cooldown are silent
    /// no-ops.
    pub fn click(&mut self, now_ms: u64) {
        if self.on_cooldown(now_ms) {
            log::debug!("click ignored: {}ms of cooldown left", self.cooldown_remaining_ms(now_ms));
            return;
        }

        let result = if self.rng.next_f64() < CLICK_WIN_CHANCE {
            let index = (self.rng.next_f64() * WIN_MESSAGES.len() as f64) as usize;
            let message = WIN_MESSAGES[index.min(WIN_MESSAGES.len() - 1)];
            if message == TIP_PAGE_MESSAGE {
                // Let the player read the message before the page opens
                self.deferred_link_at_ms = Some(now_ms + DEFERRED_LINK_DELAY_MS);
            }
            ClickResult::Win {
                message: message.to_string(),
            }
        } else {
            ClickResult::Miss
        };
        log::info!("click resolved: {result:?}");
        self.events.push(ClickyEvent::Resolved {
            result: result.clone(),
        });
        self.last_result = Some(result);
        self.cooldown_until_ms = Some(now_ms + CLICK_COOLDOWN_MS);

        // First press always triggers the decoy; afterwards it's a 10% roll
        let start_decoy = self.first_click || self.rng.next_f64() < DECOY_CHANCE;
        if start_decoy {
            self.decoy = Some(DecoyDownload {
                started_at_ms: now_ms,
            });
            self.events.push(ClickyEvent::DecoyStarted);
        }
        self.first_click = false;
    }

    /// Advance to `now_ms`, firing deferred effects that have come due
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(at) = self.deferred_link_at_ms {
            if now_ms >= at {
                self.deferred_link_at_ms = None;
                self.events.push(ClickyEvent::OpenLink {
                    url: TIP_PAGE_URL.to_string(),
                });
            }
        }
        if let Some(decoy) = self.decoy {
            if decoy.phase(now_ms) == DecoyPhase::Done {
                self.decoy = None;
                self.events.push(ClickyEvent::DecoyFinished);
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<ClickyEvent> {
        std::mem::take(&mut self.events)
    }
}

//! Injectable random sources
//!
//! Every random draw in the crate flows through [`RandomSource`] so tests
//! can script exact outcomes. Production code uses PCG32 seeded per
//! session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws on [0, 1)
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// PCG32-backed source for real sessions
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Replays a fixed script of draws, cycling once exhausted
pub struct ScriptedSource {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    /// `values` must be non-empty and each in [0, 1)
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "script needs at least one value");
        Self { values, next: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}

//! Command handlers, grouped by the part of the game they touch.
//!
//! Each handler takes the state by value and returns the next state. A
//! rejected command leaves the state as it was apart from one journal line.
//! Derived stats are recomputed by the caller.

pub(crate) mod account;
pub(crate) mod cave;
pub(crate) mod items;
pub(crate) mod operator;
pub(crate) mod pets;
pub(crate) mod progression;
pub(crate) mod world;

use crate::random::RandomSource;
use xiuzhen_core::{EngineConfig, GameState};

/// Per-command context: the clock reading, configuration and random source.
pub(crate) struct Ctx<'a> {
    pub now_ms: i64,
    pub config: &'a EngineConfig,
    pub rng: &'a mut dyn RandomSource,
}

impl Ctx<'_> {
    pub fn log(&self, state: &mut GameState, text: impl Into<String>) {
        state.push_log(self.now_ms, text, self.config.log_capacity);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Ctx;
    use crate::random::ScriptedRandom;
    use xiuzhen_core::EngineConfig;

    pub const T: i64 = 1_700_000_000_000;

    /// Holds what a [`Ctx`] borrows so tests can build one in a line.
    pub struct Harness {
        pub config: EngineConfig,
        pub rng: ScriptedRandom,
        pub now_ms: i64,
    }

    impl Harness {
        pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
            Self {
                config: EngineConfig::default(),
                rng: ScriptedRandom::new(draws),
                now_ms: T,
            }
        }

        pub fn at(mut self, now_ms: i64) -> Self {
            self.now_ms = now_ms;
            self
        }

        pub fn ctx(&mut self) -> Ctx<'_> {
            Ctx {
                now_ms: self.now_ms,
                config: &self.config,
                rng: &mut self.rng,
            }
        }
    }
}

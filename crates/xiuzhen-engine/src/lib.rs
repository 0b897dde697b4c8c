#![deny(warnings)]

//! Progression engine: tick/catch-up settlement and the command engine that
//! is the single mutator of [`GameState`].
//!
//! Every time-sensitive operation takes wall-clock milliseconds as an
//! argument; randomness comes from an injected [`RandomSource`].

mod actions;
pub mod command;
pub mod engine;
pub mod random;
pub mod tick;

pub use command::{Command, HarvestReward, ItemKind, Resource};
pub use engine::Engine;
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use tick::{pending_ticks, settle, Settlement, TickMode};

pub use xiuzhen_core::{EngineConfig, GameState};

#![deny(warnings)]

//! Core domain model for the cultivation idle game.
//!
//! This crate defines the serializable [`GameState`] aggregate, the static
//! catalog used to seed a new game, the derived-stat calculator and
//! validation helpers that guard the aggregate's invariants.

pub mod catalog;
pub mod config;
pub mod derive;
pub mod model;
pub mod validate;

pub use catalog::default_state;
pub use config::{ConfigError, EngineConfig};
pub use derive::{compute_derived, recompute};
pub use model::*;
pub use validate::{validate_state, ValidationError};

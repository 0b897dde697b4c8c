//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed tick period.
pub const TICK_MS: i64 = 5_000;
/// Longest span a single catch-up may settle.
pub const CATCH_UP_CAP_MS: i64 = 8 * 60 * 60 * 1000;
/// Journal ring-buffer capacity.
pub const LOG_CAPACITY: usize = 80;

/// Tunables for the tick and command engines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of one progression tick in ms.
    pub tick_ms: i64,
    /// Maximum elapsed time settled by one catch-up.
    pub catch_up_cap_ms: i64,
    /// Number of journal lines retained.
    pub log_capacity: usize,
    /// Seed for deterministic draws. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            catch_up_cap_ms: CATCH_UP_CAP_MS,
            log_capacity: LOG_CAPACITY,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick period must be > 0 ms, got {0}")]
    NonPositiveTick(i64),
    #[error("catch-up cap {cap_ms} ms is shorter than one tick ({tick_ms} ms)")]
    CapBelowTick { cap_ms: i64, tick_ms: i64 },
    #[error("log capacity must be > 0")]
    ZeroLogCapacity,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms <= 0 {
            return Err(ConfigError::NonPositiveTick(self.tick_ms));
        }
        if self.catch_up_cap_ms < self.tick_ms {
            return Err(ConfigError::CapBelowTick {
                cap_ms: self.catch_up_cap_ms,
                tick_ms: self.tick_ms,
            });
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        Ok(())
    }
}

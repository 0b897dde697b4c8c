//! Host configuration, read from an optional YAML file.

use anyhow::{Context, Result};
use persistence::AUTOSAVE_DEBOUNCE_MS;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use xiuzhen_core::EngineConfig;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub engine: EngineConfig,
    pub save_dir: Option<PathBuf>,
    pub autosave_debounce_ms: i64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            save_dir: None,
            autosave_debounce_ms: AUTOSAVE_DEBOUNCE_MS,
        }
    }
}

impl CliConfig {
    /// Defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.engine.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = CliConfig::parse("engine:\n  rng_seed: 7\nsave_dir: /tmp/xz\n").unwrap();
        assert_eq!(cfg.engine.rng_seed, Some(7));
        assert_eq!(cfg.engine.tick_ms, 5_000);
        assert_eq!(cfg.save_dir, Some(PathBuf::from("/tmp/xz")));
        assert_eq!(cfg.autosave_debounce_ms, 800);
    }

    #[test]
    fn invalid_engine_section_is_rejected() {
        assert!(CliConfig::parse("engine:\n  tick_ms: 0\n").is_err());
    }
}

//! Session configuration.

use crate::scheduler::DEFAULT_RESOLVE_DELAY;
use crate::types::Theme;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings a session starts from.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Level to start at.
    #[serde(default = "default_level")]
    level: u32,

    /// Theme passed to the content source.
    #[serde(default)]
    theme: Theme,

    /// Pause between revealing the second card and resolving the pair.
    #[serde(default = "default_resolve_delay_ms")]
    resolve_delay_ms: u64,

    /// Shuffle seed; `None` seeds from the OS.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

fn default_level() -> u32 {
    1
}

fn default_resolve_delay_ms() -> u64 {
    DEFAULT_RESOLVE_DELAY.as_millis() as u64
}

impl SessionConfig {
    /// Pause before resolution as a [`Duration`].
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            theme: Theme::default(),
            resolve_delay_ms: default_resolve_delay_ms(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(*config.level(), 1);
        assert_eq!(*config.theme(), Theme::Vaporwave);
        assert_eq!(config.resolve_delay(), Duration::from_millis(1000));
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_setters_chain() {
        let config = SessionConfig::default()
            .with_level(4)
            .with_theme(Theme::Horror)
            .with_seed(9);
        assert_eq!(*config.level(), 4);
        assert_eq!(*config.theme(), Theme::Horror);
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"theme":"retro"}"#).expect("parses");
        assert_eq!(*config.level(), 1);
        assert_eq!(*config.theme(), Theme::Retro);
        assert_eq!(*config.resolve_delay_ms(), 1000);
    }
}

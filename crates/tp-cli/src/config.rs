//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tp_core::{ConflictStrategy, SlotSearchConfig};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Strategy used by `tp resolve` when none is given on the command line.
    pub default_strategy: ConflictStrategy,

    /// How many days slot search tries in each direction.
    pub slot_search_days: u32,

    /// Spread auto-estimates only over today and later.
    pub skip_past_days: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: ConflictStrategy::default(),
            slot_search_days: SlotSearchConfig::default().max_attempts,
            skip_past_days: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TP_*)
        figment = figment.merge(Env::prefixed("TP_"));

        figment.extract()
    }

    /// Slot search bound derived from `slot_search_days`.
    pub const fn slot_search(&self) -> SlotSearchConfig {
        SlotSearchConfig {
            max_attempts: self.slot_search_days,
        }
    }
}

/// Returns the platform-specific config directory for tp.
///
/// On Linux: `~/.config/tp`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_strategy, ConflictStrategy::Adjust);
        assert_eq!(config.slot_search_days, 365);
        assert!(!config.skip_past_days);
    }

    #[test]
    fn test_dirs_config_path_ends_with_tp() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tp");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tp.toml");
        std::fs::write(&path, "default_strategy = \"reject\"\nslot_search_days = 30\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.default_strategy, ConflictStrategy::Reject);
        assert_eq!(config.slot_search().max_attempts, 30);
    }

    #[test]
    fn test_invalid_strategy_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tp.toml");
        std::fs::write(&path, "default_strategy = \"shove\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}

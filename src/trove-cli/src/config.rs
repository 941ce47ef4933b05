//! Configuration management for the trove CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trove::TerminalRules;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Balance each command starts from
    pub starting_balance: u64,
    /// Coin toss bet when `--bet` is not given
    pub default_bet: u64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    pub terminal: TerminalRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: 10_000,
            default_bet: 100,
            seed: None,
            terminal: TerminalRules::default(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("trove");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Explicit seed wins over the configured one
    pub fn seed_or(&self, seed: Option<u64>) -> Option<u64> {
        seed.or(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            starting_balance: 500,
            seed: Some(7),
            terminal: TerminalRules {
                spin_cost: 25,
                ..TerminalRules::default()
            },
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_bet = 50\n\n[terminal]\nconsolation = 10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_bet, 50);
        assert_eq!(config.starting_balance, 10_000);
        assert_eq!(config.terminal.consolation, 10);
        assert_eq!(config.terminal.spin_cost, 100);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "starting_balance = \"lots\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_seed_override() {
        let config = Config {
            seed: Some(1),
            ..Config::default()
        };
        assert_eq!(config.seed_or(Some(9)), Some(9));
        assert_eq!(config.seed_or(None), Some(1));
    }
}

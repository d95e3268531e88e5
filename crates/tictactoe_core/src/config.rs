//! Session configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunables for a game session, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Pause before the computer answers a human move, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Seed for the computer's random fallback; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_computer_delay_ms() -> u64 {
    400
}

impl SessionConfig {
    /// Configuration with explicit values.
    pub fn new(computer_delay_ms: u64, seed: Option<u64>) -> Self {
        Self {
            computer_delay_ms,
            seed,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            computer_delay_ms = config.computer_delay_ms,
            seed = ?config.seed,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Delay before the computer's move.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Overrides the delay.
    pub fn with_computer_delay_ms(mut self, computer_delay_ms: u64) -> Self {
        self.computer_delay_ms = computer_delay_ms;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(default_computer_delay_ms(), None)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = SessionConfig::from_toml("").unwrap();
        assert_eq!(*config.computer_delay_ms(), 400);
        assert_eq!(*config.seed(), None);
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "computer_delay_ms = 50\nseed = 9").unwrap();

        let config = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.computer_delay(), Duration::from_millis(50));
        assert_eq!(*config.seed(), Some(9));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = SessionConfig::from_file("/nonexistent/tictactoe.toml").unwrap_err();
        assert!(err.message.contains("Failed to read"));
    }

    #[test]
    fn test_bad_value_is_error() {
        let err = SessionConfig::from_toml("computer_delay_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SessionConfig::default().with_seed(3).with_computer_delay_ms(10);
        let text = config.to_toml().unwrap();
        assert_eq!(SessionConfig::from_toml(&text).unwrap(), config);
    }
}

//! Settings file for connect_k.
//!
//! Every field has a default, so a missing or partial `connect_k.toml` is
//! fine. Values are validated before a game is configured from them.

use connect_k_core::{GameConfig, Mark, OpponentKind};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Largest connection length accepted.
pub const MAX_K: usize = 2_147_483_647;

/// Game and display settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Connection length needed to win.
    #[serde(default = "default_k")]
    k: usize,

    /// Mark played by the human at the keyboard.
    #[serde(default)]
    color: Mark,

    /// Mark that moves first.
    #[serde(default)]
    first: Mark,

    /// Opponent kind.
    #[serde(default)]
    opponent: OpponentKind,

    /// Viewport size.
    #[serde(default)]
    display: DisplaySettings,

    /// Pause before the computer replies, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,
}

/// Viewport size in board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Minimum rows shown.
    #[serde(default = "default_height")]
    height: usize,

    /// Columns shown.
    #[serde(default = "default_width")]
    width: usize,
}

fn default_k() -> usize {
    3
}

fn default_computer_delay_ms() -> u64 {
    800
}

fn default_height() -> usize {
    9
}

fn default_width() -> usize {
    16
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            height: default_height(),
            width: default_width(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            k: default_k(),
            color: Mark::default(),
            first: Mark::default(),
            opponent: OpponentKind::default(),
            display: DisplaySettings::default(),
            computer_delay_ms: default_computer_delay_ms(),
        }
    }
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        settings.validate()?;
        info!(k = settings.k, opponent = %settings.opponent, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from `path`, or defaults when the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides and re-validates.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        k: Option<usize>,
        color: Option<Mark>,
        first: Option<Mark>,
        opponent: Option<OpponentKind>,
    ) -> Result<Self, ConfigError> {
        if let Some(k) = k {
            self.k = k;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(first) = first {
            self.first = first;
        }
        if let Some(opponent) = opponent {
            self.opponent = opponent;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_k(self.k)?;
        if self.display.height == 0 || self.display.width == 0 {
            return Err(ConfigError::new(format!(
                "Display must be at least 1x1, got {}x{}",
                self.display.height, self.display.width
            )));
        }
        Ok(())
    }

    /// Game setup described by these settings.
    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.k, self.color, self.first, self.opponent)
    }
}

/// Checks that `k` lies in `1..=MAX_K`.
#[track_caller]
pub fn validate_k(k: usize) -> Result<(), ConfigError> {
    if (1..=MAX_K).contains(&k) {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "k must be in the range [1, {}], got {}",
            MAX_K, k
        )))
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
    #[instrument(skip(message))]
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

    #[test]
    fn test_defaults_match_setup_form() {
        let settings = Settings::default();
        assert_eq!(settings.k, 3);
        assert_eq!(settings.color, Mark::Red);
        assert_eq!(settings.first, Mark::Red);
        assert_eq!(settings.opponent, OpponentKind::Human);
        assert_eq!(settings.display.height, 9);
        assert_eq!(settings.display.width, 16);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("k = 5\nopponent = \"Computer\"\n").unwrap();
        assert_eq!(settings.k, 5);
        assert_eq!(settings.opponent, OpponentKind::Computer);
        assert_eq!(settings.computer_delay_ms, 800);
    }

    #[test]
    fn test_k_range() {
        assert!(validate_k(0).is_err());
        assert!(validate_k(1).is_ok());
        assert!(validate_k(MAX_K).is_ok());
        assert!(validate_k(MAX_K + 1).is_err());
    }

    #[test]
    fn test_overrides_revalidate() {
        let result = Settings::default().with_overrides(Some(0), None, None, None);
        assert!(result.is_err());
        let settings = Settings::default()
            .with_overrides(Some(4), Some(Mark::Blue), None, Some(OpponentKind::Computer))
            .unwrap();
        assert_eq!(settings.game_config().computer(), Mark::Red);
    }
}

//! Console configuration file.
//!
//! ```toml
//! [engine]
//! path = "stockfish"
//! search = { movetime_ms = 1000 }
//!
//! [board]
//! cell_size = 2.0
//!
//! [frame]
//! fps = 30
//! ```
//!
//! Every section and field is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use game_state::{AnimationSettings, BoardGeometry};
use uci_client::EngineConfig;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "chess3d.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub engine: EngineConfig,
    pub board: BoardGeometry,
    pub animation: AnimationSettings,
    pub frame: FrameConfig,
}

impl ConsoleConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&contents, &path.display().to_string())?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// [`DEFAULT_CONFIG_FILE`] if it exists, defaults otherwise.
    pub fn discover() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let board = &self.board;
        let animation = &self.animation;
        for (name, value) in [
            ("board.cell_size", board.cell_size),
            ("board.piece_height", board.piece_height),
            ("animation.movement_duration", animation.movement_duration),
            ("animation.knight_arc_height", animation.knight_arc_height),
            ("animation.tolerance", animation.tolerance),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if !(board.cell_size > 2.0 * animation.tolerance) {
            return invalid(format!(
                "board.cell_size ({}) must exceed twice animation.tolerance ({})",
                board.cell_size, animation.tolerance
            ));
        }
        if !(animation.tolerance > 0.0) {
            return invalid(format!(
                "animation.tolerance must be positive, got {}",
                animation.tolerance
            ));
        }
        if !(animation.movement_duration > 0.0) {
            return invalid(format!(
                "animation.movement_duration must be positive, got {}",
                animation.movement_duration
            ));
        }
        if self.frame.fps == 0 {
            return invalid("frame.fps must be positive".to_string());
        }

        let engine = &self.engine;
        if engine.poll_interval_ms == 0 {
            return invalid("engine.poll_interval_ms must be positive".to_string());
        }
        for (name, attempts) in [
            ("handshake_attempts", engine.handshake_attempts),
            ("search_attempts", engine.search_attempts),
            ("stop_grace_attempts", engine.stop_grace_attempts),
            ("shutdown_attempts", engine.shutdown_attempts),
        ] {
            if attempts == 0 {
                return invalid(format!("engine.{name} must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

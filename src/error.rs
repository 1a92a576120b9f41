//! Error types for Dino Dash
//!
//! Gameplay itself has no recoverable errors: invalid state transitions are
//! ignored and spawn overlap is impossible by construction. What remains is
//! startup failure (assets, configuration).

use thiserror::Error;

use crate::assets::{AudioId, SpriteId};

/// Fatal errors surfaced before a game can start
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Missing sprite asset: {0:?}")]
    MissingSprite(SpriteId),

    #[error("Missing audio asset: {0:?}")]
    MissingAudio(AudioId),

    #[error("Empty sprite asset: {0:?}")]
    EmptySprite(SpriteId),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Settings / tuning errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Result type alias for startup operations
pub type Result<T> = std::result::Result<T, GameError>;

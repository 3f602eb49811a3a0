//! Error types for the game and localization engines
//!
//! Board queries never fail: illegal or out-of-range moves are plain
//! `false`/empty results. Errors are reserved for rejected configuration and
//! for the interactive driver.

use thiserror::Error;

use crate::game_repr::{Color, Move};

/// Errors raised while building an engine from user-supplied settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions must both be positive
    #[error("Invalid grid size: {width}x{height} (width and height must be positive)")]
    InvalidGrid { width: usize, height: usize },

    /// Search depth outside the supported difficulty range
    #[error("Invalid search depth: {depth} (must be 1-5)")]
    InvalidDepth { depth: u8 },

    /// Search time limit outside the accepted range
    #[error("Invalid time limit: {millis} ms (must be 1-1000000)")]
    InvalidTimeLimit { millis: u64 },

    /// Sensor probabilities do not describe a distribution
    #[error(
        "Invalid sensor model: p_true={p_true}, p_first_ring={p_first_ring}, \
         p_second_ring={p_second_ring}"
    )]
    InvalidSensor {
        p_true: f64,
        p_first_ring: f64,
        p_second_ring: f64,
    },
}

/// Errors that can end an interactive game early
#[derive(Error, Debug)]
pub enum GameError {
    /// A player returned a move that is not legal on the current board
    #[error("{color:?} attempted illegal move {mv}")]
    IllegalMove { color: Color, mv: Move },

    /// Human input was not a usable move index
    #[error("Invalid move choice: {input:?} (expected 0-{max})")]
    InvalidChoice { input: String, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for game driving
pub type PlayResult<T> = Result<T, GameError>;

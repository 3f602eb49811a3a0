//! AlphaBetaPlayer - Reversi AI using depth-limited alpha-beta search
//!
//! The player delegates move selection to [`search`](super::search::search)
//! and only adds the difficulty-to-depth mapping and a time budget.
//!
//! # Difficulty Levels
//!
//! - **SuperEasy**: Depth 1
//! - **Easy**: Depth 2
//! - **Medium**: Depth 3
//! - **Hard**: Depth 4 (default)
//! - **SuperHard**: Depth 5
//!
//! # Examples
//!
//! ```
//! use reversi_localization::agent::ai::{AlphaBetaPlayer, Difficulty};
//! use reversi_localization::agent::player::Player;
//! use reversi_localization::game_repr::{Board, Color};
//!
//! let mut ai = AlphaBetaPlayer::with_difficulty(Difficulty::Easy);
//! let mv = ai.get_move(&Board::default(), Color::Black);
//! assert!(mv.is_some());
//! ```

use std::time::Duration;

use log::debug;

use crate::agent::player::Player;
use crate::error::{ConfigError, ConfigResult};
use crate::game_repr::{Board, Color, Move};
use super::search::search;

/// Default time budget per move
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(100);

/// Largest accepted time budget
pub const MAX_TIME_LIMIT_MS: u64 = 1_000_000;

/// AI difficulty levels that map to search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    SuperEasy,
    Easy,
    Medium,
    #[default]
    Hard,
    SuperHard,
}

impl Difficulty {
    /// Get all difficulty levels, weakest first
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::SuperEasy,
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::SuperHard,
        ]
    }

    /// Difficulty for a search depth in 1..=5
    pub fn from_depth(depth: u8) -> ConfigResult<Self> {
        match depth {
            1 => Ok(Difficulty::SuperEasy),
            2 => Ok(Difficulty::Easy),
            3 => Ok(Difficulty::Medium),
            4 => Ok(Difficulty::Hard),
            5 => Ok(Difficulty::SuperHard),
            _ => Err(ConfigError::InvalidDepth { depth }),
        }
    }

    /// Get the search depth in plies for this difficulty level
    pub fn max_depth(&self) -> u8 {
        match self {
            Difficulty::SuperEasy => 1,
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::SuperHard => 5,
        }
    }

    /// Get a display name for this difficulty level
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::SuperEasy => "Super Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::SuperHard => "Super Hard",
        }
    }
}

/// Validate a per-move time budget given in milliseconds
pub fn time_limit_from_millis(millis: u64) -> ConfigResult<Duration> {
    if (1..=MAX_TIME_LIMIT_MS).contains(&millis) {
        Ok(Duration::from_millis(millis))
    } else {
        Err(ConfigError::InvalidTimeLimit { millis })
    }
}

/// AI Player that searches with alpha-beta pruning
///
/// Deterministic: the same board, color and difficulty always yield the same
/// move unless the time budget cuts the search short.
pub struct AlphaBetaPlayer {
    /// AI difficulty level determining search depth
    difficulty: Difficulty,

    /// Wall-clock budget per move
    time_limit: Option<Duration>,

    /// Display name for this AI player
    name: String,
}

impl AlphaBetaPlayer {
    /// Create a new AlphaBetaPlayer with custom difficulty, budget and name
    pub fn new(difficulty: Difficulty, time_limit: Option<Duration>, name: String) -> Self {
        Self {
            difficulty,
            time_limit,
            name,
        }
    }

    /// Create a player named "Computer ({difficulty})" with the default budget
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let name = format!("Computer ({})", difficulty.name());
        Self::new(difficulty, Some(DEFAULT_TIME_LIMIT), name)
    }

    /// Replace the per-move time budget
    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Get the current difficulty level
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Player for AlphaBetaPlayer {
    /// Search the board and return the recommended move
    ///
    /// Blocks for at most roughly the time budget. Returns `None` only when
    /// `color` has no legal move.
    fn get_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let result = search(board, color, self.difficulty.max_depth(), self.time_limit);

        debug!(
            "[{}] depth {}, {} nodes, score {}",
            self.name, result.depth, result.nodes_searched, result.score
        );

        result.best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}

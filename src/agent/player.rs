//! Player trait and associated types for Reversi game agents.
//!
//! This module provides the core abstraction for entities that can provide moves.
//! Different player types (human on a console, alpha-beta AI) implement the
//! `Player` trait and are driven by the [`Orchestrator`](crate::orchestrator::Orchestrator).
//!
//! # Design Philosophy
//!
//! The `Player` trait focuses on **behavior** rather than construction. Each
//! implementation provides its own constructor: a `HumanPlayer` needs an input
//! and output stream, an `AlphaBetaPlayer` needs a difficulty and time budget.
//!
//! # Synchronous Design
//!
//! `get_move()` is blocking. A human player waits on input, an AI player
//! searches. The orchestrator simply calls it and waits for the result.

use crate::game_repr::{Board, Color, Move};

/// Result of a completed Reversi game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Black holds more discs at the end
    BlackWins,
    /// White holds more discs at the end
    WhiteWins,
    /// Equal disc counts
    Draw,
}

impl GameResult {
    /// Create a GameResult from the winning color
    pub fn from_winner(winner: Color) -> Self {
        match winner {
            Color::Black => GameResult::BlackWins,
            Color::White => GameResult::WhiteWins,
        }
    }

    /// Decide the result from final disc counts
    pub fn from_counts(black: usize, white: usize) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameResult::BlackWins,
            std::cmp::Ordering::Less => GameResult::WhiteWins,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::BlackWins => Some(Color::Black),
            GameResult::WhiteWins => Some(Color::White),
            GameResult::Draw => None,
        }
    }
}

/// Trait for entities that can provide Reversi moves.
///
/// # Required Methods
///
/// Only `get_move()` must be implemented. All other methods have default
/// implementations that can be overridden as needed.
///
/// ## `get_move()`
/// - **Blocking**: This method may block until a move is available
/// - **Returns `None`**: If the player has no move, resigns, or its input closed
/// - **Returns `Some(Move)`**: The chosen placement; legality is checked by the
///   caller
pub trait Player {
    /// Request the next move from this player.
    ///
    /// `board` is the current position and `color` the side this player is
    /// playing.
    fn get_move(&mut self, board: &Board, color: Color) -> Option<Move>;

    /// Notify this player that the opponent made a move.
    fn opponent_moved(&mut self, _mv: Move) {
        // Default: do nothing
    }

    /// Notify this player that the game has ended.
    fn game_ended(&mut self, _result: GameResult) {
        // Default: do nothing
    }

    /// Get the display name of this player.
    fn name(&self) -> &str {
        "Player"
    }
}

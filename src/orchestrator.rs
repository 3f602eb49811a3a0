//! Game lifecycle management and turn coordination.
//!
//! This module contains the [`Orchestrator`], which owns the [`Board`] and two
//! [`Player`]s and runs the game loop:
//!
//! ```text
//! [Check End] -> [Request Move] -> [Validate] -> [Apply] -> [Notify Opponent]
//!   -> [Switch Turn] -> [Check End] ...
//! ```
//!
//! The game ends when the side to move has no legal move (there is no pass),
//! or when a player returns no move (resignation).

use log::info;

use crate::agent::player::{GameResult, Player};
use crate::error::{GameError, PlayResult};
use crate::game_repr::{Board, Color, Move};

/// Final state of a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub result: GameResult,
    pub black_tiles: usize,
    pub white_tiles: usize,
    pub moves_played: usize,
    /// Set when the game ended because this side gave up
    pub resigned: Option<Color>,
    pub final_board: Board,
}

/// Root component coordinating a single game.
///
/// Black always moves first from the canonical start unless a custom board
/// is supplied with [`Orchestrator::with_board`].
pub struct Orchestrator {
    board: Board,

    /// (black_player, white_player)
    players: (Box<dyn Player>, Box<dyn Player>),

    current_turn: Color,

    history: Vec<(Color, Move)>,

    game_result: Option<GameResult>,
}

impl Orchestrator {
    pub fn new(black: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        Self::with_board(Board::default(), Color::Black, black, white)
    }

    pub fn with_board(
        board: Board,
        first_to_move: Color,
        black: Box<dyn Player>,
        white: Box<dyn Player>,
    ) -> Self {
        Self {
            board,
            players: (black, white),
            current_turn: first_to_move,
            history: Vec::new(),
            game_result: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn history(&self) -> &[(Color, Move)] {
        &self.history
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.game_result
    }

    fn player_mut(&mut self, color: Color) -> &mut dyn Player {
        match color {
            Color::Black => self.players.0.as_mut(),
            Color::White => self.players.1.as_mut(),
        }
    }

    /// Play one move for the side to move.
    ///
    /// Returns the move played, or `None` once the game is over (in which
    /// case the result has been recorded and both players notified).
    pub fn play_turn(&mut self) -> PlayResult<Option<Move>> {
        if self.game_result.is_some() {
            return Ok(None);
        }

        let color = self.current_turn;
        if self.board.is_game_over(color) {
            self.finish(GameResult::from_counts(
                self.board.tile_count(Color::Black),
                self.board.tile_count(Color::White),
            ));
            return Ok(None);
        }

        let board = self.board;
        let Some(mv) = self.player_mut(color).get_move(&board, color) else {
            info!("{} resigned", color.name());
            self.finish(GameResult::from_winner(color.opposite()));
            return Ok(None);
        };

        if !self.board.apply(color, mv) {
            return Err(GameError::IllegalMove { color, mv });
        }
        self.history.push((color, mv));
        self.player_mut(color.opposite()).opponent_moved(mv);
        self.current_turn = color.opposite();

        Ok(Some(mv))
    }

    /// Play until the game ends and report the final counts
    pub fn run(&mut self) -> PlayResult<GameSummary> {
        while self.play_turn()?.is_some() {}
        Ok(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        let resigned = match (self.game_result, self.board.is_game_over(self.current_turn)) {
            (Some(_), false) => Some(self.current_turn),
            _ => None,
        };
        GameSummary {
            result: self.game_result.unwrap_or(GameResult::from_counts(
                self.board.tile_count(Color::Black),
                self.board.tile_count(Color::White),
            )),
            black_tiles: self.board.tile_count(Color::Black),
            white_tiles: self.board.tile_count(Color::White),
            moves_played: self.history.len(),
            resigned,
            final_board: self.board,
        }
    }

    fn finish(&mut self, result: GameResult) {
        info!(
            "game over after {} moves: {:?} (black {}, white {})",
            self.history.len(),
            result,
            self.board.tile_count(Color::Black),
            self.board.tile_count(Color::White)
        );
        self.game_result = Some(result);
        self.players.0.game_ended(result);
        self.players.1.game_ended(result);
    }
}

//! Human player implementation that picks moves from a console prompt.
//!
//! The player prints the current board and the numbered list of legal moves,
//! then reads an index. Bad input is reported and the prompt repeats. End of
//! input is treated as resignation.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use reversi_localization::agent::human_player::HumanPlayer;
//! use reversi_localization::agent::player::Player;
//! use reversi_localization::game_repr::{Board, Color, Move};
//!
//! let input = Cursor::new("1\n");
//! let mut human = HumanPlayer::new(input, Vec::new(), "Alice".to_string());
//! let mv = human.get_move(&Board::default(), Color::Black);
//! assert_eq!(mv, Some(Move::new(3, 2)));
//! ```

use std::io::{BufRead, Write};

use log::warn;

use crate::agent::player::{GameResult, Player};
use crate::error::{GameError, PlayResult};
use crate::game_repr::{Board, Color, Move};

/// Parse a zero-based index into a list of `count` moves
pub fn parse_choice(input: &str, count: usize) -> PlayResult<usize> {
    let max = count.saturating_sub(1);
    match input.trim().parse::<usize>() {
        Ok(index) if index < count => Ok(index),
        _ => Err(GameError::InvalidChoice {
            input: input.trim().to_string(),
            max,
        }),
    }
}

/// Console-driven player
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
    name: String,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W, name: String) -> Self {
        Self {
            input,
            output,
            name,
        }
    }

    /// Give back the output stream (used by tests to inspect prompts)
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, board: &Board, color: Color, moves: &[Move]) -> PlayResult<Option<Move>> {
        writeln!(self.output, "{}", board)?;
        loop {
            let listing: Vec<String> = moves
                .iter()
                .enumerate()
                .map(|(i, mv)| format!("{}: {}", i, mv))
                .collect();
            writeln!(
                self.output,
                "{} ({}), possible moves are: [{}]",
                self.name,
                color.name(),
                listing.join(", ")
            )?;
            writeln!(self.output, "Pick a choice: (0-{})", moves.len() - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match parse_choice(&line, moves.len()) {
                Ok(index) => {
                    let mv = moves[index];
                    writeln!(self.output, "Your move was: {}", mv)?;
                    return Ok(Some(mv));
                }
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn get_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return None;
        }

        match self.prompt(board, color, &moves) {
            Ok(mv) => mv,
            Err(err) => {
                warn!("[{}] input failed: {}", self.name, err);
                None
            }
        }
    }

    fn opponent_moved(&mut self, mv: Move) {
        if let Err(err) = writeln!(self.output, "Opponent played {}", mv) {
            warn!("[{}] output failed: {}", self.name, err);
        }
    }

    fn game_ended(&mut self, result: GameResult) {
        if let Err(err) = writeln!(self.output, "Game over: {:?}", result) {
            warn!("[{}] output failed: {}", self.name, err);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn human(input: &str) -> HumanPlayer<Cursor<String>, Vec<u8>> {
        HumanPlayer::new(Cursor::new(input.to_string()), Vec::new(), "Tester".to_string())
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("2\n", 4).unwrap(), 2);
        assert_eq!(parse_choice(" 0 ", 1).unwrap(), 0);
        assert!(parse_choice("4", 4).is_err());
        assert!(parse_choice("-1", 4).is_err());
        assert!(parse_choice("abc", 4).is_err());
    }

    #[test]
    fn test_picks_indexed_move() {
        let mut player = human("3\n");
        let mv = player.get_move(&Board::default(), Color::Black);
        assert_eq!(mv, Some(Move::new(5, 4)));
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let mut player = human("x\n9\n2\n");
        let mv = player.get_move(&Board::default(), Color::Black);
        assert_eq!(mv, Some(Move::new(4, 5)));

        let output = String::from_utf8(player.into_output()).unwrap();
        assert_eq!(output.matches("Pick a choice").count(), 3);
        assert!(output.contains("Invalid move choice"));
    }

    /// Accepts nothing, so every write fails
    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_notifications_survive_closed_output() {
        let input = Cursor::new(String::new());
        let mut player = HumanPlayer::new(input, ClosedOutput, "Tester".to_string());
        player.opponent_moved(Move::new(2, 3));
        player.game_ended(GameResult::Draw);
        assert_eq!(player.name(), "Tester");
    }

    #[test]
    fn test_notifications_are_written() {
        let mut player = human("");
        player.opponent_moved(Move::new(2, 3));
        player.game_ended(GameResult::BlackWins);

        let output = String::from_utf8(player.into_output()).unwrap();
        assert!(output.contains("Opponent played (2, 3)"));
        assert!(output.contains("Game over: BlackWins"));
    }

    #[test]
    fn test_end_of_input_resigns() {
        let mut player = human("");
        assert_eq!(player.get_move(&Board::default(), Color::Black), None);
    }
}

// Static evaluation for the alpha-beta search
// Score is the disc differential: positive = good for `color`

use crate::game_repr::{Board, Color, NUM_CELLS};

/// Largest magnitude `evaluate` can return
pub const MAX_EVAL: i32 = NUM_CELLS as i32;

/// Discs owned by `color` minus discs owned by the opponent
pub fn evaluate(board: &Board, color: Color) -> i32 {
    board.tile_count(color) as i32 - board.tile_count(color.opposite()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Move;

    #[test]
    fn test_starting_position_balanced() {
        let board = Board::default();
        assert_eq!(evaluate(&board, Color::Black), 0);
        assert_eq!(evaluate(&board, Color::White), 0);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let mut board = Board::default();
        board.apply(Color::Black, Move::new(2, 3));

        assert_eq!(evaluate(&board, Color::Black), 3);
        assert_eq!(evaluate(&board, Color::White), -3);
    }

    #[test]
    fn test_evaluation_bounded() {
        let full_black = Board::from_rows(&["BBBBBBBB"; 8].join("/"));
        assert_eq!(evaluate(&full_black, Color::Black), MAX_EVAL);
        assert_eq!(evaluate(&full_black, Color::White), -MAX_EVAL);
    }
}

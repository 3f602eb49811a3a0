use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Helper function to build a board from row strings ('B', 'W', '.')
pub fn board_from(rows: &[&str]) -> Board {
    Board::from_rows(&rows.join("/"))
}

/// Helper function to place a disc
pub fn place(board: &mut Board, row: usize, col: usize, color: Color) {
    board.set(row, col, Tile::Disc(color));
}

/// Helper function to turn a capture set into sorted (row, col) pairs
pub fn flipped(check: &MoveCheck) -> Vec<(usize, usize)> {
    let mut cells: Vec<(usize, usize)> = check.flips.iter().map(|m| (m.row, m.col)).collect();
    cells.sort();
    cells
}

// ==================== TEST MODULES ====================

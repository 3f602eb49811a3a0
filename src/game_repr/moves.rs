use std::fmt;

use smallvec::SmallVec;

use super::board::{Board, Color, Tile, BOARD_SIZE};

/// Unit steps for the four axes, both directions each:
/// row, column, "\" diagonal and "/" diagonal.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// A disc placement at (row, col). The mover is implied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub type Flips = SmallVec<[Move; 24]>;

/// Outcome of validating a placement: the cells it would capture.
///
/// An empty capture set means the move is illegal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveCheck {
    pub flips: Flips,
}

impl MoveCheck {
    pub fn illegal() -> Self {
        Self::default()
    }

    pub fn is_legal(&self) -> bool {
        !self.flips.is_empty()
    }
}

impl Board {
    /// Check whether `color` may place a disc at (row, col) and collect the
    /// opponent discs the placement would flip.
    ///
    /// Out-of-bounds or occupied targets are illegal. A direction contributes
    /// only when the cells next to the target are an unbroken run of opponent
    /// discs closed off by one of the mover's own discs.
    pub fn validate(&self, color: Color, row: i32, col: i32) -> MoveCheck {
        match self.get(row, col) {
            Some(Tile::Empty) => {}
            _ => return MoveCheck::illegal(),
        }

        let opponent = color.opposite();
        let mut flips = Flips::new();

        for (dr, dc) in DIRECTIONS {
            let run_start = flips.len();
            let (mut r, mut c) = (row + dr, col + dc);
            let mut anchored = false;

            while let Some(tile) = self.get(r, c) {
                if tile.is(opponent) {
                    flips.push(Move::new(r as usize, c as usize));
                } else {
                    anchored = tile.is(color);
                    break;
                }
                r += dr;
                c += dc;
            }

            if !anchored {
                flips.truncate(run_start);
            }
        }

        MoveCheck { flips }
    }

    pub fn is_legal(&self, color: Color, mv: Move) -> bool {
        self.validate(color, mv.row as i32, mv.col as i32).is_legal()
    }

    /// All legal placements for `color`, in row-major order.
    pub fn legal_moves(&self, color: Color) -> SmallVec<[Move; 64]> {
        let mut moves = SmallVec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.validate(color, row as i32, col as i32).is_legal() {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        (0..BOARD_SIZE).any(|row| {
            (0..BOARD_SIZE).any(|col| self.validate(color, row as i32, col as i32).is_legal())
        })
    }

    /// The game ends as soon as the side to move has nothing to play.
    pub fn is_game_over(&self, to_move: Color) -> bool {
        !self.has_legal_moves(to_move)
    }

    /// Place a disc for `color` and flip everything it captures.
    ///
    /// Illegal moves leave the board untouched; returns whether the move was
    /// applied.
    pub fn apply(&mut self, color: Color, mv: Move) -> bool {
        let check = self.validate(color, mv.row as i32, mv.col as i32);
        if !check.is_legal() {
            return false;
        }

        self.cells[mv.row][mv.col] = Tile::Disc(color);
        for flip in check.flips {
            self.cells[flip.row][flip.col] = Tile::Disc(color);
        }
        true
    }

    /// Copy of the board with `mv` played, or `None` if it is illegal.
    /// The original board is never modified.
    pub fn with_move(&self, color: Color, mv: Move) -> Option<Board> {
        let mut next = *self;
        next.apply(color, mv).then_some(next)
    }
}

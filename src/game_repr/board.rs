use std::fmt;

/// Side length of the game board.
pub const BOARD_SIZE: usize = 8;

/// Total number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }
}

/// Occupancy of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Disc(Color),
}

impl Tile {
    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    pub fn is(&self, color: Color) -> bool {
        *self == Tile::Disc(color)
    }

    pub fn from_char(c: char) -> Self {
        match c {
            'B' | 'b' => Tile::Disc(Color::Black),
            'W' | 'w' => Tile::Disc(Color::White),
            _ => Tile::Empty,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Disc(color) => color.symbol(),
        }
    }
}

/*
 * 8x8 row-major grid, row 0 on top.
 * Board is Copy so the search can branch on snapshots
 * instead of sharing one mutable buffer.
 */
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) cells: [[Tile; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    /// Canonical Othello start: white on d4/e5, black on e4/d5
    fn default() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Tile::Disc(Color::White);
        board.cells[4][4] = Tile::Disc(Color::White);
        board.cells[3][4] = Tile::Disc(Color::Black);
        board.cells[4][3] = Tile::Disc(Color::Black);
        board
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Parse a board from 8 rows of `B`, `W` and `.` separated by `/`.
    ///
    /// Any character other than `B`/`W` is read as an empty cell, and missing
    /// rows or columns stay empty.
    pub fn from_rows(rows: &str) -> Self {
        let mut board = Self::empty();
        for (r, row) in rows.split('/').take(BOARD_SIZE).enumerate() {
            for (c, ch) in row.chars().take(BOARD_SIZE).enumerate() {
                board.cells[r][c] = Tile::from_char(ch);
            }
        }
        board
    }

    pub fn inside(row: i32, col: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
    }

    /// Tile at (row, col), or `None` outside the board.
    pub fn get(&self, row: i32, col: i32) -> Option<Tile> {
        if Self::inside(row, col) {
            Some(self.cells[row as usize][col as usize])
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row][col] = tile;
    }

    pub fn tile_count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|tile| tile.is(color))
            .count()
    }

    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|tile| !tile.is_empty())
            .count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..BOARD_SIZE {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", r)?;
            for tile in row {
                write!(f, " {}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().map(Tile::to_char).collect())
            .collect();
        write!(f, "Board({})", rows.join("/"))
    }
}

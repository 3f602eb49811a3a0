//! Rectangular world and joint (position, heading) state indexing.
//!
//! Every matrix and vector in the filter is indexed by
//! `x * height * 4 + y * 4 + heading`, so x is the slowest-varying
//! component and heading the fastest.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{ConfigError, ConfigResult};

pub const NUM_HEADINGS: usize = 4;

/// Direction the robot is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    /// y + 1
    North = 0,
    /// x + 1
    East = 1,
    /// y - 1
    South = 2,
    /// x - 1
    West = 3,
}

impl Heading {
    pub const ALL: [Heading; NUM_HEADINGS] =
        [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// (dx, dy) of one step in this direction
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn chebyshev(&self, other: Position) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cells at Chebyshev distance exactly 1
pub type FirstRing = SmallVec<[Position; 8]>;
/// Cells at Chebyshev distance exactly 2
pub type SecondRing = SmallVec<[Position; 16]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Both dimensions must be positive
    pub fn new(width: usize, height: usize) -> ConfigResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_positions(&self) -> usize {
        self.width * self.height
    }

    pub fn num_states(&self) -> usize {
        self.num_positions() * NUM_HEADINGS
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y)
    }

    pub fn state_index(&self, pos: Position, heading: Heading) -> usize {
        pos.x * self.height * NUM_HEADINGS + pos.y * NUM_HEADINGS + heading.index()
    }

    /// Index of the first (North) state of a position
    pub fn position_base(&self, pos: Position) -> usize {
        self.state_index(pos, Heading::North)
    }

    pub fn position_of(&self, state: usize) -> Position {
        let cell = state / NUM_HEADINGS;
        Position::new(cell / self.height, cell % self.height)
    }

    pub fn decode(&self, state: usize) -> (Position, Heading) {
        let heading = Heading::ALL[state % NUM_HEADINGS];
        (self.position_of(state), heading)
    }

    /// Neighbouring cell one step along `heading`, if it is inside the grid
    pub fn step(&self, pos: Position, heading: Heading) -> Option<Position> {
        let (dx, dy) = heading.delta();
        let (x, y) = (pos.x as i64 + dx, pos.y as i64 + dy);
        self.contains(x, y).then(|| Position::new(x as usize, y as usize))
    }

    /// True when a wall is directly ahead
    pub fn is_blocked(&self, pos: Position, heading: Heading) -> bool {
        self.step(pos, heading).is_none()
    }

    /// All positions in state order (x-major)
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    fn ring(&self, pos: Position, distance: i64) -> impl Iterator<Item = Position> + '_ {
        let (cx, cy) = (pos.x as i64, pos.y as i64);
        (cx - distance..=cx + distance)
            .flat_map(move |x| (cy - distance..=cy + distance).map(move |y| (x, y)))
            .filter(move |&(x, y)| (x - cx).abs().max((y - cy).abs()) == distance)
            .filter(move |&(x, y)| self.contains(x, y))
            .map(|(x, y)| Position::new(x as usize, y as usize))
    }

    /// Up to 8 surrounding cells, clipped to the grid
    pub fn first_ring(&self, pos: Position) -> FirstRing {
        self.ring(pos, 1).collect()
    }

    /// Up to 16 cells two steps out, clipped to the grid
    pub fn second_ring(&self, pos: Position) -> SecondRing {
        self.ring(pos, 2).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(Grid::new(0, 4), Err(ConfigError::InvalidGrid { width: 0, height: 4 }));
        assert!(Grid::new(4, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_state_index_layout() {
        let grid = Grid::new(3, 5).unwrap();

        assert_eq!(grid.num_states(), 60);
        assert_eq!(grid.state_index(Position::new(0, 0), Heading::North), 0);
        assert_eq!(grid.state_index(Position::new(0, 1), Heading::North), 4);
        assert_eq!(grid.state_index(Position::new(1, 0), Heading::North), 20);
        assert_eq!(grid.state_index(Position::new(2, 4), Heading::West), 59);
    }

    #[test]
    fn test_decode_inverts_index() {
        let grid = Grid::new(4, 3).unwrap();
        for state in 0..grid.num_states() {
            let (pos, heading) = grid.decode(state);
            assert_eq!(grid.state_index(pos, heading), state);
        }
    }

    #[test]
    fn test_positions_follow_state_order() {
        let grid = Grid::new(3, 2).unwrap();
        let bases: Vec<usize> = grid.positions().map(|p| grid.position_base(p)).collect();
        assert_eq!(bases, vec![0, 4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_step_and_walls() {
        let grid = Grid::new(8, 8).unwrap();
        let corner = Position::new(0, 0);

        assert_eq!(grid.step(corner, Heading::North), Some(Position::new(0, 1)));
        assert_eq!(grid.step(corner, Heading::East), Some(Position::new(1, 0)));
        assert!(grid.is_blocked(corner, Heading::South));
        assert!(grid.is_blocked(corner, Heading::West));
        assert!(grid.is_blocked(Position::new(7, 7), Heading::North));
        assert!(grid.is_blocked(Position::new(7, 7), Heading::East));
    }

    #[test]
    fn test_ring_sizes() {
        let grid = Grid::new(8, 8).unwrap();

        let centre = Position::new(4, 4);
        assert_eq!(grid.first_ring(centre).len(), 8);
        assert_eq!(grid.second_ring(centre).len(), 16);

        let corner = Position::new(0, 0);
        assert_eq!(grid.first_ring(corner).len(), 3);
        assert_eq!(grid.second_ring(corner).len(), 5);

        let edge = Position::new(0, 4);
        assert_eq!(grid.first_ring(edge).len(), 5);
        assert_eq!(grid.second_ring(edge).len(), 9);

        let near_corner = Position::new(1, 1);
        assert_eq!(grid.first_ring(near_corner).len(), 8);
        assert_eq!(grid.second_ring(near_corner).len(), 7);
    }

    #[test]
    fn test_rings_are_disjoint_and_exclude_self() {
        let grid = Grid::new(5, 5).unwrap();
        for pos in grid.positions() {
            let first = grid.first_ring(pos);
            let second = grid.second_ring(pos);
            assert!(!first.contains(&pos));
            assert!(!second.contains(&pos));
            assert!(first.iter().all(|p| !second.contains(p)));
            assert!(first.iter().all(|p| pos.chebyshev(*p) == 1));
            assert!(second.iter().all(|p| pos.chebyshev(*p) == 2));
        }
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(1, 5).manhattan(Position::new(4, 2)), 6);
    }
}

//! Ground-truth robot that wanders the grid.
//!
//! The motion follows the same rule the filter assumes: keep going with
//! probability 0.7, otherwise (or when facing a wall) pick a random heading
//! whose next cell is inside the grid.

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use super::grid::{Grid, Heading, Position};
use super::motion::TURN_PROB;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    grid: Grid,
    position: Position,
    heading: Heading,
}

impl Robot {
    pub fn new(grid: Grid, position: Position, heading: Heading) -> Self {
        Self {
            grid,
            position,
            heading,
        }
    }

    /// Random cell, random heading that does not face a wall (any heading on
    /// a 1x1 grid).
    pub fn new_random<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(0..grid.height());
        let position = Position::new(x, y);
        let mut robot = Self::new(grid, position, Heading::North);
        robot.heading = robot
            .valid_random_heading(rng)
            .unwrap_or_else(|| Heading::ALL[rng.gen_range(0..Heading::ALL.len())]);
        robot
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// True when moving along `heading` would leave the grid
    pub fn invalid_heading(&self, heading: Heading) -> bool {
        self.grid.is_blocked(self.position, heading)
    }

    /// Uniform choice among the open headings; `None` only on a 1x1 grid
    pub fn valid_random_heading<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Heading> {
        let open: SmallVec<[Heading; 4]> = Heading::ALL
            .iter()
            .copied()
            .filter(|&h| !self.invalid_heading(h))
            .collect();
        open.choose(rng).copied()
    }

    /// One time step. Returns the new position.
    pub fn move_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Position {
        let turn = rng.gen_bool(TURN_PROB);
        if turn || self.invalid_heading(self.heading) {
            if let Some(heading) = self.valid_random_heading(rng) {
                self.heading = heading;
            }
        }

        if let Some(next) = self.grid.step(self.position, self.heading) {
            self.position = next;
        }
        self.position
    }
}

//! Transition model for the tracked robot.
//!
//! The robot keeps its heading and steps forward with probability 0.7 and
//! turns towards one of the other open directions with the remaining 0.3
//! split evenly. Facing a wall, it picks uniformly among all open directions.
//!
//! Each state has at most four successors, so rows are stored sparsely. The
//! dense equivalent is available through [`TransitionMatrix::to_dense`].

use ndarray::{Array1, Array2};
use smallvec::SmallVec;

use super::grid::{Grid, Heading, Position};

/// Probability of moving along the current heading when it is open
pub const FORWARD_PROB: f64 = 0.7;

/// Probability of changing heading when the way ahead is open
pub const TURN_PROB: f64 = 1.0 - FORWARD_PROB;

type Row = SmallVec<[(usize, f64); 4]>;

/// Row-stochastic matrix T with T[s, s'] = P(next = s' | current = s)
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    grid: Grid,
    rows: Vec<Row>,
}

impl TransitionMatrix {
    pub fn build(grid: &Grid) -> Self {
        let mut rows = vec![Row::new(); grid.num_states()];

        for pos in grid.positions() {
            for heading in Heading::ALL {
                let state = grid.state_index(pos, heading);
                rows[state] = successors(grid, pos, heading)
                    .into_iter()
                    .map(|(next, next_heading, p)| (grid.state_index(next, next_heading), p))
                    .collect();
            }
        }

        Self { grid: *grid, rows }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn num_states(&self) -> usize {
        self.rows.len()
    }

    /// Non-zero entries of row `state` as (successor, probability)
    pub fn row(&self, state: usize) -> &[(usize, f64)] {
        &self.rows[state]
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from]
            .iter()
            .find(|&&(next, _)| next == to)
            .map_or(0.0, |&(_, p)| p)
    }

    pub fn row_sum(&self, state: usize) -> f64 {
        self.rows[state].iter().map(|&(_, p)| p).sum()
    }

    /// Tᵀ · f, the one-step prediction of a belief vector
    pub fn transpose_mul(&self, f: &Array1<f64>) -> Array1<f64> {
        let mut out = Array1::zeros(self.num_states());
        for (state, row) in self.rows.iter().enumerate() {
            let mass = f[state];
            if mass == 0.0 {
                continue;
            }
            for &(next, p) in row {
                out[next] += p * mass;
            }
        }
        out
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.num_states();
        let mut dense = Array2::zeros((n, n));
        for (state, row) in self.rows.iter().enumerate() {
            for &(next, p) in row {
                dense[[state, next]] = p;
            }
        }
        dense
    }
}

/// Successor (position, new heading, probability) triples of one state
fn successors(
    grid: &Grid,
    pos: Position,
    heading: Heading,
) -> SmallVec<[(Position, Heading, f64); 4]> {
    let open: SmallVec<[(Position, Heading); 4]> = Heading::ALL
        .iter()
        .filter_map(|&h| grid.step(pos, h).map(|next| (next, h)))
        .collect();

    // 1x1 world: nowhere to go
    if open.is_empty() {
        return SmallVec::from_iter([(pos, heading, 1.0)]);
    }

    let blocked = grid.is_blocked(pos, heading);
    let count = open.len();

    open.into_iter()
        .map(|(next, h)| {
            let p = if blocked {
                1.0 / count as f64
            } else if count == 1 {
                // Only the way ahead is open
                1.0
            } else if h == heading {
                FORWARD_PROB
            } else {
                TURN_PROB / (count - 1) as f64
            };
            (next, h, p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_every_row_sums_to_one() {
        for (w, h) in [(8, 8), (1, 1), (1, 5), (5, 1), (2, 3)] {
            let grid = Grid::new(w, h).unwrap();
            let t = TransitionMatrix::build(&grid);
            for state in 0..grid.num_states() {
                assert!((t.row_sum(state) - 1.0).abs() < EPS, "{}x{} state {}", w, h, state);
            }
        }
    }

    #[test]
    fn test_open_interior_split() {
        let grid = Grid::new(8, 8).unwrap();
        let t = TransitionMatrix::build(&grid);
        let pos = Position::new(3, 3);
        let s = grid.state_index(pos, Heading::East);

        let ahead = grid.state_index(Position::new(4, 3), Heading::East);
        let north = grid.state_index(Position::new(3, 4), Heading::North);
        let south = grid.state_index(Position::new(3, 2), Heading::South);
        let west = grid.state_index(Position::new(2, 3), Heading::West);

        assert!((t.get(s, ahead) - 0.7).abs() < EPS);
        for other in [north, south, west] {
            assert!((t.get(s, other) - 0.1).abs() < EPS);
        }
        assert_eq!(t.row(s).len(), 4);
    }

    #[test]
    fn test_edge_open_ahead() {
        // Bottom edge facing north: 3 open directions
        let grid = Grid::new(8, 8).unwrap();
        let t = TransitionMatrix::build(&grid);
        let s = grid.state_index(Position::new(3, 0), Heading::North);

        let ahead = grid.state_index(Position::new(3, 1), Heading::North);
        let east = grid.state_index(Position::new(4, 0), Heading::East);
        let west = grid.state_index(Position::new(2, 0), Heading::West);

        assert!((t.get(s, ahead) - 0.7).abs() < EPS);
        assert!((t.get(s, east) - 0.15).abs() < EPS);
        assert!((t.get(s, west) - 0.15).abs() < EPS);
    }

    #[test]
    fn test_corner_facing_wall() {
        let grid = Grid::new(8, 8).unwrap();
        let t = TransitionMatrix::build(&grid);
        let s = grid.state_index(Position::new(0, 0), Heading::South);

        let north = grid.state_index(Position::new(0, 1), Heading::North);
        let east = grid.state_index(Position::new(1, 0), Heading::East);

        assert_eq!(t.row(s).len(), 2);
        assert!((t.get(s, north) - 0.5).abs() < EPS);
        assert!((t.get(s, east) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_new_heading_matches_direction() {
        let grid = Grid::new(4, 4).unwrap();
        let t = TransitionMatrix::build(&grid);
        for state in 0..grid.num_states() {
            let (pos, _) = grid.decode(state);
            for &(next, _) in t.row(state) {
                let (next_pos, next_heading) = grid.decode(next);
                assert_eq!(grid.step(pos, next_heading), Some(next_pos));
            }
        }
    }

    #[test]
    fn test_transpose_mul_matches_dense() {
        let grid = Grid::new(3, 4).unwrap();
        let t = TransitionMatrix::build(&grid);
        let n = grid.num_states();
        let f = Array1::from_iter((0..n).map(|i| (i % 7) as f64 + 0.5));

        let sparse = t.transpose_mul(&f);
        let dense = t.to_dense().t().dot(&f);

        for i in 0..n {
            assert!((sparse[i] - dense[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_prediction_preserves_mass() {
        let grid = Grid::new(6, 5).unwrap();
        let t = TransitionMatrix::build(&grid);
        let n = grid.num_states();
        let f = Array1::from_elem(n, 1.0 / n as f64);

        assert!((t.transpose_mul(&f).sum() - 1.0).abs() < 1e-9);
    }
}

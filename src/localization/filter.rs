//! Forward-algorithm belief tracking.
//!
//! Each step computes `f' = O(reading) · Tᵀ · f` and rescales the result to
//! unit mass. Rescaling does not move the arg-max; the scale factor is the
//! likelihood of the reading given all earlier ones and is kept in
//! [`BeliefTracker::last_likelihood`].

use log::{trace, warn};
use ndarray::{s, Array1};

use super::grid::{Grid, Position, NUM_HEADINGS};
use super::motion::TransitionMatrix;
use super::sensor::{ObservationMatrix, SensorModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// Uniform prior, no reading processed yet
    Initialized,
    /// At least one `step` has run
    Tracking,
}

#[derive(Debug, Clone)]
pub struct BeliefTracker {
    grid: Grid,
    sensor: SensorModel,
    transitions: TransitionMatrix,
    no_reading: ObservationMatrix,
    belief: Array1<f64>,
    phase: FilterPhase,
    steps: usize,
    last_likelihood: f64,
}

impl BeliefTracker {
    pub fn new(grid: Grid, sensor: SensorModel) -> Self {
        let transitions = TransitionMatrix::build(&grid);
        let no_reading = ObservationMatrix::no_reading(&grid, &sensor);

        Self {
            grid,
            sensor,
            transitions,
            no_reading,
            belief: uniform(grid.num_states()),
            phase: FilterPhase::Initialized,
            steps: 0,
            last_likelihood: 1.0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn transitions(&self) -> &TransitionMatrix {
        &self.transitions
    }

    pub fn belief(&self) -> &Array1<f64> {
        &self.belief
    }

    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn total_mass(&self) -> f64 {
        self.belief.sum()
    }

    /// P(latest reading | all earlier readings)
    pub fn last_likelihood(&self) -> f64 {
        self.last_likelihood
    }

    /// Advance the belief by one time step and fold in `reading`.
    pub fn step(&mut self, reading: Option<Position>) {
        let predicted = self.transitions.transpose_mul(&self.belief);
        let mut updated = match reading {
            Some(pos) => {
                ObservationMatrix::for_reading(&self.grid, &self.sensor, pos).apply(&predicted)
            }
            None => self.no_reading.apply(&predicted),
        };

        let mass = updated.sum();
        if mass > 0.0 && mass.is_finite() {
            updated /= mass;
            self.belief = updated;
            self.last_likelihood = mass;
        } else {
            // Reading impossible under the current belief
            warn!(
                "belief collapsed at step {} (reading {:?}), resetting to uniform",
                self.steps + 1,
                reading
            );
            self.belief = uniform(self.grid.num_states());
            self.last_likelihood = 0.0;
        }

        self.steps += 1;
        self.phase = FilterPhase::Tracking;
        trace!("step {}: likelihood {:.6}", self.steps, self.last_likelihood);
    }

    /// Index of the largest joint-state entry; the first one wins ties.
    pub fn most_probable_index(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.belief.iter().enumerate() {
            if p > self.belief[best] {
                best = i;
            }
        }
        best
    }

    /// Position of the single most probable (position, heading) state and
    /// that state's mass. Headings are not summed first.
    pub fn most_probable_state(&self) -> (Position, f64) {
        let best = self.most_probable_index();
        (self.grid.position_of(best), self.belief[best])
    }

    /// Belief summed over headings, one entry per position in state order
    pub fn position_marginals(&self) -> Vec<(Position, f64)> {
        self.grid
            .positions()
            .map(|pos| {
                let base = self.grid.position_base(pos);
                let mass = self.belief.slice(s![base..base + NUM_HEADINGS]).sum();
                (pos, mass)
            })
            .collect()
    }
}

fn uniform(n: usize) -> Array1<f64> {
    Array1::from_elem(n, 1.0 / n as f64)
}

//! Localization harness: drives a [`Robot`], feeds sampled readings to a
//! [`BeliefTracker`] and scores its guesses against the truth and against a
//! uniform random guesser.
//!
//! Independent trials are seeded from `config.seed + trial` and run on the
//! rayon pool.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::LocalizationConfig;
use crate::error::ConfigResult;

use super::filter::BeliefTracker;
use super::grid::{Grid, Position};
use super::robot::Robot;
use super::sensor::SensorModel;

/// What happened during one time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub actual: Position,
    pub reading: Option<Position>,
    pub guess: Position,
    pub guess_mass: f64,
    pub random_guess: Position,
}

impl StepRecord {
    pub fn error(&self) -> usize {
        self.guess.manhattan(self.actual)
    }

    pub fn random_error(&self) -> usize {
        self.random_guess.manhattan(self.actual)
    }

    pub fn hit(&self) -> bool {
        self.guess == self.actual
    }
}

/// Accumulated statistics of one trial (or several, after [`TrialStats::merge`])
#[derive(Debug, Clone, PartialEq)]
pub struct TrialStats {
    pub width: usize,
    pub height: usize,
    pub steps: usize,
    pub total_error: usize,
    pub hits: usize,
    pub random_total_error: usize,
    pub random_hits: usize,
    pub missing_readings: usize,
    /// Robot visits per cell, indexed `x * height + y`
    pub occupancy: Vec<usize>,
}

impl TrialStats {
    pub fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            steps: 0,
            total_error: 0,
            hits: 0,
            random_total_error: 0,
            random_hits: 0,
            missing_readings: 0,
            occupancy: vec![0; grid.num_positions()],
        }
    }

    pub fn record(&mut self, record: &StepRecord) {
        self.steps += 1;
        self.total_error += record.error();
        self.hits += usize::from(record.hit());
        self.random_total_error += record.random_error();
        self.random_hits += usize::from(record.random_guess == record.actual);
        self.missing_readings += usize::from(record.reading.is_none());
        self.occupancy[record.actual.x * self.height + record.actual.y] += 1;
    }

    pub fn merge(mut self, other: &TrialStats) -> Self {
        self.steps += other.steps;
        self.total_error += other.total_error;
        self.hits += other.hits;
        self.random_total_error += other.random_total_error;
        self.random_hits += other.random_hits;
        self.missing_readings += other.missing_readings;
        for (mine, theirs) in self.occupancy.iter_mut().zip(&other.occupancy) {
            *mine += theirs;
        }
        self
    }

    pub fn visits(&self, pos: Position) -> usize {
        self.occupancy[pos.x * self.height + pos.y]
    }

    pub fn mean_error(&self) -> f64 {
        ratio(self.total_error, self.steps)
    }

    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.steps)
    }

    pub fn random_mean_error(&self) -> f64 {
        ratio(self.random_total_error, self.steps)
    }

    pub fn random_hit_rate(&self) -> f64 {
        ratio(self.random_hits, self.steps)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub struct Simulation<R: Rng> {
    robot: Robot,
    tracker: BeliefTracker,
    sensor: SensorModel,
    rng: R,
    stats: TrialStats,
}

impl<R: Rng> Simulation<R> {
    pub fn new(grid: Grid, sensor: SensorModel, mut rng: R) -> Self {
        let robot = Robot::new_random(grid, &mut rng);
        Self::with_robot(robot, sensor, rng)
    }

    pub fn with_robot(robot: Robot, sensor: SensorModel, rng: R) -> Self {
        let grid = *robot.grid();
        Self {
            robot,
            tracker: BeliefTracker::new(grid, sensor),
            sensor,
            rng,
            stats: TrialStats::new(&grid),
        }
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn tracker(&self) -> &BeliefTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &TrialStats {
        &self.stats
    }

    /// Move, sense, filter, guess
    pub fn step(&mut self) -> StepRecord {
        let grid = *self.robot.grid();

        let actual = self.robot.move_step(&mut self.rng);
        let reading = self.sensor.sample(&grid, actual, &mut self.rng);
        self.tracker.step(reading);

        let (guess, guess_mass) = self.tracker.most_probable_state();
        let random_guess = Position::new(
            self.rng.gen_range(0..grid.width()),
            self.rng.gen_range(0..grid.height()),
        );

        let record = StepRecord {
            step: self.tracker.steps(),
            actual,
            reading,
            guess,
            guess_mass,
            random_guess,
        };
        self.stats.record(&record);
        debug!(
            "step {}: actual {} reading {:?} guess {} (p={:.4})",
            record.step, actual, reading, guess, guess_mass
        );
        record
    }

    pub fn run(mut self, steps: usize) -> TrialStats {
        for _ in 0..steps {
            self.step();
        }
        self.stats
    }
}

/// One seeded trial of `config.steps` steps
pub fn run_trial(config: &LocalizationConfig, seed: u64) -> ConfigResult<TrialStats> {
    let grid = config.grid()?;
    let simulation = Simulation::new(grid, config.sensor, StdRng::seed_from_u64(seed));
    Ok(simulation.run(config.steps))
}

/// `trials` independent trials in parallel, merged into one set of totals
pub fn run_trials(config: &LocalizationConfig, trials: usize) -> ConfigResult<TrialStats> {
    let grid = config.grid()?;

    let per_trial: Vec<TrialStats> = (0..trials as u64)
        .into_par_iter()
        .map(|trial| {
            let seed = config.seed.wrapping_add(trial);
            let simulation = Simulation::new(grid, config.sensor, StdRng::seed_from_u64(seed));
            simulation.run(config.steps)
        })
        .collect();

    let total = per_trial
        .iter()
        .fold(TrialStats::new(&grid), |acc, stats| acc.merge(stats));

    info!(
        "{} trials x {} steps on {}x{}: mean error {:.3} (random {:.3}), \
         hit rate {:.3} (random {:.3})",
        trials,
        config.steps,
        grid.width(),
        grid.height(),
        total.mean_error(),
        total.random_mean_error(),
        total.hit_rate(),
        total.random_hit_rate()
    );
    Ok(total)
}

const SHADES: &[u8] = b" .:-=+*#%@";

/// Text heat-map of robot visits, north at the top
pub fn render_heatmap(stats: &TrialStats) -> String {
    let max = stats.occupancy.iter().copied().max().unwrap_or(0);
    let mut out = String::new();

    for y in (0..stats.height).rev() {
        for x in 0..stats.width {
            let visits = stats.visits(Position::new(x, y));
            let shade = if max == 0 {
                0
            } else {
                (visits * (SHADES.len() - 1) + max - 1) / max
            };
            out.push(SHADES[shade] as char);
        }
        out.push('\n');
    }
    out
}

//! Noisy location sensor: observation model and reading sampler.
//!
//! A reading reports the true cell with probability `p_true`, each cell of the
//! first ring with `p_first_ring`, each cell of the second ring with
//! `p_second_ring`, and nothing at all otherwise. Likelihoods depend only on
//! position, so all four headings of a cell share one value.

use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ConfigError, ConfigResult};
use super::grid::{Grid, Position, NUM_HEADINGS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorModel {
    pub p_true: f64,
    pub p_first_ring: f64,
    pub p_second_ring: f64,
}

impl Default for SensorModel {
    fn default() -> Self {
        Self {
            p_true: 0.1,
            p_first_ring: 0.05,
            p_second_ring: 0.025,
        }
    }
}

impl SensorModel {
    /// Probabilities must be non-negative and leave room for "no reading"
    /// even with full rings (8 and 16 cells).
    pub fn new(p_true: f64, p_first_ring: f64, p_second_ring: f64) -> ConfigResult<Self> {
        let probabilities = [p_true, p_first_ring, p_second_ring];
        let worst_case = p_true + 8.0 * p_first_ring + 16.0 * p_second_ring;

        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) || worst_case > 1.0 + 1e-12 {
            return Err(ConfigError::InvalidSensor {
                p_true,
                p_first_ring,
                p_second_ring,
            });
        }

        Ok(Self {
            p_true,
            p_first_ring,
            p_second_ring,
        })
    }

    /// P(no reading | robot at `pos`)
    pub fn no_reading_likelihood(&self, grid: &Grid, pos: Position) -> f64 {
        1.0 - self.p_true
            - self.p_first_ring * grid.first_ring(pos).len() as f64
            - self.p_second_ring * grid.second_ring(pos).len() as f64
    }

    /// P(reading = `reading` | robot at `actual`)
    pub fn reading_likelihood(&self, reading: Position, actual: Position) -> f64 {
        match reading.chebyshev(actual) {
            0 => self.p_true,
            1 => self.p_first_ring,
            2 => self.p_second_ring,
            _ => 0.0,
        }
    }

    /// Draw a reading for a robot standing at `actual`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        actual: Position,
        rng: &mut R,
    ) -> Option<Position> {
        let first = grid.first_ring(actual);
        let second = grid.second_ring(actual);

        let p_first = self.p_first_ring * first.len() as f64;
        let p_second = self.p_second_ring * second.len() as f64;
        let u: f64 = rng.gen();

        if u < self.p_true {
            Some(actual)
        } else if u < self.p_true + p_first {
            first.choose(rng).copied()
        } else if u < self.p_true + p_first + p_second {
            second.choose(rng).copied()
        } else {
            None
        }
    }
}

/// Diagonal matrix O with O[s, s] = P(reading | position of s)
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationMatrix {
    diagonal: Array1<f64>,
}

impl ObservationMatrix {
    /// Likelihoods for an actual reading at `reading`.
    ///
    /// A reading outside the grid cannot come from any state, so every
    /// entry is zero.
    pub fn for_reading(grid: &Grid, sensor: &SensorModel, reading: Position) -> Self {
        let mut diagonal = Array1::zeros(grid.num_states());
        if !grid.contains(reading.x as i64, reading.y as i64) {
            return Self { diagonal };
        }

        let mut fill = |pos: Position, p: f64| {
            let base = grid.position_base(pos);
            for h in 0..NUM_HEADINGS {
                diagonal[base + h] = p;
            }
        };

        fill(reading, sensor.p_true);
        for pos in grid.first_ring(reading) {
            fill(pos, sensor.p_first_ring);
        }
        for pos in grid.second_ring(reading) {
            fill(pos, sensor.p_second_ring);
        }

        Self { diagonal }
    }

    /// Likelihoods for a step where the sensor reported nothing
    pub fn no_reading(grid: &Grid, sensor: &SensorModel) -> Self {
        let mut diagonal = Array1::zeros(grid.num_states());
        for pos in grid.positions() {
            let p = sensor.no_reading_likelihood(grid, pos);
            let base = grid.position_base(pos);
            for h in 0..NUM_HEADINGS {
                diagonal[base + h] = p;
            }
        }
        Self { diagonal }
    }

    pub fn get(&self, state: usize) -> f64 {
        self.diagonal[state]
    }

    pub fn diagonal(&self) -> &Array1<f64> {
        &self.diagonal
    }

    /// O · v
    pub fn apply(&self, v: &Array1<f64>) -> Array1<f64> {
        &self.diagonal * v
    }

    pub fn to_dense(&self) -> Array2<f64> {
        Array2::from_diag(&self.diagonal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_default_constants() {
        let sensor = SensorModel::default();
        assert_eq!(sensor.p_true, 0.1);
        assert_eq!(sensor.p_first_ring, 0.05);
        assert_eq!(sensor.p_second_ring, 0.025);
        assert_eq!(SensorModel::new(0.1, 0.05, 0.025), Ok(sensor));
    }

    #[test]
    fn test_invalid_models_rejected() {
        assert!(SensorModel::new(-0.1, 0.05, 0.025).is_err());
        assert!(SensorModel::new(0.5, 0.05, 0.025).is_err());
        assert!(SensorModel::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(SensorModel::new(1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_reading_matrix_values() {
        let grid = Grid::new(8, 8).unwrap();
        let sensor = SensorModel::default();
        let reading = Position::new(4, 4);
        let om = ObservationMatrix::for_reading(&grid, &sensor, reading);

        for state in 0..grid.num_states() {
            let pos = grid.position_of(state);
            let expected = sensor.reading_likelihood(reading, pos);
            assert!((om.get(state) - expected).abs() < EPS);
        }
        assert!((om.get(grid.position_base(Position::new(6, 2)) + 3) - 0.025).abs() < EPS);
        assert_eq!(om.get(grid.position_base(Position::new(7, 4))), 0.0);
    }

    #[test]
    fn test_no_reading_values() {
        let grid = Grid::new(8, 8).unwrap();
        let sensor = SensorModel::default();
        let om = ObservationMatrix::no_reading(&grid, &sensor);

        // Interior: 1 - 0.1 - 8*0.05 - 16*0.025 = 0.1
        let centre = grid.position_base(Position::new(4, 4));
        assert!((om.get(centre) - 0.1).abs() < EPS);
        // Corner: 1 - 0.1 - 3*0.05 - 5*0.025 = 0.625
        let corner = grid.position_base(Position::new(0, 0));
        assert!((om.get(corner + 2) - 0.625).abs() < EPS);
    }

    #[test]
    fn test_likelihoods_sum_to_one_over_all_readings() {
        let grid = Grid::new(8, 8).unwrap();
        let sensor = SensorModel::default();
        let no_reading = ObservationMatrix::no_reading(&grid, &sensor);
        let readings: Vec<ObservationMatrix> = grid
            .positions()
            .map(|p| ObservationMatrix::for_reading(&grid, &sensor, p))
            .collect();

        for state in 0..grid.num_states() {
            let total: f64 =
                readings.iter().map(|om| om.get(state)).sum::<f64>() + no_reading.get(state);
            assert!((total - 1.0).abs() < 1e-9, "state {} sums to {}", state, total);
        }
    }

    #[test]
    fn test_off_grid_reading_has_no_support() {
        let grid = Grid::new(8, 8).unwrap();
        let sensor = SensorModel::default();

        for reading in [Position::new(0, 9), Position::new(8, 0), Position::new(100, 100)] {
            let om = ObservationMatrix::for_reading(&grid, &sensor, reading);
            assert_eq!(om.diagonal().len(), grid.num_states());
            assert!(om.diagonal().iter().all(|&p| p == 0.0), "reading {}", reading);
        }
    }

    #[test]
    fn test_apply_matches_dense() {
        let grid = Grid::new(4, 4).unwrap();
        let sensor = SensorModel::default();
        let om = ObservationMatrix::for_reading(&grid, &sensor, Position::new(1, 2));
        let v = Array1::from_iter((0..grid.num_states()).map(|i| i as f64));

        let dense = om.to_dense().dot(&v);
        assert_eq!(om.apply(&v), dense);
    }

    #[test]
    fn test_sample_frequencies() {
        let grid = Grid::new(8, 8).unwrap();
        let sensor = SensorModel::default();
        let actual = Position::new(4, 4);
        let mut rng = StdRng::seed_from_u64(7);

        let draws = 20_000;
        let (mut exact, mut first, mut second, mut none) = (0, 0, 0, 0);
        for _ in 0..draws {
            match sensor.sample(&grid, actual, &mut rng) {
                Some(p) if p == actual => exact += 1,
                Some(p) if p.chebyshev(actual) == 1 => first += 1,
                Some(p) if p.chebyshev(actual) == 2 => second += 1,
                Some(p) => panic!("reading {} too far from {}", p, actual),
                None => none += 1,
            }
        }

        let freq = |n: i32| n as f64 / draws as f64;
        assert!((freq(exact) - 0.1).abs() < 0.02);
        assert!((freq(first) - 0.4).abs() < 0.02);
        assert!((freq(second) - 0.4).abs() < 0.02);
        assert!((freq(none) - 0.1).abs() < 0.02);
    }

    #[test]
    fn test_sample_is_seed_deterministic() {
        let grid = Grid::new(5, 5).unwrap();
        let sensor = SensorModel::default();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| sensor.sample(&grid, Position::new(0, 0), &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}

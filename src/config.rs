//! Run configuration for the two drivers.
//!
//! A [`GameConfig`] says who plays each colour and how long the computer may
//! think; a [`LocalizationConfig`] describes the grid, sensor and length of a
//! localization trial.

use std::time::Duration;

use crate::agent::ai::{Difficulty, DEFAULT_TIME_LIMIT};
use crate::error::ConfigResult;
use crate::game_repr::Color;
use crate::localization::{Grid, SensorModel};

/// Configuration for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConfig {
    /// Human player typing move indices on the console
    Human,
    /// Alpha-beta player with specified difficulty
    Computer { difficulty: Difficulty },
}

/// Who plays which colour, and the computer's per-move budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub black_player: PlayerConfig,
    pub white_player: PlayerConfig,
    /// `None` searches to full depth regardless of time
    pub time_limit: Option<Duration>,
}

impl Default for GameConfig {
    /// Human plays black against the default computer
    fn default() -> Self {
        Self::pvai(Color::Black, Difficulty::default())
    }
}

impl GameConfig {
    /// Human against the computer.
    ///
    /// # Arguments
    /// * `user_color` - The color the human player will play as
    /// * `difficulty` - The difficulty level for the computer
    pub fn pvai(user_color: Color, difficulty: Difficulty) -> Self {
        let computer = PlayerConfig::Computer { difficulty };
        let (black_player, white_player) = match user_color {
            Color::Black => (PlayerConfig::Human, computer),
            Color::White => (computer, PlayerConfig::Human),
        };

        Self {
            black_player,
            white_player,
            time_limit: Some(DEFAULT_TIME_LIMIT),
        }
    }

    /// Computer against computer, for demos and benchmarking
    pub fn aivai(black_difficulty: Difficulty, white_difficulty: Difficulty) -> Self {
        Self {
            black_player: PlayerConfig::Computer { difficulty: black_difficulty },
            white_player: PlayerConfig::Computer { difficulty: white_difficulty },
            time_limit: Some(DEFAULT_TIME_LIMIT),
        }
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn player(&self, color: Color) -> PlayerConfig {
        match color {
            Color::Black => self.black_player,
            Color::White => self.white_player,
        }
    }

    /// The human's colour when exactly one side is human
    pub fn human_color(&self) -> Option<Color> {
        match (self.black_player, self.white_player) {
            (PlayerConfig::Human, PlayerConfig::Computer { .. }) => Some(Color::Black),
            (PlayerConfig::Computer { .. }, PlayerConfig::Human) => Some(Color::White),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalizationConfig {
    pub width: usize,
    pub height: usize,
    /// Time steps per trial
    pub steps: usize,
    /// Seed of the first trial; trial `i` uses `seed + i`
    pub seed: u64,
    pub sensor: SensorModel,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            steps: 100,
            seed: 0,
            sensor: SensorModel::default(),
        }
    }
}

impl LocalizationConfig {
    pub fn grid(&self) -> ConfigResult<Grid> {
        Grid::new(self.width, self.height)
    }
}

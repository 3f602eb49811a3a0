//! Robot localization with a hidden Markov model.
//!
//! The hidden state is a (position, heading) pair on a rectangular grid.
//! [`BeliefTracker`] runs the forward algorithm over the
//! [`TransitionMatrix`] and per-reading [`ObservationMatrix`]; the
//! [`simulation`] module supplies a ground-truth [`Robot`] and scoring.

mod filter;
mod grid;
mod motion;
mod robot;
mod sensor;
pub mod simulation;

pub use filter::*;
pub use grid::*;
pub use motion::*;
pub use robot::*;
pub use sensor::*;
pub use simulation::{render_heatmap, run_trial, run_trials, Simulation, StepRecord, TrialStats};

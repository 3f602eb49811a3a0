// AI Agent - Alpha-Beta Search
//
// This module implements the Reversi AI: depth-limited minimax with
// alpha-beta pruning, scored by the raw disc differential and bounded by a
// wall-clock deadline.
//
// Key features:
// - Deterministic (same position always gives same move)
// - Copy-on-branch boards, no shared mutable search state
// - Timeout propagates to the root instead of poisoning scores

mod alphabeta;
mod alphabeta_player;
mod evaluation;
mod search;
mod time_control;

pub use alphabeta::{alphabeta, SearchContext, SCORE_INFINITY};
pub use alphabeta_player::{
    time_limit_from_millis, AlphaBetaPlayer, Difficulty, DEFAULT_TIME_LIMIT, MAX_TIME_LIMIT_MS,
};
pub use evaluation::{evaluate, MAX_EVAL};
pub use search::{search, search_with_deadline, SearchResult};
pub use time_control::Deadline;

// Root Search
//
// Runs alpha-beta once to a fixed depth (no iterative deepening, no
// transposition table, no move ordering beyond row-major enumeration) and
// picks the root move with the best score. Ties keep the earlier move.

use std::time::Duration;

use log::{debug, warn};

use crate::game_repr::{Board, Color, Move};
use super::alphabeta::{alphabeta, SearchContext, SCORE_INFINITY};
use super::time_control::Deadline;

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score of `best_move` for the searching side (0 when no move was scored)
    pub score: i32,
    pub depth: u8,
    pub nodes_searched: u64,
    pub time_ms: u64,
    /// Root moves whose subtree finished before the deadline
    pub moves_completed: usize,
    pub timed_out: bool,
}

impl SearchResult {
    /// Create a new search result with no move found
    pub fn new(depth: u8) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth,
            nodes_searched: 0,
            time_ms: 0,
            moves_completed: 0,
            timed_out: false,
        }
    }
}

/// Search `board` for `color` and recommend a move
///
/// # Arguments
/// * `board` - Current position
/// * `color` - Side to move, and the side every leaf is scored for
/// * `max_depth` - Plies to look ahead (at least 1)
/// * `time_limit` - Optional wall-clock budget
///
/// # Returns
/// SearchResult with `best_move == None` only when `color` has no legal move.
/// If the budget runs out, root moves that did not finish are ignored; if none
/// finished, the first legal move is returned.
pub fn search(
    board: &Board,
    color: Color,
    max_depth: u8,
    time_limit: Option<Duration>,
) -> SearchResult {
    search_with_deadline(board, color, max_depth, Deadline::new(time_limit))
}

/// Same as [`search`] but with a caller-supplied deadline
pub fn search_with_deadline(
    board: &Board,
    color: Color,
    max_depth: u8,
    deadline: Deadline,
) -> SearchResult {
    let depth = max_depth.max(1);
    let mut result = SearchResult::new(depth);

    let moves = board.legal_moves(color);
    let Some(&first_move) = moves.first() else {
        return result;
    };

    let mut ctx = SearchContext::new(color, deadline);
    let mut alpha = -SCORE_INFINITY;
    let beta = SCORE_INFINITY;
    let mut best: Option<(Move, i32)> = None;

    for &mv in &moves {
        let Some(child) = board.with_move(color, mv) else {
            continue;
        };

        let opponent = color.opposite();
        let Some(child_score) = alphabeta(&mut ctx, &child, depth - 1, -beta, -alpha, opponent)
        else {
            result.timed_out = true;
            break;
        };
        let score = -child_score;
        result.moves_completed += 1;

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }

    let (best_move, score) = best.unwrap_or((first_move, 0));
    result.best_move = Some(best_move);
    result.score = score;
    result.nodes_searched = ctx.nodes;
    result.time_ms = ctx.deadline.elapsed().as_millis() as u64;

    if result.timed_out {
        warn!(
            "search cut short after {} ms: {}/{} root moves completed at depth {}",
            result.time_ms,
            result.moves_completed,
            moves.len(),
            depth
        );
    }
    debug!(
        "search {:?} depth {} score {} nodes {} time {} ms move {}",
        color, depth, result.score, result.nodes_searched, result.time_ms, best_move
    );

    result
}

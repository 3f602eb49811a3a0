// Alpha-Beta Search
//
// Minimax written in negamax form: each level negates the child score and the
// window. Leaf scores are always computed from the root player's point of view
// and then sign-flipped into the perspective of the side to move, so the
// maximizing plies belong to the root player and the minimizing plies to the
// opponent exactly as in a two-function minimax.
//
// Each child is searched on its own copy of the board (`Board` is Copy), so no
// state leaks between sibling branches.
//
// The deadline is polled before a node is expanded. Once it has passed, the
// recursion returns `None` all the way to the root instead of inventing a
// score, and the root discards the unfinished move.

use crate::game_repr::{Board, Color};
use super::evaluation::{evaluate, MAX_EVAL};
use super::time_control::Deadline;

/// Window bound. Strictly outside anything `evaluate` can produce.
pub const SCORE_INFINITY: i32 = 10_000;

const _: () = assert!(SCORE_INFINITY > MAX_EVAL);

/// State shared by every node of one search
#[derive(Debug)]
pub struct SearchContext {
    /// Player the search was started for; all leaf scores use this side
    pub root: Color,
    pub deadline: Deadline,
    pub nodes: u64,
}

impl SearchContext {
    pub fn new(root: Color, deadline: Deadline) -> Self {
        Self {
            root,
            deadline,
            nodes: 0,
        }
    }
}

/// Leaf score seen from `to_move`
fn leaf_score(board: &Board, to_move: Color, root: Color) -> i32 {
    let score = evaluate(board, root);
    if to_move == root {
        score
    } else {
        -score
    }
}

/// Alpha-beta search below `board`
///
/// # Arguments
///
/// * `ctx` - Root player, deadline and node counter
/// * `board` - Position to search (never modified)
/// * `depth` - Remaining plies; 0 means evaluate
/// * `alpha` - Lower bound for `to_move`
/// * `beta` - Upper bound for `to_move`
/// * `to_move` - Side to move at this node
///
/// # Returns
///
/// `Some(score)` from the perspective of `to_move` (fail-soft), or `None` if
/// the deadline passed before the subtree was finished.
pub fn alphabeta(
    ctx: &mut SearchContext,
    board: &Board,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    to_move: Color,
) -> Option<i32> {
    if ctx.deadline.expired() {
        return None;
    }
    ctx.nodes += 1;

    if depth == 0 {
        return Some(leaf_score(board, to_move, ctx.root));
    }

    // No passing: a side without moves ends the game
    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return Some(leaf_score(board, to_move, ctx.root));
    }

    let mut best_score = -SCORE_INFINITY;

    for mv in moves {
        let Some(child) = board.with_move(to_move, mv) else {
            continue;
        };

        let score = -alphabeta(ctx, &child, depth - 1, -beta, -alpha, to_move.opposite())?;

        if score > best_score {
            best_score = score;
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if beta <= alpha {
            break;
        }
    }

    Some(best_score)
}

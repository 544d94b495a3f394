//! Static evaluation for search leaves
//!
//! A position is scored from `player`'s point of view as
//! `own - OPPONENT_DISCOUNT * theirs`, where each side's total is:
//! - Straight run weights by how many stones the run still lacks
//! - Center proximity of each stone
//! - Friendly adjacency of each stone
//!
//! Bounced lines are not scored here; terminal detection in the search
//! handles them.

use crate::board::{Board, Player, Pos};

use super::patterns::EvalWeights;

/// Base directions; each run is scored once, from its first stone
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Evaluate the board for `player` against `opponent`.
#[must_use]
pub fn evaluate_board(
    board: &Board,
    player: Player,
    opponent: Player,
    win_length: usize,
    weights: &EvalWeights,
) -> i32 {
    let own = side_score(board, player, win_length, weights);
    let theirs = side_score(board, opponent, win_length, weights);
    (f64::from(own) - weights.opponent_discount * f64::from(theirs)).round() as i32
}

fn side_score(board: &Board, player: Player, win_length: usize, weights: &EvalWeights) -> i32 {
    board
        .stones(player)
        .map(|pos| {
            let lines: i32 = DIRECTIONS
                .iter()
                .map(|&(dr, dc)| evaluate_line(board, pos, dr, dc, player, win_length, weights))
                .sum();
            lines + positional(board, pos, player, weights)
        })
        .sum()
}

/// Score the run starting at `pos`, or 0 if `pos` is not its first stone.
fn evaluate_line(
    board: &Board,
    pos: Pos,
    dr: i32,
    dc: i32,
    player: Player,
    win_length: usize,
    weights: &EvalWeights,
) -> i32 {
    let size = board.size();
    let mut open_ends = 0u8;

    match pos.offset(-dr, -dc, size) {
        Some(prev) if board.get(prev).is(player) => return 0,
        Some(prev) if board.get(prev).is_empty() => open_ends += 1,
        _ => {}
    }

    let mut len = 1;
    let mut cur = pos;
    loop {
        match cur.offset(dr, dc, size) {
            Some(next) if board.get(next).is(player) => {
                len += 1;
                cur = next;
            }
            Some(next) => {
                if board.get(next).is_empty() {
                    open_ends += 1;
                }
                break;
            }
            None => break,
        }
    }

    weights.line_weight(win_length.saturating_sub(len), open_ends)
}

/// Center proximity plus friendly neighbours for one stone
fn positional(board: &Board, pos: Pos, player: Player, weights: &EvalWeights) -> i32 {
    let size = board.size();
    let reach = (size / 2) as i32;
    let dist = i32::from(pos.chebyshev(board.center()));
    let center = (reach - dist).max(0) * weights.center_weight;

    let mut friends = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if (dr, dc) == (0, 0) {
                continue;
            }
            if let Some(n) = pos.offset(dr, dc, size) {
                if board.get(n).is(player) {
                    friends += 1;
                }
            }
        }
    }

    center + friends * weights.adjacency_weight
}

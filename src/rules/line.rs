//! Line win detection with bounce and missing-teeth modifiers
//!
//! A line is a run of one player's stones along a base direction. With
//! bounce enabled, a diagonal run that reaches the board edge reflects:
//! the crossed direction component is negated and tracing continues from
//! the last in-bounds cell. At most two reflections are allowed per run
//! and no cell may be counted twice.

use crate::board::{Bitboard, Board, Cell, Player, Pos};

use super::RuleConfig;

/// Reflections allowed per traced run
const MAX_BOUNCES: usize = 2;

/// All 8 direction senses: the 4 base directions, forward then backward.
/// Bounce paths are not symmetric, so each sense is traced on its own.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),   // East
    (1, 0),   // South
    (1, 1),   // Diagonal SE
    (1, -1),  // Diagonal SW
    (0, -1),  // West
    (-1, 0),  // North
    (-1, -1), // Diagonal NW
    (-1, 1),  // Diagonal NE
];

/// A winning line found on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinLine {
    pub winner: Player,
    /// Cells in trace order, starting from the first stone of the run
    pub path: Vec<Pos>,
    /// Index into `path` of the cell where the first reflection happened
    pub bounce_index: Option<usize>,
    /// Index into `path` of the cell where the second reflection happened
    pub second_bounce_index: Option<usize>,
    /// Whole line on one row, one column or a great diagonal
    pub on_major_axis: bool,
}

/// Result of following one run from a start cell
#[derive(Debug, Clone)]
struct Trace {
    path: Vec<Pos>,
    bounces: [Option<usize>; MAX_BOUNCES],
    /// Empty cell that stopped the run, if the run ended on one
    frontier: Option<Pos>,
}

/// Follow the run of `player` stones from `start` in direction `(dr, dc)`.
///
/// Stops once `limit` cells are collected, at the first cell that is not
/// an unvisited `player` stone, or when a boundary hit cannot be reflected.
fn trace(
    board: &Board,
    player: Player,
    start: Pos,
    (mut dr, mut dc): (i32, i32),
    rules: RuleConfig,
    limit: usize,
) -> Trace {
    let size = board.size();
    let mut visited = Bitboard::new();
    visited.insert(start.to_index(size));

    let mut path = vec![start];
    let mut bounces = [None; MAX_BOUNCES];
    let mut bounce_count = 0;
    // Cells advanced since the start or the last reflection
    let mut steps = 0;
    let mut cur = start;
    let mut frontier = None;

    while path.len() < limit {
        let next = match cur.offset(dr, dc, size) {
            Some(p) => Some(p),
            None => {
                let diagonal = dr != 0 && dc != 0;
                if !rules.bounce || !diagonal || steps == 0 || bounce_count == MAX_BOUNCES {
                    None
                } else {
                    let r = cur.row as i32 + dr;
                    let c = cur.col as i32 + dc;
                    if r < 0 || r >= size as i32 {
                        dr = -dr;
                    }
                    if c < 0 || c >= size as i32 {
                        dc = -dc;
                    }
                    bounces[bounce_count] = Some(path.len() - 1);
                    bounce_count += 1;
                    steps = 0;
                    cur.offset(dr, dc, size)
                }
            }
        };

        let Some(next) = next else { break };
        match board.get(next) {
            Cell::Taken(p) if p == player && visited.insert(next.to_index(size)) => {
                path.push(next);
                cur = next;
                steps += 1;
            }
            Cell::Empty => {
                frontier = Some(next);
                break;
            }
            _ => break,
        }
    }

    // A reflection at the final cell did not contribute to the run
    let last = path.len() - 1;
    for b in bounces.iter_mut() {
        if *b == Some(last) && frontier.is_none() {
            *b = None;
        }
    }

    Trace {
        path,
        bounces,
        frontier,
    }
}

/// True when the path fails the missing-teeth rule.
///
/// Paths shorter than 3 are treated as containing missing teeth. Longer
/// paths fail when any consecutive pair is not at Chebyshev distance
/// exactly 1. Only step adjacency within the traced path is checked; empty
/// cells elsewhere on the enclosing line are not considered.
pub fn has_missing_teeth(path: &[Pos]) -> bool {
    if path.len() < 3 {
        return true;
    }
    path.windows(2).any(|w| w[0].chebyshev(w[1]) != 1)
}

/// True when every cell shares a row, shares a column, or lies on one of
/// the two board-spanning diagonals.
pub fn is_major_axis(path: &[Pos], size: usize) -> bool {
    let Some(first) = path.first() else {
        return false;
    };
    path.iter().all(|p| p.row == first.row)
        || path.iter().all(|p| p.col == first.col)
        || path.iter().all(|p| p.row == p.col)
        || path.iter().all(|p| p.row as usize + p.col as usize == size - 1)
}

fn to_win_line(board: &Board, player: Player, t: Trace) -> WinLine {
    let on_major_axis = is_major_axis(&t.path, board.size());
    WinLine {
        winner: player,
        path: t.path,
        bounce_index: t.bounces[0],
        second_bounce_index: t.bounces[1],
        on_major_axis,
    }
}

/// Scan every run of `player` and return the first winning one that
/// satisfies `accept`.
fn scan_lines(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    win_length: usize,
    accept: impl Fn(&[Pos]) -> bool,
) -> Option<WinLine> {
    for start in board.stones(player) {
        for &dir in &DIRECTIONS {
            let t = trace(board, player, start, dir, rules, win_length);
            if t.path.len() < win_length {
                continue;
            }
            if rules.missing_teeth && has_missing_teeth(&t.path) {
                continue;
            }
            if accept(&t.path) {
                return Some(to_win_line(board, player, t));
            }
        }
    }
    None
}

/// Find the first winning line on the board, checking player A then B.
pub fn find_winning_line(board: &Board, rules: RuleConfig, win_length: usize) -> Option<WinLine> {
    [Player::A, Player::B]
        .into_iter()
        .find_map(|p| scan_lines(board, p, rules, win_length, |_| true))
}

/// Check for a winner
///
/// Returns `Some(Player)` if either side has a qualifying line.
pub fn check_game_winner(board: &Board, rules: RuleConfig, win_length: usize) -> Option<Player> {
    find_winning_line(board, rules, win_length).map(|line| line.winner)
}

/// Find a winning line of `player` that passes through `pos`.
pub fn find_line_through(
    board: &Board,
    player: Player,
    pos: Pos,
    rules: RuleConfig,
    win_length: usize,
) -> Option<WinLine> {
    if !board.get(pos).is(player) {
        return None;
    }
    scan_lines(board, player, rules, win_length, |path| path.contains(&pos))
}

/// Find an Empty cell that completes a winning line for `player`.
///
/// Runs are traced from every stone the player owns in all 8 senses; the
/// Empty cell each run stops on is a candidate. Candidates are confirmed
/// by placing the stone on a scratch copy, so gapped shapes such as
/// `XX_XX` are found from either side of the gap.
pub fn find_winning_move(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    win_length: usize,
) -> Option<Pos> {
    let size = board.size();
    let mut scratch = board.snapshot();
    let mut tried = Bitboard::new();

    for start in board.stones(player) {
        for &dir in &DIRECTIONS {
            let t = trace(board, player, start, dir, rules, size * size);
            let Some(empty) = t.frontier else { continue };
            if !tried.insert(empty.to_index(size)) {
                continue;
            }
            let Some(placed) = scratch.play(empty, player) else {
                continue;
            };
            let wins = find_line_through(&placed, player, empty, rules, win_length).is_some();
            drop(placed);
            if wins {
                return Some(empty);
            }
        }
    }
    None
}

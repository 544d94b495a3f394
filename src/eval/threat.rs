//! Threat heuristics for move ordering and the shallow strategies
//!
//! All functions here consider straight lines only and treat `pos` as if
//! `player` had already played there; the board is never mutated.

use crate::board::{Board, Player, Pos};

use super::patterns::ThreatPriorities;

/// Direction vectors for line checking (4 directions)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Diagonal directions scanned by `score_threat_potential`
const DIAGONALS: [(i32, i32); 2] = [(1, 1), (1, -1)];

/// How far `score_threat_potential` looks each way
const POTENTIAL_REACH: i32 = 4;

const POTENTIAL_PER_STONE: i32 = 5;
const POTENTIAL_GAPS_BONUS: i32 = 10;
const POTENTIAL_GREAT_DIAGONAL_BONUS: i32 = 15;

/// Consecutive run through a cell along one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    len: usize,
    open_ends: u8,
}

fn run_through(board: &Board, pos: Pos, player: Player, dr: i32, dc: i32) -> Run {
    let size = board.size();
    let mut run = Run {
        len: 1,
        open_ends: 0,
    };

    for (sr, sc) in [(dr, dc), (-dr, -dc)] {
        let mut cur = pos;
        loop {
            match cur.offset(sr, sc, size) {
                Some(next) if board.get(next).is(player) => {
                    run.len += 1;
                    cur = next;
                }
                Some(next) => {
                    if board.get(next).is_empty() {
                        run.open_ends += 1;
                    }
                    break;
                }
                None => break,
            }
        }
    }

    run
}

#[inline]
fn is_threat(run: Run, win_length: usize) -> bool {
    run.len >= win_length || (run.len + 2 >= win_length && run.open_ends >= 1)
}

/// Diagonal potential of a cell for `player`.
///
/// For each diagonal through `pos`, scan up to four cells each way until
/// the edge or an opponent stone, counting own stones and empty gaps.
#[must_use]
pub fn score_threat_potential(board: &Board, pos: Pos, player: Player) -> i32 {
    let size = board.size();
    let mut score = 0;

    for &(dr, dc) in &DIAGONALS {
        let mut count = 0;
        let mut gaps = 0;

        for (sr, sc) in [(dr, dc), (-dr, -dc)] {
            let mut cur = pos;
            for _ in 0..POTENTIAL_REACH {
                let Some(next) = cur.offset(sr, sc, size) else {
                    break;
                };
                match board.owner(next) {
                    Some(p) if p == player => count += 1,
                    Some(_) => break,
                    None => gaps += 1,
                }
                cur = next;
            }
        }

        if count >= 2 {
            score += POTENTIAL_PER_STONE * count;
        }
        if gaps >= 2 {
            score += POTENTIAL_GAPS_BONUS;
        }
        let great = if dc == 1 {
            pos.row == pos.col
        } else {
            pos.row as usize + pos.col as usize == size - 1
        };
        if great {
            score += POTENTIAL_GREAT_DIAGONAL_BONUS;
        }
    }

    score
}

/// Number of directions in which playing `pos` leaves a run of at least
/// `win_length - 2` with an open end, or a completed run.
#[must_use]
pub fn count_threats(board: &Board, pos: Pos, player: Player, win_length: usize) -> usize {
    DIRECTIONS
        .iter()
        .filter(|&&(dr, dc)| is_threat(run_through(board, pos, player, dr, dc), win_length))
        .count()
}

/// First empty cell (row-major) creating the most threats, if it creates
/// at least two.
#[must_use]
pub fn find_advanced_threat_move(board: &Board, player: Player, win_length: usize) -> Option<Pos> {
    let mut best: Option<(usize, Pos)> = None;

    for pos in board.positions().filter(|&p| board.is_empty(p)) {
        let threats = count_threats(board, pos, player, win_length);
        if best.map_or(true, |(most, _)| threats > most) {
            best = Some((threats, pos));
        }
    }

    best.filter(|&(threats, _)| threats >= 2).map(|(_, pos)| pos)
}

/// Whether playing `pos` makes exactly four in a row with both flanks empty.
#[must_use]
pub fn creates_open_four(board: &Board, pos: Pos, player: Player) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let run = run_through(board, pos, player, dr, dc);
        run.len == 4 && run.open_ends == 2
    })
}

/// Strongest attacking level `player` gets from `pos`
fn threat_level(
    board: &Board,
    pos: Pos,
    player: Player,
    win_length: usize,
    p: &ThreatPriorities,
) -> i32 {
    let mut level = 0;
    let mut threats = 0;

    for &(dr, dc) in &DIRECTIONS {
        let run = run_through(board, pos, player, dr, dc);
        if is_threat(run, win_length) {
            threats += 1;
        }
        let value = match (win_length.saturating_sub(run.len), run.open_ends) {
            (0, _) => p.immediate_win,
            (_, 0) => 0,
            (1, _) => p.immediate_win,
            (2, _) => p.developing_threat,
            (3, 2) => p.potential_threat,
            (3, _) => p.early_threat,
            _ => 0,
        };
        level = level.max(value);
    }

    if threats >= 2 {
        level = level.max(p.forced_win);
    }
    level
}

/// Ordering priority of `pos` for `player`.
///
/// Own winning chances come first. An opponent win at `pos` maps to the
/// critical block level; other opponent threats only count in full once
/// they reach the critical threat threshold.
#[must_use]
pub fn move_priority(
    board: &Board,
    pos: Pos,
    player: Player,
    win_length: usize,
    priorities: &ThreatPriorities,
) -> i32 {
    let attack = threat_level(board, pos, player, win_length, priorities);
    if attack >= priorities.immediate_win {
        return attack;
    }

    let defense = threat_level(board, pos, player.opponent(), win_length, priorities);
    let block = if defense >= priorities.immediate_win {
        priorities.critical_block_threshold
    } else if defense >= priorities.critical_threat_threshold {
        defense
    } else {
        defense / 2
    };

    attack.max(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        Board::parse(diagram).unwrap()
    }

    #[test]
    fn test_threat_potential_empty_board() {
        let b = Board::standard();
        // Corner: main diagonal gaps + great diagonal; anti-diagonal leaves the board
        assert_eq!(score_threat_potential(&b, Pos::new(0, 0), Player::A), 25);
        // (2,3) lies on the anti-diagonal only
        assert_eq!(score_threat_potential(&b, Pos::new(2, 3), Player::A), 35);
    }

    #[test]
    fn test_threat_potential_counts_stones() {
        let b = board(
            "X.....
             ......
             ......
             ...X..
             ......
             ......",
        );
        // Main diagonal through (2,2): two own stones, two gaps, great diagonal
        // Anti-diagonal through (2,2): gaps only
        assert_eq!(score_threat_potential(&b, Pos::new(2, 2), Player::A), 10 + 10 + 15 + 10);
    }

    #[test]
    fn test_threat_potential_stops_at_opponent() {
        let b = board(
            "X.....
             .O....
             ......
             ......
             ......
             ......",
        );
        let with_block = score_threat_potential(&b, Pos::new(2, 2), Player::A);
        let open = score_threat_potential(&Board::standard(), Pos::new(2, 2), Player::A);
        assert_eq!(with_block, open);
    }

    #[test]
    fn test_count_threats_and_advanced_move() {
        let b = board(
            "...X..
             ...X..
             .XX...
             ......
             ......
             ......",
        );
        assert_eq!(count_threats(&b, Pos::new(2, 3), Player::A, 5), 2);
        assert_eq!(count_threats(&b, Pos::new(2, 0), Player::A, 5), 1);
        assert_eq!(find_advanced_threat_move(&b, Player::A, 5), Some(Pos::new(2, 3)));
        assert_eq!(find_advanced_threat_move(&b, Player::B, 5), None);
    }

    #[test]
    fn test_creates_open_four() {
        let b = board(
            ".XXX..
             ......
             ......
             ......
             ......
             ......",
        );
        assert!(creates_open_four(&b, Pos::new(0, 4), Player::A));
        // Left flank is the board edge
        assert!(!creates_open_four(&b, Pos::new(0, 0), Player::A));
        assert!(!creates_open_four(&b, Pos::new(0, 4), Player::B));
    }

    #[test]
    fn test_move_priority_win_and_block() {
        let b = board(
            ".XXXX.
             ......
             ......
             ......
             ......
             ......",
        );
        let p = ThreatPriorities::default();
        assert_eq!(move_priority(&b, Pos::new(0, 0), Player::A, 5, &p), 100);
        assert_eq!(move_priority(&b, Pos::new(0, 5), Player::B, 5, &p), 95);
        assert_eq!(move_priority(&Board::standard(), Pos::new(3, 3), Player::A, 5, &p), 0);
    }

    #[test]
    fn test_move_priority_levels() {
        let b = board(
            "......
             .XX...
             ......
             ......
             ......
             ......",
        );
        let p = ThreatPriorities::default();
        // Three with both ends open
        assert_eq!(move_priority(&b, Pos::new(1, 3), Player::A, 5, &p), 85);
        // Two with both ends open, then a cell touching nothing
        let lone = board(
            "......
             ......
             ..X...
             ......
             ......
             ......",
        );
        assert_eq!(move_priority(&lone, Pos::new(2, 3), Player::A, 5, &p), 50);
        assert_eq!(move_priority(&lone, Pos::new(2, 0), Player::A, 5, &p), 0);
    }
}

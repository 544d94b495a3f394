//! Edge-to-edge connection win
//!
//! A player wins by linking two opposite board edges with a chain of
//! 8-connected stones. The chain may contain at most one contiguous run of
//! diagonal steps. The search is a BFS over `(cell, DiagonalState)` pairs,
//! so the same cell may be visited once per state.

use std::collections::VecDeque;

use crate::board::{Board, Player, Pos};

/// 8-neighbourhood, orthogonal steps first
const NEIGHBORS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Pair of opposite edges a chain must connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgePair {
    /// Column 0 to column N-1
    LeftRight,
    /// Row 0 to row N-1
    TopBottom,
}

impl EdgePair {
    pub const ALL: [EdgePair; 2] = [EdgePair::LeftRight, EdgePair::TopBottom];

    #[inline]
    fn source(self, i: usize) -> Pos {
        match self {
            EdgePair::LeftRight => Pos::new(i as u8, 0),
            EdgePair::TopBottom => Pos::new(0, i as u8),
        }
    }

    #[inline]
    fn is_target(self, pos: Pos, size: usize) -> bool {
        match self {
            EdgePair::LeftRight => pos.col as usize == size - 1,
            EdgePair::TopBottom => pos.row as usize == size - 1,
        }
    }
}

/// How much of the single diagonal allowance a chain has used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiagonalState {
    None = 0,
    InProgress = 1,
    Exhausted = 2,
}

impl DiagonalState {
    const COUNT: usize = 3;

    fn from_index(i: usize) -> Self {
        match i {
            0 => DiagonalState::None,
            1 => DiagonalState::InProgress,
            _ => DiagonalState::Exhausted,
        }
    }

    /// State after taking a step, or `None` if the step is not allowed
    fn step(self, diagonal: bool) -> Option<Self> {
        match (self, diagonal) {
            (DiagonalState::Exhausted, true) => None,
            (_, true) => Some(DiagonalState::InProgress),
            (DiagonalState::InProgress, false) => Some(DiagonalState::Exhausted),
            (state, false) => Some(state),
        }
    }
}

/// A connecting chain found on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWin {
    pub winner: Player,
    /// Cells from the source edge to the target edge
    pub path: Vec<Pos>,
}

/// Search for a chain of `player` stones across one edge pair.
///
/// BFS yields a chain with the fewest steps.
pub fn check_edge_pair(board: &Board, player: Player, edge: EdgePair) -> Option<PathWin> {
    let size = board.size();
    let key = |pos: Pos, state: DiagonalState| {
        pos.to_index(size) * DiagonalState::COUNT + state as usize
    };

    let states = size * size * DiagonalState::COUNT;
    let mut visited = vec![false; states];
    let mut parent: Vec<Option<usize>> = vec![None; states];
    let mut queue = VecDeque::with_capacity(states);

    for i in 0..size {
        let start = edge.source(i);
        if board.get(start).is(player) {
            let k = key(start, DiagonalState::None);
            visited[k] = true;
            queue.push_back(k);
        }
    }

    while let Some(k) = queue.pop_front() {
        let pos = Pos::from_index(k / DiagonalState::COUNT, size);
        let state = DiagonalState::from_index(k % DiagonalState::COUNT);

        if edge.is_target(pos, size) {
            return Some(PathWin {
                winner: player,
                path: rebuild_path(&parent, k, size),
            });
        }

        for &(dr, dc) in &NEIGHBORS {
            let Some(next) = pos.offset(dr, dc, size) else {
                continue;
            };
            if !board.get(next).is(player) {
                continue;
            }
            let Some(next_state) = state.step(dr != 0 && dc != 0) else {
                continue;
            };
            let nk = key(next, next_state);
            if !visited[nk] {
                visited[nk] = true;
                parent[nk] = Some(k);
                queue.push_back(nk);
            }
        }
    }

    None
}

fn rebuild_path(parent: &[Option<usize>], mut k: usize, size: usize) -> Vec<Pos> {
    let mut path = vec![Pos::from_index(k / DiagonalState::COUNT, size)];
    while let Some(prev) = parent[k] {
        path.push(Pos::from_index(prev / DiagonalState::COUNT, size));
        k = prev;
    }
    path.reverse();
    path
}

/// Check both edge pairs for `player`, left-right first.
pub fn check_win_for_player(board: &Board, player: Player) -> Option<PathWin> {
    EdgePair::ALL
        .into_iter()
        .find_map(|edge| check_edge_pair(board, player, edge))
}

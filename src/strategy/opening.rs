//! Opening book for the advanced tier
//!
//! Order of preference:
//! 1. The center
//! 2. Block an opponent building on a great diagonal
//! 3. A random cell two steps from the center
//! 4. The empty cell nearest the center
//! 5. Any empty cell

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Player, Pos};

use super::random::random_move;

/// Opponent stones on one great diagonal before the book blocks it
const DIAGONAL_BLOCK_THRESHOLD: usize = 2;

/// Chebyshev distance of the preferred ring around the center
const RING_DISTANCE: u8 = 2;

/// Book move for `player`, or `None` on a full board.
pub fn opening_move<R: Rng + ?Sized>(board: &Board, player: Player, rng: &mut R) -> Option<Pos> {
    let center = board.center();
    if board.is_empty(center) {
        return Some(center);
    }

    if let Some(pos) = block_great_diagonal(board, player.opponent()) {
        return Some(pos);
    }

    let ring: Vec<Pos> = board
        .empty_positions()
        .into_iter()
        .filter(|p| p.chebyshev(center) == RING_DISTANCE)
        .collect();
    if let Some(&pos) = ring.choose(rng) {
        return Some(pos);
    }

    board
        .empty_positions()
        .into_iter()
        .min_by_key(|p| p.chebyshev(center))
        .or_else(|| random_move(board, rng))
}

/// Cells of the two great diagonals, each from row 0 down
fn great_diagonals(size: usize) -> [Vec<Pos>; 2] {
    let main = (0..size).map(|i| Pos::new(i as u8, i as u8)).collect();
    let anti = (0..size)
        .map(|i| Pos::new(i as u8, (size - 1 - i) as u8))
        .collect();
    [main, anti]
}

/// The next open cell on a great diagonal holding at least two opponent
/// stones: the first empty cell touching one of them, else the first empty
/// cell on that diagonal.
fn block_great_diagonal(board: &Board, opponent: Player) -> Option<Pos> {
    for diagonal in great_diagonals(board.size()) {
        let theirs = diagonal.iter().filter(|&&p| board.get(p).is(opponent)).count();
        if theirs < DIAGONAL_BLOCK_THRESHOLD {
            continue;
        }

        let touching = diagonal.iter().enumerate().find(|&(i, &p)| {
            board.is_empty(p)
                && ((i > 0 && board.get(diagonal[i - 1]).is(opponent))
                    || diagonal.get(i + 1).is_some_and(|&n| board.get(n).is(opponent)))
        });
        if let Some((_, &pos)) = touching {
            return Some(pos);
        }
        if let Some(&pos) = diagonal.iter().find(|&&p| board.is_empty(p)) {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(diagram: &str) -> Board {
        Board::parse(diagram).unwrap()
    }

    #[test]
    fn test_opening_takes_center() {
        let mut rng = StdRng::seed_from_u64(0);
        let b = Board::standard();
        assert_eq!(opening_move(&b, Player::A, &mut rng), Some(Pos::new(3, 3)));
    }

    #[test]
    fn test_opening_blocks_great_diagonal() {
        let b = board(
            "O.....
             .O....
             ......
             ...X..
             ......
             ......",
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(opening_move(&b, Player::A, &mut rng), Some(Pos::new(2, 2)));
    }

    #[test]
    fn test_opening_blocks_anti_diagonal() {
        let b = board(
            "......
             ......
             ......
             ..OX..
             .O....
             ......",
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(opening_move(&b, Player::A, &mut rng), Some(Pos::new(2, 3)));
    }

    #[test]
    fn test_opening_ring_around_center() {
        let b = board(
            "......
             ......
             ......
             ...O..
             ......
             ......",
        );
        let center = b.center();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pos = opening_move(&b, Player::A, &mut rng).unwrap();
            assert_eq!(pos.chebyshev(center), 2);
            assert!(b.is_empty(pos));
        }
    }

    #[test]
    fn test_opening_nearest_when_no_ring() {
        // 3x3: nothing lies two steps from the center
        let b = board(
            "...
             .X.
             ...",
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(opening_move(&b, Player::B, &mut rng), Some(Pos::new(0, 0)));
    }
}

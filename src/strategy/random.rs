//! Uniformly random play

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Pos};

/// A uniformly random empty cell, or `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Pos> {
    board.empty_positions().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_move_is_empty_cell() {
        let mut board = Board::standard();
        board.place(0, 0, Player::A);
        board.place(3, 3, Player::B);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let pos = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_random_move_last_cell() {
        let mut board = Board::new(3).unwrap();
        for pos in board.positions().collect::<Vec<_>>() {
            if pos != Pos::new(2, 1) {
                board.place_at(pos, Player::A);
            }
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_move(&board, &mut rng), Some(Pos::new(2, 1)));
        board.place(2, 1, Player::B);
        assert_eq!(random_move(&board, &mut rng), None);
    }
}

//! Game phase and phase-dependent search depth

use crate::board::Board;
use crate::config::SearchConfig;
use crate::rules::RuleConfig;

/// Coarse stage of the game by fill ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

impl GamePhase {
    /// Phase of `board`: early below `early_phase_threshold`, late from
    /// `late_phase_threshold` on.
    #[must_use]
    pub fn of(board: &Board, search: &SearchConfig) -> Self {
        let fill = board.fill_ratio();
        if fill < search.early_phase_threshold {
            GamePhase::Early
        } else if fill < search.late_phase_threshold {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    #[must_use]
    pub fn depth(self, search: &SearchConfig) -> u8 {
        match self {
            GamePhase::Early => search.early_depth,
            GamePhase::Mid => search.mid_depth,
            GamePhase::Late => search.late_depth,
        }
    }
}

/// Search depth for the advanced tier. Expensive rule sets lose one ply.
#[must_use]
pub fn phase_depth(board: &Board, rules: RuleConfig, search: &SearchConfig) -> u8 {
    let depth = GamePhase::of(board, search).depth(search);
    if rules.is_expensive() {
        depth.saturating_sub(1).max(1)
    } else {
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::config::EngineConfig;
    use crate::search::root_depth;

    #[test]
    fn test_phase_boundaries() {
        let search = SearchConfig::default();
        let mut board = Board::standard();
        assert_eq!(GamePhase::of(&board, &search), GamePhase::Early);

        // 8/36 = 0.22
        for i in 0..8 {
            board.place(i / 6, i % 6, Player::A);
        }
        assert_eq!(GamePhase::of(&board, &search), GamePhase::Mid);

        // 26/36 = 0.72
        for i in 8..26 {
            board.place(i / 6, i % 6, Player::B);
        }
        assert_eq!(GamePhase::of(&board, &search), GamePhase::Late);
    }

    #[test]
    fn test_phase_depths() {
        let search = SearchConfig::default();
        let board = Board::standard();
        assert_eq!(phase_depth(&board, RuleConfig::STRAIGHT, &search), 3);
        assert_eq!(phase_depth(&board, RuleConfig::new(true, true), &search), 2);
        assert_eq!(GamePhase::Mid.depth(&search), 4);
        assert_eq!(GamePhase::Late.depth(&search), 5);
    }

    #[test]
    fn test_phase_depth_never_below_root_depth() {
        let config = EngineConfig::default();
        let mut boards = vec![Board::standard()];
        let mut board = Board::standard();
        for i in 0..30 {
            let player = if i % 2 == 0 { Player::A } else { Player::B };
            board.place(i / 6, i % 6, player);
            boards.push(board.clone());
        }

        let phases: Vec<GamePhase> = boards
            .iter()
            .map(|b| GamePhase::of(b, &config.search))
            .collect();
        for phase in [GamePhase::Early, GamePhase::Mid, GamePhase::Late] {
            assert!(phases.contains(&phase));
        }

        for rules in [
            RuleConfig::STRAIGHT,
            RuleConfig::new(true, false),
            RuleConfig::new(false, true),
            RuleConfig::new(true, true),
        ] {
            for b in &boards {
                assert!(
                    phase_depth(b, rules, &config.search) >= root_depth(rules, &config),
                    "{rules:?} at fill {}",
                    b.fill_ratio()
                );
            }
        }
    }
}

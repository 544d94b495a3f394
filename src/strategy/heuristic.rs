//! Shallow heuristic move scoring for the medium and hard tiers

use log::trace;

use crate::board::{Board, Player, Pos};
use crate::config::EngineConfig;
use crate::eval::{move_priority, score_threat_potential};
use crate::rules::{find_line_through, RuleConfig};
use crate::search::candidate_moves;

/// Weight of one threat-priority point against threat potential
const PRIORITY_SCALE: i32 = 10;

/// Best move for `player` by shallow lookahead, with its score.
///
/// Depth 1 scores each candidate on its own. Depth 2 subtracts the best
/// reply the opponent has afterwards. Ties keep the first candidate in
/// row-major order.
#[must_use]
pub fn heuristic_move(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
    depth: u8,
) -> Option<(Pos, i32)> {
    let mut work = board.snapshot();
    let mut best: Option<(Pos, i32)> = None;

    for pos in candidate_moves(board) {
        let own = move_score(&mut work, pos, player, rules, config);
        let score = if depth >= 2 && own < config.eval.win {
            own.saturating_sub(best_reply(&mut work, pos, player, rules, config))
        } else {
            own
        };
        trace!("heuristic {pos}: {score}");

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }

    best
}

/// Highest score the opponent can reach after `player` takes `pos`
fn best_reply(
    work: &mut Board,
    pos: Pos,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
) -> i32 {
    let Some(mut placed) = work.play(pos, player) else {
        return 0;
    };
    let replies = candidate_moves(&placed);
    replies
        .into_iter()
        .map(|reply| move_score(&mut placed, reply, player.opponent(), rules, config))
        .max()
        .unwrap_or(0)
}

/// Static value of `player` taking the empty cell `pos`.
///
/// A completed line is worth `eval.win`; otherwise threat priority
/// dominates, with diagonal potential and center proximity breaking ties.
fn move_score(
    work: &mut Board,
    pos: Pos,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
) -> i32 {
    let win_length = config.win_length;
    {
        let Some(placed) = work.play(pos, player) else {
            return i32::MIN;
        };
        if find_line_through(&placed, player, pos, rules, win_length).is_some() {
            return config.eval.win;
        }
    }

    let priority = move_priority(work, pos, player, win_length, &config.threats);
    let potential = score_threat_potential(work, pos, player);
    let reach = (work.size() / 2) as i32;
    let center = (reach - i32::from(pos.chebyshev(work.center()))).max(0);

    priority * PRIORITY_SCALE + potential + center * config.eval.center_weight
}

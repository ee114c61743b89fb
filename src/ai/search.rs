use std::collections::BTreeSet;

use tracing::debug;
use web_time::Instant;

use crate::ai::{Choice, Strategy, disc_differential};
use crate::board::Board;
use crate::topology::Topology;
use crate::types::Player;

/// Depth-bounded minimax over cloned boards, in negamax form.
///
/// Each node scores from its own mover's point of view and the parent negates,
/// which is the usual max-at-mover / min-at-opponent alternation. When the
/// horizon is reached the leaf strategy of whoever is to move supplies the
/// score instead of further expansion.
pub struct Minimax<T: Topology> {
    max_depth: u8,
    leaf: Box<dyn Strategy<T>>,
    opponent: Box<dyn Strategy<T>>,
}

impl<T: Topology> Minimax<T> {
    /// `leaf` scores horizon nodes where the searching player moves;
    /// `opponent` is what the other side is assumed to play there.
    pub fn new(max_depth: u8, leaf: Box<dyn Strategy<T>>, opponent: Box<dyn Strategy<T>>) -> Self {
        Self {
            max_depth,
            leaf,
            opponent,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    fn negamax(
        &self,
        board: &Board<T>,
        root: Player,
        mover: Player,
        depth: u8,
        candidates: &BTreeSet<T::Coord>,
        nodes: &mut u64,
    ) -> Choice<T::Coord> {
        *nodes += 1;

        if candidates.is_empty() {
            // Forced pass: the opponent moves at the same depth.
            let opp = mover.opponent();
            let replies = board.legal_moves(opp);
            if replies.is_empty() {
                return static_choice(board, mover);
            }
            let child = self.negamax(board, root, opp, depth, &replies, nodes);
            return Choice {
                moves: Vec::new(),
                score: -child.score,
            };
        }

        if depth >= self.max_depth {
            let leaf = if mover == root {
                &self.leaf
            } else {
                &self.opponent
            };
            return leaf
                .evaluate(board, mover, candidates)
                .unwrap_or_else(|| static_choice(board, mover));
        }

        let mut best = None;
        for &mv in candidates {
            let Ok(next) = board.trial(mover, mv) else {
                continue;
            };
            let opp = mover.opponent();
            let replies = next.legal_moves(opp);
            let child = self.negamax(&next, root, opp, depth + 1, &replies, nodes);
            Choice::offer(&mut best, mv, -child.score);
        }

        best.unwrap_or_else(|| static_choice(board, mover))
    }
}

impl<T: Topology> Strategy<T> for Minimax<T> {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        if candidates.is_empty() {
            return None;
        }

        let started = Instant::now();
        let mut nodes = 0u64;
        let choice = self.negamax(board, player, player, 0, candidates, &mut nodes);

        debug!(
            depth = self.max_depth,
            nodes,
            score = choice.score,
            tied = choice.moves.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "minimax finished"
        );

        (!choice.moves.is_empty()).then_some(choice)
    }
}

/// Final-position score with no move attached.
fn static_choice<T: Topology>(board: &Board<T>, mover: Player) -> Choice<T::Coord> {
    Choice {
        moves: Vec::new(),
        score: disc_differential(board, mover),
    }
}

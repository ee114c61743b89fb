//! Move-selection strategies for computer players.

pub mod heuristic;
pub mod search;

use std::collections::BTreeSet;

use crate::board::Board;
use crate::error::StrategyError;
use crate::topology::Topology;
use crate::types::{Disc, Player};

pub use heuristic::{AvoidCorners, CaptureCorners, CaptureMost, CornersOnly, TryMany};
pub use search::Minimax;

/// The best moves a strategy found, all sharing `score`.
///
/// Scores are from the deciding player's point of view: their disc count
/// minus the opponent's after the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<C> {
    /// In tie-break order.
    pub moves: Vec<C>,
    pub score: i64,
}

impl<C: Copy> Choice<C> {
    /// Folds one scored move into the running best, keeping ties.
    pub(crate) fn offer(best: &mut Option<Self>, mv: C, score: i64) {
        match best {
            Some(choice) if score == choice.score => choice.moves.push(mv),
            Some(choice) if score < choice.score => {}
            _ => {
                *best = Some(Choice {
                    moves: vec![mv],
                    score,
                })
            }
        }
    }
}

pub trait Strategy<T: Topology>: Send + Sync {
    /// Ranks `candidates` for `player`. `None` means the strategy declines,
    /// letting a fallback chain move on.
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>>;

    /// Picks exactly one move for `player` among all legal ones.
    fn choose(&self, board: &Board<T>, player: Player) -> Result<T::Coord, StrategyError> {
        let legal = board.legal_moves(player);
        let choice = self
            .evaluate(board, player, &legal)
            .ok_or(StrategyError::NoCandidate)?;
        break_tie(&choice.moves)
    }
}

impl<T: Topology, S: Strategy<T> + ?Sized> Strategy<T> for Box<S> {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        (**self).evaluate(board, player, candidates)
    }
}

/// Closest to the top-left wins: smallest row, then smallest column.
pub fn break_tie<C: Copy + Ord>(candidates: &[C]) -> Result<C, StrategyError> {
    candidates
        .iter()
        .min()
        .copied()
        .ok_or(StrategyError::NoCandidate)
}

/// `player`'s disc count minus the opponent's.
pub fn disc_differential<T: Topology>(board: &Board<T>, player: Player) -> i64 {
    let mine = board.score(player.disc()) as i64;
    let theirs = board.score(player.opponent().disc()) as i64;
    mine - theirs
}

use std::collections::BTreeSet;

use tracing::trace;

use crate::ai::{Choice, Strategy, disc_differential};
use crate::board::Board;
use crate::topology::Topology;
use crate::types::Player;

/// Greedy: the move leaving the mover with the most discs.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureMost;

impl<T: Topology> Strategy<T> for CaptureMost {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        let first = *candidates.iter().next()?;
        let mut best = None;

        for &mv in candidates {
            let Ok(next) = board.trial(player, mv) else {
                continue;
            };
            Choice::offer(&mut best, mv, disc_differential(&next, player));
        }

        // Nothing scored: hand back the first candidate rather than declining.
        Some(best.unwrap_or_else(|| Choice {
            moves: vec![first],
            score: disc_differential(board, player),
        }))
    }
}

/// Plays a corner when one is available, declines otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct CornersOnly;

impl<T: Topology> Strategy<T> for CornersOnly {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        let shape = board.shape();
        let corners: BTreeSet<T::Coord> = candidates
            .iter()
            .copied()
            .filter(|&c| shape.is_corner(c))
            .collect();
        if corners.is_empty() {
            return None;
        }
        trace!(corners = corners.len(), "corner available");
        CaptureMost.evaluate(board, player, &corners)
    }
}

/// Greedy, but never next to a corner unless nothing else is legal.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvoidCorners;

impl<T: Topology> Strategy<T> for AvoidCorners {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        let x_squares = board.shape().x_squares();
        let safe: BTreeSet<T::Coord> = candidates.difference(x_squares).copied().collect();
        if safe.is_empty() {
            CaptureMost.evaluate(board, player, candidates)
        } else {
            CaptureMost.evaluate(board, player, &safe)
        }
    }
}

/// Corners first, then [`AvoidCorners`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureCorners;

impl<T: Topology> Strategy<T> for CaptureCorners {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        CornersOnly
            .evaluate(board, player, candidates)
            .or_else(|| AvoidCorners.evaluate(board, player, candidates))
    }
}

/// Fallback chain: the first strategy that does not decline decides.
pub struct TryMany<T: Topology> {
    strategies: Vec<Box<dyn Strategy<T>>>,
}

impl<T: Topology> TryMany<T> {
    pub fn new(strategies: Vec<Box<dyn Strategy<T>>>) -> Self {
        Self { strategies }
    }

    pub fn two(first: Box<dyn Strategy<T>>, second: Box<dyn Strategy<T>>) -> Self {
        Self::new(vec![first, second])
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl<T: Topology> Strategy<T> for TryMany<T> {
    fn evaluate(
        &self,
        board: &Board<T>,
        player: Player,
        candidates: &BTreeSet<T::Coord>,
    ) -> Option<Choice<T::Coord>> {
        self.strategies
            .iter()
            .enumerate()
            .find_map(|(i, strategy)| {
                let choice = strategy.evaluate(board, player, candidates)?;
                trace!(option = i, "fallback chain decided");
                Some(choice)
            })
    }
}

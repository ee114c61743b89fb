use crate::error::MoveError;
use crate::grid::Grid;
use crate::topology::Topology;
use crate::types::{Disc, Player};

/// Discs a legal move would turn over, together with its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSet<C> {
    pub destination: C,
    /// Never empty; sorted in tie-break order.
    pub flipped: Vec<C>,
}

impl<C: Copy> CaptureSet<C> {
    /// Number of opponent discs captured.
    pub fn count(&self) -> usize {
        self.flipped.len()
    }

    /// Every cell that ends up holding the mover's disc.
    pub fn cells(&self) -> impl Iterator<Item = C> + '_ {
        std::iter::once(self.destination).chain(self.flipped.iter().copied())
    }
}

/// Computes what `player` would capture by playing at `destination`.
///
/// Each direction is walked outward; a run of opponent discs counts only when
/// a disc of `player` closes it before an empty cell or the board edge.
pub fn resolve_captures<T: Topology>(
    grid: &Grid<T>,
    player: Player,
    destination: T::Coord,
) -> Result<CaptureSet<T::Coord>, MoveError> {
    if grid.get(destination)? != Disc::Empty {
        return Err(MoveError::CellOccupied);
    }

    let me = player.disc();
    let opp = player.opponent().disc();
    let mut flipped = Vec::new();

    for &dir in T::directions() {
        let mut line = Vec::new();
        let mut cursor = destination + dir;

        while let Ok(disc) = grid.get(cursor) {
            if disc == opp {
                line.push(cursor);
            } else {
                if disc == me {
                    flipped.append(&mut line);
                }
                break;
            }
            cursor = cursor + dir;
        }
    }

    if flipped.is_empty() {
        return Err(MoveError::NoCaptures);
    }

    flipped.sort();
    Ok(CaptureSet {
        destination,
        flipped,
    })
}

/// Whether `player` has any capturing move on `grid`.
pub fn has_any_move<T: Topology>(grid: &Grid<T>, player: Player) -> bool {
    grid.empty_cells()
        .any(|c| resolve_captures(grid, player, c).is_ok())
}

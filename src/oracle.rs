//! Terminal-state detection.
//!
//! A game ends when any of these hold, checked cheapest first:
//! both players passed in a row, no empty cell is left, one colour has no
//! disc on the board, or neither colour has a capturing move.

use crate::board::Board;
use crate::capture::has_any_move;
use crate::topology::Topology;
use crate::types::{Disc, GamePhase, Player};

const PASSES_TO_END: u32 = 2;

/// Returns the terminal phase `board` has reached, if any.
///
/// Pure: the board latches the returned phase itself.
pub fn terminal_phase<T: Topology>(board: &Board<T>) -> Option<GamePhase> {
    match board.phase() {
        GamePhase::NotStarted => return None,
        phase if phase.is_terminal() => return Some(phase),
        _ => {}
    }

    let black = board.score(Disc::Black);
    let white = board.score(Disc::White);
    let verdict = Some(GamePhase::from_counts(black, white));

    if board.consecutive_passes() >= PASSES_TO_END {
        return verdict;
    }
    if board.score(Disc::Empty) == 0 {
        return verdict;
    }
    if black == 0 || white == 0 {
        return verdict;
    }

    let grid = board.grid();
    if !has_any_move(grid, Player::Black) && !has_any_move(grid, Player::White) {
        return verdict;
    }

    None
}

/// Whether `board` is over, whether or not the phase has been latched yet.
pub fn is_terminal<T: Topology>(board: &Board<T>) -> bool {
    terminal_phase(board).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Cartesian, Hex, Square};

    fn square(size: usize, discs: &[((i32, i32), Disc)], turn: Player) -> Board<Square> {
        let cells = discs
            .iter()
            .map(|&((x, y), d)| (Cartesian::new(x, y), d));
        Board::new_with_state(size, cells, turn).unwrap()
    }

    #[test]
    fn fresh_board_is_not_terminal() {
        let mut board = Board::<Hex>::new(3);
        assert!(!is_terminal(&board));

        board.setup().unwrap();
        assert!(!is_terminal(&board));
    }

    #[test]
    fn full_board_is_terminal() {
        let board = square(
            2,
            &[
                ((0, 0), Disc::Black),
                ((1, 0), Disc::Black),
                ((0, 1), Disc::White),
                ((1, 1), Disc::Black),
            ],
            Player::White,
        );

        assert_eq!(terminal_phase(&board), Some(GamePhase::BlackWon));
    }

    #[test]
    fn wiped_out_colour_is_terminal() {
        let board = square(4, &[((0, 0), Disc::White)], Player::Black);

        assert_eq!(terminal_phase(&board), Some(GamePhase::WhiteWon));
    }

    #[test]
    fn mutual_lack_of_moves_is_terminal() {
        // Both colours present, but no line can be closed by anyone.
        let board = square(
            5,
            &[((0, 0), Disc::Black), ((4, 4), Disc::White)],
            Player::Black,
        );

        assert!(is_terminal(&board));
        assert_eq!(board.phase(), GamePhase::Tied);
    }

    #[test]
    fn one_sided_lack_of_moves_is_not_terminal() {
        // White cannot move, Black can.
        let board = square(
            4,
            &[((0, 0), Disc::Black), ((1, 0), Disc::White)],
            Player::White,
        );

        assert!(!is_terminal(&board));
        assert_eq!(board.phase(), GamePhase::InProgress);
    }
}

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, instrument, trace};

use crate::capture::{CaptureSet, resolve_captures};
use crate::error::{BoundsError, MoveError, StateError};
use crate::grid::{Grid, Shape};
use crate::oracle;
use crate::topology::Topology;
use crate::types::{Disc, GamePhase, MoveOutcome, Player};

/// Board state for one game: discs, whose turn it is, and the game phase.
///
/// The live board only changes through [`Board::setup`], [`Board::make_move`]
/// and [`Board::pass_turn`]. Everything exploratory works on clones, and a
/// clone owns its own cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<T: Topology> {
    grid: Grid<T>,
    turn: Player,
    consecutive_passes: u32,
    phase: GamePhase,
}

impl<T: Topology> Board<T> {
    /// Creates an empty board in [`GamePhase::NotStarted`]. Black moves first.
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            turn: Player::Black,
            consecutive_passes: 0,
            phase: GamePhase::NotStarted,
        }
    }

    /// Creates an in-progress board from explicit cell contents.
    ///
    /// Cells not listed are empty. The terminal phase is latched right away
    /// if the given position is already over.
    pub fn new_with_state<I>(size: usize, cells: I, turn: Player) -> Result<Self, BoundsError>
    where
        I: IntoIterator<Item = (T::Coord, Disc)>,
    {
        let mut grid = Grid::new(size);
        for (coord, disc) in cells {
            grid.set(coord, disc)?;
        }

        let mut board = Self {
            grid,
            turn,
            consecutive_passes: 0,
            phase: GamePhase::InProgress,
        };
        board.latch_terminal();
        Ok(board)
    }

    /// Places the starting discs and starts the game.
    pub fn setup(&mut self) -> Result<(), StateError> {
        if self.phase != GamePhase::NotStarted {
            return Err(StateError::AlreadyStarted);
        }

        let size = self.size();
        let pattern = T::starting_pattern(size);
        if pattern.iter().any(|&(c, _)| !self.grid.shape().contains(c)) {
            return Err(StateError::ShapeTooSmall(size));
        }
        for (coord, player) in pattern {
            self.grid
                .set(coord, player.disc())
                .map_err(|_| StateError::ShapeTooSmall(size))?;
        }

        self.phase = GamePhase::InProgress;
        debug!(size, "board set up");
        self.latch_terminal();
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.grid.shape().size()
    }

    pub fn shape(&self) -> &Shape<T> {
        self.grid.shape()
    }

    pub(crate) fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the game is over. The phase is latched by every mutation, so
    /// this never lags behind the discs on the board.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn disc_at(&self, coord: T::Coord) -> Result<Disc, BoundsError> {
        self.grid.get(coord)
    }

    pub fn is_empty(&self, coord: T::Coord) -> Result<bool, BoundsError> {
        Ok(self.disc_at(coord)? == Disc::Empty)
    }

    /// Number of cells holding `disc`; `Disc::Empty` counts empty cells.
    pub fn score(&self, disc: Disc) -> usize {
        self.grid.count(disc)
    }

    /// `(coord, disc)` for every cell, in tie-break order.
    pub fn snapshot(&self) -> Vec<(T::Coord, Disc)> {
        self.grid.iter().collect()
    }

    /// Independent deep copy.
    pub fn clone_snapshot(&self) -> Self {
        self.clone()
    }

    /// What the player to move would capture at `destination`.
    pub fn resolve_captures(
        &self,
        destination: T::Coord,
    ) -> Result<CaptureSet<T::Coord>, MoveError> {
        self.ensure_in_progress()?;
        resolve_captures(&self.grid, self.turn, destination)
    }

    /// Legal destinations for `player`, whoever's turn it is.
    pub fn legal_moves(&self, player: Player) -> BTreeSet<T::Coord> {
        self.grid
            .empty_cells()
            .filter(|&c| resolve_captures(&self.grid, player, c).is_ok())
            .collect()
    }

    /// Legal destinations for the player to move; empty unless in progress.
    pub fn possible_moves(&self) -> BTreeSet<T::Coord> {
        if self.phase != GamePhase::InProgress {
            return BTreeSet::new();
        }
        self.legal_moves(self.turn)
    }

    /// Returns a copy of this board with `player` having played `destination`.
    ///
    /// Ignores turn order and does no pass or phase bookkeeping; this is the
    /// primitive the strategies simulate with.
    pub fn trial(&self, player: Player, destination: T::Coord) -> Result<Self, MoveError> {
        let captures = resolve_captures(&self.grid, player, destination)?;
        let mut next = self.clone();
        next.flip(player, &captures)?;
        next.turn = player.opponent();
        Ok(next)
    }

    /// Plays `destination` for the player to move.
    ///
    /// The whole capture set is computed before any cell changes, so a failed
    /// move leaves the board exactly as it was.
    #[instrument(level = "debug", skip(self), fields(player = ?self.turn))]
    pub fn make_move(&mut self, destination: T::Coord) -> Result<MoveOutcome<T::Coord>, MoveError> {
        self.ensure_in_progress()?;

        let player = self.turn;
        let captures = resolve_captures(&self.grid, player, destination)?;
        self.flip(player, &captures)?;
        self.turn = player.opponent();
        self.consecutive_passes = 0;
        self.latch_terminal();

        trace!(captured = captures.count(), "move applied");
        Ok(MoveOutcome {
            player,
            placed: Some(destination),
            captured: captures.flipped,
            next_turn: self.turn,
            phase: self.phase,
        })
    }

    /// Hands the turn to the opponent without touching the discs.
    #[instrument(level = "debug", skip(self), fields(player = ?self.turn))]
    pub fn pass_turn(&mut self) -> Result<MoveOutcome<T::Coord>, StateError> {
        match self.phase {
            GamePhase::NotStarted => return Err(StateError::GameNotStarted),
            phase if phase.is_terminal() => return Err(StateError::GameOver),
            _ => {}
        }

        let player = self.turn;
        self.turn = player.opponent();
        self.consecutive_passes += 1;
        self.latch_terminal();

        trace!(passes = self.consecutive_passes, "turn passed");
        Ok(MoveOutcome {
            player,
            placed: None,
            captured: Vec::new(),
            next_turn: self.turn,
            phase: self.phase,
        })
    }

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        match self.phase {
            GamePhase::NotStarted => Err(MoveError::GameNotStarted),
            GamePhase::InProgress => Ok(()),
            _ => Err(MoveError::GameOver),
        }
    }

    fn flip(&mut self, player: Player, captures: &CaptureSet<T::Coord>) -> Result<(), MoveError> {
        let disc = player.disc();
        for coord in captures.cells() {
            self.grid.set(coord, disc)?;
        }
        Ok(())
    }

    fn latch_terminal(&mut self) {
        if self.phase != GamePhase::InProgress {
            return;
        }
        if let Some(phase) = oracle::terminal_phase(self) {
            info!(
                ?phase,
                black = self.score(Disc::Black),
                white = self.score(Disc::White),
                "game over"
            );
            self.phase = phase;
        }
    }
}

impl<T: Topology> fmt::Display for Board<T> {
    /// Rows of `X` (black), `O` (white) and `_` (empty).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = T::layout(self.size());
        for (i, (indent, row)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:indent$}", "", indent = indent)?;
            for (j, &coord) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                let disc = self.disc_at(coord).map_err(|_| fmt::Error)?;
                write!(f, "{}", disc.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Axial, Cartesian, Hex, Square};

    const HEX3_INITIAL: &str = "  _ _ _\n _ O X _\n_ X _ X _\n _ O O _\n  _ _ _";

    fn started<T: Topology>(size: usize) -> Board<T> {
        let mut board = Board::new(size);
        board.setup().unwrap();
        board
    }

    fn assert_counts_cover_shape<T: Topology>(board: &Board<T>) {
        let total = board.score(Disc::Black) + board.score(Disc::White) + board.score(Disc::Empty);
        assert_eq!(total, board.shape().len());
    }

    #[test]
    fn hex3_initial_board_renders_the_ring() {
        let board = started::<Hex>(3);

        assert_eq!(board.to_string(), HEX3_INITIAL);
        assert_eq!(board.score(Disc::Black), 3);
        assert_eq!(board.score(Disc::White), 3);
        assert_eq!(board.disc_at(Axial::new(0, 0)), Ok(Disc::Empty));
        assert_eq!(board.phase(), GamePhase::InProgress);
        assert_eq!(board.turn(), Player::Black);
    }

    #[test]
    fn hex3_black_has_three_openings() {
        let board = started::<Hex>(3);

        let moves: Vec<Axial> = board.possible_moves().into_iter().collect();

        assert_eq!(
            moves,
            vec![Axial::new(1, -2), Axial::new(-1, -1), Axial::new(-1, 2)]
        );
    }

    #[test]
    fn hex3_black_plays_1_minus2_and_captures_one() {
        let mut board = started::<Hex>(3);

        let outcome = board.make_move(Axial::new(1, -2)).unwrap();

        assert_eq!(outcome.captured, vec![Axial::new(0, -1)]);
        assert_eq!(outcome.next_turn, Player::White);
        assert_eq!(outcome.phase, GamePhase::InProgress);
        assert_eq!(board.score(Disc::Black), 5);
        assert_eq!(board.score(Disc::White), 2);
        assert_eq!(
            board.to_string(),
            "  _ X _\n _ X X _\n_ X _ X _\n _ O O _\n  _ _ _"
        );
    }

    #[test]
    fn square8_initial_moves_are_the_four_classic_openings() {
        let board = started::<Square>(8);

        let moves: Vec<Cartesian> = board.possible_moves().into_iter().collect();

        assert_eq!(
            moves,
            vec![
                Cartesian::new(3, 2),
                Cartesian::new(2, 3),
                Cartesian::new(5, 4),
                Cartesian::new(4, 5),
            ]
        );
    }

    #[test]
    fn failed_move_leaves_board_and_turn_unchanged() {
        let mut board = started::<Square>(8);
        let before = board.clone();

        assert_eq!(board.make_move(Cartesian::new(0, 0)), Err(MoveError::NoCaptures));
        assert_eq!(board.make_move(Cartesian::new(3, 3)), Err(MoveError::CellOccupied));
        assert_eq!(board.make_move(Cartesian::new(8, 0)), Err(MoveError::OutOfBounds));

        assert_eq!(board, before);
        assert_eq!(board.turn(), Player::Black);
    }

    #[test]
    fn lifecycle_errors_are_reported() {
        let mut board = Board::<Hex>::new(4);
        assert_eq!(board.make_move(Axial::new(1, -2)), Err(MoveError::GameNotStarted));
        assert_eq!(board.pass_turn(), Err(StateError::GameNotStarted));
        assert!(board.possible_moves().is_empty());

        board.setup().unwrap();
        assert_eq!(board.setup(), Err(StateError::AlreadyStarted));
    }

    #[test]
    fn setup_fails_when_starting_discs_do_not_fit() {
        assert_eq!(Board::<Hex>::new(1).setup(), Err(StateError::ShapeTooSmall(1)));
        assert_eq!(Board::<Square>::new(1).setup(), Err(StateError::ShapeTooSmall(1)));
        assert!(Board::<Hex>::new(2).setup().is_ok());
    }

    #[test]
    fn setup_latches_a_position_that_is_already_over() {
        // 2x2: the starting discs fill every cell.
        let square = started::<Square>(2);
        assert_eq!(square.score(Disc::Empty), 0);
        assert_eq!(square.phase(), GamePhase::Tied);
        assert!(square.is_terminal());

        // Hex radius 1: no ray from the center can close.
        let hex = started::<Hex>(2);
        assert!(hex.legal_moves(Player::Black).is_empty());
        assert!(hex.legal_moves(Player::White).is_empty());
        assert_eq!(hex.phase(), GamePhase::Tied);
        assert_eq!(hex.is_terminal(), oracle::is_terminal(&hex));

        let mut hex = hex;
        assert_eq!(hex.make_move(Axial::new(0, 0)), Err(MoveError::GameOver));
    }

    #[test]
    fn two_passes_end_a_fresh_game_in_a_tie() {
        let mut board = started::<Hex>(3);

        let first = board.pass_turn().unwrap();
        assert!(!first.is_terminal());
        assert!(!board.is_terminal());

        let second = board.pass_turn().unwrap();
        assert_eq!(second.phase, GamePhase::Tied);
        assert!(board.is_terminal());

        assert_eq!(board.pass_turn(), Err(StateError::GameOver));
        assert_eq!(board.make_move(Axial::new(1, -2)), Err(MoveError::GameOver));
    }

    #[test]
    fn move_resets_consecutive_passes() {
        let mut board = started::<Square>(8);

        board.pass_turn().unwrap();
        assert_eq!(board.consecutive_passes(), 1);
        board.make_move(Cartesian::new(2, 4)).unwrap();
        assert_eq!(board.consecutive_passes(), 0);
    }

    #[test]
    fn disc_at_outside_shape_is_out_of_bounds_for_every_size() {
        for size in 1..=8 {
            let hex = Board::<Hex>::new(size);
            let r = size as i32;
            assert_eq!(hex.disc_at(Axial::new(r, 0)), Err(BoundsError));
            assert_eq!(hex.is_empty(Axial::new(0, -r)), Err(BoundsError));

            let square = Board::<Square>::new(size);
            assert_eq!(square.disc_at(Cartesian::new(-1, 0)), Err(BoundsError));
            assert_eq!(square.disc_at(Cartesian::new(0, r)), Err(BoundsError));
        }
    }

    #[test]
    fn clone_snapshot_is_independent() {
        let mut board = started::<Hex>(3);
        let copy = board.clone_snapshot();

        board.make_move(Axial::new(1, -2)).unwrap();

        assert_eq!(copy.to_string(), HEX3_INITIAL);
        assert_eq!(copy.turn(), Player::Black);
        assert_ne!(board, copy);
    }

    #[test]
    fn trial_does_not_touch_the_original() {
        let board = started::<Square>(8);

        let next = board.trial(Player::White, Cartesian::new(4, 2)).unwrap();

        assert_eq!(next.score(Disc::White), 4);
        assert_eq!(next.turn(), Player::Black);
        assert_eq!(board.score(Disc::White), 2);
        assert_eq!(board.trial(Player::White, Cartesian::new(0, 0)), Err(MoveError::NoCaptures));
    }

    #[test]
    fn new_with_state_round_trips_a_snapshot() {
        let mut board = started::<Hex>(4);
        board.make_move(Axial::new(1, -2)).unwrap();

        let copy = Board::<Hex>::new_with_state(4, board.snapshot(), board.turn()).unwrap();

        assert_eq!(copy.to_string(), board.to_string());
        assert_eq!(copy.possible_moves(), board.possible_moves());
        assert!(Board::<Hex>::new_with_state(2, [(Axial::new(3, 0), Disc::Black)], Player::Black).is_err());
    }

    #[test]
    fn moves_conserve_discs_until_the_game_ends() {
        fn play_out<T: Topology>(size: usize) {
            let mut board = started::<T>(size);
            for _ in 0..500 {
                assert_counts_cover_shape(&board);
                if board.is_terminal() {
                    return;
                }

                let Some(&mv) = board.possible_moves().iter().next() else {
                    board.pass_turn().unwrap();
                    continue;
                };
                let mover = board.turn().disc();
                let opp = board.turn().opponent().disc();
                let (mine, theirs, empty) = (board.score(mover), board.score(opp), board.score(Disc::Empty));

                let outcome = board.make_move(mv).unwrap();
                let k = outcome.captured.len();

                assert!(k >= 1);
                assert_eq!(board.score(mover), mine + k + 1);
                assert_eq!(board.score(opp), theirs - k);
                assert_eq!(board.score(Disc::Empty), empty - 1);
            }
            panic!("game did not finish");
        }

        play_out::<Hex>(3);
        play_out::<Hex>(5);
        play_out::<Square>(6);
        play_out::<Square>(8);
    }
}

use tracing::{debug, instrument};

use crate::ai::Strategy;
use crate::board::Board;
use crate::config::{GameConfig, SeatConfig};
use crate::error::{GameError, StateError};
use crate::topology::Topology;
use crate::types::{Disc, GameResult, GameState, MoveOutcome, Player};

/// Who makes the decisions for one colour.
pub enum Seat<T: Topology> {
    Human,
    Computer(Box<dyn Strategy<T>>),
}

impl<T: Topology> Seat<T> {
    pub fn from_config(config: &SeatConfig) -> Self {
        match config {
            SeatConfig::Human => Seat::Human,
            SeatConfig::Computer { strategy } => Seat::Computer(strategy.build()),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Seat::Human)
    }
}

/// A running game: the live board plus one seat per colour.
pub struct GameInstance<T: Topology> {
    board: Board<T>,
    black: Seat<T>,
    white: Seat<T>,
    last: Option<MoveOutcome<T::Coord>>,
}

impl<T: Topology> GameInstance<T> {
    /// Sets up a fresh board of `size` and seats the players.
    pub fn new(size: usize, black: Seat<T>, white: Seat<T>) -> Result<Self, GameError> {
        let mut board = Board::new(size);
        board.setup()?;
        Ok(Self {
            board,
            black,
            white,
            last: None,
        })
    }

    /// Builds a game from `config`. The caller picks `T` to match
    /// `config.topology`.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Self::new(
            config.size,
            Seat::from_config(&config.black),
            Seat::from_config(&config.white),
        )
    }

    pub fn board(&self) -> &Board<T> {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.board.turn()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn is_human_turn(&self) -> bool {
        self.seat(self.current_player()).is_human()
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        !self.board.possible_moves().is_empty()
    }

    pub fn legal_moves(&self) -> Vec<T::Coord> {
        self.board.possible_moves().into_iter().collect()
    }

    /// Plays `coord` for a human seat.
    pub fn place(&mut self, coord: T::Coord) -> Result<MoveOutcome<T::Coord>, GameError> {
        self.ensure_live()?;
        if !self.is_human_turn() {
            return Err(GameError::NotHumanTurn);
        }
        let outcome = self.board.make_move(coord)?;
        Ok(self.record(outcome))
    }

    /// Passes for a human seat.
    pub fn pass(&mut self) -> Result<MoveOutcome<T::Coord>, GameError> {
        self.ensure_live()?;
        if !self.is_human_turn() {
            return Err(GameError::NotHumanTurn);
        }
        let outcome = self.board.pass_turn()?;
        Ok(self.record(outcome))
    }

    /// Lets the computer seat to move play, or pass when it has no move.
    #[instrument(level = "debug", skip(self), fields(player = ?self.current_player()))]
    pub fn do_ai_move(&mut self) -> Result<MoveOutcome<T::Coord>, GameError> {
        self.ensure_live()?;
        let player = self.current_player();
        let Seat::Computer(strategy) = self.seat(player) else {
            return Err(GameError::NotComputerTurn);
        };

        if !self.has_legal_moves_for_current() {
            debug!("no legal move, passing");
            let outcome = self.board.pass_turn()?;
            return Ok(self.record(outcome));
        }

        let selected = strategy.choose(&self.board, player)?;
        debug!(%selected, "computer selected move");
        let outcome = self.board.make_move(selected)?;
        Ok(self.record(outcome))
    }

    pub fn last_outcome(&self) -> Option<&MoveOutcome<T::Coord>> {
        self.last.as_ref()
    }

    pub fn to_game_state(&self) -> GameState<T::Coord> {
        GameState {
            size: self.board.size(),
            cells: self.board.snapshot(),
            current_player: self.current_player(),
            black_count: self.board.score(Disc::Black),
            white_count: self.board.score(Disc::White),
            phase: self.board.phase(),
            last: self.last.clone(),
        }
    }

    /// `None` until the game is over.
    pub fn to_game_result(&self) -> Option<GameResult> {
        let phase = self.board.phase();
        if !phase.is_terminal() {
            return None;
        }
        Some(GameResult {
            phase,
            winner: phase.winner(),
            black_count: self.board.score(Disc::Black),
            white_count: self.board.score(Disc::White),
        })
    }

    fn seat(&self, player: Player) -> &Seat<T> {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(StateError::GameOver.into());
        }
        Ok(())
    }

    fn record(&mut self, outcome: MoveOutcome<T::Coord>) -> MoveOutcome<T::Coord> {
        self.last = Some(outcome.clone());
        outcome
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board<T>) {
        self.board = board;
        self.last = None;
    }
}

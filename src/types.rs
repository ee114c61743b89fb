use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn disc(self) -> Disc {
        match self {
            Player::Black => Disc::Black,
            Player::White => Disc::White,
        }
    }
}

/// Occupant of a cell. `Empty` is a real occupant, not a missing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Disc {
    Black,
    White,
    #[default]
    Empty,
}

impl Disc {
    pub fn owner(self) -> Option<Player> {
        match self {
            Disc::Black => Some(Player::Black),
            Disc::White => Some(Player::White),
            Disc::Empty => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Disc::Black => 'X',
            Disc::White => 'O',
            Disc::Empty => '_',
        }
    }
}

/// Lifecycle of a game. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    BlackWon,
    WhiteWon,
    Tied,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::BlackWon | Self::WhiteWon | Self::Tied)
    }

    /// Greater disc count wins; equal counts tie.
    pub fn from_counts(black: usize, white: usize) -> Self {
        if black > white {
            Self::BlackWon
        } else if white > black {
            Self::WhiteWon
        } else {
            Self::Tied
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Self::BlackWon => Some(Player::Black),
            Self::WhiteWon => Some(Player::White),
            _ => None,
        }
    }
}

/// What a successful `make_move` or `pass_turn` did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome<C> {
    pub player: Player,
    /// `None` for a pass.
    pub placed: Option<C>,
    /// Opponent discs turned over; excludes the placed disc.
    pub captured: Vec<C>,
    pub next_turn: Player,
    pub phase: GamePhase,
}

impl<C> MoveOutcome<C> {
    pub fn is_pass(&self) -> bool {
        self.placed.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Public game state handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState<C> {
    pub size: usize,
    pub cells: Vec<(C, Disc)>,
    pub current_player: Player,
    pub black_count: usize,
    pub white_count: usize,
    pub phase: GamePhase,
    /// Contract:
    /// - `None` before the first move or pass.
    /// - Otherwise the outcome of the most recent action.
    pub last: Option<MoveOutcome<C>>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub phase: GamePhase,
    pub winner: Option<Player>,
    pub black_count: usize,
    pub white_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_and_disc_agree() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent().disc(), Disc::Black);
        assert_eq!(Disc::White.owner(), Some(Player::White));
        assert_eq!(Disc::Empty.owner(), None);
    }

    #[test]
    fn from_counts_resolves_winner_by_majority() {
        assert_eq!(GamePhase::from_counts(5, 2), GamePhase::BlackWon);
        assert_eq!(GamePhase::from_counts(0, 1), GamePhase::WhiteWon);
        assert_eq!(GamePhase::from_counts(3, 3), GamePhase::Tied);
        assert_eq!(GamePhase::Tied.winner(), None);
        assert!(!GamePhase::InProgress.is_terminal());
    }

    #[test]
    fn outcome_state_serializes_with_derived_field_names() {
        let outcome = MoveOutcome {
            player: Player::Black,
            placed: None::<(i32, i32)>,
            captured: Vec::new(),
            next_turn: Player::White,
            phase: GamePhase::InProgress,
        };
        let json = serde_json::to_value(&outcome).expect("outcome must serialize");

        assert!(outcome.is_pass());
        assert_eq!(json["next_turn"], "White");
        assert_eq!(json["phase"], "InProgress");
        assert!(json["placed"].is_null());
    }
}

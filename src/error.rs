//! Error kinds returned by the engine. All of them are recoverable.

/// Why a move was rejected. The board is untouched whenever one is returned.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("coordinate is outside the board")]
    OutOfBounds,

    #[error("cell is already occupied")]
    CellOccupied,

    #[error("move does not capture any disc")]
    NoCaptures,

    #[error("game has not started")]
    GameNotStarted,

    #[error("game is already over")]
    GameOver,
}

/// Lifecycle violations for `setup` and `pass_turn`.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("game has not started")]
    GameNotStarted,

    #[error("game is already over")]
    GameOver,

    #[error("game has already been set up")]
    AlreadyStarted,

    #[error("board of size {0} cannot hold the starting discs")]
    ShapeTooSmall(usize),
}

/// A coordinate that is not part of the board's shape.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("coordinate is outside the board")]
pub struct BoundsError;

impl From<BoundsError> for MoveError {
    fn from(_: BoundsError) -> Self {
        MoveError::OutOfBounds
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("no candidate move to choose from")]
    NoCandidate,
}

/// Rejected configuration values.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size {size} is below the minimum of {min}")]
    InvalidSize { size: usize, min: usize },

    #[error("search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u8, max: u8 },

    #[error("strategy chain must contain at least one strategy")]
    EmptyChain,
}

/// Errors surfaced by the turn driver.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error("it is not a computer player's turn")]
    NotComputerTurn,
}

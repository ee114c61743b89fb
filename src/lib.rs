//! Disc-capture board games (Reversi family) on hexagonal and square grids.
//!
//! [`board::Board`] owns the rules: capture resolution, turn order and the
//! game phase. [`ai`] holds the computer strategies, which only ever work on
//! cloned boards. [`game::GameInstance`] pairs a board with human or computer
//! seats, and [`wasm`] exposes that to JavaScript.

pub mod ai;
pub mod board;
pub mod capture;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod oracle;
pub mod topology;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::{BoundsError, ConfigError, GameError, MoveError, StateError, StrategyError};
pub use topology::{Axial, Cartesian, Hex, Square, Topology};
pub use types::{Disc, GamePhase, MoveOutcome, Player};
pub use wasm::wasm_ready;

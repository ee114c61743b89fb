use serde::{Deserialize, Serialize};

use crate::ai::{AvoidCorners, CaptureCorners, CaptureMost, CornersOnly, Minimax, Strategy, TryMany};
use crate::error::ConfigError;
use crate::topology::Topology;

/// Deepest minimax horizon a configuration may ask for.
pub const MAX_SEARCH_DEPTH: u8 = 6;
const MIN_BOARD_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    Hex,
    Square,
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub topology: TopologyKind,
    pub size: usize,
    pub black: SeatConfig,
    pub white: SeatConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            topology: TopologyKind::Hex,
            size: 6,
            black: SeatConfig::Human,
            white: SeatConfig::Computer {
                strategy: StrategyConfig::CaptureCorners,
            },
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(ConfigError::InvalidSize {
                size: self.size,
                min: MIN_BOARD_SIZE,
            });
        }
        for seat in [&self.black, &self.white] {
            if let SeatConfig::Computer { strategy } = seat {
                strategy.validate()?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatConfig {
    #[default]
    Human,
    Computer { strategy: StrategyConfig },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    CaptureMost,
    CornersOnly,
    AvoidCorners,
    CaptureCorners,
    TryMany {
        strategies: Vec<StrategyConfig>,
    },
    Minimax {
        max_depth: u8,
        leaf: Box<StrategyConfig>,
        opponent: Box<StrategyConfig>,
    },
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::TryMany { strategies } => {
                if strategies.is_empty() {
                    return Err(ConfigError::EmptyChain);
                }
                strategies.iter().try_for_each(Self::validate)
            }
            Self::Minimax {
                max_depth,
                leaf,
                opponent,
            } => {
                if *max_depth > MAX_SEARCH_DEPTH {
                    return Err(ConfigError::DepthTooLarge {
                        depth: *max_depth,
                        max: MAX_SEARCH_DEPTH,
                    });
                }
                leaf.validate()?;
                opponent.validate()
            }
            _ => Ok(()),
        }
    }

    pub fn build<T: Topology>(&self) -> Box<dyn Strategy<T>> {
        match self {
            Self::CaptureMost => Box::new(CaptureMost),
            Self::CornersOnly => Box::new(CornersOnly),
            Self::AvoidCorners => Box::new(AvoidCorners),
            Self::CaptureCorners => Box::new(CaptureCorners),
            Self::TryMany { strategies } => Box::new(TryMany::<T>::new(
                strategies.iter().map(Self::build::<T>).collect(),
            )),
            Self::Minimax {
                max_depth,
                leaf,
                opponent,
            } => Box::new(Minimax::<T>::new(
                *max_depth,
                leaf.build::<T>(),
                opponent.build::<T>(),
            )),
        }
    }
}

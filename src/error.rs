use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Cell;

/// Rejected path requests. A valid request that has no route is `Ok(None)`, not an error.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PathError {
    #[error("path origin {0:?} lies outside the grid")]
    OriginOutOfBounds(Cell),
    #[error("path target {0:?} lies outside the grid")]
    TargetOutOfBounds(Cell),
    #[error("path target {0:?} is inside the blocked set")]
    TargetBlocked(Cell),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GoalError {
    #[error("no free cell left for a goal on the {width}x{height} grid")]
    GridFull { width: u16, height: u16 },
    #[error("rule set allows no goal effects")]
    NoEffects,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Goal(#[from] GoalError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small")]
    GridTooSmall { width: u16, height: u16 },
    #[error("grid {width}x{height} is too large")]
    GridTooLarge { width: u16, height: u16 },
    #[error("tick rate must be at least one tick per second")]
    ZeroTickRate,
    #[error("rule set must allow at least one goal effect")]
    EmptyEffects,
    #[error("failed to read rules file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse rules file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error returned by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to install logger")]
    Logger(#[from] log::SetLoggerError),
}

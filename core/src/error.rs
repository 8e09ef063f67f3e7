use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board cannot hold {mines} mines")]
    InvalidConfiguration { rows: u16, cols: u16, mines: u16 },
    #[error("Invalid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: u16, cols: u16 },
    #[error("Cannot place {requested} mines, only {available} cells are outside the safe zone")]
    InvalidMineCount { requested: u16, available: u16 },
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;

use thiserror::Error;

use crate::Coord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Invalid domain width {width}: expected a positive power of two")]
    InvalidDomain { width: Coord },

    #[error("Point ({x},{y}) is outside of the [0, {width}) domain")]
    OutOfBounds { x: Coord, y: Coord, width: Coord },
}

//! Error types for height grids

use std::collections::TryReserveError;
use thiserror::Error;

/// Height grid error type
#[derive(Error, Debug)]
pub enum HeightGridError {
    #[error("allocation of {width}x{height} grid failed: {reason}")]
    Allocation {
        width: usize,
        height: usize,
        reason: String,
    },

    #[error("grid is not allocated: {0}")]
    InvalidState(&'static str),

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl HeightGridError {
    pub(crate) fn overflow(width: usize, height: usize) -> Self {
        HeightGridError::Allocation {
            width,
            height,
            reason: "cell count overflows usize".to_string(),
        }
    }

    pub(crate) fn reserve(width: usize, height: usize, err: TryReserveError) -> Self {
        HeightGridError::Allocation {
            width,
            height,
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeightGridError>;

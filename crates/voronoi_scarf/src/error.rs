//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, a stalled sampling loop, spatial grid invariant violations,
//! misuse of the point sequence (classifying without seeds, sampling twice, inserting after
//! classification), and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("sampling stalled after {iterations} iterations")]
    SamplingStalled { iterations: usize },

    #[error("grid cell ({cell_x}, {cell_y}) already holds point {existing}; refusing to store point {incoming}")]
    GridCellOccupied {
        cell_x: usize,
        cell_y: usize,
        existing: usize,
        incoming: usize,
    },

    #[error("no seed points have been placed")]
    NoSeedPoints,

    #[error("seed points have already been placed")]
    AlreadySampled,

    #[error("points are frozen once classification has started")]
    PointsFrozen,

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

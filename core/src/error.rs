// Error types for the spatial index and the noise generators.

use thiserror::Error;

// Errors raised by `PointIndex` mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("point has {got} dimensions, index expects {expected}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("points must have at least one dimension")]
    EmptyPoint,
}

// Errors raised by noise generators and raster fills.
#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("frequency must be positive and finite, got {0}")]
    InvalidFrequency(f64),

    #[error("octave count must be at least 1, got {0}")]
    InvalidOctaves(usize),

    #[error("invalid raster target: {0}")]
    InvalidTarget(String),

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("entropy source failed: {0}")]
    Entropy(#[from] rand::Error),
}

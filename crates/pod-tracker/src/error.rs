//! Error types for the registry core
//!
//! The error surface is deliberately small: the core performs no I/O, and
//! lookup misses are expressed as `Option`, never as errors.

use thiserror::Error;

/// Unified error type for registry operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("invalid registry capacity {capacity}: must be at least 1")]
    InvalidCapacity { capacity: usize },
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, TrackerError>;

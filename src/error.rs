//! Error types.
//!
//! Only genuinely invalid arguments (wrong shapes, zero capacities,
//! out-of-range parameters) surface as [`AnalyticsError`]. Degenerate but
//! well-formed numeric input — an empty sequence handed to [`crate::stats`],
//! zero variance in a correlation — resolves to a documented fallback value
//! instead, because the calling layer must always get a displayable number
//! back. Absence (a hash miss, a binary-search miss, an empty heap) is
//! `Option`, never an error.

use thiserror::Error;

/// Errors produced by the analytics engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// Paired inputs must have the same length.
    #[error("input length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// The operation requires at least one element.
    #[error("input is empty")]
    EmptyInput,

    /// Bounded heap capacity must be at least 1.
    #[error("heap capacity must be at least 1")]
    ZeroCapacity,

    /// Percentile rank must lie within `0..=100`.
    #[error("percentile must be in 0..=100, got {0}")]
    InvalidPercentile(f64),

    /// Cluster count must be between 1 and the number of points.
    #[error("cluster count must be between 1 and {available}, got {requested}")]
    InvalidClusterCount { requested: usize, available: usize },

    /// Moving-average window must be at least 1.
    #[error("moving-average window must be at least 1")]
    ZeroWindow,

    /// Top-K count must be at least 1.
    #[error("top-k count must be at least 1")]
    ZeroK,

    /// All x values are identical, so the regression slope is undefined.
    #[error("regression is undefined: all x values are identical")]
    SingularRegression,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

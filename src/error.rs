//! Error taxonomy.
//!
//! Only configuration errors are fatal, and all of them are caught at setup
//! before any frame is processed. Per-frame data gaps (missed detections,
//! occlusion, absent contours) are never errors; they flow through the
//! pipeline as absent/not-available values.

use thiserror::Error;

/// Fatal configuration errors, detected when a component is constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("frame rate must be positive, got {0}")]
    NonPositiveFrameRate(f64),

    #[error("window length must be at least 1")]
    ZeroWindowLength,

    #[error("max match distance must be positive and finite, got {0}")]
    InvalidMatchDistance(f32),

    #[error("area normalizer must be positive and finite, got {0}")]
    InvalidAreaNormalizer(f64),
}

//! Error types for run configuration.
//!
//! The engine performs no I/O and acquires no external resources once a run
//! starts, so every failure mode is a caller contract violation caught at
//! the call boundary, before any simulation state is allocated.

use thiserror::Error;

/// Rejections raised when validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A lattice needs at least one site.
    #[error("lattice length must be positive")]
    EmptyLattice,

    /// A decorrelation block needs at least one sweep.
    #[error("correlation sweep count must be positive")]
    EmptyBlock,

    /// The action constants a/2 and 1/a degenerate for a <= 0.
    #[error("lattice spacing must be positive, got {0}")]
    BadSpacing(f64),

    /// The proposal distribution U(-eps, eps) degenerates for eps <= 0.
    #[error("proposal step width must be positive, got {0}")]
    BadStepWidth(f64),

    #[error("sample count must be positive")]
    NoSamples,

    #[error("batch size must be positive")]
    EmptyBatch,

    /// The caller owes us sample_count = n_batches * batch_size exactly.
    #[error("sample count {samples} is not divisible by batch size {batch}")]
    BatchMismatch { samples: usize, batch: usize },

    #[error("failed to read parameter file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter file")]
    Yaml(#[from] serde_yaml::Error),
}

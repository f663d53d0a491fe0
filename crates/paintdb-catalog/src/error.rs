use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown vendor/range key or malformed policy file — fatal to the
    /// requested operation, never to batches already completed.
    #[error(transparent)]
    Config(#[from] paintdb_core::ConfigError),

    /// A policy field failed to compile (bad validation regex).
    #[error("invalid policy for vendor {vendor}: {reason}")]
    Policy { vendor: String, reason: String },
}

/// Why an image yielded no pixels. The pipeline treats every variant
/// identically — the affected entry's hex degrades to empty and the batch
/// continues — but the cause is kept for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("image unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("image decode failed: {reason}")]
    Decode { reason: String },
}

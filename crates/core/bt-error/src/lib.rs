//! Error types for bucket-tree.
//!
//! This crate provides:
//! - [`BtError`] - Top-level error enum shared by every bucket-tree crate
//! - [`Result`] - Convenience alias over [`BtError`]

use thiserror::Error;

/// Top-level error type for bucket-tree.
#[derive(Error, Debug)]
pub enum BtError {
    /// The storage backend failed while listing objects.
    ///
    /// Raised for network errors, throttling, missing buckets and any other
    /// failure reported by the list call. Never retried internally.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BtError {
    /// Returns true if the error came from the storage backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type alias using BtError.
pub type Result<T> = std::result::Result<T, BtError>;

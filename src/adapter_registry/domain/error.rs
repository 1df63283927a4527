//! Error types for adapter domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing adapter domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterDomainError {
    /// The adapter identifier is empty after trimming.
    #[error("adapter id must not be empty")]
    EmptyAdapterId,

    /// The adapter display name is empty after trimming.
    #[error("adapter name must not be empty")]
    EmptyName,

    /// The adapter endpoint is empty after trimming.
    #[error("adapter endpoint must not be empty")]
    EmptyEndpoint,
}

/// Error returned while parsing adapter status from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown adapter status: {0}")]
pub struct ParseAdapterStatusError(pub String);

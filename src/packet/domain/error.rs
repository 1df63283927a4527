//! Error types for packet domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing packet domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PacketDomainError {
    /// The packet identifier is empty after trimming.
    #[error("packet id must not be empty")]
    EmptyPacketId,

    /// The packet timestamp is neither RFC 3339 nor naive ISO-8601.
    #[error("invalid packet timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Error returned when a tag is outside the closed data type set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown data type: {0}")]
pub struct ParseDataTypeError(pub String);

/// Error returned when a projection name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("data type has no projection store: {0}")]
pub struct ParseProjectionKindError(pub String);

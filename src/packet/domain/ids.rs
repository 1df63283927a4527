//! Identifier types for the packet domain.

use super::PacketDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen packet identifier.
///
/// Identifiers are not deduplicated: submitting a second packet with the
/// same id replaces the first in every store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacketId(String);

impl PacketId {
    /// Creates a validated packet identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PacketDomainError::EmptyPacketId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, PacketDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(PacketDomainError::EmptyPacketId);
        }
        Ok(Self(trimmed))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PacketId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

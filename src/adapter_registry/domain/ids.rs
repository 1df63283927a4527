//! Identifier types for the adapter domain.

use super::AdapterDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen identifier of a registered adapter.
///
/// Identifiers are opaque; the only rule is that they are non-empty once
/// surrounding whitespace is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterId(String);

impl AdapterId {
    /// Creates a validated adapter identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyAdapterId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, AdapterDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(AdapterDomainError::EmptyAdapterId);
        }
        Ok(Self(trimmed))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AdapterId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AdapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Text encodings shared by the `SQLite` row models.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a timestamp as RFC 3339 with microsecond precision.
///
/// The fixed width keeps lexical order equal to chronological order, which
/// the `ORDER BY timestamp DESC` queries rely on.
#[must_use]
pub fn timestamp_to_text(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a timestamp written by [`timestamp_to_text`].
///
/// # Errors
///
/// Returns the chrono parse error when the text is not RFC 3339.
pub fn text_to_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
}

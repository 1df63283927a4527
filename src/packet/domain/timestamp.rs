//! Packet timestamp parsing.

use super::PacketDomainError;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Years that survive the fixed-width RFC 3339 storage form.
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a producer-supplied timestamp.
///
/// RFC 3339 values keep their offset and are converted to UTC. Naive
/// ISO-8601 values (no offset) are taken to be UTC already. The UTC year
/// must have four digits.
///
/// # Errors
///
/// Returns [`PacketDomainError::InvalidTimestamp`] when neither form
/// matches or the year is outside `0..=9999`.
pub fn parse_packet_timestamp(raw: &str) -> Result<DateTime<Utc>, PacketDomainError> {
    let trimmed = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|fixed| fixed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|naive| naive.and_utc())
        });
    match parsed {
        Some(timestamp) if STORABLE_YEARS.contains(&timestamp.year()) => Ok(timestamp),
        _ => Err(PacketDomainError::InvalidTimestamp(raw.to_owned())),
    }
}

//! Coil type definitions
//!
//! Contains the coil entity, its creation payload, and the timestamp and
//! duration formatting shared by storage and response shaping.

use chrono::{Duration, NaiveDateTime, ParseResult};
use serde::{Deserialize, Serialize};

/// Storage format for timestamps.
///
/// Fixed-width UTC text so that SQL string comparison matches
/// chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A tracked inventory coil
///
/// `deleted_at` is null while the coil is active; a non-null value records
/// the soft-delete instant and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coil {
    /// Store-assigned identifier, immutable
    pub id: i64,

    /// Physical length, always positive
    pub length: i64,

    /// Physical weight, always positive
    pub weight: i64,

    /// Insertion instant (UTC), set exactly once
    pub created_at: NaiveDateTime,

    /// Soft-delete instant (UTC), null while active
    pub deleted_at: Option<NaiveDateTime>,
}

/// Creation payload for a new coil
#[derive(Debug, Clone, Deserialize)]
pub struct NewCoil {
    pub length: i64,
    pub weight: i64,
}

/// Formats a timestamp in the storage format
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp from the storage format
pub fn parse_timestamp(raw: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// Renders a time gap as a human-readable duration string
///
/// Format: `[-][Nd ]HH:MM:SS[.ffffff]`. The fractional part is omitted
/// when the gap is an exact number of seconds, the day prefix when the
/// gap is under a day.
pub fn format_duration(gap: Duration) -> String {
    let negative = gap < Duration::zero();
    let gap = if negative { -gap } else { gap };

    let micros = gap.num_microseconds().unwrap_or(i64::MAX);
    let total_seconds = micros / 1_000_000;
    let micros = micros % 1_000_000;

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{}d ", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if micros > 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}

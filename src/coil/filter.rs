//! Range-filter construction for coil listing
//!
//! Translates the optional `from_X`/`to_X` query-parameter pairs into a
//! validated list of inclusive per-column bounds. The five pairs are
//! enumerated by an explicit table built from direct field references,
//! so a renamed parameter fails to compile instead of silently matching
//! nothing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

/// Range-filter validation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Every bound across all pairs was absent
    #[error("no filter specified")]
    Empty,

    /// One side of a pair was given without the other
    #[error("missing paired bound for {0}")]
    UnpairedBound(&'static str),

    /// A mandatory parameter was absent
    #[error("missing required parameter {0}")]
    MissingParam(&'static str),

    /// `from` exceeded `to` within a pair
    #[error("lower bound exceeds upper bound for {0}")]
    InvertedBounds(&'static str),

    /// A bound value could not be parsed for its column type
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Raw range query parameters as received on the wire
///
/// All values arrive as strings; parsing happens in [`build_filter`] so
/// that malformed input surfaces as a validation error rather than a
/// transport-level rejection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RangeQuery {
    pub from_id: Option<String>,
    pub to_id: Option<String>,
    pub from_weight: Option<String>,
    pub to_weight: Option<String>,
    pub from_length: Option<String>,
    pub to_length: Option<String>,
    pub from_created_at: Option<String>,
    pub to_created_at: Option<String>,
    pub from_deleted_at: Option<String>,
    pub to_deleted_at: Option<String>,
}

/// Value type of a bounded column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundKind {
    Integer,
    Timestamp,
}

/// Which side of a pair a bound value belongs to
///
/// Determines how a date-only value is widened to a timestamp: lower
/// bounds take the start of the day, upper bounds the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundRole {
    Lower,
    Upper,
}

/// A parsed bound value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum BoundValue {
    Int(i64),
    Timestamp(NaiveDateTime),
}

/// Inclusive bounds on one column, both sides present
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBounds {
    pub column: &'static str,
    pub lower: BoundValue,
    pub upper: BoundValue,
}

/// One `from`/`to` parameter pair tied to its column
struct BoundPair<'a> {
    column: &'static str,
    kind: BoundKind,
    lower: Option<&'a str>,
    upper: Option<&'a str>,
}

impl RangeQuery {
    /// The static pair table: one entry per filterable column
    fn bound_pairs(&self) -> [BoundPair<'_>; 5] {
        [
            BoundPair {
                column: "id",
                kind: BoundKind::Integer,
                lower: self.from_id.as_deref(),
                upper: self.to_id.as_deref(),
            },
            BoundPair {
                column: "weight",
                kind: BoundKind::Integer,
                lower: self.from_weight.as_deref(),
                upper: self.to_weight.as_deref(),
            },
            BoundPair {
                column: "length",
                kind: BoundKind::Integer,
                lower: self.from_length.as_deref(),
                upper: self.to_length.as_deref(),
            },
            BoundPair {
                column: "created_at",
                kind: BoundKind::Timestamp,
                lower: self.from_created_at.as_deref(),
                upper: self.to_created_at.as_deref(),
            },
            BoundPair {
                column: "deleted_at",
                kind: BoundKind::Timestamp,
                lower: self.from_deleted_at.as_deref(),
                upper: self.to_deleted_at.as_deref(),
            },
        ]
    }
}

/// Builds the conjunctive range filter from a raw query
///
/// Validates pairing completeness and bound ordering per pair, and that
/// at least one pair is present overall. Absent pairs contribute no
/// bounds. The result feeds `Database::list_coils`.
pub fn build_filter(query: &RangeQuery) -> Result<Vec<ColumnBounds>, FilterError> {
    let mut bounds = Vec::new();

    for pair in query.bound_pairs() {
        let (lower_raw, upper_raw) = match (pair.lower, pair.upper) {
            (None, None) => continue,
            (Some(lower), Some(upper)) => (lower, upper),
            _ => return Err(FilterError::UnpairedBound(pair.column)),
        };

        let lower = parse_bound(pair.kind, BoundRole::Lower, pair.column, lower_raw)?;
        let upper = parse_bound(pair.kind, BoundRole::Upper, pair.column, upper_raw)?;

        if lower > upper {
            return Err(FilterError::InvertedBounds(pair.column));
        }

        bounds.push(ColumnBounds {
            column: pair.column,
            lower,
            upper,
        });
    }

    if bounds.is_empty() {
        return Err(FilterError::Empty);
    }

    Ok(bounds)
}

fn parse_bound(
    kind: BoundKind,
    role: BoundRole,
    column: &'static str,
    raw: &str,
) -> Result<BoundValue, FilterError> {
    match kind {
        BoundKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(BoundValue::Int)
            .map_err(|_| FilterError::InvalidValue(column, raw.to_string())),
        BoundKind::Timestamp => {
            parse_timestamp_bound(column, role, raw).map(BoundValue::Timestamp)
        }
    }
}

/// Parses a timestamp bound, widening date-only values per their role
///
/// Accepts a full timestamp (`YYYY-MM-DDTHH:MM:SS[.f]`, `T` or space) or
/// a calendar date. A bare date becomes the day's first instant for a
/// lower bound and its last representable instant (23:59:59.999999) for
/// an upper bound. The role is the value's own, not the pair's.
pub fn parse_timestamp_bound(
    column: &'static str,
    role: BoundRole,
    raw: &str,
) -> Result<NaiveDateTime, FilterError> {
    let raw = raw.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match role {
            BoundRole::Lower => NaiveTime::MIN,
            BoundRole::Upper => end_of_day(),
        };
        return Ok(date.and_time(time));
    }

    Err(FilterError::InvalidValue(column, raw.to_string()))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("valid time of day")
}

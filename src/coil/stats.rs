//! Statistics aggregation over a creation-date window
//!
//! The repository supplies two independent reads for the same window: a
//! SQL aggregate over the matching rows and the ordered row list used for
//! gap pairing. This module validates the window, pairs id-adjacent rows,
//! and shapes the response object.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::filter::{parse_timestamp_bound, BoundRole, FilterError};
use super::types::format_duration;

/// Validated `[from, to]` window over `created_at`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl StatsWindow {
    /// Parses and validates the mandatory `from_date`/`to_date` parameters
    ///
    /// Each value independently widens from a calendar date per its role;
    /// the window must satisfy `from <= to`.
    pub fn parse(from_date: Option<&str>, to_date: Option<&str>) -> Result<Self, FilterError> {
        let from_raw = from_date.ok_or(FilterError::MissingParam("from_date"))?;
        let to_raw = to_date.ok_or(FilterError::MissingParam("to_date"))?;

        let from = parse_timestamp_bound("from_date", BoundRole::Lower, from_raw)?;
        let to = parse_timestamp_bound("to_date", BoundRole::Upper, to_raw)?;

        if from > to {
            return Err(FilterError::InvertedBounds("date"));
        }

        Ok(Self { from, to })
    }
}

/// SQL aggregate over the rows created within a window
///
/// Only produced for non-empty windows, so the sums and extrema are
/// always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowAggregate {
    pub amount: i64,
    pub deleted_amount: i64,
    pub total_length: i64,
    pub total_weight: i64,
    pub max_length: i64,
    pub min_length: i64,
    pub max_weight: i64,
    pub min_weight: i64,
}

/// Row projection used for gap pairing, ordered by id
#[derive(Debug, Clone, PartialEq)]
pub struct GapRow {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Extrema of time gaps between id-adjacent rows
///
/// A field is `None` when no qualifying pair exists in the window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GapStats {
    pub creation_max: Option<Duration>,
    pub creation_min: Option<Duration>,
    pub deletion_max: Option<Duration>,
    pub deletion_min: Option<Duration>,
}

/// Computes gap extrema from window rows ordered by id
///
/// Rows pair when the second id is exactly the first id plus one; id
/// adjacency is the deliberate pairing key even though it only
/// approximates creation order. Gaps are `second - first` and keep their
/// sign. Deletion gaps additionally require both rows to be soft-deleted.
pub fn compute_gap_stats(rows: &[GapRow]) -> GapStats {
    let mut stats = GapStats::default();

    for pair in rows.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if second.id != first.id + 1 {
            continue;
        }

        let creation_gap = second.created_at - first.created_at;
        stats.creation_max = Some(fold_max(stats.creation_max, creation_gap));
        stats.creation_min = Some(fold_min(stats.creation_min, creation_gap));

        if let (Some(first_deleted), Some(second_deleted)) = (first.deleted_at, second.deleted_at)
        {
            let deletion_gap = second_deleted - first_deleted;
            stats.deletion_max = Some(fold_max(stats.deletion_max, deletion_gap));
            stats.deletion_min = Some(fold_min(stats.deletion_min, deletion_gap));
        }
    }

    stats
}

fn fold_max(current: Option<Duration>, gap: Duration) -> Duration {
    match current {
        Some(existing) => existing.max(gap),
        None => gap,
    }
}

fn fold_min(current: Option<Duration>, gap: Duration) -> Duration {
    match current {
        Some(existing) => existing.min(gap),
        None => gap,
    }
}

/// Statistics response for a creation-date window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoilStats {
    /// Number of coils created within the window
    pub amount: i64,

    /// Of those, how many are soft-deleted
    pub deleted_amount: i64,

    pub total_length: i64,
    pub total_weight: i64,

    /// Sum divided by amount, rounded to 2 decimal places
    pub average_length: f64,
    pub average_weight: f64,

    pub max_length: i64,
    pub min_length: i64,
    pub max_weight: i64,
    pub min_weight: i64,

    /// Gap extrema as duration strings, null without a qualifying pair
    pub creation_max_time_gap: Option<String>,
    pub creation_min_time_gap: Option<String>,
    pub deletion_max_time_gap: Option<String>,
    pub deletion_min_time_gap: Option<String>,
}

impl CoilStats {
    /// Shapes the response from the two window reads
    ///
    /// The aggregate comes from a non-empty window (`amount > 0`), so the
    /// averages never divide by zero. Durations turn into strings here,
    /// at the response boundary only.
    pub fn from_parts(aggregate: WindowAggregate, gaps: GapStats) -> Self {
        let amount = aggregate.amount as f64;

        Self {
            amount: aggregate.amount,
            deleted_amount: aggregate.deleted_amount,
            total_length: aggregate.total_length,
            total_weight: aggregate.total_weight,
            average_length: round2(aggregate.total_length as f64 / amount),
            average_weight: round2(aggregate.total_weight as f64 / amount),
            max_length: aggregate.max_length,
            min_length: aggregate.min_length,
            max_weight: aggregate.max_weight,
            min_weight: aggregate.min_weight,
            creation_max_time_gap: gaps.creation_max.map(format_duration),
            creation_min_time_gap: gaps.creation_min.map(format_duration),
            deletion_max_time_gap: gaps.deletion_max.map(format_duration),
            deletion_min_time_gap: gaps.deletion_min.map(format_duration),
        }
    }
}

/// Rounds to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Coil domain logic
//!
//! The coil is the sole tracked entity: a physical item with a length, a
//! weight, and creation/soft-deletion timestamps.
//!
//! ## Architecture
//!
//! - **Filter**: validates the paired `from_X`/`to_X` query parameters and
//!   produces the inclusive per-column bounds the repository renders as SQL
//! - **Stats**: validates the date window and aggregates the window reads
//!   into the statistics response, including the id-adjacency time gaps

mod types;

#[cfg(test)]
mod types_tests;

pub use types::*;

/// Range-filter builder for the listing endpoint
pub mod filter;

#[cfg(test)]
mod filter_tests;

/// Statistics aggregation for the stats endpoint
pub mod stats;

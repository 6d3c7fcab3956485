//! Aggregation of the question corpus into statistics documents.
//!
//! This module transforms loaded question sets into:
//! - The full statistics tree (global, per-program, per-subject, detailed)
//! - A simplified summary projected from that tree

pub mod schema;
pub mod stats_builder;
pub mod summary;

// Re-export main types and functions
pub use schema::{DimensionBucket, QuestionStats, Status, StatusCounts};
pub use stats_builder::{build_stats, Classification, StatsBuilder};
pub use summary::{summarize, SimplifiedStats, SummaryBucket};

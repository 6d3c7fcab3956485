//! QBank Stats
//!
//! Statistics over a standardized-test question corpus: totals by program,
//! subject, main category, subcategory, difficulty and score band, each
//! split into active and inactive questions.
//!
//! This crate provides the core implementation for the
//! `qbank-stats` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! qbank-stats --data-dir data generate --summary
//! qbank-stats show
//! ```
//!
//! Library users typically call [`output::generate_stats_files`] or the
//! cached readers [`output::load_detailed_stats`] and
//! [`output::load_simplified_stats`].

pub mod aggregator;
pub mod commands;
pub mod corpus;
pub mod output;
pub mod utils;

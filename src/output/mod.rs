//! Output writers for statistics documents.
//!
//! This module handles writing data to disk:
//! - Pretty JSON documents (detailed and simplified)
//! - The cached read path that regenerates on a miss

pub mod json;
pub mod stats_files;

// Re-export main functions
pub use json::{document_to_string, read_document, validate_output_path, write_document};
pub use stats_files::{
    cached_at, compute_stats, generate_stats_files, load_detailed_stats, load_simplified_stats,
    GeneratedStats,
};

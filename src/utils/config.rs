//! Configuration and constants for the statistics pipeline.

use std::path::{Path, PathBuf};

/// Directory scanned for `<PROGRAM>_<math|RW>.json` question files
pub const DEFAULT_DATA_DIR: &str = "data";

/// Directory both statistics documents are written to
pub const DEFAULT_OUTPUT_DIR: &str = "total_questions";

/// Liveness lookup document saved from the question bank
pub const DEFAULT_LOOKUP_PATH: &str = "lookup.json";

pub const DETAILED_STATS_FILE: &str = "question_stats.json";
pub const SIMPLIFIED_STATS_FILE: &str = "simplified_stats.json";

/// Bucket name used for any missing or invalid dimension value
pub const UNKNOWN_KEY: &str = "Unknown";

/// Valid difficulty codes, in display order
pub const DIFFICULTY_CODES: &[&str] = &["E", "M", "H"];

/// Inclusive range of valid score bands
pub const MIN_SCORE_BAND: u64 = 1;
pub const MAX_SCORE_BAND: u64 = 7;

// Field names inside a question record
pub const FIELD_QUESTION_ID: &str = "questionId";
pub const FIELD_PROGRAM: &str = "program";
pub const FIELD_MAIN_CATEGORY: &str = "primary_class_cd_desc";
pub const FIELD_SKILL: &str = "skill_desc";
pub const FIELD_DIFFICULTY: &str = "difficulty";
pub const FIELD_SCORE_BAND: &str = "score_band_range_cd";
pub const FIELD_EXTERNAL_ID: &str = "external_id";
pub const FIELD_DETAILS: &str = "details";

// Field names inside the liveness lookup document
pub const LOOKUP_WRAPPER_FIELD: &str = "lookupData";
pub const MATH_LIVE_FIELD: &str = "mathLiveItems";
pub const READING_LIVE_FIELD: &str = "readingLiveItems";

/// Default page size for question listings
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Locations the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub lookup_path: PathBuf,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            lookup_path: PathBuf::from(DEFAULT_LOOKUP_PATH),
        }
    }
}

impl StatsConfig {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        lookup_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            lookup_path: lookup_path.into(),
        }
    }

    /// Path of the full statistics document
    pub fn detailed_path(&self) -> PathBuf {
        self.output_dir.join(DETAILED_STATS_FILE)
    }

    /// Path of the simplified statistics document
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SIMPLIFIED_STATS_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = StatsConfig::default();
        assert_eq!(config.detailed_path(), Path::new("total_questions/question_stats.json"));
        assert_eq!(config.summary_path(), Path::new("total_questions/simplified_stats.json"));
        assert_eq!(config.data_dir(), Path::new("data"));
    }
}

//! Persisted statistics documents and the cached read path.
//!
//! `generate_stats_files` runs the whole pipeline and overwrites both
//! documents. The `load_*` readers regenerate on a cache miss (document
//! absent or unreadable) and then re-read. Documents are replaced by rename,
//! so two processes regenerating at once never interleave bytes; the last
//! writer wins, and both write identical content for unchanged input.

use super::json::{read_document, write_document};
use crate::aggregator::{build_stats, summarize, QuestionStats, SimplifiedStats};
use crate::corpus::{load_corpus, load_live_items};
use crate::utils::config::StatsConfig;
use crate::utils::error::OutputError;
use chrono::{DateTime, Local};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Both documents produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStats {
    pub detailed: QuestionStats,
    pub simplified: SimplifiedStats,
}

/// Run Loader -> Aggregator -> Projector and compute both documents
///
/// Nothing is written; see `generate_stats_files`.
pub fn compute_stats(config: &StatsConfig) -> GeneratedStats {
    let corpus = load_corpus(config.data_dir());
    if corpus.is_empty() {
        warn!("No question files found in {}", config.data_dir().display());
    }

    let live = load_live_items(&config.lookup_path);
    let detailed = build_stats(&corpus, &live);
    let simplified = summarize(&detailed);

    GeneratedStats {
        detailed,
        simplified,
    }
}

/// Regenerate and persist both documents
///
/// **Public** - main entry point for the batch job
///
/// # Errors
/// Only write failures surface; missing or malformed inputs are logged and
/// skipped.
pub fn generate_stats_files(config: &StatsConfig) -> Result<GeneratedStats, OutputError> {
    let generated = compute_stats(config);

    write_document(&generated.detailed, config.detailed_path())?;
    write_document(&generated.simplified, config.summary_path())?;

    info!("Statistics generated successfully in {}", config.output_dir.display());
    Ok(generated)
}

/// Read the full document, generating it first if absent or unreadable
pub fn load_detailed_stats(config: &StatsConfig) -> Result<QuestionStats, OutputError> {
    load_or_generate(config, &config.detailed_path())
}

/// Read the simplified document, generating it first if absent or unreadable
pub fn load_simplified_stats(config: &StatsConfig) -> Result<SimplifiedStats, OutputError> {
    load_or_generate(config, &config.summary_path())
}

fn load_or_generate<T: DeserializeOwned>(
    config: &StatsConfig,
    path: &Path,
) -> Result<T, OutputError> {
    match read_document(path) {
        Ok(document) => return Ok(document),
        Err(e) if e.is_not_found() => {
            info!("{} not found, generating statistics", path.display());
        }
        Err(e) => {
            warn!("{}; regenerating statistics", e);
        }
    }

    generate_stats_files(config)?;
    Ok(read_document(path)?)
}

/// Last modification time of the persisted full document, if any
pub fn cached_at(config: &StatsConfig) -> Option<DateTime<Local>> {
    let modified = std::fs::metadata(config.detailed_path())
        .and_then(|m| m.modified())
        .ok()?;
    Some(DateTime::<Local>::from(modified))
}

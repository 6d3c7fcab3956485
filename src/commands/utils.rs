use crate::aggregator::QuestionStats;
use crate::output::{cached_at, load_simplified_stats, read_document};
use crate::utils::config::StatsConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a detailed statistics JSON file
pub fn validate_stats_file(file_path: &Path) -> Result<QuestionStats> {
    println!("Validating statistics: {}", file_path.display());

    let stats: QuestionStats = read_document(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    stats.verify().context("Statistics document is inconsistent")?;

    println!("✓ Valid statistics JSON");
    println!("  Total Questions: {}", stats.total_questions);
    println!("  Active: {}", stats.total_active);
    println!("  Inactive: {}", stats.total_inactive);
    println!("  Programs: {}", stats.by_program.len());
    println!("  Main Categories: {}", stats.by_main_category_overall.len());

    Ok(stats)
}

/// Print the simplified statistics, generating them on a cache miss
pub fn show_stats(config: &StatsConfig, as_json: bool) -> Result<()> {
    let summary = load_simplified_stats(config).context("Failed to load simplified statistics")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(at) = cached_at(config) {
        println!("Cached statistics from {}", at.format("%Y-%m-%d %H:%M:%S"));
    }
    print!("{}", summary.text_report());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("QBank Stats v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Question-bank corpus statistics by program, category, difficulty and score band.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::generate_stats_files;
    use std::fs;

    #[test]
    fn test_validate_generated_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StatsConfig::new(dir.path().join("data"), dir.path().join("out"), dir.path().join("lookup.json"));
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(config.data_dir.join("SAT_RW.json"), r#"[{"difficulty": "H"}, {}]"#).unwrap();
        generate_stats_files(&config).unwrap();

        let stats = validate_stats_file(&config.detailed_path()).unwrap();
        assert_eq!(stats.total_questions, 2);
    }

    #[test]
    fn test_validate_rejects_inconsistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("question_stats.json");
        let mut doc = serde_json::to_value(QuestionStats::default()).unwrap();
        doc["total_questions"] = serde_json::json!(5);
        fs::write(&path, doc.to_string()).unwrap();

        assert!(validate_stats_file(&path).is_err());
    }
}

//! JSON document writer and reader.
//!
//! Writes statistics documents to JSON files with proper formatting. Writes go
//! to a hidden temp file next to the target and are renamed into place, so a
//! reader never sees a partially written document.

use crate::utils::error::{LoadError, OutputError};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Write a document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - Statistics document to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let stats = build_stats(&corpus, &live);
/// write_document(&stats, "total_questions/question_stats.json")?;
/// ```
pub fn write_document<T: Serialize>(
    document: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing document to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Serialize to JSON with pretty printing
    let mut json = serde_json::to_string_pretty(document)
        .map_err(OutputError::SerializationFailed)?;
    json.push('\n');

    atomic_write(output_path, json.as_bytes())?;

    info!(
        "Document written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Hidden sibling used while a document is being written
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write to a temp file, then rename it over the target
///
/// **Private** - the rename is atomic on POSIX within one directory
fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    let temp = temp_path(path);

    let result = File::create(&temp).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });

    if let Err(e) = result.and_then(|_| std::fs::rename(&temp, path)) {
        let _ = std::fs::remove_file(&temp);
        return Err(OutputError::WriteFailed(e));
    }

    Ok(())
}

/// Serialize a document to a pretty JSON string
pub fn document_to_string<T: Serialize>(document: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Public** - used before writes and by callers that want early failure
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        if !parent.exists() {
            debug!("Parent directory will be created: {}", parent.display());
        } else if !parent.is_dir() {
            return Err(OutputError::InvalidPath(format!(
                "Parent is not a directory: {}",
                parent.display()
            )));
        }
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a document from a JSON file
///
/// # Errors
/// * `LoadError::Io` - File cannot be opened or read
/// * `LoadError::Json` - Content is not a valid document
pub fn read_document<T: DeserializeOwned>(input_path: impl AsRef<Path>) -> Result<T, LoadError> {
    let input_path = input_path.as_ref();

    debug!("Reading document from: {}", input_path.display());

    let file = File::open(input_path).map_err(|e| LoadError::io(input_path, e))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::json(input_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{QuestionStats, Status};
    use tempfile::NamedTempFile;

    fn create_test_stats() -> QuestionStats {
        let mut stats = QuestionStats::default();
        stats.record_total(Status::Active);
        stats.record_total(Status::Inactive);
        stats
    }

    #[test]
    fn test_write_and_read_document() {
        let stats = create_test_stats();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_document(&stats, path).unwrap();
        let loaded: QuestionStats = read_document(path).unwrap();

        assert_eq!(loaded.total_questions, 2);
        assert_eq!(loaded.total_active, 1);
        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("question_stats.json");

        write_document(&create_test_stats(), &path).unwrap();
        write_document(&create_test_stats(), &path).unwrap();

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["question_stats.json".to_string()]);
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("out/question_stats.json")),
            Path::new("out/.question_stats.json.tmp")
        );
    }

    #[test]
    fn test_document_to_string() {
        let json = document_to_string(&create_test_stats()).unwrap();
        assert!(json.contains("\"total_questions\": 2"));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_parent_is_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = validate_output_path(&temp_file.path().join("question_stats.json"));
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/question_stats.json");

        write_document(&create_test_stats(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result: Result<QuestionStats, _> = read_document(temp_dir.path().join("nope.json"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_malformed_document() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{\"total_questions\": \"many\"}").unwrap();
        let result: Result<QuestionStats, _> = read_document(temp_file.path());
        assert!(matches!(result, Err(LoadError::Json { .. })));
    }
}

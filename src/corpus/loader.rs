//! Discover and load per-program/per-subject question files.
//!
//! File names follow `<PROGRAM>_<math|RW>.json`. A file that cannot be read or
//! parsed is skipped with a warning; the scan itself never fails on one bad
//! file.

use super::question::{QuestionRecord, Subject};
use crate::utils::error::LoadError;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Identifies one question file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorpusKey {
    pub program: String,
    pub subject: Subject,
}

impl CorpusKey {
    pub fn new(program: impl Into<String>, subject: Subject) -> Self {
        Self {
            program: program.into(),
            subject,
        }
    }
}

/// All loaded question sets, keyed by `(program, subject)`
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sets: BTreeMap<CorpusKey, Vec<QuestionRecord>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a question set, returning the one it replaced
    pub fn insert(
        &mut self,
        key: CorpusKey,
        questions: Vec<QuestionRecord>,
    ) -> Option<Vec<QuestionRecord>> {
        self.sets.insert(key, questions)
    }

    pub fn get(&self, program: &str, subject: Subject) -> Option<&[QuestionRecord]> {
        self.sets
            .get(&CorpusKey::new(program, subject))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CorpusKey, &[QuestionRecord])> {
        self.sets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of question files loaded
    pub fn file_count(&self) -> usize {
        self.sets.len()
    }

    pub fn question_count(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Match a file name against `<PROGRAM>_<math|RW>.json`
///
/// The stem is split at its last underscore, so `PSAT_10_math.json` yields
/// program `PSAT_10`.
pub fn parse_corpus_file_name(file_name: &str) -> Option<CorpusKey> {
    let stem = file_name.strip_suffix(".json")?;
    let (program, subject) = stem.rsplit_once('_')?;

    if program.is_empty() || !program.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let subject = Subject::from_file_part(subject)?;
    Some(CorpusKey::new(program, subject))
}

/// Find all question files in a directory, sorted by file name
///
/// A missing or unreadable directory yields no files.
pub fn discover_corpus_files(data_dir: &Path) -> Vec<(CorpusKey, PathBuf)> {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read data directory {}: {}", data_dir.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    names
        .into_iter()
        .filter_map(|name| {
            debug!("Checking file: {}", name);
            let key = parse_corpus_file_name(&name)?;
            debug!(
                "Found question file: {} -> Program: {}, Subject: {}",
                name, key.program, key.subject
            );
            Some((key, data_dir.join(name)))
        })
        .collect()
}

/// Parse one question file as a JSON array of records
pub fn load_question_file(path: &Path) -> Result<Vec<QuestionRecord>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::json(path, e))
}

/// Load every question file in `data_dir`
///
/// **Public** - main entry point for corpus loading
///
/// Returns an empty corpus when nothing matches; the caller decides whether
/// that deserves a warning.
pub fn load_corpus(data_dir: &Path) -> Corpus {
    info!("Looking for question files in {}", data_dir.display());

    let mut corpus = Corpus::new();

    for (key, path) in discover_corpus_files(data_dir) {
        let questions = match load_question_file(&path) {
            Ok(questions) => questions,
            Err(e) => {
                warn!("Skipping question file: {}", e);
                continue;
            }
        };

        debug!("Loaded {}: {} questions", path.display(), questions.len());

        let program = key.program.clone();
        let subject = key.subject;
        if corpus.insert(key, questions).is_some() {
            warn!(
                "{} replaces an earlier file for {} {}",
                path.display(),
                program,
                subject
            );
        }
    }

    info!(
        "Loaded {} question files ({} questions)",
        corpus.file_count(),
        corpus.question_count()
    );

    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_corpus_file_name() {
        assert_eq!(
            parse_corpus_file_name("SAT_math.json"),
            Some(CorpusKey::new("SAT", Subject::Math))
        );
        assert_eq!(
            parse_corpus_file_name("PSAT89_RW.json"),
            Some(CorpusKey::new("PSAT89", Subject::ReadingWriting))
        );
        assert_eq!(
            parse_corpus_file_name("SAT_Math.json"),
            Some(CorpusKey::new("SAT", Subject::Math))
        );
        assert_eq!(
            parse_corpus_file_name("PSAT_10_rw.json"),
            Some(CorpusKey::new("PSAT_10", Subject::ReadingWriting))
        );
    }

    #[test]
    fn test_parse_corpus_file_name_rejects() {
        assert_eq!(parse_corpus_file_name("SAT_math.JSON"), None);
        assert_eq!(parse_corpus_file_name("SAT_math.txt"), None);
        assert_eq!(parse_corpus_file_name("_math.json"), None);
        assert_eq!(parse_corpus_file_name("SAT_science.json"), None);
        assert_eq!(parse_corpus_file_name("SAT-1_math.json"), None);
        assert_eq!(parse_corpus_file_name("lookup.json"), None);
    }

    #[test]
    fn test_load_corpus_skips_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("SAT_math.json"), r#"[{"questionId": "a"}, {"questionId": "b"}]"#).unwrap();
        fs::write(dir.path().join("SAT_RW.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.json"), "[]").unwrap();

        let corpus = load_corpus(dir.path());

        assert_eq!(corpus.file_count(), 1);
        assert_eq!(corpus.question_count(), 2);
        assert!(corpus.get("SAT", Subject::Math).is_some());
        assert!(corpus.get("SAT", Subject::ReadingWriting).is_none());
    }

    #[test]
    fn test_load_corpus_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = load_corpus(&dir.path().join("nope"));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_later_file_replaces_same_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("SAT_MATH.json"), r#"[{}, {}, {}]"#).unwrap();
        fs::write(dir.path().join("SAT_math.json"), r#"[{}]"#).unwrap();

        let corpus = load_corpus(dir.path());

        // "SAT_MATH.json" sorts before "SAT_math.json"
        assert_eq!(corpus.file_count(), 1);
        assert_eq!(corpus.get("SAT", Subject::Math).unwrap().len(), 1);
    }
}

//! Liveness reference sets loaded from the question-bank lookup document.
//!
//! A question is active when its external id appears in the live set of its
//! subject. A missing, unparsable or wrongly shaped lookup document leaves
//! both sets empty, which classifies every question as inactive.

use super::question::Subject;
use crate::utils::config::{LOOKUP_WRAPPER_FIELD, MATH_LIVE_FIELD, READING_LIVE_FIELD};
use crate::utils::error::{LoadError, LookupError};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// External ids of currently served questions, per subject
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveItems {
    math: HashSet<String>,
    reading: HashSet<String>,
}

impl LiveItems {
    /// Empty sets: every question inactive
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        math: impl IntoIterator<Item = String>,
        reading: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            math: math.into_iter().collect(),
            reading: reading.into_iter().collect(),
        }
    }

    /// Build from a parsed lookup document.
    ///
    /// The live arrays may sit at the top level or under `lookupData`; both
    /// must be present as arrays. Non-id elements inside an array are skipped.
    pub fn from_lookup_value(doc: &Value) -> Result<Self, LookupError> {
        if !doc.is_object() {
            return Err(LookupError::NotAnObject);
        }
        let root = doc
            .get(LOOKUP_WRAPPER_FIELD)
            .filter(|inner| inner.is_object())
            .unwrap_or(doc);

        Ok(Self {
            math: collect_ids(root, MATH_LIVE_FIELD)?,
            reading: collect_ids(root, READING_LIVE_FIELD)?,
        })
    }

    /// Read the lookup document from disk
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        let doc: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| LoadError::json(path, e))?;
        Self::from_lookup_value(&doc).map_err(|source| LoadError::Lookup {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn set_for(&self, subject: Subject) -> &HashSet<String> {
        match subject {
            Subject::Math => &self.math,
            Subject::ReadingWriting => &self.reading,
        }
    }

    /// Whether a question with this external id is live for `subject`
    pub fn is_active(&self, subject: Subject, external_id: Option<&str>) -> bool {
        external_id.is_some_and(|id| self.set_for(subject).contains(id))
    }

    pub fn math_count(&self) -> usize {
        self.math.len()
    }

    pub fn reading_count(&self) -> usize {
        self.reading.len()
    }
}

fn collect_ids(root: &Value, field: &'static str) -> Result<HashSet<String>, LookupError> {
    let items = root
        .get(field)
        .and_then(Value::as_array)
        .ok_or(LookupError::MissingLiveItems(field))?;

    let ids = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
            _ => None,
        })
        .collect();
    Ok(ids)
}

/// Load liveness sets, falling back to empty sets on any failure
///
/// **Public** - used by the stats pipeline
pub fn load_live_items(path: &Path) -> LiveItems {
    match LiveItems::from_path(path) {
        Ok(live) => {
            info!(
                "Loaded liveness data: {} math, {} reading/writing live items",
                live.math_count(),
                live.reading_count()
            );
            live
        }
        Err(e) if e.is_not_found() => {
            warn!(
                "Lookup document {} not found; all questions will be counted as inactive",
                path.display()
            );
            LiveItems::empty()
        }
        Err(e) => {
            warn!("{}; all questions will be counted as inactive", e);
            debug!("Liveness fallback for {}", path.display());
            LiveItems::empty()
        }
    }
}

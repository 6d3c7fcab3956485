//! Question records and the dimension keys derived from them.
//!
//! Records are kept as raw JSON objects. Every field is optional and read
//! through accessors that treat `null` or a wrong-typed value as absent, so a
//! single odd record can never fail a whole file.

use crate::utils::config::{
    DIFFICULTY_CODES, FIELD_DETAILS, FIELD_DIFFICULTY, FIELD_EXTERNAL_ID, FIELD_MAIN_CATEGORY,
    FIELD_PROGRAM, FIELD_QUESTION_ID, FIELD_SCORE_BAND, FIELD_SKILL, MAX_SCORE_BAND,
    MIN_SCORE_BAND, UNKNOWN_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single question as stored in a corpus file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRecord(Map<String, Value>);

impl QuestionRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// String value of a top-level field, if present and a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn question_id(&self) -> Option<&str> {
        self.get_str(FIELD_QUESTION_ID)
    }

    pub fn program(&self) -> Option<&str> {
        self.get_str(FIELD_PROGRAM)
    }

    pub fn main_category(&self) -> &str {
        self.get_str(FIELD_MAIN_CATEGORY).unwrap_or(UNKNOWN_KEY)
    }

    pub fn subcategory(&self) -> &str {
        self.get_str(FIELD_SKILL).unwrap_or(UNKNOWN_KEY)
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_code(self.get_str(FIELD_DIFFICULTY))
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_value(self.get(FIELD_SCORE_BAND))
    }

    /// Identifier used for liveness lookup.
    ///
    /// Integer ids are stringified so they compare equal to the lookup
    /// document's string entries.
    pub fn external_id(&self) -> Option<String> {
        match self.get(FIELD_EXTERNAL_ID)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
            _ => None,
        }
    }

    /// Nested question body (`stem`, `answerOptions`, ...)
    pub fn details(&self) -> Option<&Map<String, Value>> {
        self.get(FIELD_DETAILS).and_then(Value::as_object)
    }
}

impl From<Value> for QuestionRecord {
    /// Non-object values become an empty record
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Test subject, normalized from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    Math,
    ReadingWriting,
}

impl Subject {
    /// Case-insensitive parse of the file-name subject part
    pub fn from_file_part(part: &str) -> Option<Self> {
        if part.eq_ignore_ascii_case("math") {
            Some(Self::Math)
        } else if part.eq_ignore_ascii_case("rw") {
            Some(Self::ReadingWriting)
        } else {
            None
        }
    }

    /// Key used in output documents
    pub fn code(&self) -> &'static str {
        match self {
            Self::Math => "MATH",
            Self::ReadingWriting => "RW",
        }
    }

    /// Suffix used in corpus file names
    pub fn file_part(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::ReadingWriting => "RW",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Easy/Medium/Hard, or `Unknown` for anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("E") => Self::Easy,
            Some("M") => Self::Medium,
            Some("H") => Self::Hard,
            _ => Self::Unknown,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Easy => DIFFICULTY_CODES[0],
            Self::Medium => DIFFICULTY_CODES[1],
            Self::Hard => DIFFICULTY_CODES[2],
            Self::Unknown => UNKNOWN_KEY,
        }
    }
}

/// Score band 1-7, or `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Band(u8),
    Unknown,
}

impl ScoreBand {
    /// Accepts an integer or an all-digit string within the valid range
    pub fn from_value(value: Option<&Value>) -> Self {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse::<u64>().ok()
            }
            _ => None,
        };

        match parsed {
            Some(band) if (MIN_SCORE_BAND..=MAX_SCORE_BAND).contains(&band) => {
                Self::Band(band as u8)
            }
            _ => Self::Unknown,
        }
    }

    pub fn key(&self) -> String {
        match self {
            Self::Band(band) => band.to_string(),
            Self::Unknown => UNKNOWN_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> QuestionRecord {
        QuestionRecord::from(value)
    }

    #[test]
    fn test_missing_fields_default_to_unknown() {
        let q = record(json!({ "questionId": "abc" }));
        assert_eq!(q.main_category(), "Unknown");
        assert_eq!(q.subcategory(), "Unknown");
        assert_eq!(q.difficulty(), Difficulty::Unknown);
        assert_eq!(q.score_band(), ScoreBand::Unknown);
        assert_eq!(q.external_id(), None);
    }

    #[test]
    fn test_null_and_wrong_types_count_as_absent() {
        let q = record(json!({
            "primary_class_cd_desc": null,
            "skill_desc": 42,
            "difficulty": ["E"],
            "external_id": true,
        }));
        assert_eq!(q.main_category(), "Unknown");
        assert_eq!(q.subcategory(), "Unknown");
        assert_eq!(q.difficulty(), Difficulty::Unknown);
        assert_eq!(q.external_id(), None);
    }

    #[test]
    fn test_difficulty_codes() {
        assert_eq!(Difficulty::from_code(Some("E")).key(), "E");
        assert_eq!(Difficulty::from_code(Some("M")).key(), "M");
        assert_eq!(Difficulty::from_code(Some("H")).key(), "H");
        assert_eq!(Difficulty::from_code(Some("X")).key(), "Unknown");
        assert_eq!(Difficulty::from_code(Some("e")).key(), "Unknown");
        assert_eq!(Difficulty::from_code(None).key(), "Unknown");
    }

    #[test]
    fn test_score_band_parsing() {
        assert_eq!(ScoreBand::from_value(Some(&json!(3))), ScoreBand::Band(3));
        assert_eq!(ScoreBand::from_value(Some(&json!("7"))), ScoreBand::Band(7));
        assert_eq!(ScoreBand::from_value(Some(&json!(0))), ScoreBand::Unknown);
        assert_eq!(ScoreBand::from_value(Some(&json!(8))), ScoreBand::Unknown);
        assert_eq!(ScoreBand::from_value(Some(&json!(-2))), ScoreBand::Unknown);
        assert_eq!(ScoreBand::from_value(Some(&json!(3.0))), ScoreBand::Unknown);
        assert_eq!(ScoreBand::from_value(Some(&json!(" 3"))), ScoreBand::Unknown);
        assert_eq!(ScoreBand::from_value(Some(&json!(""))), ScoreBand::Unknown);
        assert_eq!(ScoreBand::from_value(None), ScoreBand::Unknown);
        assert_eq!(ScoreBand::Band(5).key(), "5");
    }

    #[test]
    fn test_integer_external_id_is_stringified() {
        let q = record(json!({ "external_id": 1234 }));
        assert_eq!(q.external_id().as_deref(), Some("1234"));
    }

    #[test]
    fn test_subject_from_file_part() {
        assert_eq!(Subject::from_file_part("math"), Some(Subject::Math));
        assert_eq!(Subject::from_file_part("MATH"), Some(Subject::Math));
        assert_eq!(Subject::from_file_part("RW"), Some(Subject::ReadingWriting));
        assert_eq!(Subject::from_file_part("rw"), Some(Subject::ReadingWriting));
        assert_eq!(Subject::from_file_part("science"), None);
        assert_eq!(Subject::ReadingWriting.code(), "RW");
        assert_eq!(Subject::Math.code(), "MATH");
    }
}

//! Filtering, pagination and lookup over an in-memory question list.

use super::question::QuestionRecord;
use crate::utils::config::{FIELD_DIFFICULTY, FIELD_MAIN_CATEGORY, FIELD_SKILL, DEFAULT_PAGE_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Optional filters applied before pagination
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Exact difficulty code match
    pub difficulty: Option<String>,
    /// Case-insensitive substring of the skill description
    pub skill: Option<String>,
    /// Case-insensitive substring of the main category description
    pub primary_class: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &QuestionRecord) -> bool {
        if let Some(difficulty) = self.difficulty.as_deref().filter(|d| !d.is_empty()) {
            if question.get_str(FIELD_DIFFICULTY) != Some(difficulty) {
                return false;
            }
        }

        contains_ignore_case(question.get_str(FIELD_SKILL), self.skill.as_deref())
            && contains_ignore_case(
                question.get_str(FIELD_MAIN_CATEGORY),
                self.primary_class.as_deref(),
            )
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match needle.filter(|n| !n.is_empty()) {
        Some(needle) => haystack
            .unwrap_or_default()
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Page selection; a positive `offset` overrides `(page - 1) * limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
    pub page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            page: 1,
        }
    }
}

impl PageRequest {
    pub fn start(&self) -> usize {
        if self.offset > 0 {
            self.offset
        } else {
            self.page.saturating_sub(1).saturating_mul(self.limit)
        }
    }
}

/// Client-facing projection of a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub difficulty: String,
    pub skill_desc: String,
    pub primary_class_cd_desc: String,
    pub program: String,
    pub stem: String,
    #[serde(rename = "answerOptions")]
    pub answer_options: Vec<Value>,
    #[serde(rename = "type")]
    pub question_type: String,
    pub correct_answer: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl QuestionView {
    /// Project a record, defaulting absent fields to empty values
    pub fn from_record(question: &QuestionRecord, include_rationale: bool) -> Self {
        let empty = Map::new();
        let details = question.details().unwrap_or(&empty);
        let detail_str = |key: &str| {
            details
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let top_str = |key: &str| question.get_str(key).unwrap_or_default().to_string();

        let answer_options = details
            .get("answerOptions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let correct_answer = details
            .get("correct_answer")
            .and_then(Value::as_array)
            .map(|answers| {
                answers
                    .iter()
                    .filter_map(|a| a.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            question_id: question.question_id().unwrap_or_default().to_string(),
            difficulty: top_str(FIELD_DIFFICULTY),
            skill_desc: top_str(FIELD_SKILL),
            primary_class_cd_desc: top_str(FIELD_MAIN_CATEGORY),
            program: question.program().unwrap_or_default().to_string(),
            stem: detail_str("stem"),
            answer_options,
            question_type: detail_str("type"),
            correct_answer,
            rationale: include_rationale.then(|| detail_str("rationale")),
        }
    }
}

/// One page of filtered questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedQuestions {
    /// Count after filtering, before pagination
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub questions: Vec<QuestionView>,
}

/// Filter then paginate a question list
pub fn list_questions(
    questions: &[QuestionRecord],
    filter: &QuestionFilter,
    page: PageRequest,
) -> PaginatedQuestions {
    let filtered: Vec<&QuestionRecord> = questions.iter().filter(|q| filter.matches(q)).collect();

    let views = filtered
        .iter()
        .skip(page.start())
        .take(page.limit)
        .map(|q| QuestionView::from_record(q, false))
        .collect();

    PaginatedQuestions {
        total: filtered.len(),
        page: page.page,
        limit: page.limit,
        questions: views,
    }
}

/// Find a question by its `questionId`
pub fn find_question<'a>(questions: &'a [QuestionRecord], question_id: &str) -> Option<&'a QuestionRecord> {
    questions
        .iter()
        .find(|q| q.question_id() == Some(question_id))
}

/// Sorted distinct values of a string field (missing values appear as "")
pub fn distinct_values(questions: &[QuestionRecord], field: &str) -> Vec<String> {
    questions
        .iter()
        .map(|q| q.get_str(field).unwrap_or_default().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

//! Question listing, lookup and category commands.

use super::models::{ListArgs, QuestionSet, ShowQuestionArgs};
use crate::corpus::{
    distinct_values, find_question, list_questions, load_question_file, PaginatedQuestions,
    QuestionRecord, QuestionView,
};
use crate::utils::config::{FIELD_MAIN_CATEGORY, FIELD_SKILL};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Load the question file for one `(program, subject)` set
///
/// A missing file is an empty set, matching how the statistics pipeline
/// treats absent inputs.
pub fn load_set(data_dir: &Path, set: &QuestionSet) -> Result<Vec<QuestionRecord>> {
    let path = data_dir.join(set.file_name());
    debug!("Loading question set from {}", path.display());

    match load_question_file(&path) {
        Ok(questions) => Ok(questions),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e).context(format!("Failed to load {}", path.display())),
    }
}

/// Filter and paginate a question set
pub fn execute_list(args: &ListArgs) -> Result<PaginatedQuestions> {
    let questions = load_set(&args.config.data_dir, &args.set)?;
    Ok(list_questions(&questions, &args.filter, args.page))
}

/// Look up a single question by id
pub fn execute_show(args: &ShowQuestionArgs) -> Result<QuestionView> {
    let questions = load_set(&args.config.data_dir, &args.set)?;

    let question = find_question(&questions, &args.question_id).with_context(|| {
        format!(
            "Question {} not found in {} {}",
            args.question_id, args.set.program, args.set.subject
        )
    })?;

    Ok(QuestionView::from_record(question, args.include_rationale))
}

/// Sorted distinct main categories, or skills when `skills` is set
pub fn execute_categories(data_dir: &Path, set: &QuestionSet, skills: bool) -> Result<Vec<String>> {
    let questions = load_set(data_dir, set)?;
    let field = if skills { FIELD_SKILL } else { FIELD_MAIN_CATEGORY };
    Ok(distinct_values(&questions, field))
}

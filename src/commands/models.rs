use crate::corpus::{PageRequest, QuestionFilter, Subject};
use crate::utils::config::StatsConfig;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Input and output locations
    pub config: StatsConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

/// Which question file a query runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    pub program: String,
    pub subject: Subject,
}

impl QuestionSet {
    pub fn new(program: impl Into<String>, subject: Subject) -> Self {
        Self {
            program: program.into(),
            subject,
        }
    }

    /// File name inside the data directory
    pub fn file_name(&self) -> String {
        format!("{}_{}.json", self.program, self.subject.file_part())
    }
}

/// Arguments for the questions command
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub config: StatsConfig,
    pub set: QuestionSet,
    pub filter: QuestionFilter,
    pub page: PageRequest,
}

/// Arguments for the question command
#[derive(Debug, Clone)]
pub struct ShowQuestionArgs {
    pub config: StatsConfig,
    pub set: QuestionSet,
    pub question_id: String,
    pub include_rationale: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_set_file_name() {
        assert_eq!(QuestionSet::new("SAT", Subject::Math).file_name(), "SAT_math.json");
        assert_eq!(
            QuestionSet::new("PSAT89", Subject::ReadingWriting).file_name(),
            "PSAT89_RW.json"
        );
    }
}

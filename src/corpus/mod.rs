//! Question corpus loading, liveness lookup and in-memory queries.
//!
//! This module handles:
//! - Discovering `<PROGRAM>_<math|RW>.json` files
//! - Reading question records with tolerant field access
//! - Loading the liveness reference sets
//! - Filtering and paginating question lists

pub mod liveness;
pub mod loader;
pub mod query;
pub mod question;

// Re-export main types
pub use liveness::{load_live_items, LiveItems};
pub use loader::{discover_corpus_files, load_corpus, load_question_file, parse_corpus_file_name, Corpus, CorpusKey};
pub use query::{distinct_values, find_question, list_questions, PageRequest, PaginatedQuestions, QuestionFilter, QuestionView};
pub use question::{Difficulty, QuestionRecord, ScoreBand, Subject};

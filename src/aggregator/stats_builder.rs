//! Build the statistics document from a loaded corpus.
//!
//! Each question is classified once (category, subcategory, difficulty,
//! score band, active/inactive) and then counted at every level of the tree.
//! All updates are commutative increments, so file and record order only
//! affect key insertion, never the counts.

use super::schema::{entry, QuestionStats, Status};
use crate::corpus::{Corpus, LiveItems, QuestionRecord, Subject};
use log::{debug, info};

/// Dimension keys derived from one question record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'q> {
    pub main_category: &'q str,
    pub subcategory: &'q str,
    pub difficulty: &'static str,
    pub score_band: String,
    pub status: Status,
}

impl<'q> Classification<'q> {
    pub fn of(question: &'q QuestionRecord, subject: Subject, live: &LiveItems) -> Self {
        let external_id = question.external_id();
        Self {
            main_category: question.main_category(),
            subcategory: question.subcategory(),
            difficulty: question.difficulty().key(),
            score_band: question.score_band().key(),
            status: Status::from_active(live.is_active(subject, external_id.as_deref())),
        }
    }
}

/// Incremental builder over `(program, subject)` question sets
///
/// **Public** - use `build_stats` unless feeding questions one at a time
pub struct StatsBuilder<'a> {
    live: &'a LiveItems,
    stats: QuestionStats,
}

impl<'a> StatsBuilder<'a> {
    pub fn new(live: &'a LiveItems) -> Self {
        Self {
            live,
            stats: QuestionStats::default(),
        }
    }

    /// Count every question of one file
    pub fn add_questions(&mut self, program: &str, subject: Subject, questions: &[QuestionRecord]) {
        debug!("Processing {} {}: {} questions", program, subject, questions.len());

        // Programs and subjects appear even when their file is empty
        entry(&mut self.stats.by_program, program)
            .subjects
            .entry(subject.code().to_string())
            .or_default();
        entry(&mut self.stats.detailed, program)
            .entry(subject.code().to_string())
            .or_default();

        for question in questions {
            self.add_question(program, subject, question);
        }
    }

    pub fn add_question(&mut self, program: &str, subject: Subject, question: &QuestionRecord) {
        let c = Classification::of(question, subject, self.live);
        self.record(program, subject.code(), &c);
    }

    fn record(&mut self, program: &str, subject: &str, c: &Classification<'_>) {
        let status = c.status;
        let stats = &mut self.stats;

        // Global
        stats.record_total(status);
        entry(&mut stats.by_main_category_overall, c.main_category).record(status);
        entry(&mut stats.by_subcategory_overall, c.subcategory).record(status);
        entry(&mut stats.by_difficulty_overall, c.difficulty).record(c.main_category, status);
        entry(&mut stats.by_score_band_overall, &c.score_band).record(c.main_category, status);

        // Program -> subject
        let program_stats = entry(&mut stats.by_program, program);
        program_stats.counts.record(status);

        let subject_stats = entry(&mut program_stats.subjects, subject);
        subject_stats.counts.record(status);
        entry(&mut subject_stats.categories, c.main_category).record(status);
        entry(&mut subject_stats.subcategories, c.subcategory).record(status);
        entry(&mut subject_stats.by_difficulty, c.difficulty).record(c.main_category, status);
        entry(&mut subject_stats.by_score_band, &c.score_band).record(c.main_category, status);

        // Program -> subject -> category -> subcategory
        let detail = entry(entry(&mut stats.detailed, program), subject);
        detail.counts.record(status);

        let category = entry(&mut detail.main_categories, c.main_category);
        category.counts.record(status);
        entry(&mut category.by_difficulty, c.difficulty).record(status);
        entry(&mut category.by_score_band, &c.score_band).record(status);

        let leaf = entry(&mut category.subcategories, c.subcategory);
        leaf.counts.record(status);
        entry(&mut leaf.by_difficulty, c.difficulty).record(status);
        entry(&mut leaf.by_score_band, &c.score_band).record(status);
        entry(entry(&mut leaf.by_difficulty_and_score_band, c.difficulty), &c.score_band)
            .record(status);
    }

    pub fn finish(self) -> QuestionStats {
        self.stats
    }
}

/// Aggregate a whole corpus
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `corpus` - Loaded question sets
/// * `live` - Liveness reference sets (empty sets classify everything inactive)
pub fn build_stats(corpus: &Corpus, live: &LiveItems) -> QuestionStats {
    let mut builder = StatsBuilder::new(live);

    for (key, questions) in corpus.iter() {
        builder.add_questions(&key.program, key.subject, questions);
    }

    let stats = builder.finish();
    info!(
        "Aggregated {} questions ({} active, {} inactive) across {} programs",
        stats.total_questions,
        stats.total_active,
        stats.total_inactive,
        stats.by_program.len()
    );
    stats
}

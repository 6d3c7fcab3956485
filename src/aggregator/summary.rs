//! Simplified statistics view.
//!
//! A pure projection of `QuestionStats`: totals and category breakdowns are
//! copied, and each difficulty/score-band node is flattened from
//! `{total_counts, categories}` to `{active, inactive, total, categories}`.
//! The fully detailed section is dropped.

use super::schema::{CountMap, DimensionBucket, DimensionMap, ProgramStats, QuestionStats, StatusCounts, SubjectStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flattened difficulty or score-band node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBucket {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub categories: CountMap,
}

impl From<&DimensionBucket> for SummaryBucket {
    fn from(bucket: &DimensionBucket) -> Self {
        Self {
            counts: bucket.total_counts,
            categories: bucket.categories.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub subjects: BTreeMap<String, SubjectSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub categories: CountMap,
    pub subcategories: CountMap,
    pub by_difficulty: BTreeMap<String, SummaryBucket>,
    pub by_score_band: BTreeMap<String, SummaryBucket>,
}

/// Top-level simplified document, written to `simplified_stats.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedStats {
    pub total_questions: u64,
    pub total_active: u64,
    pub total_inactive: u64,
    pub by_program: BTreeMap<String, ProgramSummary>,
    pub by_main_category_overall: CountMap,
    pub by_subcategory_overall: CountMap,
    pub by_difficulty_overall: BTreeMap<String, SummaryBucket>,
    pub by_score_band_overall: BTreeMap<String, SummaryBucket>,
}

fn flatten_dimension(map: &DimensionMap) -> BTreeMap<String, SummaryBucket> {
    map.iter()
        .map(|(key, bucket)| (key.clone(), SummaryBucket::from(bucket)))
        .collect()
}

impl From<&SubjectStats> for SubjectSummary {
    fn from(subject: &SubjectStats) -> Self {
        Self {
            counts: subject.counts,
            categories: subject.categories.clone(),
            subcategories: subject.subcategories.clone(),
            by_difficulty: flatten_dimension(&subject.by_difficulty),
            by_score_band: flatten_dimension(&subject.by_score_band),
        }
    }
}

impl From<&ProgramStats> for ProgramSummary {
    fn from(program: &ProgramStats) -> Self {
        Self {
            counts: program.counts,
            subjects: program
                .subjects
                .iter()
                .map(|(subject, stats)| (subject.clone(), SubjectSummary::from(stats)))
                .collect(),
        }
    }
}

/// Project the full statistics document into its simplified view
///
/// **Public** - stateless, never touches raw questions
pub fn summarize(stats: &QuestionStats) -> SimplifiedStats {
    SimplifiedStats {
        total_questions: stats.total_questions,
        total_active: stats.total_active,
        total_inactive: stats.total_inactive,
        by_program: stats
            .by_program
            .iter()
            .map(|(program, p)| (program.clone(), ProgramSummary::from(p)))
            .collect(),
        by_main_category_overall: stats.by_main_category_overall.clone(),
        by_subcategory_overall: stats.by_subcategory_overall.clone(),
        by_difficulty_overall: flatten_dimension(&stats.by_difficulty_overall),
        by_score_band_overall: flatten_dimension(&stats.by_score_band_overall),
    }
}

impl SimplifiedStats {
    /// Human-readable report for the terminal
    pub fn text_report(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "Total questions: {} ({} active, {} inactive)\n",
            self.total_questions, self.total_active, self.total_inactive
        ));

        out.push_str("\nBy program:\n");
        for (program, summary) in &self.by_program {
            out.push_str(&format!(
                "  {:<14} {:>6} ({} active)\n",
                program, summary.counts.total, summary.counts.active
            ));
            for (subject, s) in &summary.subjects {
                out.push_str(&format!(
                    "    {:<12} {:>6} ({} active)\n",
                    subject, s.counts.total, s.counts.active
                ));
            }
        }

        out.push_str("\nBy main category:\n");
        for (category, counts) in &self.by_main_category_overall {
            out.push_str(&format!("  {:<40} {:>6}\n", category, counts.total));
        }

        out.push_str("\nBy difficulty:\n");
        for (difficulty, bucket) in &self.by_difficulty_overall {
            out.push_str(&format!("  {:<8} {:>6}\n", difficulty, bucket.counts.total));
        }

        out.push_str("\nBy score band:\n");
        for (band, bucket) in &self.by_score_band_overall {
            out.push_str(&format!("  {:<8} {:>6}\n", band, bucket.counts.total));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::schema::Status;

    fn sample_stats() -> QuestionStats {
        let mut stats = QuestionStats::default();
        stats.record_total(Status::Active);
        stats.record_total(Status::Inactive);

        let mut easy = DimensionBucket::default();
        easy.record("Algebra", Status::Active);
        easy.record("Geometry", Status::Inactive);
        stats.by_difficulty_overall.insert("E".to_string(), easy.clone());

        let mut subject = SubjectStats::default();
        subject.counts = StatusCounts::new(1, 1);
        subject.by_difficulty.insert("E".to_string(), easy);
        let mut program = ProgramStats::default();
        program.counts = StatusCounts::new(1, 1);
        program.subjects.insert("MATH".to_string(), subject);
        stats.by_program.insert("SAT".to_string(), program);

        stats
    }

    #[test]
    fn test_difficulty_node_is_flattened() {
        let stats = sample_stats();
        let summary = summarize(&stats);

        let easy = &summary.by_difficulty_overall["E"];
        assert_eq!(easy.counts.total, stats.by_difficulty_overall["E"].total_counts.total);
        assert_eq!(easy.categories.len(), 2);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["by_difficulty_overall"]["E"]["total"], 2);
        assert!(value["by_difficulty_overall"]["E"].get("total_counts").is_none());
        assert!(value.get("detailed").is_none());
    }

    #[test]
    fn test_program_sections_are_projected() {
        let summary = summarize(&sample_stats());
        let math = &summary.by_program["SAT"].subjects["MATH"];
        assert_eq!(math.counts, StatusCounts::new(1, 1));
        assert_eq!(math.by_difficulty["E"].counts.active, 1);
    }

    #[test]
    fn test_text_report_mentions_totals() {
        let report = summarize(&sample_stats()).text_report();
        assert!(report.contains("Total questions: 2 (1 active, 1 inactive)"));
        assert!(report.contains("SAT"));
    }
}

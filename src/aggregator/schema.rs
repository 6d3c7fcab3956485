//! Statistics document schema.
//!
//! Every node of the tree carries its own `{active, inactive, total}` triple
//! plus nested breakdowns keyed by the remaining dimensions. All maps are
//! sorted so serialized output is stable across runs.

use crate::utils::error::StatsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Active/inactive status of a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// Leaf counter triple; `total == active + inactive` always holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub active: u64,
    pub inactive: u64,
    pub total: u64,
}

impl StatusCounts {
    pub fn new(active: u64, inactive: u64) -> Self {
        Self {
            active,
            inactive,
            total: active + inactive,
        }
    }

    /// Count one question
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Active => self.active += 1,
            Status::Inactive => self.inactive += 1,
        }
        self.total += 1;
    }

    pub fn is_balanced(&self) -> bool {
        self.active.checked_add(self.inactive) == Some(self.total)
    }
}

impl Add for StatusCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            active: self.active + rhs.active,
            inactive: self.inactive + rhs.inactive,
            total: self.total + rhs.total,
        }
    }
}

impl AddAssign for StatusCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for StatusCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a StatusCounts> for StatusCounts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Counters keyed by category, subcategory, difficulty or score band
pub type CountMap = BTreeMap<String, StatusCounts>;

/// Get-or-insert accessor for any keyed node
pub fn entry<'m, T: Default>(map: &'m mut BTreeMap<String, T>, key: &str) -> &'m mut T {
    map.entry(key.to_string()).or_default()
}

/// A difficulty or score-band node: its own totals plus a per-category split
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionBucket {
    pub total_counts: StatusCounts,
    pub categories: CountMap,
}

impl DimensionBucket {
    pub fn record(&mut self, category: &str, status: Status) {
        self.total_counts.record(status);
        entry(&mut self.categories, category).record(status);
    }
}

/// Buckets keyed by difficulty code or score band
pub type DimensionMap = BTreeMap<String, DimensionBucket>;

/// Per-program totals and subject breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStats {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub subjects: BTreeMap<String, SubjectStats>,
}

/// Per-program/per-subject totals, mirroring the global shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub categories: CountMap,
    pub subcategories: CountMap,
    pub by_difficulty: DimensionMap,
    pub by_score_band: DimensionMap,
}

/// Fully detailed per-program/per-subject breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedSubject {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub main_categories: BTreeMap<String, DetailedCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedCategory {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub by_difficulty: CountMap,
    pub by_score_band: CountMap,
    pub subcategories: BTreeMap<String, DetailedSubcategory>,
}

/// Subcategory leaf, including the joint difficulty x score band count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedSubcategory {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub by_difficulty: CountMap,
    pub by_score_band: CountMap,
    pub by_difficulty_and_score_band: BTreeMap<String, CountMap>,
}

/// Top-level statistics document, written to `question_stats.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub total_questions: u64,
    pub total_active: u64,
    pub total_inactive: u64,
    pub by_program: BTreeMap<String, ProgramStats>,
    pub by_main_category_overall: CountMap,
    pub by_subcategory_overall: CountMap,
    pub by_difficulty_overall: DimensionMap,
    pub by_score_band_overall: DimensionMap,
    /// program -> subject -> breakdown
    pub detailed: BTreeMap<String, BTreeMap<String, DetailedSubject>>,
}

impl QuestionStats {
    /// Global triple
    pub fn totals(&self) -> StatusCounts {
        StatusCounts {
            active: self.total_active,
            inactive: self.total_inactive,
            total: self.total_questions,
        }
    }

    pub fn record_total(&mut self, status: Status) {
        let mut totals = self.totals();
        totals.record(status);
        self.total_questions = totals.total;
        self.total_active = totals.active;
        self.total_inactive = totals.inactive;
    }

    /// Check every node's triple and every parent/child sum
    ///
    /// Returns the first violation found, naming the node by its key path.
    pub fn verify(&self) -> Result<(), StatsError> {
        let totals = self.totals();
        check_balanced("totals", &totals)?;

        check_count_map("by_main_category_overall", &totals, &self.by_main_category_overall)?;
        check_count_map("by_subcategory_overall", &totals, &self.by_subcategory_overall)?;
        check_dimension_map("by_difficulty_overall", &totals, &self.by_difficulty_overall)?;
        check_dimension_map("by_score_band_overall", &totals, &self.by_score_band_overall)?;

        check_children(
            "by_program",
            &totals,
            self.by_program.values().map(|p| p.counts),
        )?;
        for (program, stats) in &self.by_program {
            let path = format!("by_program.{}", program);
            check_balanced(&path, &stats.counts)?;
            check_children(&path, &stats.counts, stats.subjects.values().map(|s| s.counts))?;

            for (subject, s) in &stats.subjects {
                let path = format!("{}.subjects.{}", path, subject);
                check_balanced(&path, &s.counts)?;
                check_count_map(&format!("{}.categories", path), &s.counts, &s.categories)?;
                check_count_map(&format!("{}.subcategories", path), &s.counts, &s.subcategories)?;
                check_dimension_map(&format!("{}.by_difficulty", path), &s.counts, &s.by_difficulty)?;
                check_dimension_map(&format!("{}.by_score_band", path), &s.counts, &s.by_score_band)?;
            }
        }

        let detailed_total: StatusCounts = self
            .detailed
            .values()
            .flat_map(|subjects| subjects.values().map(|s| s.counts))
            .sum();
        check_sum("detailed", &totals, detailed_total)?;

        for (program, subjects) in &self.detailed {
            for (subject, detail) in subjects {
                verify_detailed_subject(&format!("detailed.{}.{}", program, subject), detail)?;
            }
        }

        Ok(())
    }
}

fn verify_detailed_subject(path: &str, subject: &DetailedSubject) -> Result<(), StatsError> {
    check_balanced(path, &subject.counts)?;
    check_children(
        path,
        &subject.counts,
        subject.main_categories.values().map(|c| c.counts),
    )?;

    for (category, detail) in &subject.main_categories {
        let path = format!("{}.{}", path, category);
        check_balanced(&path, &detail.counts)?;
        check_count_map(&format!("{}.by_difficulty", path), &detail.counts, &detail.by_difficulty)?;
        check_count_map(&format!("{}.by_score_band", path), &detail.counts, &detail.by_score_band)?;
        check_children(&path, &detail.counts, detail.subcategories.values().map(|s| s.counts))?;

        for (subcategory, leaf) in &detail.subcategories {
            let path = format!("{}.{}", path, subcategory);
            check_balanced(&path, &leaf.counts)?;
            check_count_map(&format!("{}.by_difficulty", path), &leaf.counts, &leaf.by_difficulty)?;
            check_count_map(&format!("{}.by_score_band", path), &leaf.counts, &leaf.by_score_band)?;

            let joint_path = format!("{}.by_difficulty_and_score_band", path);
            let joint_total: StatusCounts = leaf
                .by_difficulty_and_score_band
                .values()
                .flat_map(|bands| bands.values())
                .sum();
            check_sum(&joint_path, &leaf.counts, joint_total)?;

            for (difficulty, bands) in &leaf.by_difficulty_and_score_band {
                let parent = leaf.by_difficulty.get(difficulty).copied().unwrap_or_default();
                check_count_map(&format!("{}.{}", joint_path, difficulty), &parent, bands)?;
            }
        }
    }

    Ok(())
}

fn check_balanced(path: &str, counts: &StatusCounts) -> Result<(), StatsError> {
    if counts.is_balanced() {
        Ok(())
    } else {
        Err(StatsError::UnbalancedCounts {
            path: path.to_string(),
            active: counts.active,
            inactive: counts.inactive,
            total: counts.total,
        })
    }
}

fn check_sum(path: &str, parent: &StatusCounts, children: StatusCounts) -> Result<(), StatsError> {
    if children == *parent {
        Ok(())
    } else {
        Err(StatsError::ChildSumMismatch {
            path: path.to_string(),
            parent: parent.total,
            children: children.total,
        })
    }
}

fn check_children(
    path: &str,
    parent: &StatusCounts,
    children: impl Iterator<Item = StatusCounts>,
) -> Result<(), StatsError> {
    check_sum(path, parent, children.sum())
}

fn check_count_map(path: &str, parent: &StatusCounts, map: &CountMap) -> Result<(), StatsError> {
    for (key, counts) in map {
        check_balanced(&format!("{}.{}", path, key), counts)?;
    }
    check_children(path, parent, map.values().copied())
}

fn check_dimension_map(
    path: &str,
    parent: &StatusCounts,
    map: &DimensionMap,
) -> Result<(), StatsError> {
    for (key, bucket) in map {
        let bucket_path = format!("{}.{}", path, key);
        check_balanced(&bucket_path, &bucket.total_counts)?;
        check_count_map(
            &format!("{}.categories", bucket_path),
            &bucket.total_counts,
            &bucket.categories,
        )?;
    }
    check_children(path, parent, map.values().map(|b| b.total_counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_record() {
        let mut counts = StatusCounts::default();
        counts.record(Status::Active);
        counts.record(Status::Inactive);
        counts.record(Status::Inactive);
        assert_eq!(counts, StatusCounts::new(1, 2));
        assert!(counts.is_balanced());
    }

    #[test]
    fn test_status_counts_sum() {
        let parts = [StatusCounts::new(1, 0), StatusCounts::new(2, 3)];
        let total: StatusCounts = parts.iter().sum();
        assert_eq!(total, StatusCounts::new(3, 3));
    }

    #[test]
    fn test_entry_inserts_once() {
        let mut map: CountMap = BTreeMap::new();
        entry(&mut map, "Algebra").record(Status::Active);
        entry(&mut map, "Algebra").record(Status::Inactive);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Algebra"].total, 2);
    }

    #[test]
    fn test_flattened_counts_serialize_inline() {
        let program = ProgramStats {
            counts: StatusCounts::new(2, 1),
            subjects: BTreeMap::new(),
        };
        let value = serde_json::to_value(&program).unwrap();
        assert_eq!(value["active"], 2);
        assert_eq!(value["inactive"], 1);
        assert_eq!(value["total"], 3);
        assert!(value.get("counts").is_none());
    }

    #[test]
    fn test_verify_empty_document() {
        assert!(QuestionStats::default().verify().is_ok());
    }

    #[test]
    fn test_verify_detects_unbalanced_node() {
        let mut stats = QuestionStats::default();
        stats.record_total(Status::Active);
        stats.by_main_category_overall.insert(
            "Algebra".to_string(),
            StatusCounts { active: 1, inactive: 0, total: 2 },
        );

        let err = stats.verify().unwrap_err();
        assert!(matches!(
            err,
            StatsError::UnbalancedCounts { ref path, .. } if path == "by_main_category_overall.Algebra"
        ));
    }

    #[test]
    fn test_verify_detects_missing_children() {
        let mut stats = QuestionStats::default();
        stats.record_total(Status::Inactive);

        let err = stats.verify().unwrap_err();
        assert_eq!(
            err,
            StatsError::ChildSumMismatch {
                path: "by_main_category_overall".to_string(),
                parent: 1,
                children: 0,
            }
        );
    }
}

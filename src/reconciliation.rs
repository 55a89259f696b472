// ⚖️ Reconciliation Engine - ledger × curriculum → progress report
//
// For each category:
//   remaining = required
//   consume completed → in_progress → planned while remaining > 0
//   the course that crosses the boundary is split; the excess is overflow
//
// Overflow is listed for transparency and conceptually reassigned to
// Free Elective, but never added to any bucket's sums. Two totals are kept:
// earned credits (completed, uncapped) and counted credits (capped).

use crate::blacklist::{BlacklistChecker, BlacklistConflict};
use crate::config::EngineConfig;
use crate::entities::{BlacklistRule, CategoryKind, CategoryRequirement, CourseEntry, CourseStatus, Curriculum};
use crate::error::ProgressError;
use crate::gpa::GradeTable;
use crate::ledger::StudentLedger;
use crate::semester::{resolve_planned_semester, SemesterLabel};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// Name of the bucket that absorbs courses outside the curriculum and all overflow
pub const CATCH_ALL_CATEGORY: &str = "Free Elective";

/// Consumption order within a category
const PRIORITY: [CourseStatus; 3] = [CourseStatus::Completed, CourseStatus::InProgress, CourseStatus::Planning];

// ============================================================================
// REPORT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub kind: CategoryKind,
    pub required_credits: f64,

    /// Counted (in-budget) credits per bucket
    pub completed_credits: f64,
    pub in_progress_credits: f64,
    pub planned_credits: f64,

    /// Credits of this category's courses that exceeded the requirement
    pub overflow_credits: f64,

    /// required == 0: uncapped, never overflows
    pub informational: bool,

    /// Every ledger code mapped to this category, pending ones included
    pub courses: Vec<String>,
}

impl CategoryProgress {
    fn new(kind: CategoryKind, required_credits: f64) -> Self {
        CategoryProgress {
            kind,
            required_credits,
            completed_credits: 0.0,
            in_progress_credits: 0.0,
            planned_credits: 0.0,
            overflow_credits: 0.0,
            informational: required_credits <= 0.0,
            courses: Vec::new(),
        }
    }

    pub fn counted_credits(&self) -> f64 {
        self.completed_credits + self.in_progress_credits + self.planned_credits
    }

    pub fn remaining_credits(&self) -> f64 {
        if self.informational {
            0.0
        } else {
            (self.required_credits - self.counted_credits()).max(0.0)
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.remaining_credits() <= 0.0
    }

    fn add_counted(&mut self, status: CourseStatus, credits: f64) {
        match status {
            CourseStatus::Completed => self.completed_credits += credits,
            CourseStatus::InProgress => self.in_progress_credits += credits,
            CourseStatus::Planning => self.planned_credits += credits,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowEntry {
    pub course: CourseEntry,
    pub overflow_credits: f64,
    pub original_category: String,
    pub reassigned_to: String,
}

/// Course excluded from all credit sums (pending, failed, withdrawn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEntry {
    pub code: String,
    pub title: String,
    pub status: CourseStatus,
    pub credits: f64,
    pub category: String,
}

/// Planned credits grouped by semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterPlan {
    pub semester: String,
    pub credits: f64,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub category_breakdown: BTreeMap<String, CategoryProgress>,
    pub overflow: Vec<OverflowEntry>,
    pub pending: Vec<PendingEntry>,
    pub planned_semesters: Vec<SemesterPlan>,

    /// Σ completed credits, uncapped
    pub total_earned_credits: f64,

    /// min(required, counted completed + in_progress + planned)
    pub total_counted_credits: f64,

    /// min(required, counted completed)
    pub counted_completed_credits: f64,

    pub total_required_credits: f64,
    pub total_overflow_credits: f64,

    /// None when no curriculum requirement exists
    pub percent_complete: Option<u8>,
    pub projected_percent: Option<u8>,

    pub gpa: Option<f64>,
    pub blacklist_warnings: Vec<String>,
    pub blacklist_conflicts: Vec<BlacklistConflict>,
}

impl ProgressReport {
    /// False when there is no curriculum to measure against
    pub fn is_computable(&self) -> bool {
        self.total_required_credits > 0.0
    }

    pub fn category(&self, name: &str) -> Option<&CategoryProgress> {
        self.category_breakdown.get(name)
    }

    pub fn overflow_for(&self, category: &str) -> Vec<&OverflowEntry> {
        self.overflow
            .iter()
            .filter(|o| o.original_category == category)
            .collect()
    }

    /// SHA-256 of the canonical JSON form; equal inputs give equal fingerprints
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        format!("{:x}", hasher.finalize())
    }

    pub fn summary(&self) -> String {
        if !self.is_computable() {
            return format!(
                "Progress not computable (no curriculum): {:.1} credits earned, GPA {}",
                self.total_earned_credits,
                crate::gpa::format_gpa(self.gpa)
            );
        }
        format!(
            "Progress {}% ({}% projected): {:.1} earned, {:.1} counted of {:.1} required, {:.1} overflow, GPA {}, {} blacklist warnings",
            self.percent_complete.unwrap_or(0),
            self.projected_percent.unwrap_or(0),
            self.total_earned_credits,
            self.total_counted_credits,
            self.total_required_credits,
            self.total_overflow_credits,
            crate::gpa::format_gpa(self.gpa),
            self.blacklist_warnings.len()
        )
    }
}

// ============================================================================
// RECONCILIATION ENGINE
// ============================================================================

pub struct ReconciliationEngine {
    grades: GradeTable,

    /// Injected, never read from the clock
    current_year: i32,

    default_planned_term: u8,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        ReconciliationEngine {
            grades: GradeTable::new(),
            current_year: crate::config::DEFAULT_CURRENT_YEAR,
            default_planned_term: 1,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ProgressError> {
        Ok(ReconciliationEngine {
            grades: config.grade_table()?,
            current_year: config.current_year,
            default_planned_term: config.default_planned_term.max(1),
        })
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Reconcile a ledger against category requirements
    ///
    /// Total required credits = Σ category requirements.
    pub fn reconcile(
        &self,
        ledger: &[CourseEntry],
        requirements: &[CategoryRequirement],
        blacklists: &[BlacklistRule],
    ) -> ProgressReport {
        let total_required = requirements.iter().map(|r| r.required_credits.max(0.0)).sum();
        self.reconcile_with_total(ledger, requirements, blacklists, total_required)
    }

    /// Reconcile against a full curriculum (declared total wins over the category sum)
    pub fn reconcile_curriculum(
        &self,
        ledger: &[CourseEntry],
        curriculum: &Curriculum,
        blacklists: &[BlacklistRule],
    ) -> ProgressReport {
        self.reconcile_with_total(
            ledger,
            &curriculum.requirements,
            blacklists,
            curriculum.effective_total_required(),
        )
    }

    fn reconcile_with_total(
        &self,
        raw_ledger: &[CourseEntry],
        requirements: &[CategoryRequirement],
        blacklists: &[BlacklistRule],
        total_required: f64,
    ) -> ProgressReport {
        // One entry per normalized code (last write wins), credits clamped
        let folded = StudentLedger::from_entries(raw_ledger.iter().cloned());
        let ledger = folded.entries();

        let mut breakdown: BTreeMap<String, CategoryProgress> = BTreeMap::new();
        for req in requirements {
            breakdown
                .entry(req.name.clone())
                .or_insert_with(|| CategoryProgress::new(req.kind, req.required_credits.max(0.0)));
        }

        // 1. Resolve each entry's category (first match wins)
        let catch_all = requirements
            .iter()
            .find(|r| r.kind == CategoryKind::FreeElective)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| CATCH_ALL_CATEGORY.to_string());

        // No curriculum: every category stays empty
        let mut members: HashMap<&str, Vec<&CourseEntry>> = HashMap::new();
        for entry in ledger.iter().filter(|_| !requirements.is_empty()) {
            let category = requirements
                .iter()
                .find(|r| r.contains(&entry.code))
                .map(|r| r.name.as_str())
                .unwrap_or(catch_all.as_str());

            breakdown
                .entry(category.to_string())
                .or_insert_with(|| CategoryProgress::new(CategoryKind::FreeElective, 0.0))
                .courses
                .push(entry.code.clone());
            members.entry(category).or_default().push(entry);
        }

        // 2-3. Partition by status and consume against the requirement
        let mut overflow = Vec::new();
        let mut pending = Vec::new();

        for (name, progress) in breakdown.iter_mut() {
            let entries = members.get(name.as_str()).map(Vec::as_slice).unwrap_or(&[]);

            for entry in entries.iter().filter(|e| !e.status.counts_toward_progress()) {
                pending.push(PendingEntry {
                    code: entry.code.clone(),
                    title: entry.title.clone(),
                    status: entry.status,
                    credits: entry.credits,
                    category: name.clone(),
                });
            }

            let mut remaining = progress.required_credits;
            for status in PRIORITY {
                for entry in entries.iter().filter(|e| e.status == status) {
                    let credits = entry.credits;
                    let counted = if progress.informational {
                        credits
                    } else {
                        credits.min(remaining.max(0.0))
                    };
                    let excess = credits - counted;

                    progress.add_counted(status, counted);
                    if !progress.informational {
                        remaining -= counted;
                    }

                    if excess > 0.0 {
                        progress.overflow_credits += excess;
                        overflow.push(OverflowEntry {
                            course: (*entry).clone(),
                            overflow_credits: excess,
                            original_category: name.clone(),
                            reassigned_to: catch_all.clone(),
                        });
                    }
                }
            }

            tracing::debug!(
                category = %name,
                required = progress.required_credits,
                counted = progress.counted_credits(),
                overflow = progress.overflow_credits,
                "category reconciled"
            );
        }

        // 4-5. Totals
        let total_earned: f64 = ledger
            .iter()
            .filter(|e| e.is_completed())
            .map(|e| e.credits)
            .sum();
        let counted_sum: f64 = breakdown.values().map(CategoryProgress::counted_credits).sum();
        let completed_sum: f64 = breakdown.values().map(|c| c.completed_credits).sum();
        let total_overflow: f64 = overflow.iter().map(|o| o.overflow_credits).sum();

        let total_counted = counted_sum.min(total_required);
        let counted_completed = completed_sum.min(total_required);

        // 6. GPA, blacklists, semester plan
        let checker = BlacklistChecker::new(blacklists);
        let blacklist_conflicts = checker.conflicts(ledger);
        let blacklist_warnings = blacklist_conflicts.iter().map(BlacklistConflict::warning).collect();

        let report = ProgressReport {
            category_breakdown: breakdown,
            overflow,
            pending,
            planned_semesters: self.plan_semesters(ledger),
            total_earned_credits: total_earned,
            total_counted_credits: total_counted,
            counted_completed_credits: counted_completed,
            total_required_credits: total_required,
            total_overflow_credits: total_overflow,
            percent_complete: percent(counted_completed, total_required),
            projected_percent: percent(total_counted, total_required),
            gpa: self.grades.gpa(ledger),
            blacklist_warnings,
            blacklist_conflicts,
        };

        tracing::info!(
            courses = ledger.len(),
            categories = report.category_breakdown.len(),
            earned = report.total_earned_credits,
            counted = report.total_counted_credits,
            required = report.total_required_credits,
            "progress reconciled"
        );

        report
    }

    fn plan_semesters(&self, ledger: &[CourseEntry]) -> Vec<SemesterPlan> {
        let mut plans: BTreeMap<SemesterLabel, SemesterPlan> = BTreeMap::new();

        for entry in ledger.iter().filter(|e| e.status == CourseStatus::Planning) {
            let label = resolve_planned_semester(
                entry.planned_semester.as_deref(),
                self.current_year,
                self.default_planned_term,
            );
            let plan = plans.entry(label).or_insert_with(|| SemesterPlan {
                semester: label.to_string(),
                credits: 0.0,
                courses: Vec::new(),
            });
            plan.credits += entry.credits;
            plan.courses.push(entry.code.clone());
        }

        plans.into_values().collect()
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// round(100 × part / total) clamped to [0, 100]; None when total is 0
fn percent(part: f64, total: f64) -> Option<u8> {
    if total <= 0.0 {
        return None;
    }
    Some((100.0 * part / total).round().clamp(0.0, 100.0) as u8)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, credits: f64, status: CourseStatus) -> CourseEntry {
        CourseEntry::new(code, &format!("Course {}", code), credits, status)
    }

    fn major_elective(required: f64) -> CategoryRequirement {
        CategoryRequirement::new(CategoryKind::MajorElective, required).with_courses(["ME101", "ME102", "ME103", "ME104"])
    }

    fn sum_mapped(report: &ProgressReport, ledger: &[CourseEntry], category: &str) -> f64 {
        let codes = &report.category(category).unwrap().courses;
        ledger
            .iter()
            .filter(|e| codes.contains(&e.code) && e.status.counts_toward_progress())
            .map(|e| e.credits)
            .sum()
    }

    #[test]
    fn test_overflow_attributed_to_third_course() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Completed),
            course("ME102", 3.0, CourseStatus::Completed),
            course("ME103", 3.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);
        let me = report.category("Major Elective").unwrap();

        assert_eq!(me.completed_credits, 6.0);
        assert_eq!(me.overflow_credits, 3.0);
        assert_eq!(report.overflow.len(), 1);
        assert_eq!(report.overflow[0].course.code, "ME103");
        assert_eq!(report.overflow[0].overflow_credits, 3.0);
        assert_eq!(report.overflow[0].original_category, "Major Elective");
        assert_eq!(report.overflow[0].reassigned_to, "Free Elective");
        assert_eq!(report.total_earned_credits, 9.0);
        assert_eq!(report.total_counted_credits, 6.0);

        println!("✅ Overflow test passed: {}", report.summary());
    }

    #[test]
    fn test_fractional_split_on_boundary_course() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Completed),
            course("ME102", 4.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &[major_elective(5.0)], &[]);
        let me = report.category("Major Elective").unwrap();

        assert_eq!(me.completed_credits, 5.0);
        assert_eq!(report.overflow.len(), 1);
        assert_eq!(report.overflow[0].course.code, "ME102");
        assert_eq!(report.overflow[0].overflow_credits, 2.0);
    }

    #[test]
    fn test_priority_completed_before_in_progress_before_planned() {
        let engine = ReconciliationEngine::new();
        // Ledger order deliberately puts planned first
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Planning),
            course("ME102", 3.0, CourseStatus::InProgress),
            course("ME103", 3.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);
        let me = report.category("Major Elective").unwrap();

        assert_eq!(me.completed_credits, 3.0);
        assert_eq!(me.in_progress_credits, 3.0);
        assert_eq!(me.planned_credits, 0.0);
        assert_eq!(report.overflow[0].course.code, "ME101");
        assert_eq!(report.overflow[0].course.status, CourseStatus::Planning);
    }

    #[test]
    fn test_unknown_course_counts_under_free_elective() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![course("XYZ999", 3.0, CourseStatus::Completed)];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);
        let free = report.category("Free Elective").unwrap();

        assert_eq!(free.completed_credits, 3.0);
        assert!(free.informational);
        assert_eq!(free.courses, vec!["XYZ999".to_string()]);
        assert!(report.overflow.is_empty());
    }

    #[test]
    fn test_unknown_course_uses_free_elective_requirement_cap() {
        let engine = ReconciliationEngine::new();
        let requirements = vec![major_elective(6.0), CategoryRequirement::new(CategoryKind::FreeElective, 3.0)];
        let ledger = vec![
            course("XYZ998", 3.0, CourseStatus::Completed),
            course("XYZ999", 3.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &requirements, &[]);
        let free = report.category("Free Elective").unwrap();

        assert_eq!(free.completed_credits, 3.0);
        assert_eq!(free.overflow_credits, 3.0);
        assert_eq!(report.overflow[0].course.code, "XYZ999");
    }

    #[test]
    fn test_informational_category_never_overflows() {
        let engine = ReconciliationEngine::new();
        let requirements = vec![
            CategoryRequirement::new(CategoryKind::Uncategorized, 0.0).with_courses(["ART100", "ART101"]),
            major_elective(3.0),
        ];
        let ledger = vec![
            course("ART100", 3.0, CourseStatus::Completed),
            course("ART101", 3.0, CourseStatus::InProgress),
        ];

        let report = engine.reconcile(&ledger, &requirements, &[]);
        let art = report.category("Uncategorized").unwrap();

        assert!(art.informational);
        assert_eq!(art.counted_credits(), 6.0);
        assert_eq!(art.overflow_credits, 0.0);
        // Total counted is still capped by the curriculum total
        assert_eq!(report.total_counted_credits, 3.0);
    }

    #[test]
    fn test_pending_failed_withdrawn_excluded_but_listed() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Pending),
            course("ME102", 3.0, CourseStatus::Failed),
            course("ME103", 3.0, CourseStatus::Withdrawn),
            course("ME104", 3.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);
        let me = report.category("Major Elective").unwrap();

        assert_eq!(me.counted_credits(), 3.0);
        assert_eq!(me.courses.len(), 4);
        assert_eq!(report.pending.len(), 3);
        assert!(report.pending.iter().all(|p| p.category == "Major Elective"));
        assert_eq!(report.total_earned_credits, 3.0);
    }

    #[test]
    fn test_conservation_and_capping() {
        let engine = ReconciliationEngine::new();
        let requirements = vec![
            CategoryRequirement::new(CategoryKind::CoreCourses, 6.0).with_courses(["CS101", "CS102", "CS103"]),
            major_elective(4.0),
        ];
        let ledger = vec![
            course("CS101", 3.0, CourseStatus::Completed),
            course("CS102", 3.0, CourseStatus::InProgress),
            course("CS103", 3.0, CourseStatus::Planning),
            course("ME101", 3.0, CourseStatus::Completed),
            course("ME102", 3.0, CourseStatus::Planning),
            course("XYZ999", 2.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &requirements, &[]);

        for (name, progress) in &report.category_breakdown {
            let expected = sum_mapped(&report, &ledger, name);
            assert!((progress.counted_credits() + progress.overflow_credits - expected).abs() < 1e-9);
            if !progress.informational {
                assert!(progress.counted_credits() <= progress.required_credits + 1e-9);
            }
        }
        assert_eq!(report.total_overflow_credits, 5.0);
    }

    #[test]
    fn test_percentages() {
        let engine = ReconciliationEngine::new();
        let requirements = vec![major_elective(9.0)];
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Completed),
            course("ME102", 3.0, CourseStatus::InProgress),
        ];

        let report = engine.reconcile(&ledger, &requirements, &[]);

        assert_eq!(report.percent_complete, Some(33));
        assert_eq!(report.projected_percent, Some(67));
        assert!(report.is_computable());
    }

    #[test]
    fn test_zero_percent_is_distinct_from_uncomputable() {
        let engine = ReconciliationEngine::new();

        let empty = engine.reconcile(&[course("CS101", 3.0, CourseStatus::Completed)], &[], &[]);
        assert_eq!(empty.total_required_credits, 0.0);
        assert_eq!(empty.percent_complete, None);
        assert!(!empty.is_computable());
        assert!(empty.summary().contains("not computable"));

        let zero = engine.reconcile(&[], &[major_elective(6.0)], &[]);
        assert_eq!(zero.percent_complete, Some(0));
        assert!(zero.is_computable());
    }

    #[test]
    fn test_curriculum_total_overrides_category_sum() {
        let engine = ReconciliationEngine::new();
        let curriculum = Curriculum {
            name: "Test".to_string(),
            total_credits_required: 12.0,
            requirements: vec![major_elective(6.0)],
            course_credits: BTreeMap::new(),
        };
        let ledger = vec![course("ME101", 3.0, CourseStatus::Completed)];

        let report = engine.reconcile_curriculum(&ledger, &curriculum, &[]);

        assert_eq!(report.total_required_credits, 12.0);
        assert_eq!(report.percent_complete, Some(25));
    }

    #[test]
    fn test_gpa_and_blacklists_attached() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Completed).with_grade("A"),
            course("ME102", 3.0, CourseStatus::Completed).with_grade("B"),
        ];
        let blacklists = vec![BlacklistRule::new("Outdated", ["ME101", "ME102"])];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &blacklists);

        assert_eq!(report.gpa, Some(3.5));
        assert_eq!(report.blacklist_warnings.len(), 1);
        // Informational only: both courses still count
        assert_eq!(report.category("Major Elective").unwrap().completed_credits, 6.0);
    }

    #[test]
    fn test_planned_semesters_grouped_with_injected_year() {
        let engine = ReconciliationEngine::new().with_current_year(2030);
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Planning).with_semester("2/2030"),
            course("ME102", 3.0, CourseStatus::Planning),
            course("ME103", 2.0, CourseStatus::Planning).with_semester("1/2030"),
        ];

        let report = engine.reconcile(&ledger, &[major_elective(12.0)], &[]);

        assert_eq!(report.planned_semesters.len(), 2);
        assert_eq!(report.planned_semesters[0].semester, "1/2030");
        assert_eq!(report.planned_semesters[0].credits, 5.0);
        assert_eq!(report.planned_semesters[1].semester, "2/2030");
    }

    #[test]
    fn test_idempotent_fingerprint() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Completed).with_grade("A"),
            course("XYZ999", 3.0, CourseStatus::Planning),
        ];
        let requirements = vec![major_elective(6.0)];

        let first = engine.reconcile(&ledger, &requirements, &[]);
        let second = engine.reconcile(&ledger, &requirements, &[]);

        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(first.fingerprint().len(), 64);
    }

    #[test]
    fn test_negative_credits_are_clamped_everywhere() {
        let engine = ReconciliationEngine::new();
        let mut bad = course("ME101", 0.0, CourseStatus::Completed).with_grade("A");
        bad.credits = -3.0;
        let ledger = vec![bad, course("ME102", 3.0, CourseStatus::Completed).with_grade("B")];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);

        assert_eq!(report.total_earned_credits, 3.0);
        assert_eq!(report.gpa, Some(3.0));
        assert_eq!(report.category("Major Elective").unwrap().completed_credits, 3.0);
    }

    #[test]
    fn test_duplicate_codes_count_once_last_write_wins() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![
            course("ME101", 3.0, CourseStatus::Planning),
            course("ME101", 3.0, CourseStatus::Completed),
        ];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);
        let me = report.category("Major Elective").unwrap();

        assert_eq!(report.total_earned_credits, 3.0);
        assert_eq!(report.total_counted_credits, 3.0);
        assert_eq!(me.completed_credits, 3.0);
        assert_eq!(me.planned_credits, 0.0);
        assert_eq!(me.courses, vec!["ME101".to_string()]);
    }

    #[test]
    fn test_unnormalized_codes_resolve_to_their_category() {
        let engine = ReconciliationEngine::new();
        let mut loose = course("ME101", 3.0, CourseStatus::Completed);
        loose.code = " me101 ".to_string();
        let mut other = course("ME102", 3.0, CourseStatus::Completed);
        other.code = "me102".to_string();
        let blacklists = vec![BlacklistRule::new("Overlap", ["ME101", "ME102"])];

        let report = engine.reconcile(&[loose, other], &[major_elective(6.0)], &blacklists);

        assert_eq!(report.category("Major Elective").unwrap().completed_credits, 6.0);
        assert!(report.category("Free Elective").is_none());
        assert_eq!(report.blacklist_warnings.len(), 1);
    }

    #[test]
    fn test_no_curriculum_leaves_breakdown_empty() {
        let engine = ReconciliationEngine::new();
        let ledger = vec![course("XYZ999", 3.0, CourseStatus::Completed).with_grade("A")];

        let report = engine.reconcile(&ledger, &[], &[]);

        assert!(report.category_breakdown.is_empty());
        assert_eq!(report.total_earned_credits, 3.0);
        assert_eq!(report.total_counted_credits, 0.0);
        assert_eq!(report.gpa, Some(4.0));
        assert!(!report.is_computable());
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::default().with_current_year(2040);
        let engine = ReconciliationEngine::from_config(&config).unwrap();
        let ledger = vec![course("ME101", 3.0, CourseStatus::Planning)];

        let report = engine.reconcile(&ledger, &[major_elective(6.0)], &[]);

        assert_eq!(report.planned_semesters[0].semester, "1/2040");
    }
}

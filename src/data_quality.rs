// ✅ Data Quality - diagnostics at the ledger normalization boundary
//
// Nothing here rejects data. Each raw record is inspected, every coercion
// the normalizer is about to apply is reported as a QualityIssue, and the
// normalizer carries on with the coerced value.

use crate::credits::CreditValue;
use crate::entities::CourseStatus;
use crate::gpa::{GradeClass, GradeTable};
use crate::ledger::RawCourseRecord;
use crate::semester::SemesterLabel;
use serde::{Deserialize, Serialize};

// ============================================================================
// ISSUES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Record dropped
    Warning,  // Value coerced
    Info,     // Value kept but ignored by the engine
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    /// Course code as given (may be empty)
    pub code: String,
    pub field: String,
    pub issue: String,
    pub recommendation: String,
}

impl QualityIssue {
    fn new(severity: Severity, code: &str, field: &str, issue: String, recommendation: &str) -> Self {
        QualityIssue {
            severity,
            code: code.trim().to_string(),
            field: field.to_string(),
            issue,
            recommendation: recommendation.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    pub records_seen: usize,
    pub entries_kept: usize,
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn summary(&self) -> String {
        format!(
            "Ledger quality: {} records, {} entries kept, {} issues ({} critical, {} warnings)",
            self.records_seen,
            self.entries_kept,
            self.issues.len(),
            self.count(Severity::Critical),
            self.count(Severity::Warning)
        )
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.count(Severity::Critical) > 0
    }

    pub fn push(&mut self, issue: QualityIssue) {
        self.issues.push(issue);
    }
}

// ============================================================================
// INSPECTION
// ============================================================================

/// Inspect one raw ledger record
pub fn inspect_record(record: &RawCourseRecord, grades: &GradeTable) -> Vec<QualityIssue> {
    let mut issues = Vec::new();
    let code = record.code.as_str();

    if code.trim().is_empty() {
        issues.push(QualityIssue::new(
            Severity::Critical,
            code,
            "code",
            format!("Record '{}' has no course code", record.title),
            "Provide a course code; the record was dropped",
        ));
        return issues;
    }

    // Status
    let status = CourseStatus::normalize(&record.status);
    if CourseStatus::recognize(&record.status).is_none() {
        issues.push(QualityIssue::new(
            Severity::Warning,
            code,
            "status",
            format!("Unknown status '{}' treated as pending", record.status),
            "Use completed, in_progress, planning, pending, failed or withdrawn",
        ));
    }

    // Credits
    match &record.credits {
        None => issues.push(QualityIssue::new(
            Severity::Warning,
            code,
            "credits",
            "Missing credits treated as 0".to_string(),
            "Fill credits from the curriculum",
        )),
        Some(value) if value.is_malformed() => issues.push(QualityIssue::new(
            Severity::Warning,
            code,
            "credits",
            format!("Unparseable credits {} treated as 0", describe(value)),
            "Use a number or a composite like 3-0-6",
        )),
        Some(value) if value.is_negative() => issues.push(QualityIssue::new(
            Severity::Warning,
            code,
            "credits",
            format!("Negative credits {} clamped to 0", describe(value)),
            "Credits must be non-negative",
        )),
        Some(_) => {}
    }

    // Grade
    if let Some(grade) = record.grade.as_deref().filter(|g| !g.trim().is_empty()) {
        if !status.is_graded() {
            issues.push(QualityIssue::new(
                Severity::Info,
                code,
                "grade",
                format!("Grade '{}' on a {} course is ignored", grade, status.as_str()),
                "Grades only apply to completed or failed courses",
            ));
        } else if grades.classify(grade) == GradeClass::Unknown {
            issues.push(QualityIssue::new(
                Severity::Info,
                code,
                "grade",
                format!("Grade '{}' is not in the grade table; excluded from GPA", grade),
                "Check the grade letter",
            ));
        }
    }

    // Planned semester
    if let Some(semester) = record.planned_semester.as_deref().filter(|s| !s.trim().is_empty()) {
        if status != CourseStatus::Planning {
            issues.push(QualityIssue::new(
                Severity::Info,
                code,
                "planned_semester",
                format!("Planned semester '{}' on a {} course is ignored", semester, status.as_str()),
                "Planned semesters only apply to planning courses",
            ));
        } else if semester.parse::<SemesterLabel>().is_err() {
            issues.push(QualityIssue::new(
                Severity::Warning,
                code,
                "planned_semester",
                format!("Malformed semester '{}' replaced by the default term", semester),
                "Use term/year, e.g. 1/2026",
            ));
        }
    }

    issues
}

/// Issue for a code that appeared more than once (last write wins)
pub fn duplicate_issue(code: &str) -> QualityIssue {
    QualityIssue::new(
        Severity::Warning,
        code,
        "code",
        format!("Course {} appears more than once; the last record wins", code),
        "Remove duplicate ledger rows",
    )
}

fn describe(value: &CreditValue) -> String {
    match value {
        CreditValue::Number(n) => n.to_string(),
        CreditValue::Text(s) => format!("'{}'", s),
    }
}

// ============================================================================
// TESTS
// ============================================================================

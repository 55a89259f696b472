// 📘 Course Entity - one row in a student's ledger
//
// Status vocabulary from transcripts and local state is loose
// ("in-progress", "Currently Taking", "planned", ...). It is folded
// into the six canonical values here, before anything reaches the engine.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// COURSE STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Completed,
    InProgress,
    Planning,
    Pending,
    Failed,
    Withdrawn,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Completed => "completed",
            CourseStatus::InProgress => "in_progress",
            CourseStatus::Planning => "planning",
            CourseStatus::Pending => "pending",
            CourseStatus::Failed => "failed",
            CourseStatus::Withdrawn => "withdrawn",
        }
    }

    /// Recognize a raw status string, None when it is not in the vocabulary
    pub fn recognize(raw: &str) -> Option<CourseStatus> {
        let key = raw
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let status = match key.as_str() {
            "completed" | "complete" | "passed" | "pass" | "done" | "taken" => CourseStatus::Completed,
            "in progress" | "inprogress" | "currently taking" | "taking" | "current" | "enrolled"
            | "registered" => CourseStatus::InProgress,
            "planning" | "planned" | "plan" | "future" => CourseStatus::Planning,
            "pending" => CourseStatus::Pending,
            "failed" | "fail" => CourseStatus::Failed,
            "withdrawn" | "withdraw" | "withdrew" | "dropped" => CourseStatus::Withdrawn,
            _ => return None,
        };
        Some(status)
    }

    /// Normalize a raw status string; anything unknown becomes Pending
    pub fn normalize(raw: &str) -> CourseStatus {
        Self::recognize(raw).unwrap_or(CourseStatus::Pending)
    }

    /// Statuses whose credits take part in the progress tally
    pub fn counts_toward_progress(&self) -> bool {
        matches!(
            self,
            CourseStatus::Completed | CourseStatus::InProgress | CourseStatus::Planning
        )
    }

    /// Statuses for which a grade is meaningful
    pub fn is_graded(&self) -> bool {
        matches!(self, CourseStatus::Completed | CourseStatus::Failed)
    }
}

/// Normalize a course code: trimmed, upper-case
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_code(&raw))
}

// ============================================================================
// COURSE ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    /// Normalized course code (unique within a ledger)
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,

    pub title: String,

    /// Non-negative credit value
    pub credits: f64,

    pub status: CourseStatus,

    /// Letter grade, meaningful for completed or failed courses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    /// Semester label such as "1/2026", meaningful for planned courses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_semester: Option<String>,
}

impl CourseEntry {
    pub fn new(code: &str, title: &str, credits: f64, status: CourseStatus) -> Self {
        CourseEntry {
            code: normalize_code(code),
            title: title.to_string(),
            credits: crate::credits::clamp_credits(credits),
            status,
            grade: None,
            planned_semester: None,
        }
    }

    /// Builder pattern: add grade
    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.trim().to_uppercase());
        self
    }

    /// Builder pattern: add planned semester
    pub fn with_semester(mut self, semester: &str) -> Self {
        self.planned_semester = Some(semester.trim().to_string());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == CourseStatus::Completed
    }
}

// ============================================================================
// TESTS
// ============================================================================

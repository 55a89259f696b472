// 🚫 Domain Errors
// Hard failures only. Malformed ledger data is coerced, not rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgressError {
    /// Semester label is not of the form `term/year`
    #[error("invalid semester label '{0}' (expected term/year, e.g. 1/2026)")]
    InvalidSemester(String),

    /// Alias or label does not resolve to a canonical category
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Grade-point override outside the 0.0 - 4.0 scale
    #[error("grade '{grade}' has invalid point value {points}")]
    InvalidGradePoint { grade: String, points: f64 },
}

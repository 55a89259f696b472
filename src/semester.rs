// 📅 Semester Labels - "term/year" (e.g. "1/2026")
//
// The engine never reads the clock. Planned courses without a label
// default to a term of the injected current year.

use crate::error::ProgressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemesterLabel {
    pub term: u8,
    pub year: i32,
}

impl SemesterLabel {
    pub fn new(term: u8, year: i32) -> Self {
        SemesterLabel { term, year }
    }
}

impl FromStr for SemesterLabel {
    type Err = ProgressError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ProgressError::InvalidSemester(raw.to_string());

        let (term, year) = raw.trim().split_once('/').ok_or_else(invalid)?;
        let term: u8 = term.trim().parse().map_err(|_| invalid())?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;

        if term == 0 {
            return Err(invalid());
        }
        Ok(SemesterLabel { term, year })
    }
}

impl fmt::Display for SemesterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.term, self.year)
    }
}

// Chronological: year first, then term
impl Ord for SemesterLabel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.term).cmp(&(other.year, other.term))
    }
}

impl PartialOrd for SemesterLabel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Resolve the semester of a planned course
///
/// Missing or malformed labels fall back to `default_term/current_year`.
pub fn resolve_planned_semester(raw: Option<&str>, current_year: i32, default_term: u8) -> SemesterLabel {
    raw.and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SemesterLabel::new(default_term, current_year))
}

// ============================================================================
// TESTS
// ============================================================================

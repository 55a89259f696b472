// 🎯 GPA Calculator
//
// gpa = Σ(points × credits) / Σ(credits), over completed courses whose
// grade has a point value. No contributing course → None (not 0.0).

use crate::credits::clamp_credits;
use crate::entities::CourseEntry;
use crate::error::ProgressError;
use std::collections::BTreeMap;

/// Grades recognized but excluded from GPA (satisfactory/unsatisfactory, withdrawn, transfer, incomplete)
const NON_GPA_GRADES: &[&str] = &["S", "U", "W", "TR", "I"];

const DEFAULT_POINTS: &[(&str, f64)] = &[
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D", 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeClass {
    Points(f64),
    /// Recognized, excluded from GPA
    NonGpa,
    /// Not in the table, excluded from GPA
    Unknown,
}

// ============================================================================
// GRADE TABLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct GradeTable {
    points: BTreeMap<String, f64>,
}

impl GradeTable {
    pub fn new() -> Self {
        GradeTable {
            points: DEFAULT_POINTS
                .iter()
                .map(|(grade, points)| (grade.to_string(), *points))
                .collect(),
        }
    }

    /// Add or replace grade point values (0.0 - 4.0)
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, f64>) -> Result<Self, ProgressError> {
        for (grade, points) in overrides {
            if !points.is_finite() || !(0.0..=4.0).contains(points) {
                return Err(ProgressError::InvalidGradePoint {
                    grade: grade.clone(),
                    points: *points,
                });
            }
            self.points.insert(grade.trim().to_uppercase(), *points);
        }
        Ok(self)
    }

    pub fn classify(&self, grade: &str) -> GradeClass {
        let key = grade.trim().to_uppercase();
        if let Some(points) = self.points.get(&key) {
            GradeClass::Points(*points)
        } else if NON_GPA_GRADES.contains(&key.as_str()) {
            GradeClass::NonGpa
        } else {
            GradeClass::Unknown
        }
    }

    pub fn points_for(&self, grade: &str) -> Option<f64> {
        match self.classify(grade) {
            GradeClass::Points(p) => Some(p),
            _ => None,
        }
    }

    /// Compute GPA over a ledger
    pub fn gpa(&self, ledger: &[CourseEntry]) -> Option<f64> {
        let mut weighted = 0.0;
        let mut credits = 0.0;

        for entry in ledger.iter().filter(|e| e.is_completed()) {
            let Some(points) = entry.grade.as_deref().and_then(|g| self.points_for(g)) else {
                continue;
            };
            let entry_credits = clamp_credits(entry.credits);
            weighted += points * entry_credits;
            credits += entry_credits;
        }

        if credits > 0.0 {
            Some(weighted / credits)
        } else {
            None
        }
    }
}

impl Default for GradeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// GPA with the default grade table
pub fn gpa(ledger: &[CourseEntry]) -> Option<f64> {
    GradeTable::new().gpa(ledger)
}

/// Display form: two decimals, or "N/A"
pub fn format_gpa(gpa: Option<f64>) -> String {
    match gpa {
        Some(value) => format!("{:.2}", value),
        None => "N/A".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

// ⛔ Blacklist Entity - sets of mutually exclusive courses
// Only one course of a blacklist may count toward graduation.

use super::course::normalize_code;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// SOURCE SHAPE
// ============================================================================

/// Blacklist as delivered by the blacklist source: { name, courses: [{ code }] }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistSource {
    pub name: String,

    #[serde(default)]
    pub courses: Vec<BlacklistCourseRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistCourseRef {
    pub code: String,
}

// ============================================================================
// BLACKLIST RULE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistRule {
    pub name: String,
    pub course_codes: BTreeSet<String>,
}

impl BlacklistRule {
    pub fn new<I, S>(name: &str, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        BlacklistRule {
            name: name.trim().to_string(),
            course_codes: codes
                .into_iter()
                .map(|c| normalize_code(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.course_codes.contains(code)
    }
}

impl From<&BlacklistSource> for BlacklistRule {
    fn from(source: &BlacklistSource) -> Self {
        BlacklistRule::new(&source.name, source.courses.iter().map(|c| c.code.as_str()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

// ⛔ Blacklist Conflict Checker
//
// Courses inside one blacklist are mutually exclusive. Completing more than
// one of them is reported; credit counting is left untouched.

use crate::entities::{normalize_code, BlacklistRule, BlacklistSource, CourseEntry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistConflict {
    pub blacklist: String,
    pub course_codes: Vec<String>,
}

impl BlacklistConflict {
    pub fn warning(&self) -> String {
        format!(
            "Blacklist '{}': completed courses {} are mutually exclusive; only one may count",
            self.blacklist,
            self.course_codes.join(", ")
        )
    }
}

// ============================================================================
// CHECKER
// ============================================================================

pub struct BlacklistChecker<'a> {
    rules: &'a [BlacklistRule],
}

impl<'a> BlacklistChecker<'a> {
    pub fn new(rules: &'a [BlacklistRule]) -> Self {
        BlacklistChecker { rules }
    }

    /// Every blacklist with more than one completed member, in rule order
    pub fn conflicts(&self, ledger: &[CourseEntry]) -> Vec<BlacklistConflict> {
        let completed: BTreeSet<String> = ledger
            .iter()
            .filter(|e| e.is_completed())
            .map(|e| normalize_code(&e.code))
            .collect();

        self.rules
            .iter()
            .filter_map(|rule| {
                let hits: Vec<String> = rule
                    .course_codes
                    .iter()
                    .filter(|code| completed.contains(code.as_str()))
                    .cloned()
                    .collect();

                (hits.len() > 1).then(|| BlacklistConflict {
                    blacklist: rule.name.clone(),
                    course_codes: hits,
                })
            })
            .collect()
    }

    /// Human-readable warnings, one per violated blacklist
    pub fn warnings(&self, ledger: &[CourseEntry]) -> Vec<String> {
        self.conflicts(ledger).iter().map(BlacklistConflict::warning).collect()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load blacklist rules from a JSON array of { name, courses: [{ code }] }
pub fn load_blacklists<P: AsRef<Path>>(path: P) -> Result<Vec<BlacklistRule>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read blacklist file: {:?}", path.as_ref()))?;

    let sources: Vec<BlacklistSource> =
        serde_json::from_str(&content).context("Failed to parse blacklist JSON")?;

    Ok(sources.iter().map(BlacklistRule::from).collect())
}

/// Load blacklist rules, degrading to an empty set when the source fails
pub fn load_blacklists_or_empty<P: AsRef<Path>>(path: P) -> Vec<BlacklistRule> {
    match load_blacklists(path.as_ref()) {
        Ok(rules) => rules,
        Err(err) => {
            let message = format!("{:#}", err);
            tracing::warn!(
                path = ?path.as_ref(),
                error = %message,
                "blacklist source unavailable; continuing without blacklists"
            );
            Vec::new()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 🏷️ Category Entity - requirement buckets of a curriculum
//
// Curriculum sources label categories loosely ("core", "Core Courses",
// "core_courses", ...). Labels are folded into a tagged CategoryKind through
// a fixed case-insensitive alias table, optionally extended from config.

use crate::error::ProgressError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// ============================================================================
// CATEGORY KIND
// ============================================================================

/// Canonical requirement categories, declared in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryKind {
    GeneralEducation,
    CoreCourses,
    MajorRequired,
    MajorElective,
    FreeElective,
    Uncategorized,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 6] = [
        CategoryKind::GeneralEducation,
        CategoryKind::CoreCourses,
        CategoryKind::MajorRequired,
        CategoryKind::MajorElective,
        CategoryKind::FreeElective,
        CategoryKind::Uncategorized,
    ];

    /// Canonical display name
    pub fn name(&self) -> &'static str {
        match self {
            CategoryKind::GeneralEducation => "General Education",
            CategoryKind::CoreCourses => "Core Courses",
            CategoryKind::MajorRequired => "Major Required",
            CategoryKind::MajorElective => "Major Elective",
            CategoryKind::FreeElective => "Free Elective",
            CategoryKind::Uncategorized => "Uncategorized",
        }
    }

    /// Look up a kind by its exact canonical name (case-insensitive)
    pub fn from_name(name: &str) -> Option<CategoryKind> {
        let wanted = fold_label(name);
        CategoryKind::ALL
            .into_iter()
            .find(|kind| fold_label(kind.name()) == wanted)
    }

    /// Catch-all buckets absorb courses the curriculum does not list
    pub fn is_catch_all(&self) -> bool {
        matches!(self, CategoryKind::FreeElective | CategoryKind::Uncategorized)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// ALIAS TABLE
// ============================================================================

/// Fixed alias table, keys already folded (lower-case, single spaces)
const ALIASES: &[(&str, CategoryKind)] = &[
    ("general education", CategoryKind::GeneralEducation),
    ("general", CategoryKind::GeneralEducation),
    ("gen ed", CategoryKind::GeneralEducation),
    ("gened", CategoryKind::GeneralEducation),
    ("ge", CategoryKind::GeneralEducation),
    ("core", CategoryKind::CoreCourses),
    ("core course", CategoryKind::CoreCourses),
    ("core courses", CategoryKind::CoreCourses),
    ("major", CategoryKind::MajorRequired),
    ("major required", CategoryKind::MajorRequired),
    ("major core", CategoryKind::MajorRequired),
    ("required", CategoryKind::MajorRequired),
    ("required courses", CategoryKind::MajorRequired),
    ("major elective", CategoryKind::MajorElective),
    ("major electives", CategoryKind::MajorElective),
    ("elective", CategoryKind::MajorElective),
    ("free elective", CategoryKind::FreeElective),
    ("free electives", CategoryKind::FreeElective),
    ("free", CategoryKind::FreeElective),
    ("uncategorized", CategoryKind::Uncategorized),
    ("uncategorised", CategoryKind::Uncategorized),
    ("none", CategoryKind::Uncategorized),
    ("other", CategoryKind::Uncategorized),
];

/// Fold a raw label: lower-case, '_' and '-' as spaces, collapsed whitespace
fn fold_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves raw category labels to canonical kinds
#[derive(Debug, Clone, Default)]
pub struct CategoryAliasTable {
    extra: HashMap<String, CategoryKind>,
}

impl CategoryAliasTable {
    pub fn new() -> Self {
        CategoryAliasTable::default()
    }

    /// Register an extra alias pointing at a canonical category name
    pub fn add_alias(&mut self, alias: &str, canonical: &str) -> Result<(), ProgressError> {
        let kind = CategoryKind::from_name(canonical)
            .ok_or_else(|| ProgressError::UnknownCategory(canonical.to_string()))?;
        self.extra.insert(fold_label(alias), kind);
        Ok(())
    }

    /// Resolve a raw label, None when nothing matches
    pub fn try_resolve(&self, raw: &str) -> Option<CategoryKind> {
        let key = fold_label(raw);
        if let Some(kind) = self.extra.get(&key) {
            return Some(*kind);
        }
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, kind)| *kind)
    }

    /// Resolve a raw label; unresolvable labels land in Uncategorized
    pub fn resolve(&self, raw: &str) -> CategoryKind {
        self.try_resolve(raw).unwrap_or(CategoryKind::Uncategorized)
    }

    pub fn extra_count(&self) -> usize {
        self.extra.len()
    }
}

// ============================================================================
// CATEGORY REQUIREMENT
// ============================================================================

/// One requirement bucket, immutable during a reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequirement {
    /// Canonical name, unique within the curriculum
    pub name: String,

    pub kind: CategoryKind,

    /// 0 means uncapped / informational
    pub required_credits: f64,

    pub qualifying_course_codes: BTreeSet<String>,
}

impl CategoryRequirement {
    pub fn new(kind: CategoryKind, required_credits: f64) -> Self {
        CategoryRequirement {
            name: kind.name().to_string(),
            kind,
            required_credits: crate::credits::clamp_credits(required_credits),
            qualifying_course_codes: BTreeSet::new(),
        }
    }

    /// Builder pattern: add qualifying codes
    pub fn with_courses<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for code in codes {
            self.qualifying_course_codes
                .insert(super::course::normalize_code(code.as_ref()));
        }
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.qualifying_course_codes.contains(code)
    }

    /// No explicit cap: all credits count, nothing overflows
    pub fn is_informational(&self) -> bool {
        self.required_credits <= 0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

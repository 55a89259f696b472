// 🎓 Curriculum - course-to-category associations plus credit requirements
//
// Built once per curriculum load from the persistence layer's flat rows:
//   { courseCode, category, credits } + per-category required credits
// and immutable afterwards.

use super::category::{CategoryAliasTable, CategoryKind, CategoryRequirement};
use super::course::normalize_code;
use crate::credits::CreditValue;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

// ============================================================================
// SOURCE SHAPES (persistence layer contract)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumCourse {
    pub course_code: String,

    /// Raw category label, any alias variant
    #[serde(default)]
    pub category: String,

    /// Number or composite string ("3-0-6")
    #[serde(default)]
    pub credits: CreditValue,
}

impl CurriculumCourse {
    pub fn new(code: &str, category: &str, credits: impl Into<CreditValue>) -> Self {
        CurriculumCourse {
            course_code: code.to_string(),
            category: category.to_string(),
            credits: credits.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumSource {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub total_credits_required: Option<CreditValue>,

    /// Raw category label → required credits
    #[serde(default)]
    pub category_credits: BTreeMap<String, CreditValue>,

    #[serde(default)]
    pub courses: Vec<CurriculumCourse>,
}

// ============================================================================
// REQUIREMENT BUILDER
// ============================================================================

/// Build the requirement set from flat course rows
///
/// - labels resolve through the alias table (unresolvable → Uncategorized)
/// - a code keeps the first category it was seen with
/// - two labels folding to the same category keep the larger requirement
/// - output is ordered by CategoryKind
pub fn build_requirements(
    courses: &[CurriculumCourse],
    required_credits: &BTreeMap<String, f64>,
    aliases: &CategoryAliasTable,
) -> Vec<CategoryRequirement> {
    let mut buckets: BTreeMap<CategoryKind, CategoryRequirement> = BTreeMap::new();

    for (label, credits) in required_credits {
        let kind = aliases.resolve(label);
        let bucket = buckets
            .entry(kind)
            .or_insert_with(|| CategoryRequirement::new(kind, 0.0));
        bucket.required_credits = bucket.required_credits.max(crate::credits::clamp_credits(*credits));
    }

    let mut assigned: HashMap<String, CategoryKind> = HashMap::new();
    for course in courses {
        let code = normalize_code(&course.course_code);
        if code.is_empty() {
            continue;
        }
        let kind = aliases.resolve(&course.category);

        if let Some(existing) = assigned.get(&code) {
            if *existing != kind {
                tracing::debug!(
                    code = %code,
                    kept = %existing,
                    ignored = %kind,
                    "course listed under two categories; keeping the first"
                );
            }
            continue;
        }
        assigned.insert(code.clone(), kind);

        buckets
            .entry(kind)
            .or_insert_with(|| CategoryRequirement::new(kind, 0.0))
            .qualifying_course_codes
            .insert(code);
    }

    buckets.into_values().collect()
}

// ============================================================================
// CURRICULUM
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub name: String,

    /// Declared total; 0 when the source gave none
    pub total_credits_required: f64,

    pub requirements: Vec<CategoryRequirement>,

    /// Parsed credit value per normalized course code
    pub course_credits: BTreeMap<String, f64>,
}

impl Curriculum {
    /// Build a curriculum from its source rows
    pub fn from_source(source: &CurriculumSource, aliases: &CategoryAliasTable) -> Self {
        let required: BTreeMap<String, f64> = source
            .category_credits
            .iter()
            .map(|(label, value)| (label.clone(), value.to_credits()))
            .collect();

        let requirements = build_requirements(&source.courses, &required, aliases);

        let mut course_credits = BTreeMap::new();
        for course in &source.courses {
            let code = normalize_code(&course.course_code);
            if !code.is_empty() {
                course_credits.entry(code).or_insert_with(|| course.credits.to_credits());
            }
        }

        Curriculum {
            name: source.name.clone(),
            total_credits_required: source
                .total_credits_required
                .as_ref()
                .map(CreditValue::to_credits)
                .unwrap_or(0.0),
            requirements,
            course_credits,
        }
    }

    /// Load a curriculum from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P, aliases: &CategoryAliasTable) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read curriculum file: {:?}", path.as_ref()))?;

        let source: CurriculumSource =
            serde_json::from_str(&content).context("Failed to parse curriculum JSON")?;

        Ok(Curriculum::from_source(&source, aliases))
    }

    /// Declared total when present, otherwise the sum of category requirements
    pub fn effective_total_required(&self) -> f64 {
        if self.requirements.is_empty() {
            return 0.0;
        }
        if self.total_credits_required > 0.0 {
            self.total_credits_required
        } else {
            self.requirements.iter().map(|r| r.required_credits).sum()
        }
    }

    pub fn credits_for(&self, code: &str) -> Option<f64> {
        self.course_credits.get(code).copied()
    }
}

// ============================================================================
// TESTS
// ============================================================================

// ⚙️ Engine Configuration - loaded from JSON, every field optional
//
// {
//   "currentYear": 2026,
//   "defaultPlannedTerm": 1,
//   "gradePoints": { "D+": 1.5 },
//   "categoryAliases": { "Concentration": "Major Elective" }
// }

use crate::entities::CategoryAliasTable;
use crate::error::ProgressError;
use crate::gpa::GradeTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_CURRENT_YEAR: i32 = 2026;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Year used for planned courses without a semester label
    pub current_year: i32,

    pub default_planned_term: u8,

    /// Extra or overriding grade → point values
    pub grade_points: BTreeMap<String, f64>,

    /// Extra alias → canonical category name
    pub category_aliases: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            current_year: DEFAULT_CURRENT_YEAR,
            default_planned_term: 1,
            grade_points: BTreeMap::new(),
            category_aliases: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: EngineConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        Ok(config)
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Grade table with the configured overrides applied
    pub fn grade_table(&self) -> Result<GradeTable, ProgressError> {
        GradeTable::new().with_overrides(&self.grade_points)
    }

    /// Alias table with the configured extra aliases registered
    pub fn alias_table(&self) -> Result<CategoryAliasTable, ProgressError> {
        let mut table = CategoryAliasTable::new();
        for (alias, canonical) in &self.category_aliases {
            table.add_alias(alias, canonical)?;
        }
        Ok(table)
    }
}

// ============================================================================
// TESTS
// ============================================================================

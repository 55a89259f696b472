// 🔢 Credit Parsing - one parser for every credit value that enters the core
//
// Curriculum sources hand us credits as plain numbers (3), as strings ("3"),
// or as lecture-lab-self study composites ("3-0-6", "3(3-0-6)").
// Everything funnels through parse_credits / clamp_credits.

use serde::{Deserialize, Serialize};

// ============================================================================
// CREDIT VALUE (serde boundary)
// ============================================================================

/// Credit value as it arrives from an upstream source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreditValue {
    Number(f64),
    Text(String),
}

impl CreditValue {
    /// Resolve to a non-negative credit amount (0 on anything unparseable)
    pub fn to_credits(&self) -> f64 {
        match self {
            CreditValue::Number(n) => clamp_credits(*n),
            CreditValue::Text(s) => parse_credits(s),
        }
    }

    /// True when the raw value could not be read as credits at all
    pub fn is_malformed(&self) -> bool {
        match self {
            CreditValue::Number(n) => !n.is_finite(),
            CreditValue::Text(s) => try_parse_credits(s).is_none(),
        }
    }

    /// True when the raw value is a finite negative number
    pub fn is_negative(&self) -> bool {
        match self {
            CreditValue::Number(n) => n.is_finite() && *n < 0.0,
            CreditValue::Text(_) => false,
        }
    }
}

impl Default for CreditValue {
    fn default() -> Self {
        CreditValue::Number(0.0)
    }
}

impl From<f64> for CreditValue {
    fn from(value: f64) -> Self {
        CreditValue::Number(value)
    }
}

impl From<&str> for CreditValue {
    fn from(value: &str) -> Self {
        CreditValue::Text(value.to_string())
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse a credit string, defaulting to 0 on failure
///
/// Takes the first hyphen-delimited number:
/// - "3"        → 3.0
/// - "3-0-6"    → 3.0
/// - "3(3-0-6)" → 3.0
/// - "abc"      → 0.0
pub fn parse_credits(raw: &str) -> f64 {
    try_parse_credits(raw).unwrap_or(0.0)
}

/// Parse a credit string, returning None when nothing numeric is found
pub fn try_parse_credits(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "3(3-0-6)" carries the total before the parenthesis
    let head = trimmed.split('(').next().unwrap_or(trimmed);
    let first = head.split('-').next().unwrap_or(head).trim();

    match first.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(clamp_credits(value)),
        _ => None,
    }
}

/// Clamp a numeric credit value into the valid range (NaN, ±inf, negatives → 0)
pub fn clamp_credits(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

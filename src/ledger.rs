// 📒 Student Ledger - one CourseEntry per course code
//
// Raw records (local state, imported transcripts) are normalized here:
// codes trimmed and upper-cased, statuses folded into the canonical six,
// credits parsed and clamped. Later records for the same code replace
// earlier ones in place (last write wins, first position kept).

use crate::credits::{clamp_credits, CreditValue};
use crate::data_quality::{self, QualityReport};
use crate::entities::{normalize_code, CourseEntry, CourseStatus, Curriculum};
use crate::gpa::GradeTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::path::Path;

// ============================================================================
// RAW RECORD (ledger source contract)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourseRecord {
    pub code: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub credits: Option<CreditValue>,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub grade: Option<String>,

    #[serde(default, alias = "planned_semester")]
    pub planned_semester: Option<String>,
}

/// CSV row: every column read as text
#[derive(Debug, Deserialize)]
struct CsvCourseRow {
    code: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    credits: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    grade: String,
    #[serde(default, alias = "plannedSemester")]
    planned_semester: String,
}

impl From<CsvCourseRow> for RawCourseRecord {
    fn from(row: CsvCourseRow) -> Self {
        let non_empty = |s: String| {
            let trimmed = s.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        RawCourseRecord {
            code: row.code,
            title: row.title,
            credits: non_empty(row.credits).map(CreditValue::Text),
            status: row.status,
            grade: non_empty(row.grade),
            planned_semester: non_empty(row.planned_semester),
        }
    }
}

impl RawCourseRecord {
    /// Normalize into a CourseEntry, None when the code is empty
    pub fn to_entry(&self) -> Option<CourseEntry> {
        let code = normalize_code(&self.code);
        if code.is_empty() {
            return None;
        }

        let credits = self.credits.as_ref().map(CreditValue::to_credits).unwrap_or(0.0);
        let mut entry = CourseEntry::new(&code, self.title.trim(), credits, CourseStatus::normalize(&self.status));

        if let Some(grade) = self.grade.as_deref().filter(|g| !g.trim().is_empty()) {
            entry = entry.with_grade(grade);
        }
        if let Some(semester) = self.planned_semester.as_deref().filter(|s| !s.trim().is_empty()) {
            entry = entry.with_semester(semester);
        }
        Some(entry)
    }
}

// ============================================================================
// STUDENT LEDGER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentLedger {
    entries: Vec<CourseEntry>,
    index: HashMap<String, usize>,
}

/// A normalized ledger plus the diagnostics gathered on the way
#[derive(Debug, Clone)]
pub struct NormalizedLedger {
    pub ledger: StudentLedger,
    pub quality: QualityReport,
}

impl StudentLedger {
    pub fn new() -> Self {
        StudentLedger::default()
    }

    pub fn from_entries<I: IntoIterator<Item = CourseEntry>>(entries: I) -> Self {
        let mut ledger = StudentLedger::new();
        for entry in entries {
            ledger.insert(entry);
        }
        ledger
    }

    /// Insert or replace by code; returns the replaced entry
    pub fn insert(&mut self, mut entry: CourseEntry) -> Option<CourseEntry> {
        entry.code = normalize_code(&entry.code);
        entry.credits = clamp_credits(entry.credits);
        match self.index.get(&entry.code) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], entry)),
            None => {
                self.index.insert(entry.code.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    /// Merge another ledger into this one (other wins on conflicts)
    pub fn merge(&mut self, other: StudentLedger) {
        for entry in other.entries {
            self.insert(entry);
        }
    }

    pub fn get(&self, code: &str) -> Option<&CourseEntry> {
        self.index.get(&normalize_code(code)).map(|&pos| &self.entries[pos])
    }

    pub fn entries(&self) -> &[CourseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn completed_codes(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|e| e.is_completed())
            .map(|e| e.code.clone())
            .collect()
    }

    /// Fill zero-credit entries from the curriculum's course list
    ///
    /// Returns how many entries were updated.
    pub fn backfill_credits(&mut self, curriculum: &Curriculum) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter_mut().filter(|e| e.credits <= 0.0) {
            if let Some(credits) = curriculum.credits_for(&entry.code).filter(|c| *c > 0.0) {
                entry.credits = credits;
                updated += 1;
            }
        }
        updated
    }

    /// Normalize raw records into a ledger, collecting quality issues
    pub fn normalize(records: &[RawCourseRecord], grades: &GradeTable) -> NormalizedLedger {
        let mut ledger = StudentLedger::new();
        let mut quality = QualityReport {
            records_seen: records.len(),
            ..Default::default()
        };

        for record in records {
            for issue in data_quality::inspect_record(record, grades) {
                quality.push(issue);
            }

            let Some(entry) = record.to_entry() else {
                continue;
            };
            let code = entry.code.clone();
            if ledger.insert(entry).is_some() {
                quality.push(data_quality::duplicate_issue(&code));
            }
        }

        quality.entries_kept = ledger.len();
        NormalizedLedger { ledger, quality }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Read raw records from CSV (headers: code,title,credits,status,grade,planned_semester)
pub fn read_ledger_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawCourseRecord>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open ledger file: {}", path.as_ref().display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for (line_num, row) in reader.deserialize::<CsvCourseRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to parse ledger CSV line {}", line_num + 2))?;
        records.push(RawCourseRecord::from(row));
    }

    Ok(records)
}

/// Read raw records from a JSON array
pub fn read_ledger_json<P: AsRef<Path>>(path: P) -> Result<Vec<RawCourseRecord>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read ledger file: {:?}", path.as_ref()))?;

    serde_json::from_str(&content).context("Failed to parse ledger JSON")
}

/// Read raw records, choosing the format by file extension (.json, otherwise CSV)
pub fn read_ledger<P: AsRef<Path>>(path: P) -> Result<Vec<RawCourseRecord>> {
    let is_json = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        read_ledger_json(path)
    } else {
        read_ledger_csv(path)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_quality::Severity;
    use crate::entities::{CategoryAliasTable, CurriculumCourse, CurriculumSource};
    use std::io::Write;

    fn raw(code: &str, credits: CreditValue, status: &str) -> RawCourseRecord {
        RawCourseRecord {
            code: code.to_string(),
            title: format!("Course {}", code),
            credits: Some(credits),
            status: status.to_string(),
            grade: None,
            planned_semester: None,
        }
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut ledger = StudentLedger::new();
        ledger.insert(CourseEntry::new("CS101", "a", 3.0, CourseStatus::Planning));
        ledger.insert(CourseEntry::new("CS102", "b", 3.0, CourseStatus::Planning));
        let replaced = ledger.insert(CourseEntry::new(" cs101 ", "a", 3.0, CourseStatus::Completed));

        assert_eq!(replaced.map(|e| e.status), Some(CourseStatus::Planning));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].code, "CS101");
        assert_eq!(ledger.entries()[0].status, CourseStatus::Completed);
        assert_eq!(ledger.get("cs101").map(|e| e.status), Some(CourseStatus::Completed));
    }

    #[test]
    fn test_merge() {
        let mut base = StudentLedger::from_entries(vec![CourseEntry::new("CS101", "a", 3.0, CourseStatus::InProgress)]);
        let update = StudentLedger::from_entries(vec![
            CourseEntry::new("CS101", "a", 3.0, CourseStatus::Completed),
            CourseEntry::new("CS200", "b", 3.0, CourseStatus::Planning),
        ]);
        base.merge(update);

        assert_eq!(base.len(), 2);
        assert_eq!(base.completed_codes().into_iter().collect::<Vec<_>>(), vec!["CS101".to_string()]);
    }

    #[test]
    fn test_normalize_records() {
        let mut planned = raw("ma201", CreditValue::Text("3-0-6".to_string()), "planned");
        planned.planned_semester = Some("2/2026".to_string());
        let records = vec![
            raw("CS101", CreditValue::Number(3.0), "Currently Taking"),
            raw("cs101", CreditValue::Number(3.0), "completed"),
            planned,
            raw("", CreditValue::Number(3.0), "completed"),
            raw("PH100", CreditValue::Number(2.0), "???"),
        ];

        let normalized = StudentLedger::normalize(&records, &GradeTable::new());
        let ledger = &normalized.ledger;

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get("CS101").map(|e| e.status), Some(CourseStatus::Completed));
        assert_eq!(ledger.get("MA201").map(|e| e.credits), Some(3.0));
        assert_eq!(ledger.get("MA201").and_then(|e| e.planned_semester.clone()), Some("2/2026".to_string()));
        assert_eq!(ledger.get("PH100").map(|e| e.status), Some(CourseStatus::Pending));

        let quality = &normalized.quality;
        assert_eq!(quality.records_seen, 5);
        assert_eq!(quality.entries_kept, 3);
        assert_eq!(quality.count(Severity::Critical), 1);
        // duplicate CS101 + unknown status on PH100
        assert_eq!(quality.count(Severity::Warning), 2);
    }

    #[test]
    fn test_backfill_credits_from_curriculum() {
        let source = CurriculumSource {
            courses: vec![CurriculumCourse::new("CS101", "core", "3-0-6")],
            ..Default::default()
        };
        let curriculum = Curriculum::from_source(&source, &CategoryAliasTable::new());
        let mut ledger = StudentLedger::from_entries(vec![
            CourseEntry::new("CS101", "a", 0.0, CourseStatus::Completed),
            CourseEntry::new("XYZ999", "b", 0.0, CourseStatus::Completed),
        ]);

        assert_eq!(ledger.backfill_credits(&curriculum), 1);
        assert_eq!(ledger.get("CS101").map(|e| e.credits), Some(3.0));
        assert_eq!(ledger.get("XYZ999").map(|e| e.credits), Some(0.0));
    }

    #[test]
    fn test_read_ledger_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "code,title,credits,status,grade,planned_semester").unwrap();
        writeln!(file, "cs101,Intro,3-0-6,completed,A,").unwrap();
        writeln!(file, "cs200,Data Structures,3,planned,,1/2027").unwrap();
        file.flush().unwrap();

        let records = read_ledger(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        let entry = records[0].to_entry().unwrap();
        assert_eq!(entry.code, "CS101");
        assert_eq!(entry.credits, 3.0);
        assert_eq!(entry.grade.as_deref(), Some("A"));
        assert_eq!(entry.planned_semester, None);
        assert_eq!(records[1].planned_semester.as_deref(), Some("1/2027"));
    }

    #[test]
    fn test_read_ledger_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"code": "CS101", "title": "Intro", "credits": 3, "status": "in-progress"}},
                {{"code": "CS102", "credits": "3-0-6", "status": "planned", "plannedSemester": "1/2027"}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let records = read_ledger(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].to_entry().map(|e| e.status), Some(CourseStatus::InProgress));
        assert_eq!(records[1].to_entry().map(|e| e.credits), Some(3.0));
    }
}

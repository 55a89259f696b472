// Degree Progress - Core Library
// Reconciles a student's course ledger against a curriculum's requirements.
//
// ```
// use degree_progress::{CategoryKind, CategoryRequirement, CourseEntry, CourseStatus, ReconciliationEngine};
//
// let requirements = vec![
//     CategoryRequirement::new(CategoryKind::MajorElective, 6.0).with_courses(["ME101", "ME102", "ME103"]),
// ];
// let ledger = vec![
//     CourseEntry::new("ME101", "Elective I", 3.0, CourseStatus::Completed).with_grade("A"),
//     CourseEntry::new("ME102", "Elective II", 3.0, CourseStatus::Completed).with_grade("B"),
//     CourseEntry::new("ME103", "Elective III", 3.0, CourseStatus::Completed),
// ];
//
// let report = ReconciliationEngine::new().reconcile(&ledger, &requirements, &[]);
// assert_eq!(report.total_counted_credits, 6.0);
// assert_eq!(report.total_overflow_credits, 3.0);
// assert_eq!(report.gpa, Some(3.5));
// ```

pub mod blacklist;
pub mod config;
pub mod credits;
pub mod data_quality;
pub mod entities;
pub mod error;
pub mod gpa;
pub mod ledger;
pub mod logging;
pub mod reconciliation;
pub mod semester;

// Re-export commonly used types
pub use blacklist::{load_blacklists, load_blacklists_or_empty, BlacklistChecker, BlacklistConflict};
pub use config::EngineConfig;
pub use credits::{clamp_credits, parse_credits, CreditValue};
pub use data_quality::{QualityIssue, QualityReport, Severity};
pub use entities::{
    normalize_code, BlacklistRule, BlacklistSource, CategoryAliasTable, CategoryKind,
    CategoryRequirement, CourseEntry, CourseStatus, Curriculum, CurriculumCourse, CurriculumSource,
};
pub use error::ProgressError;
pub use gpa::{format_gpa, gpa, GradeClass, GradeTable};
pub use ledger::{read_ledger, NormalizedLedger, RawCourseRecord, StudentLedger};
pub use reconciliation::{
    CategoryProgress, OverflowEntry, PendingEntry, ProgressReport, ReconciliationEngine,
    SemesterPlan, CATCH_ALL_CATEGORY,
};
pub use semester::SemesterLabel;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Entity Models
// Pure data consumed by the engine: ledger rows, requirement buckets,
// curricula and blacklists. Built once per load, immutable during a pass.

pub mod blacklist;
pub mod category;
pub mod course;
pub mod curriculum;

pub use blacklist::{BlacklistCourseRef, BlacklistRule, BlacklistSource};
pub use category::{CategoryAliasTable, CategoryKind, CategoryRequirement};
pub use course::{normalize_code, CourseEntry, CourseStatus};
pub use curriculum::{build_requirements, Curriculum, CurriculumCourse, CurriculumSource};

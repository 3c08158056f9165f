//! Records exchanged with the AdSel services.
//!
//! # Design
//! Inbound records derive `Deserialize` with one `rename` per wire key, which
//! doubles as the allow-list: unknown keys are ignored, and optional count
//! groups are flattened `Option`s so a group is kept only when all of its keys
//! arrived. Outbound bodies go through `RequestBody::json_data`, one
//! implementation per subtype, so no subtype can emit another's fields.

mod activity;
mod application;
mod assignment;
mod cohort;
mod conflict;
mod decision;
mod major;
mod merge;
mod quarter;
mod workspace;

use serde_json::Value;

pub use activity::{Activity, ActivityFilter};
pub use application::{Application, DepartmentalDecisionApplication, PurpleGoldApplication};
pub use assignment::{
    Assignment, AssignmentDetail, CohortAssignment, DecisionAssignment, MajorAssignment,
    PurpleGoldAssignment, SubmitResult,
};
pub use cohort::{AdminCohort, Cohort};
pub use conflict::{
    CohortConflict, CohortConflictFields, ConflictDetail, ConflictSummary, DetailColumns,
    MajorConflict, MajorConflictFields, StudentRecord,
};
pub use decision::Decision;
pub use major::{AdminMajor, ClassCounts, Major, ResidencyCounts};
pub use merge::{CohortMerge, MajorMerge, Merge};
pub use quarter::Quarter;
pub use workspace::{DuplicateWorkspace, Workspace};

/// A record that can be sent as a request body.
pub trait RequestBody {
    /// The body in camelCase; endpoints wanting PascalCase re-key it.
    fn json_data(&self) -> Value;
}

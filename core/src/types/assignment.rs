//! Bulk assignment submissions.
//!
//! Every body has the same outer shape: an `applicants` list plus an
//! `assignmentDetail` block. What differs per kind is the applicant entry, the
//! `assignmentCategory` label, and the extra detail or top-level fields.

use serde_json::{json, Map, Value};

use super::application::{Application, DepartmentalDecisionApplication, PurpleGoldApplication};
use super::RequestBody;

/// Metadata shared by every assignment kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssignmentDetail {
    pub assignment_type: String,
    pub quarter_id: i64,
    pub campus: i64,
    pub comments: String,
    pub user: String,
    pub workspace_id: Option<i64>,
}

impl AssignmentDetail {
    fn json_data(&self, category: &str) -> Map<String, Value> {
        let mut detail = Map::new();
        detail.insert("assignmentType".into(), json!(self.assignment_type));
        detail.insert("academicQtrKeyId".into(), json!(self.quarter_id));
        detail.insert("campus".into(), json!(self.campus));
        detail.insert("comments".into(), json!(self.comments));
        detail.insert("decisionImportUser".into(), json!(self.user));
        detail.insert("workspaceId".into(), json!(self.workspace_id));
        detail.insert("assignmentCategory".into(), json!(category));
        detail
    }
}

fn applicants_json<A: RequestBody>(applicants: &[A]) -> Value {
    Value::Array(applicants.iter().map(RequestBody::json_data).collect())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CohortAssignment {
    pub detail: AssignmentDetail,
    pub applicants: Vec<Application>,
    pub cohort_number: i64,
    pub override_previous: bool,
    pub override_protected: bool,
}

impl RequestBody for CohortAssignment {
    fn json_data(&self) -> Value {
        let mut detail = self.detail.json_data("Cohort");
        detail.insert("cohortNbr".into(), json!(self.cohort_number));
        json!({
            "applicants": applicants_json(&self.applicants),
            "assignmentDetail": detail,
            "overridePreviousCohort": self.override_previous,
            "overridePreviousProtectedCohort": self.override_protected,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MajorAssignment {
    pub detail: AssignmentDetail,
    pub applicants: Vec<Application>,
    pub major_code: String,
}

impl RequestBody for MajorAssignment {
    fn json_data(&self) -> Value {
        let mut detail = self.detail.json_data("Major");
        detail.insert("majorProgramCode".into(), json!(self.major_code));
        json!({
            "applicants": applicants_json(&self.applicants),
            "assignmentDetail": detail,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurpleGoldAssignment {
    pub detail: AssignmentDetail,
    pub applicants: Vec<PurpleGoldApplication>,
    pub pugo_code: String,
}

impl RequestBody for PurpleGoldAssignment {
    fn json_data(&self) -> Value {
        let mut detail = self.detail.json_data("PurpleAndGold");
        detail.insert("purpleAndGoldCode".into(), json!(self.pugo_code));
        json!({
            "applicants": applicants_json(&self.applicants),
            "assignmentDetail": detail,
        })
    }
}

/// Departmental decisions are tracked in two independent slots; the
/// decision number selects which slot this submission fills.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionAssignment {
    pub detail: AssignmentDetail,
    pub applicants: Vec<DepartmentalDecisionApplication>,
    pub decision_number: u8,
}

impl RequestBody for DecisionAssignment {
    fn json_data(&self) -> Value {
        let mut detail = self.detail.json_data("DepartmentalDecision");
        detail.insert("decisionNbr".into(), json!(self.decision_number));
        json!({
            "applicants": applicants_json(&self.applicants),
            "assignmentDetail": detail,
        })
    }
}

/// Any assignment submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Cohort(CohortAssignment),
    Major(MajorAssignment),
    PurpleGold(PurpleGoldAssignment),
    Decision(DecisionAssignment),
}

impl Assignment {
    pub fn detail(&self) -> &AssignmentDetail {
        match self {
            Assignment::Cohort(a) => &a.detail,
            Assignment::Major(a) => &a.detail,
            Assignment::PurpleGold(a) => &a.detail,
            Assignment::Decision(a) => &a.detail,
        }
    }

    pub fn applicant_count(&self) -> usize {
        match self {
            Assignment::Cohort(a) => a.applicants.len(),
            Assignment::Major(a) => a.applicants.len(),
            Assignment::PurpleGold(a) => a.applicants.len(),
            Assignment::Decision(a) => a.applicants.len(),
        }
    }
}

impl RequestBody for Assignment {
    fn json_data(&self) -> Value {
        match self {
            Assignment::Cohort(a) => a.json_data(),
            Assignment::Major(a) => a.json_data(),
            Assignment::PurpleGold(a) => a.json_data(),
            Assignment::Decision(a) => a.json_data(),
        }
    }
}

impl From<CohortAssignment> for Assignment {
    fn from(value: CohortAssignment) -> Self {
        Assignment::Cohort(value)
    }
}

impl From<MajorAssignment> for Assignment {
    fn from(value: MajorAssignment) -> Self {
        Assignment::Major(value)
    }
}

impl From<PurpleGoldAssignment> for Assignment {
    fn from(value: PurpleGoldAssignment) -> Self {
        Assignment::PurpleGold(value)
    }
}

impl From<DecisionAssignment> for Assignment {
    fn from(value: DecisionAssignment) -> Self {
        Assignment::Decision(value)
    }
}

/// What was sent and what came back for a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub request: Value,
    pub response: Value,
}

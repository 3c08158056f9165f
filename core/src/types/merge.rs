use serde_json::{json, Value};

use super::RequestBody;

/// Merge one workspace's assignments for a cohort into another workspace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CohortMerge {
    pub from_ws_id: i64,
    pub to_ws_id: i64,
    pub comments: String,
    pub cohort_number: i64,
    pub user: String,
}

impl RequestBody for CohortMerge {
    fn json_data(&self) -> Value {
        json!({
            "fromWorkspaceId": self.from_ws_id,
            "toWorkspaceId": self.to_ws_id,
            "comments": self.comments,
            "cohortNbr": self.cohort_number,
            "decisionImportUser": self.user,
        })
    }
}

/// Merge one workspace's assignments for a major into another workspace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MajorMerge {
    pub from_ws_id: i64,
    pub to_ws_id: i64,
    pub comments: String,
    pub major_code: String,
    pub user: String,
}

impl RequestBody for MajorMerge {
    fn json_data(&self) -> Value {
        json!({
            "fromWorkspaceId": self.from_ws_id,
            "toWorkspaceId": self.to_ws_id,
            "comments": self.comments,
            "majorProgramCode": self.major_code,
            "decisionImportUser": self.user,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Merge {
    Cohort(CohortMerge),
    Major(MajorMerge),
}

impl RequestBody for Merge {
    fn json_data(&self) -> Value {
        match self {
            Merge::Cohort(m) => m.json_data(),
            Merge::Major(m) => m.json_data(),
        }
    }
}

//! Clients for the Azure-hosted AdSel deployments.
//!
//! The assign service mirrors the primary assignment endpoints with PascalCase
//! bodies. The merge service compares two workspaces and merges one into the
//! other. Both may answer with plain text, which is wrapped as
//! `{"string_response": <text>}`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{AssignmentEndpoint, API};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::resource::{decode_body, from_json, Resource};
use crate::transport::{Service, Transport};
use crate::types::{
    CohortAssignment, CohortConflict, CohortConflictFields, CohortMerge, ConflictDetail,
    DecisionAssignment, DetailColumns, MajorAssignment, MajorConflict, MajorConflictFields,
    MajorMerge, Merge, PurpleGoldAssignment, RequestBody, SubmitResult,
};

/// Key under which non-JSON response bodies are returned.
pub const STRING_RESPONSE: &str = "string_response";

/// Decodes a body as JSON, falling back to the raw text.
pub fn json_or_string(response: &HttpResponse) -> Value {
    match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(_) => json!({ STRING_RESPONSE: response.body }),
    }
}

/// Assignment submission against the Azure assign service.
#[derive(Debug, Clone)]
pub struct AdSelAzure<T> {
    resource: Resource<T>,
}

impl<T: Transport> AdSelAzure<T> {
    pub fn new(transport: T) -> Self {
        Self {
            resource: Resource::new(transport, Service::AzureAssign),
        }
    }

    fn submit<B: RequestBody>(
        &self,
        endpoint: AssignmentEndpoint,
        assignment: &B,
    ) -> Result<SubmitResult> {
        let request = endpoint
            .wire_case(Service::AzureAssign)
            .apply(assignment.json_data());
        let response = self.resource.post(&endpoint.path(), &request)?;
        Ok(SubmitResult {
            request,
            response: json_or_string(&response),
        })
    }

    pub fn assign_cohorts_bulk(&self, assignment: &CohortAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::CohortBulk, assignment)
    }

    pub fn assign_cohorts_manual(&self, assignment: &CohortAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::Cohort, assignment)
    }

    pub fn assign_majors(&self, assignment: &MajorAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::Major, assignment)
    }

    pub fn assign_pugo(&self, assignment: &PurpleGoldAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::PurpleGold, assignment)
    }

    pub fn assign_decisions(&self, assignment: &DecisionAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::Decision, assignment)
    }
}

/// The assignment kind a workspace comparison is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeKind {
    Cohort,
    Major,
}

impl MergeKind {
    fn name(&self) -> &'static str {
        match self {
            MergeKind::Cohort => "cohort",
            MergeKind::Major => "major",
        }
    }

    fn merge_path(&self) -> String {
        format!("{API}/merge/{}", self.name())
    }

    fn conflicts_path(&self) -> String {
        format!("{API}/merge/conflicts/{}", self.name())
    }

    fn details_path(&self) -> String {
        format!("{API}/merge/conflictdetails/{}", self.name())
    }
}

/// Conflict checks and merges against the Azure merge service.
#[derive(Debug, Clone)]
pub struct AdSelAzureMerge<T> {
    resource: Resource<T>,
}

impl<T: Transport> AdSelAzureMerge<T> {
    pub fn new(transport: T) -> Self {
        Self {
            resource: Resource::new(transport, Service::AzureMerge),
        }
    }

    fn compare<D: DeserializeOwned>(
        &self,
        path: String,
        from_ws: i64,
        to_ws: i64,
    ) -> Result<Vec<D>> {
        let body = json!({ "fromWorkspaceId": from_ws, "toWorkspaceId": to_ws });
        let response = self.resource.get_with_body(&path, &body)?;
        from_json(decode_body(&response)?)
    }

    fn conflicts<D: DeserializeOwned>(
        &self,
        kind: MergeKind,
        from_ws: i64,
        to_ws: i64,
    ) -> Result<Vec<D>> {
        self.compare(kind.conflicts_path(), from_ws, to_ws)
    }

    fn detail_rows<S>(
        &self,
        kind: MergeKind,
        from_ws: i64,
        to_ws: i64,
    ) -> Result<Vec<ConflictDetail<S>>>
    where
        S: DeserializeOwned,
    {
        let rows: Vec<ConflictDetail<S>> = self.compare(kind.details_path(), from_ws, to_ws)?;
        debug!(?kind, from_ws, to_ws, rows = rows.len(), "fetched conflict details");
        Ok(rows)
    }

    fn details_csv<S>(&self, kind: MergeKind, from_ws: i64, to_ws: i64) -> Result<String>
    where
        S: DeserializeOwned + Serialize + DetailColumns,
    {
        let rows = self.detail_rows::<S>(kind, from_ws, to_ws)?;
        ConflictDetail::to_csv(&rows)
    }

    fn merge_into<B: RequestBody>(&self, kind: MergeKind, merge: &B) -> Result<Value> {
        let response = self.resource.post(&kind.merge_path(), &merge.json_data())?;
        Ok(json_or_string(&response))
    }

    pub fn check_conflict_cohort(&self, from_ws: i64, to_ws: i64) -> Result<Vec<CohortConflict>> {
        self.conflicts(MergeKind::Cohort, from_ws, to_ws)
    }

    pub fn check_conflict_major(&self, from_ws: i64, to_ws: i64) -> Result<Vec<MajorConflict>> {
        self.conflicts(MergeKind::Major, from_ws, to_ws)
    }

    pub fn get_conflict_detail_rows_cohort(
        &self,
        from_ws: i64,
        to_ws: i64,
    ) -> Result<Vec<ConflictDetail<CohortConflictFields>>> {
        self.detail_rows(MergeKind::Cohort, from_ws, to_ws)
    }

    pub fn get_conflict_detail_rows_major(
        &self,
        from_ws: i64,
        to_ws: i64,
    ) -> Result<Vec<ConflictDetail<MajorConflictFields>>> {
        self.detail_rows(MergeKind::Major, from_ws, to_ws)
    }

    /// Cohort conflict details rendered as CSV with a header line.
    pub fn get_conflict_details_cohort(&self, from_ws: i64, to_ws: i64) -> Result<String> {
        self.details_csv::<CohortConflictFields>(MergeKind::Cohort, from_ws, to_ws)
    }

    /// Major conflict details rendered as CSV with a header line.
    pub fn get_conflict_details_major(&self, from_ws: i64, to_ws: i64) -> Result<String> {
        self.details_csv::<MajorConflictFields>(MergeKind::Major, from_ws, to_ws)
    }

    pub fn merge_cohort(&self, merge: &CohortMerge) -> Result<Value> {
        self.merge_into(MergeKind::Cohort, merge)
    }

    pub fn merge_major(&self, merge: &MajorMerge) -> Result<Value> {
        self.merge_into(MergeKind::Major, merge)
    }

    /// Routes a merge of either kind to its endpoint.
    pub fn merge(&self, merge: &Merge) -> Result<Value> {
        match merge {
            Merge::Cohort(m) => self.merge_cohort(m),
            Merge::Major(m) => self.merge_major(m),
        }
    }
}

//! Client for the primary AdSel web service.
//!
//! # Design
//! `AdSel` owns a transport and nothing else that outlives a call. Each
//! operation builds a path under `/api/v1`, optionally a JSON body, sends it
//! through the shared `Resource`, and maps the response with the pure
//! `*_from_json` helpers, which tests can drive without any transport.

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{AdSelError, Result};
use crate::pagination::{self, CursorPage, DEFAULT_MAJOR_PAGE_LIMIT};
use crate::resource::{decode_body, from_json, to_json, Resource};
use crate::transport::{Service, Transport};
use crate::types::{
    Activity, ActivityFilter, AdminCohort, AdminMajor, Application, Assignment, Cohort,
    CohortAssignment, Decision, DecisionAssignment, DuplicateWorkspace, Major, MajorAssignment,
    PurpleGoldAssignment, Quarter, RequestBody, SubmitResult, Workspace,
};
use crate::wire::{with_query, WireCase};

pub const API: &str = "/api/v1";

/// Assignment submission endpoints, shared by the primary and Azure services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentEndpoint {
    Major,
    Cohort,
    CohortBulk,
    PurpleGold,
    Decision,
}

impl AssignmentEndpoint {
    pub fn path(&self) -> String {
        let tail = match self {
            AssignmentEndpoint::Major => "major",
            AssignmentEndpoint::Cohort => "cohort",
            AssignmentEndpoint::CohortBulk => "cohort/bulk",
            AssignmentEndpoint::PurpleGold => "purpleAndGold",
            AssignmentEndpoint::Decision => "departmentalDecision",
        };
        format!("{API}/assignments/{tail}")
    }

    /// Key casing each deployment accepts on this endpoint. The primary
    /// service takes camelCase except for major assignments; Azure is
    /// PascalCase throughout.
    pub fn wire_case(&self, service: Service) -> WireCase {
        match (service, self) {
            (Service::AdSel, AssignmentEndpoint::Major) => WireCase::Pascal,
            (Service::AdSel, _) => WireCase::Camel,
            _ => WireCase::Pascal,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CohortPage {
    cohorts: Vec<Cohort>,
    #[serde(rename = "totalPages", default)]
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MajorPage {
    majors: Vec<Major>,
    #[serde(rename = "nextPage", default)]
    next_page: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ActivityPage {
    decisions: Vec<Activity>,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Maps quarter rows, computing `is_current` against `now`.
pub fn quarters_from_json(value: Value, now: NaiveDateTime) -> Result<Vec<Quarter>> {
    let mut quarters: Vec<Quarter> = from_json(value)?;
    for quarter in &mut quarters {
        quarter.is_current = quarter.is_current_at(now);
    }
    Ok(quarters)
}

/// Typed client for the primary AdSel service.
#[derive(Debug, Clone)]
pub struct AdSel<T> {
    resource: Resource<T>,
    clock: fn() -> NaiveDateTime,
}

impl<T: Transport> AdSel<T> {
    pub fn new(transport: T) -> Self {
        Self {
            resource: Resource::new(transport, Service::AdSel),
            clock: local_now,
        }
    }

    /// Replaces the clock used to decide which quarter is current.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    // --- assignments ---

    fn submit<B: RequestBody>(
        &self,
        endpoint: AssignmentEndpoint,
        assignment: &B,
    ) -> Result<SubmitResult> {
        let request = endpoint.wire_case(Service::AdSel).apply(assignment.json_data());
        let response = decode_body(&self.resource.post(&endpoint.path(), &request)?)?;
        Ok(SubmitResult { request, response })
    }

    pub fn assign_majors(&self, assignment: &MajorAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::Major, assignment)
    }

    pub fn assign_cohorts_bulk(&self, assignment: &CohortAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::CohortBulk, assignment)
    }

    pub fn assign_cohorts_manual(&self, assignment: &CohortAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::Cohort, assignment)
    }

    pub fn assign_purple_gold(&self, assignment: &PurpleGoldAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::PurpleGold, assignment)
    }

    pub fn assign_decisions(&self, assignment: &DecisionAssignment) -> Result<SubmitResult> {
        self.submit(AssignmentEndpoint::Decision, assignment)
    }

    /// Submits any assignment; cohort assignments go to the manual endpoint.
    pub fn assign(&self, assignment: &Assignment) -> Result<SubmitResult> {
        debug!(
            applicants = assignment.applicant_count(),
            user = %assignment.detail().user,
            "submitting assignment"
        );
        match assignment {
            Assignment::Cohort(a) => self.assign_cohorts_manual(a),
            Assignment::Major(a) => self.assign_majors(a),
            Assignment::PurpleGold(a) => self.assign_purple_gold(a),
            Assignment::Decision(a) => self.assign_decisions(a),
        }
    }

    // --- quarters ---

    pub fn get_quarters(&self) -> Result<Vec<Quarter>> {
        let response = self.resource.get(&format!("{API}/academicqtr"))?;
        quarters_from_json(response, self.now())
    }

    pub fn get_periods_without_cohorts(&self) -> Result<Vec<Quarter>> {
        let response = self.resource.get(&format!("{API}/academicqtr/WithoutCohorts"))?;
        quarters_from_json(response, self.now())
    }

    // --- applications ---

    pub fn get_all_applications_by_qtr(&self, quarter_id: i64) -> Result<Vec<Application>> {
        self.resource
            .get_as(&format!("{API}/applications/{quarter_id}/all"))
    }

    pub fn get_applications_by_qtr_syskey(
        &self,
        quarter_id: i64,
        syskey: i64,
    ) -> Result<Vec<Application>> {
        self.resource
            .get_as(&format!("{API}/applications/{quarter_id}/{syskey}"))
    }

    /// Applications for the given system keys. The live service filters
    /// server-side; mock data returns a superset that is narrowed here.
    pub fn get_applications_by_qtr_syskey_list(
        &self,
        quarter_id: i64,
        syskeys: &[i64],
    ) -> Result<Vec<Application>> {
        let path = format!("{API}/applications/SystemKeys/{quarter_id}");
        let response = self.resource.post(&path, &json!(syskeys))?;
        let applications: Vec<Application> = from_json(decode_body(&response)?)?;
        if self.resource.transport().computes_filters() {
            return Ok(applications);
        }
        debug!(fetched = applications.len(), "filtering applications by system key locally");
        Ok(applications
            .into_iter()
            .filter(|app| syskeys.contains(&app.system_key))
            .collect())
    }

    // --- activities ---

    /// Best effort: a failed call yields an empty list instead of an error.
    pub fn get_filtered_activities(&self, filter: &ActivityFilter) -> Result<Vec<Activity>> {
        let path = with_query(format!("{API}/activities"), filter.query_pairs());
        match self.resource.get_as::<ActivityPage>(&path) {
            Ok(page) => Ok(page.decisions),
            Err(AdSelError::DataFailure { status, .. }) => {
                warn!(%path, status, "activity listing failed, returning no activities");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn get_activities(&self) -> Result<Vec<Activity>> {
        self.get_filtered_activities(&ActivityFilter::default())
    }

    // --- cohorts ---

    /// All cohorts for a quarter, walking `totalPages`.
    pub fn get_cohorts_by_qtr(&self, quarter_id: i64) -> Result<Vec<Cohort>> {
        let base = format!("{API}/cohorts/{quarter_id}");
        let first: CohortPage = self.resource.get_as(&base)?;
        let total_pages = first.total_pages.unwrap_or(1);
        pagination::walk_counted(first.cohorts, total_pages, |page| {
            debug!(quarter_id, page, total_pages, "fetching cohort page");
            let next: CohortPage = self.resource.get_as(&format!("{base}?Page={page}"))?;
            Ok(next.cohorts)
        })
    }

    pub fn get_decisions(&self, quarter_id: i64) -> Result<Vec<Decision>> {
        self.resource.get_as(&format!(
            "{API}/departmentaldecisions/GetWithCounts?academicQtrKeyId={quarter_id}"
        ))
    }

    // --- majors ---

    pub fn get_major_details_by_qtr_major(
        &self,
        quarter_id: i64,
        major_program_code: &str,
    ) -> Result<Major> {
        self.resource
            .get_as(&format!("{API}/majors/details/{quarter_id}/{major_program_code}"))
    }

    pub fn get_majors_by_qtr(&self, quarter_id: i64) -> Result<Vec<Major>> {
        self.get_majors_by_qtr_with_limit(quarter_id, DEFAULT_MAJOR_PAGE_LIMIT)
    }

    /// All majors for a quarter, following `nextPage`. `limit` is capped at
    /// the service maximum.
    pub fn get_majors_by_qtr_with_limit(&self, quarter_id: i64, limit: u32) -> Result<Vec<Major>> {
        let limit = pagination::page_limit(limit);
        let mut majors = Vec::new();
        let mut fetch = |page: u32| -> Result<CursorPage<Major>> {
            debug!(quarter_id, page, limit, "fetching major page");
            let path = format!("{API}/majors/details/{quarter_id}?Page={page}&Limit={limit}");
            let response: MajorPage = self.resource.get_as(&path)?;
            Ok(CursorPage {
                items: response.majors,
                has_next: response.next_page.is_some(),
            })
        };
        pagination::walk_cursor(1, &mut majors, &mut fetch)?;
        Ok(majors)
    }

    // --- admin majors ---

    pub fn get_admin_majors(&self) -> Result<Vec<AdminMajor>> {
        self.resource.get_as(&format!("{API}/admin/majors"))
    }

    pub fn get_admin_major_by_id(&self, id: i64) -> Result<AdminMajor> {
        self.resource.get_as(&format!("{API}/admin/major/{id}"))
    }

    pub fn get_admin_majorvalues(&self) -> Result<Value> {
        self.resource.get(&format!("{API}/admin/majorvalues"))
    }

    pub fn post_admin_major(&self, major: &AdminMajor) -> Result<Value> {
        decode_body(&self.resource.post(&format!("{API}/admin/major"), &to_json(major)?)?)
    }

    pub fn put_admin_major(&self, major: &AdminMajor) -> Result<Value> {
        decode_body(&self.resource.put(&format!("{API}/admin/major"), &to_json(major)?)?)
    }

    // --- admin cohorts ---

    pub fn get_admin_cohorts_by_qtr(&self, quarter_id: i64) -> Result<Vec<AdminCohort>> {
        self.resource.get_as(&format!("{API}/admin/cohorts/{quarter_id}"))
    }

    pub fn get_admin_cohort_by_qtr_id(&self, quarter_id: i64, id: i64) -> Result<AdminCohort> {
        self.resource
            .get_as(&format!("{API}/admin/cohorts/{quarter_id}/{id}"))
    }

    pub fn post_admin_cohort(&self, cohort: &AdminCohort) -> Result<Value> {
        decode_body(&self.resource.post(&format!("{API}/admin/cohort"), &to_json(cohort)?)?)
    }

    pub fn put_admin_cohort(&self, cohort: &AdminCohort) -> Result<Value> {
        decode_body(&self.resource.put(&format!("{API}/admin/cohort"), &to_json(cohort)?)?)
    }

    pub fn copy_cohort(&self, from_cohort_id: i64, to_cohort_id: i64) -> Result<Value> {
        let path = format!("{API}/admin/cohort/copy/{from_cohort_id}/{to_cohort_id}");
        decode_body(&self.resource.post(&path, &json!({}))?)
    }

    // --- filters and workspaces ---

    pub fn get_filter_values(
        &self,
        year: Option<i32>,
        quarter: Option<i32>,
        report_view: Option<&str>,
    ) -> Result<Value> {
        let params = [
            ("academicYr", year.map(|y| y.to_string())),
            ("academicQtr", quarter.map(|q| q.to_string())),
            ("reportView", report_view.map(str::to_string)),
        ];
        let path = with_query(
            format!("{API}/filter"),
            params
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        );
        self.resource.get(&path)
    }

    pub fn create_workspace(&self, workspace: &Workspace) -> Result<Value> {
        let path = format!("{API}/admin/workspace");
        decode_body(&self.resource.post(&path, &to_json(workspace)?)?)
    }

    pub fn duplicate_workspace(&self, workspace_id: i64, workspace_name: &str) -> Result<Value> {
        let body = DuplicateWorkspace {
            workspace_name: workspace_name.to_string(),
            workspace_id,
        };
        let path = format!("{API}/admin/workspace/duplicate");
        decode_body(&self.resource.post(&path, &to_json(&body)?)?)
    }

    pub fn get_workspaces_by_qtr(&self, quarter_id: i64) -> Result<Vec<Workspace>> {
        self.resource.get_as(&format!("{API}/workspaces/{quarter_id}"))
    }
}

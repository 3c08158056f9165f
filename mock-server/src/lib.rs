//! In-memory stand-in for the primary AdSel web service.
//!
//! Records are kept as JSON values in the service's own wire shape, so the
//! handlers only page, filter, and echo. Writes land in the shared dataset and
//! are visible to later reads.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// Page size used for cohort listings.
pub const COHORT_PAGE_SIZE: usize = 2;

/// Everything the stand-in serves.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub quarters: Vec<Value>,
    pub cohorts: Vec<Value>,
    pub majors: Vec<Value>,
    pub applications: Vec<Value>,
    pub activities: Vec<Value>,
    pub decisions: Vec<Value>,
    pub admin_majors: Vec<Value>,
    pub admin_cohorts: Vec<Value>,
    pub workspaces: Vec<Value>,
}

impl Dataset {
    /// A small admissions quarter: one active period, five cohorts, three
    /// majors, and a handful of applications.
    pub fn sample() -> Self {
        let cohort = |nbr: i64, desc: &str| {
            json!({
                "academicQtrKeyId": 1, "cohortNbr": nbr, "cohortDescription": desc,
                "cohortResidency": "R", "admitDecision": "Admit",
                "protectedGroupInd": nbr == 1, "activeCohortInd": true,
                "assignedCount": nbr * 10,
                "freshmanCount": nbr * 5, "transferCount": nbr * 3, "postBacCount": nbr
            })
        };
        let major = |abbr: &str, code: &str, name: &str| {
            json!({
                "majorAbbr": abbr, "majorProgramCode": code, "academicQtrKeyId": 1,
                "majorPathway": 1, "displayName": name, "college": "A",
                "division": "Natural Sciences", "dtx": "N", "assignedCount": 12,
                "residentCount": 8, "nonResidentCount": 3, "internationalCount": 1
            })
        };
        let application = |id: i64, nbr: i64, syskey: i64| {
            json!({
                "admissionsSelectionId": id, "applicationNbr": nbr, "systemKey": syskey,
                "campus": 0, "academicQtrKeyId": 1, "applicationType": "Freshman"
            })
        };
        let admin_major = |id: i64, abbr: &str, name: &str| {
            json!({
                "id": id, "majorAbbr": abbr, "beginAcademicQtrKeyId": 1, "majorPathway": 1,
                "displayName": name, "collegeCode": "A", "directToMajorInd": false,
                "directToCollegeInd": true, "majorAssignedName": name
            })
        };
        let admin_cohort = |qtr: i64, nbr: i64, desc: &str| {
            json!({
                "academicQtrKeyId": qtr, "cohortNbr": nbr, "cohortDescription": desc,
                "cohortCampus": 0, "protectedGroupInd": false, "enforceExceptionsInd": false,
                "activeCohortInd": true, "recordUpdateUser": "javerage"
            })
        };

        Self {
            quarters: vec![
                json!({"academicQtrKeyId": 1, "activeQtrBeginDttm": "2019-11-05T00:00:00",
                       "activeQtrEndDttm": "2020-03-20T00:00:00", "activeInd": "Active",
                       "appl_yr": "2020", "appl_qtr": "1", "hasCohorts": true}),
                json!({"academicQtrKeyId": 2, "activeQtrBeginDttm": "2020-03-20T00:00:00",
                       "activeQtrEndDttm": "2020-06-20T00:00:00", "activeInd": "Inactive",
                       "appl_yr": "2020", "appl_qtr": "2", "hasCohorts": false}),
            ],
            cohorts: vec![
                cohort(1, "First Cohort"),
                cohort(2, "Resident Admit"),
                cohort(3, "Nonresident Admit"),
                cohort(4, "International Admit"),
                cohort(5, "Transfer Admit"),
            ],
            majors: vec![
                major("BIOL", "0_BIOL_1", "Biology"),
                major("CHEM", "0_CHEM_1", "Chemistry"),
                major("C SCI", "0_C SCI_00_1_5", "Computer Science"),
            ],
            applications: vec![
                application(1, 1, 76711),
                application(2, 2, 76711),
                application(3, 1, 97508),
                application(4, 1, 156340),
                application(5, 1, 456340),
            ],
            activities: vec![
                json!({"assignmentMadeOn": "2020-01-10T10:42:11", "assignmentMadeBy": "javerage",
                       "assignmentType": "Cohort", "cohortNbr": 1, "totalSubmitted": 20,
                       "totalAssigned": 18, "assignmentCategory": "Cohort",
                       "decisionImportID": 101, "applicationType": "Freshman"}),
                json!({"assignmentMadeOn": "2020-01-11T08:00:00", "assignmentMadeBy": "bbill",
                       "assignmentType": "Major", "majorAbbr": "BIOL",
                       "majorProgramCode": "0_BIOL_1", "totalSubmitted": 5, "totalAssigned": 5,
                       "assignmentCategory": "Major", "decisionImportID": 102,
                       "applicationType": "Transfer"}),
            ],
            decisions: vec![
                json!({"departmentalDecision": "Admit to Honors", "departmentalDecisionId": 1,
                       "assignedCount1": 12, "assignedCount2": 3, "academicQtrKeyId": 1}),
            ],
            admin_majors: vec![
                admin_major(1, "BIOL", "Biology"),
                admin_major(2, "CHEM", "Chemistry"),
            ],
            admin_cohorts: vec![
                admin_cohort(1, 1, "First Cohort"),
                admin_cohort(1, 2, "Resident Admit"),
                admin_cohort(2, 5, "Spring Cohort"),
            ],
            workspaces: vec![
                json!({"academicQtrKeyId": 1, "workspaceId": 1, "workspaceName": "WS One",
                       "ownerAlias": "javerage"}),
            ],
        }
    }
}

pub type Db = Arc<RwLock<Dataset>>;

type ApiResult<T> = Result<T, StatusCode>;

pub fn app() -> Router {
    app_with(Dataset::sample())
}

pub fn app_with(dataset: Dataset) -> Router {
    let db: Db = Arc::new(RwLock::new(dataset));
    let api = Router::new()
        .route("/academicqtr", get(list_quarters))
        .route("/academicqtr/WithoutCohorts", get(list_quarters_without_cohorts))
        .route("/cohorts/{qtr}", get(list_cohorts))
        .route("/majors/details/{qtr}", get(list_majors))
        .route("/majors/details/{qtr}/{code}", get(get_major))
        .route("/activities", get(list_activities))
        .route("/assignments/major", post(accept_assignment))
        .route("/assignments/cohort", post(accept_assignment))
        .route("/assignments/cohort/bulk", post(accept_assignment))
        .route("/assignments/purpleAndGold", post(accept_assignment))
        .route("/assignments/departmentalDecision", post(accept_assignment))
        .route("/applications/SystemKeys/{qtr}", post(applications_by_syskeys))
        .route("/applications/{qtr}/all", get(applications_by_qtr))
        .route("/applications/{qtr}/{syskey}", get(applications_by_syskey))
        .route("/departmentaldecisions/GetWithCounts", get(list_decisions))
        .route("/admin/majors", get(list_admin_majors))
        .route("/admin/major", post(create_admin_major).put(update_admin_major))
        .route("/admin/major/{id}", get(get_admin_major))
        .route("/admin/majorvalues", get(admin_major_values))
        .route("/admin/cohorts/{qtr}", get(list_admin_cohorts))
        .route("/admin/cohorts/{qtr}/{id}", get(get_admin_cohort))
        .route("/admin/cohort", post(create_admin_cohort).put(update_admin_cohort))
        .route("/admin/cohort/copy/{from}/{to}", post(copy_cohort))
        .route("/filter", get(filter_values))
        .route("/admin/workspace", post(create_workspace))
        .route("/admin/workspace/duplicate", post(duplicate_workspace))
        .route("/workspaces/{qtr}", get(list_workspaces));
    Router::new().nest("/api/v1", api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn field_i64(record: &Value, key: &str) -> Option<i64> {
    record.get(key).and_then(Value::as_i64)
}

fn in_quarter(records: &[Value], qtr: i64) -> Vec<Value> {
    records
        .iter()
        .filter(|r| field_i64(r, "academicQtrKeyId") == Some(qtr))
        .cloned()
        .collect()
}

// --- quarters ---

async fn list_quarters(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.read().await.quarters.clone())
}

async fn list_quarters_without_cohorts(State(db): State<Db>) -> Json<Vec<Value>> {
    let data = db.read().await;
    Json(
        data.quarters
            .iter()
            .filter(|q| q.get("hasCohorts") == Some(&Value::Bool(false)))
            .cloned()
            .collect(),
    )
}

// --- cohorts and majors ---

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(rename = "Page")]
    page: Option<usize>,
    #[serde(rename = "Limit")]
    limit: Option<usize>,
}

async fn list_cohorts(
    State(db): State<Db>,
    Path(qtr): Path<i64>,
    Query(paging): Query<PageQuery>,
) -> Json<Value> {
    let cohorts = in_quarter(&db.read().await.cohorts, qtr);
    let total_pages = cohorts.len().div_ceil(COHORT_PAGE_SIZE).max(1);
    let page = paging.page.unwrap_or(1).max(1);
    let items: Vec<Value> = cohorts
        .into_iter()
        .skip((page - 1) * COHORT_PAGE_SIZE)
        .take(COHORT_PAGE_SIZE)
        .collect();
    debug!(qtr, page, total_pages, "cohort page");
    Json(json!({ "cohorts": items, "totalPages": total_pages }))
}

async fn list_majors(
    State(db): State<Db>,
    Path(qtr): Path<i64>,
    Query(paging): Query<PageQuery>,
) -> Json<Value> {
    let majors = in_quarter(&db.read().await.majors, qtr);
    let page = paging.page.unwrap_or(1).max(1);
    let limit = paging.limit.unwrap_or(100).clamp(1, 300);
    let start = (page - 1) * limit;
    let items: Vec<Value> = majors.iter().skip(start).take(limit).cloned().collect();
    let next_page = if start + limit < majors.len() {
        json!(format!("/api/v1/majors/details/{qtr}?Page={}&Limit={limit}", page + 1))
    } else {
        Value::Null
    };
    Json(json!({ "majors": items, "nextPage": next_page }))
}

async fn get_major(
    State(db): State<Db>,
    Path((qtr, code)): Path<(i64, String)>,
) -> ApiResult<Json<Value>> {
    in_quarter(&db.read().await.majors, qtr)
        .into_iter()
        .find(|m| m.get("majorProgramCode").and_then(Value::as_str) == Some(code.as_str()))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- activities ---

/// Query parameter name and the activity key it matches.
const ACTIVITY_FILTERS: &[(&str, &str)] = &[
    ("netid", "assignmentMadeBy"),
    ("assignmentType", "assignmentType"),
    ("applicationType", "applicationType"),
    ("cohort", "cohortNbr"),
    ("major", "majorProgramCode"),
    ("assignmentCategory", "assignmentCategory"),
    ("comment", "comment"),
];

fn matches_filter(record: &Value, expected: &str) -> bool {
    match record {
        Value::String(s) => s == expected,
        Value::Null => false,
        other => other.to_string() == expected,
    }
}

async fn list_activities(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let data = db.read().await;
    let decisions: Vec<Value> = data
        .activities
        .iter()
        .filter(|activity| {
            ACTIVITY_FILTERS.iter().all(|(param, key)| match params.get(*param) {
                Some(expected) => activity
                    .get(*key)
                    .is_some_and(|value| matches_filter(value, expected)),
                None => true,
            })
        })
        .cloned()
        .collect();
    Json(json!({ "decisions": decisions }))
}

// --- assignments ---

async fn accept_assignment(Json(body): Json<Value>) -> Json<Value> {
    let applicants = body
        .get("applicants")
        .or_else(|| body.get("Applicants"))
        .cloned()
        .unwrap_or_else(|| json!([]));
    info!(count = applicants.as_array().map_or(0, Vec::len), "assignment accepted");
    Json(json!({ "applicants": applicants, "status": "submitted" }))
}

// --- applications ---

async fn applications_by_qtr(State(db): State<Db>, Path(qtr): Path<i64>) -> Json<Vec<Value>> {
    Json(in_quarter(&db.read().await.applications, qtr))
}

async fn applications_by_syskey(
    State(db): State<Db>,
    Path((qtr, syskey)): Path<(i64, i64)>,
) -> Json<Vec<Value>> {
    let apps = in_quarter(&db.read().await.applications, qtr);
    Json(
        apps.into_iter()
            .filter(|a| field_i64(a, "systemKey") == Some(syskey))
            .collect(),
    )
}

async fn applications_by_syskeys(
    State(db): State<Db>,
    Path(qtr): Path<i64>,
    Json(syskeys): Json<Vec<i64>>,
) -> Json<Vec<Value>> {
    let apps = in_quarter(&db.read().await.applications, qtr);
    Json(
        apps.into_iter()
            .filter(|a| field_i64(a, "systemKey").is_some_and(|k| syskeys.contains(&k)))
            .collect(),
    )
}

// --- decisions ---

#[derive(Debug, Deserialize)]
struct DecisionQuery {
    #[serde(rename = "academicQtrKeyId")]
    qtr: i64,
}

async fn list_decisions(
    State(db): State<Db>,
    Query(query): Query<DecisionQuery>,
) -> Json<Vec<Value>> {
    Json(in_quarter(&db.read().await.decisions, query.qtr))
}

// --- admin majors ---

async fn list_admin_majors(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.read().await.admin_majors.clone())
}

async fn get_admin_major(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    db.read()
        .await
        .admin_majors
        .iter()
        .find(|m| field_i64(m, "id") == Some(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn admin_major_values() -> Json<Value> {
    Json(json!({
        "collegeCodes": ["A", "E"],
        "directToXTypes": ["N", "M", "C"],
        "degreeLevels": [1, 2]
    }))
}

async fn create_admin_major(
    State(db): State<Db>,
    Json(mut major): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut data = db.write().await;
    let next_id = data
        .admin_majors
        .iter()
        .filter_map(|m| field_i64(m, "id"))
        .max()
        .unwrap_or(0)
        + 1;
    major
        .as_object_mut()
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?
        .insert("id".to_string(), json!(next_id));
    data.admin_majors.push(major.clone());
    info!(id = next_id, "admin major created");
    Ok((StatusCode::CREATED, Json(major)))
}

async fn update_admin_major(
    State(db): State<Db>,
    Json(major): Json<Value>,
) -> ApiResult<Json<Value>> {
    let id = field_i64(&major, "id").ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let mut data = db.write().await;
    let slot = data
        .admin_majors
        .iter_mut()
        .find(|m| field_i64(m, "id") == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = major.clone();
    Ok(Json(major))
}

// --- admin cohorts ---

fn same_cohort(a: &Value, b: &Value) -> bool {
    field_i64(a, "academicQtrKeyId") == field_i64(b, "academicQtrKeyId")
        && field_i64(a, "cohortNbr") == field_i64(b, "cohortNbr")
}

async fn list_admin_cohorts(State(db): State<Db>, Path(qtr): Path<i64>) -> Json<Vec<Value>> {
    Json(in_quarter(&db.read().await.admin_cohorts, qtr))
}

async fn get_admin_cohort(
    State(db): State<Db>,
    Path((qtr, id)): Path<(i64, i64)>,
) -> ApiResult<Json<Value>> {
    in_quarter(&db.read().await.admin_cohorts, qtr)
        .into_iter()
        .find(|c| field_i64(c, "cohortNbr") == Some(id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_admin_cohort(
    State(db): State<Db>,
    Json(cohort): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut data = db.write().await;
    if data.admin_cohorts.iter().any(|c| same_cohort(c, &cohort)) {
        return Err(StatusCode::CONFLICT);
    }
    data.admin_cohorts.push(cohort.clone());
    Ok((StatusCode::CREATED, Json(cohort)))
}

async fn update_admin_cohort(
    State(db): State<Db>,
    Json(cohort): Json<Value>,
) -> ApiResult<Json<Value>> {
    let mut data = db.write().await;
    let slot = data
        .admin_cohorts
        .iter_mut()
        .find(|c| same_cohort(c, &cohort))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = cohort.clone();
    Ok(Json(cohort))
}

/// Copies every admin cohort of quarter `from` into quarter `to`.
async fn copy_cohort(State(db): State<Db>, Path((from, to)): Path<(i64, i64)>) -> Json<Value> {
    let mut data = db.write().await;
    let copies: Vec<Value> = in_quarter(&data.admin_cohorts, from)
        .into_iter()
        .map(|mut c| {
            c["academicQtrKeyId"] = json!(to);
            c
        })
        .collect();
    let copied = copies.len();
    data.admin_cohorts.extend(copies);
    info!(from, to, copied, "cohorts copied");
    Json(json!({ "copiedCohorts": copied }))
}

// --- filters and workspaces ---

#[derive(Debug, Deserialize)]
struct FilterQuery {
    #[serde(rename = "academicYr")]
    year: Option<String>,
    #[serde(rename = "academicQtr")]
    quarter: Option<String>,
    #[serde(rename = "reportView")]
    report_view: Option<String>,
}

async fn filter_values(State(db): State<Db>, Query(query): Query<FilterQuery>) -> Json<Value> {
    let data = db.read().await;
    let quarter_ids: Vec<i64> = data
        .quarters
        .iter()
        .filter(|q| {
            query
                .year
                .as_deref()
                .map_or(true, |y| q.get("appl_yr").and_then(Value::as_str) == Some(y))
                && query
                    .quarter
                    .as_deref()
                    .map_or(true, |n| q.get("appl_qtr").and_then(Value::as_str) == Some(n))
        })
        .filter_map(|q| field_i64(q, "academicQtrKeyId"))
        .collect();
    let in_scope = |r: &&Value| {
        field_i64(r, "academicQtrKeyId").is_some_and(|id| quarter_ids.contains(&id))
    };
    let cohorts: Vec<Value> = data
        .cohorts
        .iter()
        .filter(in_scope)
        .filter_map(|c| c.get("cohortNbr").cloned())
        .collect();
    let majors: Vec<Value> = data
        .majors
        .iter()
        .filter(in_scope)
        .filter_map(|m| m.get("majorProgramCode").cloned())
        .collect();
    Json(json!({
        "cohorts": cohorts,
        "majors": majors,
        "reportView": query.report_view,
    }))
}

fn next_workspace_id(workspaces: &[Value]) -> i64 {
    workspaces
        .iter()
        .filter_map(|w| field_i64(w, "workspaceId"))
        .max()
        .unwrap_or(0)
        + 1
}

async fn create_workspace(
    State(db): State<Db>,
    Json(mut workspace): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut data = db.write().await;
    let id = next_workspace_id(&data.workspaces);
    workspace
        .as_object_mut()
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?
        .insert("workspaceId".to_string(), json!(id));
    data.workspaces.push(workspace.clone());
    info!(id, "workspace created");
    Ok((StatusCode::CREATED, Json(workspace)))
}

#[derive(Debug, Deserialize)]
struct DuplicateRequest {
    #[serde(rename = "workspaceId")]
    workspace_id: i64,
    #[serde(rename = "duplicateWorkspaceName")]
    name: String,
}

async fn duplicate_workspace(
    State(db): State<Db>,
    Json(request): Json<DuplicateRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut data = db.write().await;
    let mut copy = data
        .workspaces
        .iter()
        .find(|w| field_i64(w, "workspaceId") == Some(request.workspace_id))
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    let id = next_workspace_id(&data.workspaces);
    copy["workspaceId"] = json!(id);
    copy["workspaceName"] = json!(request.name);
    data.workspaces.push(copy.clone());
    Ok((StatusCode::CREATED, Json(copy)))
}

async fn list_workspaces(State(db): State<Db>, Path(qtr): Path<i64>) -> Json<Vec<Value>> {
    Json(in_quarter(&db.read().await.workspaces, qtr))
}

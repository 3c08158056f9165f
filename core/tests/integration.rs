//! Drives the clients over real HTTP against local services.
//!
//! # Design
//! Each test starts its own mock server on a random port, so writes made by
//! one test are never seen by another. The server runs on a background tokio
//! runtime while the blocking client talks to it through `HttpTransport`.
//! Merge checks go to a small recorder that keeps what reached the wire.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use adsel_core::types::{ActivityFilter, AdminMajor, Application, MajorAssignment, Workspace};
use adsel_core::{AdSel, AdSelAzureMerge, AdSelError, HttpTransport, ServiceHosts, Transport};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

fn spawn_with<F, Fut>(serve: F) -> String
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: Future<Output = std::io::Result<()>>,
{
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            serve(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn spawn_server() -> String {
    spawn_with(adsel_mock_server::run)
}

/// Authorization header and body of every request the recorder received.
type Seen = Arc<Mutex<Vec<(Option<String>, String)>>>;

async fn record(State(seen): State<Seen>, headers: HeaderMap, body: String) -> &'static str {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().unwrap().push((auth, body));
    "[]"
}

/// A merge service that answers every conflict check with no conflicts.
fn spawn_recorder() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/v1/merge/conflicts/{kind}", get(record))
        .with_state(seen.clone());
    let host = spawn_with(move |listener| async move { axum::serve(listener, app).await });
    (host, seen)
}

fn live_client() -> AdSel<HttpTransport> {
    let host = spawn_server();
    AdSel::new(HttpTransport::new(ServiceHosts::single(&host), Duration::from_secs(5)))
}

#[test]
fn reads_walk_every_page() {
    let client = live_client();

    let cohorts = client.get_cohorts_by_qtr(1).unwrap();
    let numbers: Vec<i64> = cohorts.iter().map(|c| c.cohort_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    let majors = client.get_majors_by_qtr_with_limit(1, 2).unwrap();
    assert_eq!(majors.len(), 3);
    assert_eq!(majors[2].program_code, "0_C SCI_00_1_5");

    let detail = client
        .get_major_details_by_qtr_major(1, "0_C SCI_00_1_5")
        .unwrap();
    assert_eq!(detail.display_name, "Computer Science");
    assert!(detail.residency_counts.is_some());
    assert!(detail.class_counts.is_none());
}

#[test]
fn quarters_and_lookups() {
    let client = live_client();
    assert_eq!(client.get_quarters().unwrap().len(), 2);
    let without = client.get_periods_without_cohorts().unwrap();
    assert_eq!(without.len(), 1);
    assert_eq!(without[0].id, 2);

    assert_eq!(client.get_decisions(1).unwrap()[0].decision_id, 1);
    assert_eq!(client.get_all_applications_by_qtr(1).unwrap().len(), 5);
    assert_eq!(client.get_applications_by_qtr_syskey(1, 97508).unwrap().len(), 1);
}

#[test]
fn syskey_list_is_filtered_by_the_service() {
    let client = live_client();
    let apps = client
        .get_applications_by_qtr_syskey_list(1, &[123, 76711, 656340])
        .unwrap();
    assert_eq!(apps.len(), 2);
    assert!(apps.iter().all(|a| a.system_key == 76711));
}

#[test]
fn activity_filters_reach_the_service() {
    let client = live_client();
    assert_eq!(client.get_activities().unwrap().len(), 2);
    let majors_only = client
        .get_filtered_activities(&ActivityFilter {
            assignment_category: Some("Major".to_string()),
            ..ActivityFilter::default()
        })
        .unwrap();
    assert_eq!(majors_only.len(), 1);
    assert_eq!(majors_only[0].user, "bbill");
}

#[test]
fn admin_major_round_trip() {
    let client = live_client();
    let created = client
        .post_admin_major(&AdminMajor {
            major_abbr: "PHYS".to_string(),
            begin_academic_qtr_key_id: 1,
            major_pathway: 1,
            display_name: "Physics".to_string(),
            ..AdminMajor::default()
        })
        .unwrap();
    assert_eq!(created["id"], 3);

    let mut physics = client.get_admin_major_by_id(3).unwrap();
    assert_eq!(physics.display_name, "Physics");
    physics.display_name = "Applied Physics".to_string();
    client.put_admin_major(&physics).unwrap();
    assert_eq!(client.get_admin_major_by_id(3).unwrap().display_name, "Applied Physics");
    assert_eq!(client.get_admin_majors().unwrap().len(), 3);
}

#[test]
fn cohort_copy_and_workspaces() {
    let client = live_client();
    assert_eq!(client.copy_cohort(1, 4).unwrap()["copiedCohorts"], 2);
    assert_eq!(client.get_admin_cohorts_by_qtr(4).unwrap().len(), 2);
    let spring = client.get_admin_cohort_by_qtr_id(2, 5).unwrap();
    assert_eq!(spring.cohort_description, "Spring Cohort");

    let created = client
        .create_workspace(&Workspace {
            academic_qtr_id: 1,
            workspace_id: None,
            workspace_name: "Round two".to_string(),
            owner_alias: "bbill".to_string(),
        })
        .unwrap();
    let id = created["workspaceId"].as_i64().unwrap();
    client.duplicate_workspace(id, "Round two copy").unwrap();

    let names: Vec<String> = client
        .get_workspaces_by_qtr(1)
        .unwrap()
        .into_iter()
        .map(|w| w.workspace_name)
        .collect();
    assert_eq!(names, vec!["WS One", "Round two", "Round two copy"]);
}

#[test]
fn assignment_is_accepted() {
    let client = live_client();
    let result = client
        .assign_majors(&MajorAssignment {
            major_code: "0_BIOL_1".to_string(),
            applicants: vec![Application::new(1, 1, 76711)],
            ..MajorAssignment::default()
        })
        .unwrap();
    assert_eq!(result.response["status"], "submitted");
    assert_eq!(result.response["applicants"][0]["SystemKey"], 76711);
}

#[test]
fn missing_record_is_a_data_failure() {
    let client = live_client();
    let err = client.get_admin_major_by_id(99).unwrap_err();
    match err {
        AdSelError::DataFailure { url, status, .. } => {
            assert_eq!(url, "/api/v1/admin/major/99");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let transport =
        HttpTransport::new(ServiceHosts::single("http://127.0.0.1:1"), Duration::from_secs(2));
    assert!(transport.computes_filters());
    let err = AdSel::new(transport).get_quarters().unwrap_err();
    assert!(matches!(err, AdSelError::Transport(_)));
}

#[test]
fn conflict_check_carries_token_and_workspaces() {
    let (host, seen) = spawn_recorder();
    let transport = HttpTransport::new(ServiceHosts::single(&host), Duration::from_secs(5))
        .with_token("s3cret");
    let conflicts = AdSelAzureMerge::new(transport).check_conflict_cohort(1, 2).unwrap();
    assert!(conflicts.is_empty());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.as_deref(), Some("Bearer s3cret"));
    let body: Value = serde_json::from_str(&seen[0].1).unwrap();
    assert_eq!(body, json!({"fromWorkspaceId": 1, "toWorkspaceId": 2}));
}

#[test]
fn requests_without_token_carry_no_authorization() {
    let (host, seen) = spawn_recorder();
    let transport = HttpTransport::new(ServiceHosts::single(&host), Duration::from_secs(5));
    AdSelAzureMerge::new(transport).check_conflict_major(3, 4).unwrap();
    assert_eq!(seen.lock().unwrap()[0].0, None);
}

//! End-to-end checks of every client against the bundled mock data files.

use adsel_core::types::{
    ActivityFilter, AdminCohort, AdminMajor, Application, CohortAssignment, CohortMerge,
    MajorAssignment, MajorMerge, PurpleGoldApplication, PurpleGoldAssignment, Workspace,
};
use adsel_core::{
    build_transport, AdSel, AdSelAzure, AdSelAzureMerge, AdSelConfig, AdSelError, FixtureTransport,
};
use chrono::{NaiveDate, NaiveDateTime};

fn mid_january() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn adsel() -> AdSel<FixtureTransport> {
    AdSel::new(FixtureTransport::bundled()).with_clock(mid_january)
}

#[test]
fn quarters() {
    let quarters = adsel().get_quarters().unwrap();
    assert_eq!(quarters.len(), 2);
    assert_eq!(quarters[0].id, 1);
    assert_eq!(
        quarters[0].begin,
        NaiveDate::from_ymd_opt(2019, 11, 5).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert!(quarters[0].is_current);
    assert!(!quarters[1].is_current);
    assert_eq!(quarters[1].active_ind, "Inactive");
}

#[test]
fn cohorts_span_both_pages() {
    let cohorts = adsel().get_cohorts_by_qtr(1).unwrap();
    assert_eq!(cohorts.len(), 4);
    assert_eq!(cohorts[2].cohort_description, "Second Page Cohort");
    assert!(cohorts[0].protected_group);
    assert_eq!(cohorts[0].class_counts.map(|c| c.freshman), Some(5));
    assert!(cohorts[1].class_counts.is_none());
}

#[test]
fn majors_follow_next_page() {
    let majors = adsel().get_majors_by_qtr(1).unwrap();
    let codes: Vec<&str> = majors.iter().map(|m| m.program_code.as_str()).collect();
    assert_eq!(codes, vec!["0_BIOL_1", "0_CHEM_1", "0_C SCI_00_1_5"]);
    assert!(majors.iter().all(|m| m.residency_counts.is_none()));
}

#[test]
fn major_detail_carries_both_count_groups() {
    let major = adsel().get_major_details_by_qtr_major(1, "0_BIOL_1").unwrap();
    assert_eq!(major.display_name, "Biology");
    let residency = major.residency_counts.unwrap();
    assert_eq!((residency.resident, residency.nonresident, residency.international), (8, 3, 1));
    assert_eq!(major.class_counts.unwrap().transfer, 2);
}

#[test]
fn applications() {
    let client = adsel();
    assert_eq!(client.get_all_applications_by_qtr(1).unwrap().len(), 5);

    let by_syskey = client.get_applications_by_qtr_syskey(1, 76711).unwrap();
    assert_eq!(by_syskey.len(), 2);
    assert!(by_syskey.iter().all(|a| a.system_key == 76711));
}

#[test]
fn syskey_list_is_narrowed_to_requested_keys() {
    let client = adsel();
    let partial = client
        .get_applications_by_qtr_syskey_list(1, &[123, 76711, 656340])
        .unwrap();
    assert_eq!(partial.len(), 2);

    let full = client
        .get_applications_by_qtr_syskey_list(1, &[76711, 97508, 156340, 456340])
        .unwrap();
    assert_eq!(full.len(), 5);
}

#[test]
fn activities() {
    let client = adsel();
    let all = client.get_activities().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].major_program_code.as_deref(), Some("0_BIOL_1"));

    let mine = client
        .get_filtered_activities(&ActivityFilter {
            netid: Some("javerage".to_string()),
            ..ActivityFilter::default()
        })
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].decision_import_id, Some(101));

    // No mock file for this filter; the 404 degrades to an empty listing.
    let none = client
        .get_filtered_activities(&ActivityFilter {
            netid: Some("nobody".to_string()),
            ..ActivityFilter::default()
        })
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn null_counts_do_not_fail_the_listing() {
    let rows = adsel()
        .get_filtered_activities(&ActivityFilter {
            netid: Some("bbill".to_string()),
            ..ActivityFilter::default()
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].total_submitted, rows[0].total_assigned), (0, 0));
    assert_eq!(rows[0].comment, None);
}

#[test]
fn decisions() {
    let decisions = adsel().get_decisions(1).unwrap();
    assert_eq!(decisions.len(), 3);
    assert_eq!(decisions[0].assigned_count2, 3);
    assert_eq!(decisions[1].assigned_count2, 0);
    assert_eq!((decisions[2].assigned_count1, decisions[2].assigned_count2), (0, 0));
}

#[test]
fn admin_majors() {
    let client = adsel();
    let majors = client.get_admin_majors().unwrap();
    assert_eq!(majors.len(), 2);
    let biology = client.get_admin_major_by_id(1).unwrap();
    assert_eq!(biology.major_abbr, "BIOL");
    assert!(biology.direct_to_college);
    assert_eq!(biology.end_academic_qtr_key_id, None);

    assert!(client.get_admin_majorvalues().unwrap()["collegeCodes"].is_array());

    let created = client.post_admin_major(&AdminMajor::default()).unwrap();
    assert_eq!(created["id"], 3);
    assert_eq!(client.put_admin_major(&biology).unwrap()["id"], 1);
}

#[test]
fn admin_cohorts() {
    let client = adsel();
    let cohorts = client.get_admin_cohorts_by_qtr(1).unwrap();
    assert_eq!(cohorts.len(), 2);
    let spring = client.get_admin_cohort_by_qtr_id(2, 5).unwrap();
    assert_eq!(spring.cohort_description, "Spring Cohort");
    assert_eq!(spring.record_update_user.as_deref(), Some("javerage"));

    assert_eq!(client.post_admin_cohort(&AdminCohort::default()).unwrap()["cohortNbr"], 1);
    assert_eq!(client.put_admin_cohort(&spring).unwrap()["cohortNbr"], 1);
    assert_eq!(client.copy_cohort(1, 2).unwrap()["copiedCohorts"], 4);
}

#[test]
fn filters_and_workspaces() {
    let client = adsel();
    let values = client.get_filter_values(None, None, None).unwrap();
    assert_eq!(values["cohorts"].as_array().map(Vec::len), Some(4));
    let narrowed = client.get_filter_values(Some(2020), Some(1), None).unwrap();
    assert_eq!(narrowed["majors"][0], "0_BIOL_1");

    let created = client
        .create_workspace(&Workspace {
            academic_qtr_id: 1,
            workspace_id: None,
            workspace_name: "Round one".to_string(),
            owner_alias: "javerage".to_string(),
        })
        .unwrap();
    assert_eq!(created["workspaceId"], 3);
    assert_eq!(client.duplicate_workspace(3, "Copy of round one").unwrap()["workspaceId"], 4);

    let workspaces = client.get_workspaces_by_qtr(1).unwrap();
    assert_eq!(workspaces.len(), 2);
    assert_eq!(workspaces[1].workspace_name, "WS Two");
}

#[test]
fn primary_assignments_echo_request() {
    let client = adsel();
    let cohort = CohortAssignment {
        cohort_number: 1,
        applicants: vec![Application::new(1, 1, 76711)],
        override_previous: false,
        override_protected: true,
        ..CohortAssignment::default()
    };
    let submitted = client.assign_cohorts_manual(&cohort).unwrap();
    assert_eq!(submitted.request["overridePreviousCohort"], false);
    assert_eq!(submitted.request["overridePreviousProtectedCohort"], true);
    assert_eq!(submitted.response["status"], "submitted");
    assert!(client.assign_cohorts_bulk(&cohort).is_ok());
}

#[test]
fn missing_data_is_a_data_failure() {
    let err = adsel().get_all_applications_by_qtr(99).unwrap_err();
    match err {
        AdSelError::DataFailure { url, status, .. } => {
            assert_eq!(url, "/api/v1/applications/99/all");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn listing_a_quarter_without_its_own_file_is_a_data_failure() {
    let err = adsel().get_admin_cohorts_by_qtr(2).unwrap_err();
    assert!(matches!(err, AdSelError::DataFailure { status: 404, .. }));
}

#[test]
fn azure_assignments() {
    let client = AdSelAzure::new(FixtureTransport::bundled());

    let bulk = client
        .assign_cohorts_bulk(&CohortAssignment {
            cohort_number: 1,
            ..CohortAssignment::default()
        })
        .unwrap();
    assert_eq!(bulk.response["string_response"], "");

    let major = client
        .assign_majors(&MajorAssignment {
            major_code: "0_BIOL_1".to_string(),
            ..MajorAssignment::default()
        })
        .unwrap();
    assert_eq!(major.response["Applicants"][0]["AdmissionSelectionId"], 321620);
    assert_eq!(major.request["AssignmentDetail"]["MajorProgramCode"], "0_BIOL_1");

    let pugo = client
        .assign_pugo(&PurpleGoldAssignment {
            pugo_code: "12345".to_string(),
            applicants: vec![PurpleGoldApplication::from_application(
                &Application::new(1, 1, 97508),
                5000,
            )],
            ..PurpleGoldAssignment::default()
        })
        .unwrap();
    assert_eq!(pugo.response["Applicants"][0]["AdmissionSelectionId"], 281620);
    assert_eq!(pugo.request["Applicants"][0]["AwardAmount"], 5000);
}

#[test]
fn cohort_conflicts() {
    let conflicts = AdSelAzureMerge::new(FixtureTransport::bundled())
        .check_conflict_cohort(1, 2)
        .unwrap();
    assert_eq!(conflicts.len(), 10);
    let first = &conflicts[0];
    assert_eq!(first.summary.source_ws, 1);
    assert_eq!(first.summary.source_ws_name, "WS One");
    assert_eq!(first.summary.destination_ws, 2);
    assert_eq!(first.summary.destination_ws_name, "WS Two");
    assert_eq!(first.source_cohort, 1);
    assert!(first.summary.conflict_status);
    assert!(!conflicts[1].summary.conflict_status);
    assert_eq!(first.summary.source_assigned_count, 150);
    assert_eq!(first.summary.destination_assigned_count, 200);
}

#[test]
fn major_conflicts() {
    let conflicts = AdSelAzureMerge::new(FixtureTransport::bundled())
        .check_conflict_major(1, 2)
        .unwrap();
    assert_eq!(conflicts.len(), 10);
    assert_eq!(conflicts[0].source_major, "0_C SCI_00_1_5");
    assert_eq!(conflicts[0].summary.source_assigned_count, 40);
    assert_eq!(conflicts[0].summary.destination_assigned_count, 50);
    assert!(!conflicts[1].summary.conflict_status);
}

#[test]
fn conflict_details_as_csv() {
    let merge = AdSelAzureMerge::new(FixtureTransport::bundled());
    let csv = merge.get_conflict_details_cohort(1, 2).unwrap();
    let lines: Vec<&str> = csv.split('\n').collect();
    // header, seven rows, trailing terminator
    assert_eq!(lines.len(), 9);
    assert!(lines[0]
        .starts_with("source_ws,source_ws_name,destination_ws,destination_ws_name,lastSchoolName"));
    assert!(lines[1].contains("Bill Student"));
    assert!(lines[1].contains("\"Roosevelt, High\""));

    let rows = merge.get_conflict_detail_rows_major(1, 2).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].assignment.destination_assigned_major.as_deref(), Some("0_CHEM_1"));
    assert!(merge
        .get_conflict_details_major(1, 2)
        .unwrap()
        .lines()
        .next()
        .is_some_and(|header| header.ends_with("assignedMajorConflictStatus")));
}

#[test]
fn merges_return_wrapped_text() {
    let merge = AdSelAzureMerge::new(FixtureTransport::bundled());
    let cohort = merge
        .merge_cohort(&CohortMerge {
            from_ws_id: 1,
            to_ws_id: 2,
            comments: "Test merge 1>2".to_string(),
            cohort_number: 1,
            user: "testuser".to_string(),
        })
        .unwrap();
    assert_eq!(cohort["string_response"], "");

    let major = merge
        .merge_major(&MajorMerge {
            from_ws_id: 1,
            to_ws_id: 2,
            comments: "Test merge 1>2".to_string(),
            major_code: "0_BIOL_1".to_string(),
            user: "testuser".to_string(),
        })
        .unwrap();
    assert_eq!(major["string_response"], "");
}

#[test]
fn default_config_serves_bundled_data() {
    let transport = build_transport(&AdSelConfig::default()).unwrap();
    let client = AdSel::new(transport);
    assert_eq!(client.get_workspaces_by_qtr(1).unwrap().len(), 2);
}

use serde::{Deserialize, Serialize};

use super::major::ClassCounts;
use crate::wire::null_as_default;

/// A cohort as listed by `/cohorts/{qtr}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cohort {
    #[serde(rename = "academicQtrKeyId")]
    pub academic_qtr_id: i64,
    #[serde(rename = "cohortNbr")]
    pub cohort_number: i64,
    #[serde(rename = "cohortDescription")]
    pub cohort_description: String,
    #[serde(rename = "cohortResidency", default)]
    pub cohort_residency: Option<String>,
    #[serde(rename = "admitDecision", default)]
    pub admit_decision: Option<String>,
    #[serde(rename = "protectedGroupInd", default, deserialize_with = "null_as_default")]
    pub protected_group: bool,
    #[serde(rename = "activeCohortInd", default, deserialize_with = "null_as_default")]
    pub active_cohort: bool,
    #[serde(rename = "assignedCount", default)]
    pub assigned_count: Option<i64>,
    #[serde(flatten)]
    pub class_counts: Option<ClassCounts>,
}

/// Administrative view of a cohort, read from and posted back to `/admin/cohort`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminCohort {
    #[serde(rename = "academicQtrKeyId")]
    pub academic_qtr_id: i64,
    #[serde(rename = "cohortNbr")]
    pub cohort_number: i64,
    #[serde(rename = "cohortDescription")]
    pub cohort_description: String,
    #[serde(rename = "cohortResidency", default)]
    pub cohort_residency: Option<String>,
    #[serde(rename = "cohortCampus", default)]
    pub cohort_campus: Option<i64>,
    #[serde(rename = "cohortApplicationType", default)]
    pub cohort_application_type: Option<String>,
    #[serde(rename = "admitDecision", default)]
    pub admit_decision: Option<String>,
    #[serde(rename = "protectedGroupInd", default, deserialize_with = "null_as_default")]
    pub protected_group: bool,
    #[serde(rename = "enforceExceptionsInd", default, deserialize_with = "null_as_default")]
    pub enforce_exceptions: bool,
    #[serde(rename = "activeCohortInd", default, deserialize_with = "null_as_default")]
    pub active_cohort: bool,
    #[serde(rename = "recordUpdateDateTime", default)]
    pub record_updated: Option<String>,
    #[serde(rename = "recordUpdateUser", default)]
    pub record_update_user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cohort_without_class_counts() {
        let cohort: Cohort = serde_json::from_value(json!({
            "academicQtrKeyId": 1,
            "cohortNbr": 3,
            "cohortDescription": "Resident Admit",
            "cohortResidency": "R",
            "admitDecision": "Admit",
            "protectedGroupInd": false,
            "activeCohortInd": true,
            "assignedCount": 40
        }))
        .unwrap();
        assert_eq!(cohort.cohort_number, 3);
        assert_eq!(cohort.assigned_count, Some(40));
        assert!(cohort.active_cohort);
        assert!(cohort.class_counts.is_none());
    }

    #[test]
    fn null_indicators_read_as_false() {
        let cohort: Cohort = serde_json::from_value(json!({
            "academicQtrKeyId": 1,
            "cohortNbr": 4,
            "cohortDescription": "International Admit",
            "protectedGroupInd": null,
            "activeCohortInd": null
        }))
        .unwrap();
        assert!(!cohort.protected_group);
        assert!(!cohort.active_cohort);

        let admin: AdminCohort = serde_json::from_value(json!({
            "academicQtrKeyId": 1,
            "cohortNbr": 4,
            "cohortDescription": "International Admit",
            "enforceExceptionsInd": null
        }))
        .unwrap();
        assert!(!admin.enforce_exceptions);
    }

    #[test]
    fn cohort_with_class_counts() {
        let cohort: Cohort = serde_json::from_value(json!({
            "academicQtrKeyId": 1,
            "cohortNbr": 3,
            "cohortDescription": "Resident Admit",
            "freshmanCount": 30,
            "transferCount": 9,
            "postBacCount": 1
        }))
        .unwrap();
        assert_eq!(cohort.class_counts.map(|c| c.transfer), Some(9));
        assert_eq!(cohort.assigned_count, None);
    }

    #[test]
    fn admin_cohort_reads_and_writes_same_keys() {
        let wire = json!({
            "academicQtrKeyId": 1,
            "cohortNbr": 12,
            "cohortDescription": "International",
            "cohortResidency": "I",
            "cohortCampus": 0,
            "cohortApplicationType": "Freshman",
            "admitDecision": "Admit",
            "protectedGroupInd": true,
            "enforceExceptionsInd": false,
            "activeCohortInd": true,
            "recordUpdateDateTime": "2020-01-02T10:00:00",
            "recordUpdateUser": "javerage"
        });
        let cohort: AdminCohort = serde_json::from_value(wire.clone()).unwrap();
        assert!(cohort.protected_group);
        assert_eq!(cohort.record_update_user.as_deref(), Some("javerage"));
        assert_eq!(serde_json::to_value(&cohort).unwrap(), wire);
    }
}

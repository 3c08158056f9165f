use serde::Deserialize;
use serde_json::{json, Value};

use super::RequestBody;

/// A single admissions record as returned by the `/applications` family.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Application {
    #[serde(rename = "admissionsSelectionId")]
    pub adsel_id: i64,
    #[serde(rename = "applicationNbr")]
    pub application_number: i64,
    #[serde(rename = "systemKey")]
    pub system_key: i64,
    #[serde(default)]
    pub campus: Option<i64>,
    #[serde(rename = "academicQtrKeyId", default)]
    pub quarter_id: Option<i64>,
    #[serde(rename = "assignedCohort", default)]
    pub assigned_cohort: Option<i64>,
    #[serde(rename = "assignedMajor", default)]
    pub assigned_major: Option<String>,
    #[serde(rename = "majorProgramCode", default)]
    pub major_program_code: Option<String>,
    #[serde(rename = "applicationType", default)]
    pub application_type: Option<String>,
}

impl Application {
    pub fn new(adsel_id: i64, application_number: i64, system_key: i64) -> Self {
        Self {
            adsel_id,
            application_number,
            system_key,
            ..Self::default()
        }
    }
}

impl RequestBody for Application {
    fn json_data(&self) -> Value {
        json!({
            "admissionsSelectionId": self.adsel_id,
            "applicationNbr": self.application_number,
            "systemKey": self.system_key,
        })
    }
}

/// An applicant entry for a purple-and-gold award submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurpleGoldApplication {
    pub adsel_id: i64,
    pub application_number: i64,
    pub system_key: i64,
    pub award_amount: i64,
}

impl PurpleGoldApplication {
    pub fn from_application(application: &Application, award_amount: i64) -> Self {
        Self {
            adsel_id: application.adsel_id,
            application_number: application.application_number,
            system_key: application.system_key,
            award_amount,
        }
    }
}

impl RequestBody for PurpleGoldApplication {
    fn json_data(&self) -> Value {
        json!({
            "admissionsSelectionId": self.adsel_id,
            "applicationNbr": self.application_number,
            "systemKey": self.system_key,
            "awardAmount": self.award_amount,
        })
    }
}

/// An applicant entry for a departmental decision submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepartmentalDecisionApplication {
    pub adsel_id: i64,
    pub application_number: i64,
    pub system_key: i64,
    pub decision_id: i64,
}

impl DepartmentalDecisionApplication {
    pub fn from_application(application: &Application, decision_id: i64) -> Self {
        Self {
            adsel_id: application.adsel_id,
            application_number: application.application_number,
            system_key: application.system_key,
            decision_id,
        }
    }
}

impl RequestBody for DepartmentalDecisionApplication {
    fn json_data(&self) -> Value {
        json!({
            "admissionsSelectionId": self.adsel_id,
            "applicationNbr": self.application_number,
            "systemKey": self.system_key,
            "departmentalDecisionId": self.decision_id,
        })
    }
}

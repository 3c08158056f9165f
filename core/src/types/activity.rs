use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::wire::{deserialize_timestamp, null_as_default};

/// One row of the assignment activity log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    #[serde(rename = "assignmentMadeOn", deserialize_with = "deserialize_timestamp")]
    pub assignment_date: NaiveDateTime,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "assignmentMadeBy")]
    pub user: String,
    #[serde(rename = "assignmentType")]
    pub assignment_type: String,
    #[serde(rename = "cohortNbr", default)]
    pub cohort_number: Option<i64>,
    #[serde(rename = "majorAbbr", default)]
    pub major_abbr: Option<String>,
    #[serde(rename = "majorProgramCode", default)]
    pub major_program_code: Option<String>,
    #[serde(rename = "totalSubmitted", default, deserialize_with = "null_as_default")]
    pub total_submitted: i64,
    #[serde(rename = "totalAssigned", default, deserialize_with = "null_as_default")]
    pub total_assigned: i64,
    #[serde(rename = "assignmentCategory", default)]
    pub assignment_category: Option<String>,
    #[serde(rename = "decisionImportID", default)]
    pub decision_import_id: Option<i64>,
    #[serde(rename = "applicationType", default)]
    pub application_type: Option<String>,
}

/// Optional filters for the activity listing. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    pub netid: Option<String>,
    pub assignment_type: Option<String>,
    pub application_type: Option<String>,
    pub cohort: Option<i64>,
    pub major: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub system_key: Option<i64>,
    pub adsel_id: Option<i64>,
    pub collection_type: Option<String>,
    pub assignment_period: Option<String>,
    pub comment: Option<String>,
    pub assignment_category: Option<String>,
}

impl ActivityFilter {
    /// Supplied filters under the service's parameter names, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let params = [
            ("netid", self.netid.clone()),
            ("assignmentType", self.assignment_type.clone()),
            ("applicationType", self.application_type.clone()),
            ("cohort", self.cohort.map(|c| c.to_string())),
            ("major", self.major.clone()),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
            ("systemKey", self.system_key.map(|k| k.to_string())),
            ("admissionSelectionId", self.adsel_id.map(|id| id.to_string())),
            ("collectionType", self.collection_type.clone()),
            ("assignmentPeriod", self.assignment_period.clone()),
            ("comment", self.comment.clone()),
            ("assignmentCategory", self.assignment_category.clone()),
        ];
        params
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }
}

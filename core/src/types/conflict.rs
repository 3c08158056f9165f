//! Workspace comparison results from the merge service.
//!
//! Summary rows come back PascalCase. Detail rows mirror the upstream student
//! record in camelCase and are usually consumed as CSV; the column tables here
//! fix both the header text and the order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AdSelError, Result};
use crate::wire::null_as_default;

/// Counts and workspace names common to both conflict kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictSummary {
    #[serde(rename = "SourceWs")]
    pub source_ws: i64,
    #[serde(rename = "SourceWsName")]
    pub source_ws_name: String,
    #[serde(rename = "DestinationWs")]
    pub destination_ws: i64,
    #[serde(rename = "DestinationWsName")]
    pub destination_ws_name: String,
    #[serde(rename = "ConflictStatus")]
    pub conflict_status: bool,
    #[serde(rename = "SourceAssignedCount", default, deserialize_with = "null_as_default")]
    pub source_assigned_count: i64,
    #[serde(rename = "DestinationAssignedCount", default, deserialize_with = "null_as_default")]
    pub destination_assigned_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortConflict {
    #[serde(flatten)]
    pub summary: ConflictSummary,
    #[serde(rename = "SourceCohort")]
    pub source_cohort: i64,
    #[serde(rename = "DestinationCohort", default)]
    pub destination_cohort: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorConflict {
    #[serde(flatten)]
    pub summary: ConflictSummary,
    #[serde(rename = "SourceMajor")]
    pub source_major: String,
    #[serde(rename = "DestinationMajor", default)]
    pub destination_major: Option<String>,
}

/// Upstream student fields mirrored on every conflict detail row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "lastSchoolName", default)]
    pub last_school_name: Option<String>,
    #[serde(rename = "lastSchoolCode", default)]
    pub last_school_code: Option<String>,
    #[serde(rename = "highSchoolCity", default)]
    pub high_school_city: Option<String>,
    #[serde(rename = "highSchoolState", default)]
    pub high_school_state: Option<String>,
    #[serde(rename = "highSchoolFRLPct", default)]
    pub high_school_frl_pct: Option<f64>,
    #[serde(rename = "lowFamilyIncomeInd", default)]
    pub low_family_income: Option<String>,
    #[serde(rename = "sdbSrcSystemKey", default)]
    pub system_key: Option<i64>,
    #[serde(rename = "firstGenerationInd", default)]
    pub first_generation: Option<String>,
    #[serde(rename = "applicationType", default)]
    pub application_type: Option<String>,
    #[serde(rename = "athleteCode", default)]
    pub athlete_code: Option<String>,
    #[serde(rename = "admissionsSelectionId", default)]
    pub adsel_id: Option<i64>,
    #[serde(rename = "requestedMajor1Name", default)]
    pub requested_major1_name: Option<String>,
    #[serde(rename = "academicQtrKeyId", default)]
    pub academic_qtr_id: Option<i64>,
    #[serde(rename = "requestedMajor1College", default)]
    pub requested_major1_college: Option<String>,
    #[serde(rename = "studentName", default)]
    pub student_name: Option<String>,
    #[serde(rename = "requestedMajor2Name", default)]
    pub requested_major2_name: Option<String>,
    #[serde(rename = "applicationNbr", default)]
    pub application_number: Option<i64>,
    #[serde(rename = "requestedMajor2College", default)]
    pub requested_major2_college: Option<String>,
    #[serde(rename = "gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "permanentState", default)]
    pub permanent_state: Option<String>,
    #[serde(rename = "underrepresentedMinorityDesc", default)]
    pub underrepresented_minority_desc: Option<String>,
    #[serde(rename = "reasonCode", default)]
    pub reason_code: Option<String>,
    #[serde(rename = "ipedsRaceEthnicityCategory", default)]
    pub ipeds_race_ethnicity_category: Option<String>,
    #[serde(rename = "sdbCohort", default)]
    pub sdb_cohort: Option<String>,
    #[serde(rename = "residentGroup", default)]
    pub resident_group: Option<String>,
    #[serde(rename = "residentCategory", default)]
    pub resident_category: Option<String>,
    #[serde(rename = "sdbApplicationStatus", default)]
    pub sdb_application_status: Option<String>,
    #[serde(rename = "anyAdmissionsRecommendation", default)]
    pub any_admissions_recommendation: Option<String>,
    #[serde(rename = "sdbEmail", default)]
    pub sdb_email: Option<String>,
    #[serde(rename = "anyAcademic", default)]
    pub any_academic: Option<String>,
    #[serde(rename = "anyPQA", default)]
    pub any_pqa: Option<String>,
    #[serde(rename = "highSchoolGPA", default)]
    pub high_school_gpa: Option<f64>,
    #[serde(rename = "mathLevelCode", default)]
    pub math_level_code: Option<String>,
    #[serde(rename = "highestConcordedSATTotal", default)]
    pub highest_concorded_sat_total: Option<i64>,
    #[serde(rename = "highestConcordedSATReadingWriting", default)]
    pub highest_concorded_sat_reading_writing: Option<i64>,
    #[serde(rename = "highestConcordedSATMath", default)]
    pub highest_concorded_sat_math: Option<i64>,
}

const STUDENT_COLUMNS: &[&str] = &[
    "lastSchoolName",
    "lastSchoolCode",
    "highSchoolCity",
    "highSchoolState",
    "highSchoolFRLPct",
    "lowFamilyIncomeInd",
    "sdbSrcSystemKey",
    "firstGenerationInd",
    "applicationType",
    "athleteCode",
    "admissionsSelectionId",
    "requestedMajor1Name",
    "academicQtrKeyId",
    "requestedMajor1College",
    "studentName",
    "requestedMajor2Name",
    "applicationNbr",
    "requestedMajor2College",
    "gender",
    "permanentState",
    "underrepresentedMinorityDesc",
    "reasonCode",
    "ipedsRaceEthnicityCategory",
    "sdbCohort",
    "residentGroup",
    "residentCategory",
    "sdbApplicationStatus",
    "anyAdmissionsRecommendation",
    "sdbEmail",
    "anyAcademic",
    "anyPQA",
    "highSchoolGPA",
    "mathLevelCode",
    "highestConcordedSATTotal",
    "highestConcordedSATReadingWriting",
    "highestConcordedSATMath",
];

/// `(csv header, wire key)` for the workspace columns that lead every row.
const WORKSPACE_COLUMNS: &[(&str, &str)] = &[
    ("source_ws", "sourceWs"),
    ("source_ws_name", "sourceWsName"),
    ("destination_ws", "destinationWs"),
    ("destination_ws_name", "destinationWsName"),
];

/// Trailing columns specific to a detail kind, as wire keys.
pub trait DetailColumns {
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CohortConflictFields {
    #[serde(rename = "sourceAssignedCohort", default)]
    pub source_assigned_cohort: Option<i64>,
    #[serde(rename = "destinationAssignedCohort", default)]
    pub destination_assigned_cohort: Option<i64>,
    #[serde(rename = "assignedCohortConflictStatus", default)]
    pub conflict_status: Option<bool>,
}

impl DetailColumns for CohortConflictFields {
    const COLUMNS: &'static [&'static str] = &[
        "sourceAssignedCohort",
        "destinationAssignedCohort",
        "assignedCohortConflictStatus",
    ];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MajorConflictFields {
    #[serde(rename = "assignedMajor1Name", default)]
    pub assigned_major1_name: Option<String>,
    #[serde(rename = "adSelAssignedMajorName", default)]
    pub adsel_assigned_major_name: Option<String>,
    #[serde(rename = "adSelAssignedMajorProgramCode", default)]
    pub adsel_assigned_major_program_code: Option<String>,
    #[serde(rename = "sourceAssignedMajor", default)]
    pub source_assigned_major: Option<String>,
    #[serde(rename = "destinationAssignedMajor", default)]
    pub destination_assigned_major: Option<String>,
    #[serde(rename = "assignedMajorConflictStatus", default)]
    pub conflict_status: Option<bool>,
}

impl DetailColumns for MajorConflictFields {
    const COLUMNS: &'static [&'static str] = &[
        "assignedMajor1Name",
        "adSelAssignedMajorName",
        "adSelAssignedMajorProgramCode",
        "sourceAssignedMajor",
        "destinationAssignedMajor",
        "assignedMajorConflictStatus",
    ];
}

/// One applicant whose assignment differs between two workspaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictDetail<S> {
    #[serde(rename = "sourceWs")]
    pub source_ws: i64,
    #[serde(rename = "sourceWsName")]
    pub source_ws_name: String,
    #[serde(rename = "destinationWs")]
    pub destination_ws: i64,
    #[serde(rename = "destinationWsName")]
    pub destination_ws_name: String,
    #[serde(flatten)]
    pub student: StudentRecord,
    #[serde(flatten)]
    pub assignment: S,
}

impl<S: Serialize + DetailColumns> ConflictDetail<S> {
    pub fn csv_header() -> Vec<&'static str> {
        WORKSPACE_COLUMNS
            .iter()
            .map(|(header, _)| *header)
            .chain(STUDENT_COLUMNS.iter().copied())
            .chain(S::COLUMNS.iter().copied())
            .collect()
    }

    fn csv_record(&self) -> Result<Vec<String>> {
        let wire =
            serde_json::to_value(self).map_err(|e| AdSelError::Serialization(e.to_string()))?;
        let keys = WORKSPACE_COLUMNS
            .iter()
            .map(|(_, key)| *key)
            .chain(STUDENT_COLUMNS.iter().copied())
            .chain(S::COLUMNS.iter().copied());
        Ok(keys.map(|key| cell(wire.get(key))).collect())
    }

    /// Renders rows as CSV with a header line, one line per row.
    pub fn to_csv(rows: &[Self]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(Self::csv_header())?;
        for row in rows {
            writer.write_record(row.csv_record()?)?;
        }
        let bytes = writer.into_inner().map_err(|e| AdSelError::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AdSelError::Csv(e.to_string()))
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;

/// Assigned applicants broken down by residency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencyCounts {
    #[serde(rename = "residentCount")]
    pub resident: i64,
    #[serde(rename = "nonResidentCount")]
    pub nonresident: i64,
    #[serde(rename = "internationalCount")]
    pub international: i64,
}

/// Assigned applicants broken down by application class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    #[serde(rename = "freshmanCount")]
    pub freshman: i64,
    #[serde(rename = "transferCount")]
    pub transfer: i64,
    #[serde(rename = "postBacCount")]
    pub postbac: i64,
}

/// A major as returned by the `/majors/details` family.
///
/// The count breakdowns only appear on detail responses; each group is
/// independent and is `None` unless all of its keys are present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Major {
    #[serde(rename = "majorAbbr")]
    pub major_abbr: String,
    #[serde(rename = "majorProgramCode")]
    pub program_code: String,
    #[serde(rename = "academicQtrKeyId")]
    pub academic_qtr_key_id: i64,
    #[serde(rename = "majorPathway")]
    pub major_pathway: i64,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub dtx: Option<String>,
    #[serde(rename = "assignedCount", default)]
    pub assigned_count: Option<i64>,
    #[serde(flatten)]
    pub residency_counts: Option<ResidencyCounts>,
    #[serde(flatten)]
    pub class_counts: Option<ClassCounts>,
}

/// Administrative view of a major, read from and posted back to `/admin/major`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminMajor {
    #[serde(rename = "id", default)]
    pub major_id: Option<i64>,
    #[serde(rename = "majorAbbr")]
    pub major_abbr: String,
    #[serde(rename = "beginAcademicQtrKeyId")]
    pub begin_academic_qtr_key_id: i64,
    #[serde(rename = "endAcademicQtrKeyId", default)]
    pub end_academic_qtr_key_id: Option<i64>,
    #[serde(rename = "majorPathway")]
    pub major_pathway: i64,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "collegeCode", default)]
    pub college: Option<String>,
    #[serde(rename = "collegeDivision", default)]
    pub division: Option<String>,
    #[serde(rename = "directToXType", default)]
    pub dtx: Option<String>,
    #[serde(rename = "directToXDesc", default)]
    pub dtx_desc: Option<String>,
    #[serde(rename = "directToMajorInd", default, deserialize_with = "null_as_default")]
    pub direct_to_major: bool,
    #[serde(rename = "directToCollegeInd", default, deserialize_with = "null_as_default")]
    pub direct_to_college: bool,
    #[serde(rename = "majorDegreeLevel", default)]
    pub degree_level: Option<i64>,
    #[serde(rename = "majorDegreeType", default)]
    pub degree_type: Option<i64>,
    #[serde(rename = "assignedMajorAbbr", default)]
    pub assigned_major_abbr: Option<String>,
    #[serde(rename = "assignedMajorDegreeLevel", default)]
    pub assigned_degree_level: Option<i64>,
    #[serde(rename = "assignedMajorDegreeType", default)]
    pub assigned_degree_type: Option<i64>,
    #[serde(rename = "majorAssignedName", default)]
    pub assigned_name: Option<String>,
    #[serde(rename = "assignedMajorPathway", default)]
    pub assigned_pathway: Option<i64>,
}

use serde::Deserialize;

use crate::wire::null_as_default;

/// A departmental decision with its two independently tracked counts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Decision {
    #[serde(rename = "departmentalDecision")]
    pub decision_name: String,
    #[serde(rename = "departmentalDecisionId")]
    pub decision_id: i64,
    #[serde(rename = "assignedCount1", default, deserialize_with = "null_as_default")]
    pub assigned_count1: i64,
    #[serde(rename = "assignedCount2", default, deserialize_with = "null_as_default")]
    pub assigned_count2: i64,
}

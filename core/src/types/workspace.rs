use serde::{Deserialize, Serialize};

/// A named container scoping cohort and major assignment work.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(rename = "academicQtrKeyId")]
    pub academic_qtr_id: i64,
    /// Assigned by the service; absent on creation.
    #[serde(rename = "workspaceId", default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<i64>,
    #[serde(rename = "workspaceName")]
    pub workspace_name: String,
    #[serde(rename = "ownerAlias")]
    pub owner_alias: String,
}

/// Body for `/admin/workspace/duplicate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateWorkspace {
    #[serde(rename = "duplicateWorkspaceName")]
    pub workspace_name: String,
    #[serde(rename = "workspaceId")]
    pub workspace_id: i64,
}

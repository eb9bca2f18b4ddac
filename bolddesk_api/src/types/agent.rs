use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdName;

/// Numeric identifier for an agent.
pub type AgentID = i64;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(alias = "userId")]
    pub agent_id: AgentID,
    #[serde(default)]
    pub name: String,
    pub email_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub roles: Vec<IdName>,
    #[serde(default)]
    pub groups: Vec<IdName>,
    pub last_activity_on: Option<DateTime<Utc>>,
}

/// Body for `POST /agents` (sends an invitation).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCreate {
    pub name: String,
    pub email_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub role_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub brand_ids: Vec<i64>,
}

/// Body for `PUT /agents/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier for a contact group (customer organisation).
pub type ContactGroupID = i64;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroup {
    pub contact_group_id: ContactGroupID,
    #[serde(default)]
    pub contact_group_name: String,
    pub contact_group_description: Option<String>,
    #[serde(default)]
    pub contact_group_domains: Vec<String>,
    #[serde(default)]
    pub contacts_count: u64,
    pub created_on: Option<DateTime<Utc>>,
}

/// Body for `POST /contact_groups`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroupCreate {
    pub contact_group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_group_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contact_group_domains: Vec<String>,
}

/// Body for `PUT /contact_groups/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_group_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_group_domains: Option<Vec<String>>,
}

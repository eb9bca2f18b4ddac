use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdName;

/// Numeric identifier for a contact (end user).
pub type ContactID = i64;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(alias = "userId")]
    pub contact_id: ContactID,
    #[serde(default)]
    pub contact_name: String,
    pub email_id: Option<String>,
    pub contact_phone_no: Option<String>,
    pub contact_mobile_no: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub contact_groups: Vec<IdName>,
    pub created_on: Option<DateTime<Utc>>,
    pub last_activity_on: Option<DateTime<Utc>>,
}

/// Body for `POST /contacts`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreate {
    pub contact_name: String,
    pub email_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_mobile_no: Option<String>,
}

/// Body for `PUT /contacts/{id}`. Only set fields are sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_mobile_no: Option<String>,
}

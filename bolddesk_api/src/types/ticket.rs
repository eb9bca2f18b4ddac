//! Ticket records and the request bodies for creating and updating them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AgentID, BrandID, ContactID, IdName};

/// Numeric identifier for a ticket.
pub type TicketID = i64;

/// Ticket as returned by `GET /tickets` and `GET /tickets/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub ticket_id: TicketID,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<IdName>,
    pub priority: Option<IdName>,
    pub category: Option<IdName>,
    pub brand: Option<IdName>,
    pub requested_by: Option<IdName>,
    pub agent: Option<IdName>,
    pub group: Option<IdName>,
    pub created_on: Option<DateTime<Utc>>,
    pub last_updated_on: Option<DateTime<Utc>>,
    pub closed_on: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Ticket {
    pub fn status_name(&self) -> &str {
        self.status.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    pub fn priority_name(&self) -> &str {
        self.priority.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn agent_name(&self) -> &str {
        self.agent.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }
}

/// Body for `POST /tickets`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreate {
    pub subject: String,
    pub description: String,
    pub brand_id: BrandID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<ContactID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentID>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
}

/// Body for `PUT /tickets/{id}`. Only set fields are sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.status_id.is_none()
            && self.priority_id.is_none()
            && self.category_id.is_none()
            && self.agent_id.is_none()
            && self.group_id.is_none()
    }
}

/// Private note on a ticket.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketNote {
    #[serde(default)]
    pub note_id: i64,
    #[serde(default)]
    pub description: String,
    pub created_by: Option<IdName>,
    pub created_on: Option<DateTime<Utc>>,
}

/// Body for `POST /tickets/{id}/notes`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketNoteCreate {
    pub description: String,
}

/// Public reply or customer message on a ticket.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    #[serde(default)]
    pub message_id: i64,
    #[serde(default)]
    pub description: String,
    pub updated_by: Option<IdName>,
    pub created_on: Option<DateTime<Utc>>,
}

/// Body for `POST /tickets/{id}/updates`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessageCreate {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
}

use serde::{Deserialize, Serialize};

/// Numeric identifier for a ticket or contact field.
pub type FieldID = i64;

/// Field definition from `GET /ticket_fields` or `GET /contact_fields`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketField {
    pub id: FieldID,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub field_type: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_system_field: bool,
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

/// Choice of a dropdown/multi-select field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub id: i64,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_default: bool,
}

/// Body for `POST /ticket_fields/{id}/options`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptionCreate {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

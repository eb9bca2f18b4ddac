use serde::{Deserialize, Serialize};

/// Envelope returned by every list endpoint.
///
/// `count` is only computed when the request set `requiresCounts`; it is
/// 0 otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
    #[serde(default)]
    pub count: u64,
}

impl<T> Default for PagedResponse<T> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            count: 0,
        }
    }
}

/// Response to a create call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to update/delete/action calls.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

/// `{id, name}` reference embedded in other records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdName {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

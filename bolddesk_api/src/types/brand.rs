use serde::{Deserialize, Serialize};

/// Numeric identifier for a brand (portal).
pub type BrandID = i64;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub brand_id: BrandID,
    #[serde(default)]
    pub brand_name: String,
    pub brand_url: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_published: bool,
}

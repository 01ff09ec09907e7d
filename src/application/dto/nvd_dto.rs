use serde::{Deserialize, Serialize};

/// Query string of `GET /api/nvd/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

/// Query string of the version and vulnerability lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CpeQuery {
    pub cpe: Option<String>,
}

/// One selectable version of a product in the NVD dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    pub references: Vec<String>,
}

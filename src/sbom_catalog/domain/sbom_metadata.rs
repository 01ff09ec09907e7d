use super::optional_field::reject_null;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool that produced or edited the SBOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub vendor: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// SPDX-style relationship kinds between two components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    DependsOn,
    Contains,
    DependencyOf,
    DevDependencyOf,
    OptionalDependencyOf,
    ProvidedBy,
    TestDependencyOf,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::DependsOn => "DEPENDS_ON",
            RelationshipType::Contains => "CONTAINS",
            RelationshipType::DependencyOf => "DEPENDENCY_OF",
            RelationshipType::DevDependencyOf => "DEV_DEPENDENCY_OF",
            RelationshipType::OptionalDependencyOf => "OPTIONAL_DEPENDENCY_OF",
            RelationshipType::ProvidedBy => "PROVIDED_BY",
            RelationshipType::TestDependencyOf => "TEST_DEPENDENCY_OF",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge between two components.
///
/// Endpoints are free-text identifiers and are not checked against the
/// component list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_component: String,
    pub target_component: String,
    pub relationship_type: RelationshipType,
}

/// Document-level metadata, exactly one per SBOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomMetadata {
    /// ISO-8601 timestamp
    pub timestamp: String,
    pub tools: Vec<Tool>,
    pub authors: Vec<Author>,
    /// Only meaningful for SPDX-labelled documents
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub document_namespace: Option<String>,
    /// Only meaningful for SPDX-labelled documents
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub license_list_version: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,
}

impl SbomMetadata {
    pub fn new(timestamp: String, tools: Vec<Tool>, authors: Vec<Author>) -> Self {
        Self {
            timestamp,
            tools,
            authors,
            document_namespace: None,
            license_list_version: None,
            relationships: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sbom_metadata_new() {
        let metadata = SbomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            vec![Tool {
                vendor: "acme".to_string(),
                name: "sbom-studio".to_string(),
                version: "0.1.0".to_string(),
            }],
            vec![],
        );

        assert_eq!(metadata.timestamp, "2024-01-01T00:00:00Z");
        assert_eq!(metadata.tools[0].name, "sbom-studio");
        assert!(metadata.relationships.is_none());
    }

    #[test]
    fn test_relationship_type_wire_names() {
        for (name, expected) in [
            ("DEPENDS_ON", RelationshipType::DependsOn),
            ("CONTAINS", RelationshipType::Contains),
            ("DEPENDENCY_OF", RelationshipType::DependencyOf),
            ("DEV_DEPENDENCY_OF", RelationshipType::DevDependencyOf),
            ("OPTIONAL_DEPENDENCY_OF", RelationshipType::OptionalDependencyOf),
            ("PROVIDED_BY", RelationshipType::ProvidedBy),
            ("TEST_DEPENDENCY_OF", RelationshipType::TestDependencyOf),
        ] {
            let parsed: RelationshipType = serde_json::from_value(json!(name)).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.as_str(), name);
        }
        assert!(serde_json::from_value::<RelationshipType>(json!("LINKS_TO")).is_err());
    }

    #[test]
    fn test_metadata_spdx_fields_round_trip() {
        let value = json!({
            "timestamp": "2024-05-01T10:00:00Z",
            "tools": [],
            "authors": [{"name": "Jane", "email": "jane@example.com"}],
            "documentNamespace": "https://example.com/spdx/demo",
            "licenseListVersion": "3.21",
            "relationships": [{
                "sourceComponent": "app",
                "targetComponent": "libfoo",
                "relationshipType": "DEPENDS_ON"
            }]
        });
        let metadata: SbomMetadata = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(metadata.license_list_version.as_deref(), Some("3.21"));
        assert_eq!(serde_json::to_value(&metadata).unwrap(), value);
    }
}

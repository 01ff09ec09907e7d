use super::optional_field::reject_null;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of software component listed in an SBOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Library,
    Framework,
    Application,
    Container,
    OperatingSystem,
    Device,
    File,
}

impl ComponentType {
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Library,
        ComponentType::Framework,
        ComponentType::Application,
        ComponentType::Container,
        ComponentType::OperatingSystem,
        ComponentType::Device,
        ComponentType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Library => "library",
            ComponentType::Framework => "framework",
            ComponentType::Application => "application",
            ComponentType::Container => "container",
            ComponentType::OperatingSystem => "operating-system",
            ComponentType::Device => "device",
            ComponentType::File => "file",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest algorithms accepted for component hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-512")]
    Sha512,
    #[serde(rename = "MD5")]
    Md5,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Md5 => "MD5",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHash {
    pub algorithm: HashAlgorithm,
    pub value: String,
}

/// One entry of an SBOM's component list
///
/// Optional fields that were absent on input are skipped on output, so a
/// stored component serializes back to the shape it was submitted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
    /// Package URL
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    /// CPE 2.3 name
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<ComponentHash>>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
}

impl Component {
    /// Creates a component with only the required fields set
    pub fn new(name: String, version: String, component_type: ComponentType) -> Self {
        Self {
            name,
            version,
            component_type,
            supplier: None,
            author: None,
            description: None,
            licenses: None,
            purl: None,
            cpe: None,
            hashes: None,
            download_location: None,
            homepage: None,
            copyright_text: None,
        }
    }
}

use super::component::Component;
use super::sbom_metadata::SbomMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NewType wrapper for storage-assigned SBOM identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SbomId(u64);

impl SbomId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SbomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SbomId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(SbomId)
    }
}

/// Validated caller-supplied content of a new SBOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertSbom {
    pub name: String,
    pub version: String,
    pub format: String,
    pub components: Vec<Component>,
    pub metadata: SbomMetadata,
}

/// Validated partial update; every present field replaces the stored one wholesale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbomPatch {
    pub name: Option<String>,
    pub version: Option<String>,
    pub format: Option<String>,
    pub components: Option<Vec<Component>>,
    pub metadata: Option<SbomMetadata>,
}

impl SbomPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.version.is_none()
            && self.format.is_none()
            && self.components.is_none()
            && self.metadata.is_none()
    }
}

/// Persisted SBOM record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sbom {
    pub id: SbomId,
    pub name: String,
    pub version: String,
    /// Free-text label such as "CycloneDX" or "SPDX"
    pub format: String,
    pub components: Vec<Component>,
    pub metadata: SbomMetadata,
}

impl Sbom {
    pub fn from_insert(id: SbomId, insert: InsertSbom) -> Self {
        Self {
            id,
            name: insert.name,
            version: insert.version,
            format: insert.format,
            components: insert.components,
            metadata: insert.metadata,
        }
    }

    /// Shallow merge: arrays and the metadata block are replaced, never merged
    pub fn apply_patch(&mut self, patch: SbomPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(version) = patch.version {
            self.version = version;
        }
        if let Some(format) = patch.format {
            self.format = format;
        }
        if let Some(components) = patch.components {
            self.components = components;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
    }
}

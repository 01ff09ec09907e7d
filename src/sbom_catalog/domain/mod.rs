pub mod component;
pub mod component_suggestion;
pub mod cpe;
pub mod cpe_product;
pub mod optional_field;
pub mod sbom;
pub mod sbom_metadata;
pub mod vulnerability;

pub use component::{Component, ComponentHash, ComponentType, HashAlgorithm};
pub use component_suggestion::ComponentSuggestion;
pub use cpe::CpeName;
pub use cpe_product::CpeProduct;
pub use sbom::{InsertSbom, Sbom, SbomId, SbomPatch};
pub use sbom_metadata::{Author, Relationship, RelationshipType, SbomMetadata, Tool};
pub use vulnerability::{CvssScore, Severity, Vulnerability};

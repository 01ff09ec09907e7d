/// SBOM catalog domain: records, components, NVD value objects and the rules around them
pub mod domain;
pub mod policies;
pub mod services;

pub mod sbom_validator;

pub use sbom_validator::SbomValidator;

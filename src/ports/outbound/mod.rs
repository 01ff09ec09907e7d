/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with storage, the NVD service and the settings file.
pub mod api_key_store;
pub mod nvd_repository;
pub mod sbom_repository;

pub use api_key_store::ApiKeyStore;
pub use nvd_repository::NvdRepository;
pub use sbom_repository::SbomRepository;

/// Data Transfer Objects for application layer
///
/// DTOs carry request parameters and response bodies between the HTTP adapter
/// and the use cases, keeping wire shapes out of the domain layer.
mod nvd_dto;
mod settings_dto;

pub use nvd_dto::{CpeQuery, SearchQuery, VersionInfo};
pub use settings_dto::{HealthResponse, NvdKeyRequest, NvdKeyResponse, SettingsResponse};

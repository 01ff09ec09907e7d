/// Use cases module containing application business logic orchestration
mod lookup_nvd;
mod manage_sboms;
mod manage_settings;

pub use lookup_nvd::LookupNvdUseCase;
pub use manage_sboms::ManageSbomsUseCase;
pub use manage_settings::{KeySource, ManageSettingsUseCase};

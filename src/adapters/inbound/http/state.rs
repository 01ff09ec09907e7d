use crate::application::use_cases::{LookupNvdUseCase, ManageSbomsUseCase, ManageSettingsUseCase};
use std::sync::Arc;

/// Shared handler state, assembled once by the composition root
#[derive(Clone)]
pub struct AppState {
    pub sboms: Arc<ManageSbomsUseCase>,
    pub nvd: Arc<LookupNvdUseCase>,
    pub settings: Arc<ManageSettingsUseCase>,
}

impl AppState {
    pub fn new(
        sboms: ManageSbomsUseCase,
        nvd: LookupNvdUseCase,
        settings: ManageSettingsUseCase,
    ) -> Self {
        Self {
            sboms: Arc::new(sboms),
            nvd: Arc::new(nvd),
            settings: Arc::new(settings),
        }
    }
}

//! sbom-studio - SBOM editing service
//!
//! This library provides an HTTP API for assembling, editing and browsing Software Bill of
//! Materials documents, with optional component lookup against the National Vulnerability
//! Database (NVD). It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! - **Domain Layer** (`sbom_catalog`): SBOM model, validation and lookup policies
//! - **Application Layer** (`application`): Use cases, DTOs and runtime settings
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP API, in-memory storage, NVD client, env-file store
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_studio::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let nvd: Arc<dyn NvdRepository> = Arc::new(NvdClient::new()?);
//! let api_key = NvdApiKey::default();
//!
//! let state = AppState::new(
//!     ManageSbomsUseCase::new(Arc::new(InMemorySbomRepository::new())),
//!     LookupNvdUseCase::new(nvd.clone(), api_key.clone()),
//!     ManageSettingsUseCase::new(
//!         Arc::new(EnvFileApiKeyStore::new(".env".into())),
//!         nvd,
//!         api_key,
//!     ),
//! );
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, build_router(state)).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_catalog;
pub mod server;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::http::{build_router, ApiError, AppState};
    pub use crate::adapters::outbound::filesystem::EnvFileApiKeyStore;
    pub use crate::adapters::outbound::memory::InMemorySbomRepository;
    pub use crate::adapters::outbound::network::NvdClient;
    pub use crate::application::dto::{
        NvdKeyRequest, NvdKeyResponse, SettingsResponse, VersionInfo,
    };
    pub use crate::application::settings::NvdApiKey;
    pub use crate::application::use_cases::{
        LookupNvdUseCase, ManageSbomsUseCase, ManageSettingsUseCase,
    };
    pub use crate::ports::outbound::{ApiKeyStore, NvdRepository, SbomRepository};
    pub use crate::sbom_catalog::domain::{
        Component, ComponentSuggestion, ComponentType, CpeName, InsertSbom, Sbom, SbomId,
        SbomMetadata, SbomPatch, Severity, Vulnerability,
    };
    pub use crate::sbom_catalog::services::SbomValidator;
    pub use crate::shared::error::SbomError;
    pub use crate::shared::Result;
}

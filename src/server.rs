//! Composition root: wires adapters into use cases and serves the router.

use crate::adapters::inbound::env_file_watcher::EnvFileWatcher;
use crate::adapters::inbound::http::{build_router, AppState};
use crate::adapters::outbound::filesystem::{EnvFileApiKeyStore, NVD_API_KEY_VAR};
use crate::adapters::outbound::memory::InMemorySbomRepository;
use crate::adapters::outbound::network::NvdClient;
use crate::application::settings::NvdApiKey;
use crate::application::use_cases::{
    KeySource, LookupNvdUseCase, ManageSbomsUseCase, ManageSettingsUseCase,
};
use crate::config::ServerConfig;
use crate::ports::outbound::{ApiKeyStore, NvdRepository, SbomRepository};
use crate::shared::Result;
use anyhow::Context;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Builds the handler state from resolved settings and seeds the NVD API key
pub fn compose_state(config: &ServerConfig) -> Result<AppState> {
    let repository: Arc<dyn SbomRepository> = Arc::new(InMemorySbomRepository::new());
    let nvd: Arc<dyn NvdRepository> =
        Arc::new(NvdClient::with_config(&config.nvd_base_url, config.nvd_timeout)?);
    let key_store: Arc<dyn ApiKeyStore> =
        Arc::new(EnvFileApiKeyStore::new(config.env_file.clone()));

    let api_key = NvdApiKey::default();
    let settings = ManageSettingsUseCase::new(key_store, nvd.clone(), api_key.clone());

    match settings.load_initial_key(std::env::var(NVD_API_KEY_VAR).ok())? {
        Some(KeySource::Environment) => info!("NVD API key loaded from the environment"),
        Some(KeySource::EnvFile) => info!(
            path = %config.env_file.display(),
            "NVD API key loaded from environment file"
        ),
        None => warn!("no NVD API key configured; component search falls back to manual entry"),
    }

    Ok(AppState::new(
        ManageSbomsUseCase::new(repository),
        LookupNvdUseCase::new(nvd, api_key),
        settings,
    ))
}

/// Binds `host:port`, moving on to the following ports while the address is in use
pub async fn bind_with_fallback(host: &str, port: u16, attempts: u16) -> Result<TcpListener> {
    for offset in 0..attempts.max(1) {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };

        match TcpListener::bind((host, candidate)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                warn!(port = candidate, "port in use, trying the next one");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to bind {}:{}", host, candidate));
            }
        }
    }

    anyhow::bail!(
        "No free port found in {}..{} on {}",
        port,
        port.saturating_add(attempts),
        host
    )
}

/// Serves the API until SIGINT or SIGTERM
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = compose_state(&config)?;

    // Held for the server's lifetime; a missing directory only disables hot reload
    let _env_watcher = match EnvFileWatcher::spawn(&config.env_file, state.settings.clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("environment file changes will not be picked up: {:#}", e);
            None
        }
    };
    let app = build_router(state);

    let listener = bind_with_fallback(&config.host, config.port, config.port_attempts).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("sbom-studio stopped");
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}

use crate::application::use_cases::ManageSettingsUseCase;
use crate::shared::Result;
use anyhow::Context;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Reloads the NVD API key whenever the environment file changes on disk
///
/// The parent directory is watched rather than the file itself: both editors and the
/// settings endpoint replace the file by renaming a temporary one over it, which would
/// orphan a watch on the old inode. Dropping the watcher stops the reload task.
pub struct EnvFileWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl EnvFileWatcher {
    /// Starts watching `path`; must be called from within a tokio runtime
    pub fn spawn(path: &Path, settings: Arc<ManageSettingsUseCase>) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(ToOwned::to_owned)
            .with_context(|| {
                format!("Environment file path has no file name: {}", path.display())
            })?;
        let directory = watched_directory(path);

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
            // The receiver only goes away once the watcher is being dropped
            let _ = tx.send(event);
        })
        .context("Failed to create file watcher")?;
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", directory.display()))?;

        let task = tokio::spawn(reload_on_change(rx, file_name, settings));
        tracing::debug!(path = %path.display(), "watching environment file");

        Ok(Self {
            _watcher: watcher,
            task,
        })
    }
}

impl Drop for EnvFileWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn watched_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Creations, writes and renames that name the environment file
fn touches_file(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

async fn reload_on_change(
    mut rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    file_name: OsString,
    settings: Arc<ManageSettingsUseCase>,
) {
    while let Some(event) = rx.recv().await {
        match event {
            Ok(event) if touches_file(&event, &file_name) => match settings.reload_key() {
                Ok(true) => tracing::info!("NVD API key reloaded from environment file"),
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "failed to reload environment file"),
            },
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "environment file watch error"),
        }
    }
}

use crate::ports::outbound::ApiKeyStore;
use crate::shared::error::SbomError;
use crate::shared::security::{
    validate_file_size, validate_not_symlink, validate_single_line, MAX_ENV_FILE_SIZE,
};
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Variable name under which the NVD API key is stored
pub const NVD_API_KEY_VAR: &str = "NVD_API_KEY";

/// EnvFileApiKeyStore adapter keeping the NVD API key in a dotenv-style file
///
/// Updates run as one critical section: read the current file, patch or append the
/// `NVD_API_KEY=` line, write the result to a temporary file in the same directory and
/// rename it over the original. Other lines, and their line endings, are kept as they were.
pub struct EnvFileApiKeyStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl EnvFileApiKeyStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn env_error(&self, details: impl Into<String>) -> SbomError {
        SbomError::EnvFileError {
            path: self.path.clone(),
            details: details.into(),
        }
    }

    /// Reads the file, treating a missing file as empty
    fn read_existing(&self) -> Result<String> {
        validate_not_symlink(&self.path, "read")?;

        match fs::metadata(&self.path) {
            Ok(metadata) => validate_file_size(metadata.len(), &self.path, MAX_ENV_FILE_SIZE)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => return Err(self.env_error(e.to_string()).into()),
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| self.env_error(e.to_string()))?;
        Ok(content)
    }

    fn write_atomically(&self, content: &str) -> Result<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp_file = NamedTempFile::new_in(&directory)
            .map_err(|e| self.env_error(format!("failed to create temporary file: {}", e)))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| self.env_error(e.to_string()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.env_error(format!("failed to replace file: {}", e.error)))?;
        Ok(())
    }
}

impl ApiKeyStore for EnvFileApiKeyStore {
    fn persist(&self, api_key: &str) -> Result<()> {
        validate_single_line(api_key, "NVD API key")?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| self.env_error("environment file lock poisoned"))?;

        validate_not_symlink(&self.path, "write")?;
        let current = self.read_existing()?;
        let updated = upsert_env_line(&current, NVD_API_KEY_VAR, api_key);
        self.write_atomically(&updated)?;

        tracing::info!(path = %self.path.display(), "stored NVD API key");
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| self.env_error("environment file lock poisoned"))?;

        let content = self.read_existing()?;
        Ok(find_env_value(&content, NVD_API_KEY_VAR).filter(|v| !v.is_empty()))
    }
}

/// Returns the variable name assigned on a line, if the line is an assignment
fn assigned_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, _) = trimmed.split_once('=')?;
    Some(key.trim())
}

/// Looks up the last assignment of `key`, stripping one pair of surrounding quotes
pub fn find_env_value(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .filter(|line| assigned_key(line) == Some(key))
        .filter_map(|line| line.split_once('=').map(|(_, value)| value.trim()))
        .map(|value| {
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            unquoted.to_string()
        })
        .last()
}

/// Sets `key=value` in dotenv content
///
/// The first assignment of `key` is replaced in place and later duplicates are dropped;
/// when there is none the line is appended. Every other line is copied verbatim, line
/// endings included, and added line breaks follow the file's CRLF or LF convention.
pub fn upsert_env_line(content: &str, key: &str, value: &str) -> String {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut output = String::with_capacity(content.len() + key.len() + value.len() + 3);
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        if assigned_key(body) != Some(key) {
            output.push_str(line);
            continue;
        }
        if !replaced {
            output.push_str(key);
            output.push('=');
            output.push_str(value);
            output.push_str(&line[body.len()..]);
            replaced = true;
        }
    }

    if !output.is_empty() && !output.ends_with('\n') {
        output.push_str(newline);
    }
    if !replaced {
        output.push_str(key);
        output.push('=');
        output.push_str(value);
        output.push_str(newline);
    }
    output
}

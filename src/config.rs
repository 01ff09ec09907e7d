//! Configuration for the sbom-studio server.
//!
//! Settings are layered: built-in defaults, then an optional `sbom-studio.config.yml`
//! file, then environment variables, then command-line flags.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::network::NvdClient;
use crate::cli::Args;
use crate::shared::error::SbomError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-studio.config.yml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PORT_ATTEMPTS: u16 = 10;
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_NVD_BASE_URL: &str = NvdClient::DEFAULT_BASE_URL;
pub const DEFAULT_NVD_TIMEOUT_SECONDS: u64 = NvdClient::DEFAULT_TIMEOUT_SECONDS;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub port_attempts: Option<u16>,
    pub env_file: Option<PathBuf>,
    pub nvd_base_url: Option<String>,
    pub nvd_timeout_seconds: Option<u64>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// One warning per unknown field, sorted so output is stable.
    pub fn unknown_field_warnings(&self) -> Vec<String> {
        let mut keys: Vec<&String> = self.unknown_fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| format!("Unknown config field '{}' will be ignored", key))
            .collect()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn config_error(details: impl Into<String>, hint: impl Into<String>) -> anyhow::Error {
    SbomError::ConfigError {
        details: details.into(),
        hint: hint.into(),
    }
    .into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(host) = &config.host {
        if host.trim().is_empty() {
            return Err(config_error(
                "host must not be empty",
                "Use an address such as \"0.0.0.0\" or \"127.0.0.1\".",
            ));
        }
    }
    if config.port_attempts == Some(0) {
        return Err(config_error(
            "port_attempts must be at least 1",
            "Set port_attempts: 1 to disable trying further ports.",
        ));
    }
    if config.nvd_timeout_seconds == Some(0) {
        return Err(config_error(
            "nvd_timeout_seconds must be at least 1",
            "The NVD API can be slow; 30 seconds is a reasonable value.",
        ));
    }
    if let Some(url) = &config.nvd_base_url {
        validate_base_url(url)?;
    }
    Ok(())
}

fn validate_base_url(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(config_error(
            format!("NVD base URL must start with http:// or https://, got '{}'", url),
            format!("The public service lives at {}.", DEFAULT_NVD_BASE_URL),
        ));
    }
    Ok(())
}

/// Values taken from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
    pub env_file: Option<String>,
    pub nvd_base_url: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds overrides from any lookup function; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            host: get("HOST"),
            port: get("PORT"),
            env_file: get("SBOM_STUDIO_ENV_FILE"),
            nvd_base_url: get("NVD_BASE_URL"),
            log_level: get("SBOM_STUDIO_LOG"),
        }
    }
}

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub port_attempts: u16,
    pub env_file: PathBuf,
    pub nvd_base_url: String,
    pub nvd_timeout: Duration,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            port_attempts: DEFAULT_PORT_ATTEMPTS,
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            nvd_base_url: DEFAULT_NVD_BASE_URL.to_string(),
            nvd_timeout: Duration::from_secs(DEFAULT_NVD_TIMEOUT_SECONDS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Merges the layers; later layers win field by field.
    pub fn resolve(file: Option<ConfigFile>, env: &EnvOverrides, args: &Args) -> Result<Self> {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(host) = file.host {
                config.host = host;
            }
            if let Some(port) = file.port {
                config.port = port;
            }
            if let Some(attempts) = file.port_attempts {
                config.port_attempts = attempts;
            }
            if let Some(env_file) = file.env_file {
                config.env_file = env_file;
            }
            if let Some(url) = file.nvd_base_url {
                config.nvd_base_url = url;
            }
            if let Some(seconds) = file.nvd_timeout_seconds {
                config.nvd_timeout = Duration::from_secs(seconds);
            }
            if let Some(level) = file.log_level {
                config.log_level = level;
            }
            if let Some(json) = file.log_json {
                config.log_json = json;
            }
        }

        if let Some(host) = &env.host {
            config.host = host.clone();
        }
        if let Some(port) = &env.port {
            config.port = port.trim().parse().map_err(|_| {
                config_error(
                    format!("PORT must be a number between 0 and 65535, got '{}'", port),
                    "Unset PORT or pass --port explicitly.",
                )
            })?;
        }
        if let Some(env_file) = &env.env_file {
            config.env_file = PathBuf::from(env_file);
        }
        if let Some(url) = &env.nvd_base_url {
            validate_base_url(url)?;
            config.nvd_base_url = url.clone();
        }
        if let Some(level) = &env.log_level {
            config.log_level = level.clone();
        }

        if let Some(host) = &args.host {
            config.host = host.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(env_file) = &args.env_file {
            config.env_file = env_file.clone();
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        if args.log_json {
            config.log_json = true;
        }

        Ok(config)
    }
}

/// Loads the config file named on the command line, or discovers one in `dir`.
pub fn load_for_args(args: &Args, dir: &Path) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => load_config_from_path(path).map(Some),
        None => discover_config(dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> EnvOverrides {
        let pairs: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvOverrides::from_lookup(|key| pairs.get(key).cloned())
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
host: 127.0.0.1
port: 8080
port_attempts: 3
env_file: /srv/sbom-studio/.env
nvd_base_url: http://localhost:9000/rest/json
nvd_timeout_seconds: 5
log_level: debug
log_json: true
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.port_attempts, Some(3));
        assert_eq!(
            config.env_file,
            Some(PathBuf::from("/srv/sbom-studio/.env"))
        );
        assert_eq!(
            config.nvd_base_url.as_deref(),
            Some("http://localhost:9000/rest/json")
        );
        assert_eq!(config.nvd_timeout_seconds, Some(5));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_json, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "port: 6000\n").unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert_eq!(config.unwrap().port, Some(6000));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_port_attempts_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "port_attempts: 0\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(format!("{}", err).contains("port_attempts must be at least 1"));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "nvd_base_url: ftp://example.com\n").unwrap();

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
port: 5001
verbose: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert_eq!(
            config.unknown_field_warnings(),
            vec![
                "Unknown config field 'another_unknown' will be ignored".to_string(),
                "Unknown config field 'verbose' will be ignored".to_string(),
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::resolve(None, &EnvOverrides::default(), &Args::default())
            .unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.port_attempts, 10);
        assert_eq!(config.env_file, PathBuf::from(".env"));
        assert_eq!(config.nvd_base_url, NvdClient::DEFAULT_BASE_URL);
        assert_eq!(config.nvd_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let file = ConfigFile {
            host: Some("10.0.0.1".to_string()),
            port: Some(6000),
            log_level: Some("warn".to_string()),
            env_file: Some(PathBuf::from("file.env")),
            ..Default::default()
        };
        let env = env_from(&[("PORT", "7000"), ("SBOM_STUDIO_LOG", "debug")]);
        let args = Args {
            port: Some(8000),
            ..Default::default()
        };

        let config = ServerConfig::resolve(Some(file), &env, &args).unwrap();
        assert_eq!(config.host, "10.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.env_file, PathBuf::from("file.env"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            port: Some(6000),
            ..Default::default()
        };
        let env = env_from(&[
            ("PORT", "7000"),
            ("HOST", "127.0.0.1"),
            ("SBOM_STUDIO_ENV_FILE", "/run/secrets/.env"),
            ("NVD_BASE_URL", "http://127.0.0.1:9999"),
        ]);

        let config = ServerConfig::resolve(Some(file), &env, &Args::default()).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.env_file, PathBuf::from("/run/secrets/.env"));
        assert_eq!(config.nvd_base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_invalid_env_port() {
        let env = env_from(&[("PORT", "http")]);
        let err = ServerConfig::resolve(None, &env, &Args::default()).unwrap_err();
        assert!(format!("{}", err).contains("PORT must be a number"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let env = env_from(&[("PORT", ""), ("HOST", "  ")]);
        let config = ServerConfig::resolve(None, &env, &Args::default()).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_load_for_args_explicit_missing() {
        let dir = TempDir::new().unwrap();
        let args = Args {
            config: Some(dir.path().join("missing.yml")),
            ..Default::default()
        };
        assert!(load_for_args(&args, dir.path()).is_err());
    }
}

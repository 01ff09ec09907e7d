/// Filesystem adapters for settings persistence
mod env_file_store;

pub use env_file_store::{find_env_value, upsert_env_line, EnvFileApiKeyStore, NVD_API_KEY_VAR};

/// Inbound adapters (driving side) - entry points into the application
pub mod env_file_watcher;
pub mod http;

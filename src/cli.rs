use clap::Parser;
use std::path::PathBuf;

/// Serve the SBOM editing API
#[derive(Parser, Debug, Default)]
#[command(name = "sbom-studio")]
#[command(version)]
#[command(about = "SBOM editing service with NVD-assisted component lookup", long_about = None)]
pub struct Args {
    /// Path to a YAML config file (defaults to ./sbom-studio.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind; the next ports are tried when it is taken
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Environment file holding NVD_API_KEY
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "sbom_studio=debug" (RUST_LOG takes precedence)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

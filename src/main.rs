use clap::error::ErrorKind;
use clap::Parser;
use sbom_studio::cli::Args;
use sbom_studio::config::{self, EnvOverrides, ServerConfig};
use sbom_studio::server;
use sbom_studio::shared::error::ExitCode;
use sbom_studio::shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::InvalidArguments,
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config_file = config::load_for_args(&args, &current_dir)?;
    let warnings = config_file
        .as_ref()
        .map(|file| file.unknown_field_warnings())
        .unwrap_or_default();

    let server_config = ServerConfig::resolve(config_file, &EnvOverrides::from_env(), &args)?;
    init_tracing(&server_config);

    for warning in warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env_file = %server_config.env_file.display(),
        nvd_base_url = %server_config.nvd_base_url,
        "sbom-studio starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(server_config))
}

/// RUST_LOG wins; otherwise the configured level, falling back to "info" if it does not parse
fn init_tracing(config: &ServerConfig) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: log level '{}' is not a valid tracing filter ({}); falling back to 'info'",
                    config.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

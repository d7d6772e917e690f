use clap::Parser;
use ermask::cli::commands::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use ermask::cli::{Cli, Commands};
use ermask::config::{load_config_or_default, ErmaskConfig};
use ermask::log_error_with_context;
use ermask::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // validate-config and init report configuration problems themselves
    let config = if cli.command.needs_config() {
        match load_config_or_default(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(EXIT_CONFIG_ERROR);
            }
        }
    } else {
        ErmaskConfig::default()
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG_ERROR);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "ermask - reversible PII masking"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &ErmaskConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Mask(args) => args.execute(config).await,
        Commands::Unmask(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref()).await,
        Commands::Init(args) => args.execute().await,
    }
}

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use mediakit_client::MediaService;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration (file, then MEDIAKIT_* overrides)
    let config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // 2. Validate configuration (fail fast on misconfigurations)
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    // 3. Initialize logging
    logging::init_logging(&config.logging)?;
    debug!(
        endpoint = %config.service.endpoint,
        api_version = %config.service.api_version,
        authenticated = config.service.access_token.is_some(),
        "Configuration loaded"
    );

    // 4. Run the command
    let service = MediaService::create(&config.service)?;
    commands::run(&service, cli.command).await
}

use crate::cli::Cli;
use crate::commands::execute;
use crate::error::TrelloCliError;
use crate::logger::{DEFAULT_LOG_LEVEL, initialize as LoggerInitialize};

use std::fs::create_dir_all;
use std::path::PathBuf;

use log::{LevelFilter, info};
use trello_core::{ClientConfig, ResilientApiClient};

const LOG_DIR_NAME: &str = "trello";

/// Log directory from the flag, else `<data_local_dir>/trello`.
pub fn resolve_log_dir(cli: &Cli) -> Result<PathBuf, TrelloCliError> {
    if let Some(dir) = &cli.log_dir {
        return Ok(dir.clone());
    }

    dirs::data_local_dir()
        .map(|dir| dir.join(LOG_DIR_NAME))
        .ok_or_else(|| TrelloCliError::cli("Could not determine a log directory; pass --log-dir"))
}

pub async fn run(cli: Cli) -> Result<(), TrelloCliError> {
    let log_dir = resolve_log_dir(&cli)?;
    create_dir_all(&log_dir)
        .map_err(|e| TrelloCliError::cli(format!("Failed to create log directory: {e}")))?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        DEFAULT_LOG_LEVEL
    };
    LoggerInitialize(&log_dir, level)?;
    info!("Log directory: {}", log_dir.display());

    let config = ClientConfig::from_env()?;
    let client = ResilientApiClient::new(config)?;

    let result = execute(&cli.command, &client).await;
    client.close();

    let value = result?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

mod app;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let store = match engine::RecordStore::load(&config.data_file) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("failed to load {}: {err}", config.data_file.display());
            eprintln!("Cannot load {}: {err}", config.data_file.display());
            return Err(err.into());
        }
    };

    let mut app = app::App::new(config, store)?;
    app.run()
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let filter = EnvFilter::try_new(format!(
        "spendbook={level},engine={level}",
        level = config.log_level
    ))
    .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing::info!("starting with data file {}", config.data_file.display());
    Ok(())
}

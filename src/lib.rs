pub mod cli;
pub mod core;
pub mod providers;
pub mod query;
pub mod server;
pub mod store;

use crate::cli::OutputFormat;
use crate::core::config::AppConfig;
use crate::core::filter::{ListingFilter, QuotesFilter};
use crate::providers::{CsvRowSource, RandomMetricSource};
use crate::store::Store;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve,
    Map {
        filter: ListingFilter,
        format: OutputFormat,
    },
    Quotes {
        filter: QuotesFilter,
        format: OutputFormat,
    },
}

/// Builds a store over the configured CSV files with random market metrics.
pub fn load_store(config: &AppConfig) -> Result<Store> {
    let map_path = config.map_path()?;
    let fiat_path = config.fiat_path()?;
    info!(
        map = %map_path.display(),
        fiat = %fiat_path.display(),
        "Loading reference data"
    );

    let store = Store::new(Arc::new(RandomMetricSource::new()));
    store
        .build(&CsvRowSource::new(map_path, fiat_path))
        .context("Failed to prepare market data")?;
    Ok(store)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = load_store(&config)?;

    match command {
        AppCommand::Serve => server::serve(&config, Arc::new(store)).await,
        AppCommand::Map { filter, format } => cli::map::run(&store, &filter, format),
        AppCommand::Quotes { filter, format } => cli::quotes::run(&store, &filter, format),
    }
}

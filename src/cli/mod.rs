//! CLI module for Query Router
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `build-index`: load or rebuild the document index
//! - `ask`: answer one query and print the response as JSON

pub mod ask;
pub mod index;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Query Router - routes workplace questions to specialized handlers
#[derive(Parser)]
#[command(name = "query-router")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Build the document index, or load it when already persisted
    BuildIndex(index::BuildIndexArgs),

    /// Answer a single query
    Ask(ask::AskArgs),
}

/// Load `.env`, the layered configuration and logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    logging::init_logging(&config.logging);

    Ok(config)
}

pub mod cli;
pub mod config;
pub mod evaluate;
pub mod pattern;
pub mod report;
pub mod scan;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheet_audit", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(args) => scan::execute(&args),
        Commands::Config(args) => handle_config(&args),
    }
}

fn handle_config(args: &cli::ConfigArgs) -> Result<()> {
    let config = config::AuditConfig::default();
    config
        .save(&args.output)
        .with_context(|| format!("Writing configuration template to {:?}", args.output))?;
    info!("Configuration template written to {:?}", args.output);
    Ok(())
}

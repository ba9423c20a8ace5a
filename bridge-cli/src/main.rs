//! Antigravity Bridge CLI
//!
//! Drives the translation pipeline from JSON files without touching the
//! network: chat requests in, v1internal envelopes out.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use antigravity_bridge_core::modules::{config as core_config, logger};
use antigravity_bridge_types::SessionToken;

mod cli;
mod commands;

use cli::{Cli, Commands, SessionArgs};

fn main() -> Result<()> {
    let Cli { command, config: config_path, log_level } = Cli::parse();
    logger::init_logger(&log_level);

    let output = match command {
        Commands::Convert { input, session, responses } => {
            let config = core_config::load_config_or_default(config_path.as_deref())?;
            let responses = read_all(&responses)?;
            commands::convert(&config, commands::read_json(&input)?, &token(session), &responses)?
        },
        Commands::Wrap { input, model, session } => {
            let config = core_config::load_config_or_default(config_path.as_deref())?;
            commands::wrap(&config, &commands::read_json(&input)?, &model, &token(session))?
        },
        Commands::Sanitize { input } => commands::sanitize(&commands::read_json(&input)?),
        Commands::Harvest { inputs } => commands::harvest(&read_all(&inputs)?),
        Commands::InitConfig { force } => {
            let path = config_path
                .or_else(core_config::default_config_path)
                .ok_or_else(|| anyhow::anyhow!("No config directory available, pass --config"))?;
            if !commands::init_config(&path, force)? {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            println!("Config written to {}", path.display());
            return Ok(());
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_all(paths: &[PathBuf]) -> Result<Vec<Value>> {
    paths.iter().map(|p| commands::read_json(p)).collect()
}

fn token(args: SessionArgs) -> SessionToken {
    SessionToken::new(args.project, args.session)
}

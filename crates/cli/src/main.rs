//! wordrank command-line front end.
//!
//! Connects to Redis once at startup, runs a single subcommand and exits,
//! dropping the connection on the way out.

mod cli;
mod commands;
mod config;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use wordrank_core::Autocomplete;
use wordrank_redis::RedisStore;

use crate::cli::{Cli, Command};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	logging::setup_tracing(cli.verbose);

	let mut config = Config::load(cli.config.as_deref())?;
	config.apply_env(|var| std::env::var(var).ok())?;
	cli.apply_overrides(&mut config);

	if cli.command == Command::Config {
		print!("{}", config.to_toml()?);
		return Ok(());
	}

	let store = RedisStore::connect(&config.store)
		.await
		.with_context(|| format!("connecting to {}", config.store.url()))?;
	let ac = Autocomplete::new(Arc::new(store), config.index)?;

	let mut stdout = std::io::stdout();
	commands::run(&ac, cli.command, &mut stdout).await
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "wordrank")]
#[command(about = "Popularity-ranked word completion backed by Redis")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to $XDG_CONFIG_HOME/wordrank/config.toml)
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Redis host, overriding config and environment
	#[arg(long, global = true)]
	pub host: Option<String>,

	/// Redis port, overriding config and environment
	#[arg(long, global = true)]
	pub port: Option<u16>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Register words so they can be suggested
	Register {
		/// Words to register, in order
		#[arg(required = true)]
		words: Vec<String>,
	},
	/// Record one use of a registered word
	Bump {
		/// Word to bump
		word: String,
	},
	/// Suggest completions for a prefix
	Suggest {
		/// Prefix typed so far
		prefix: String,
		/// Print a JSON array instead of tab-separated lines
		#[arg(long)]
		json: bool,
	},
	/// Print the effective configuration
	Config,
}

impl Cli {
	/// Applies `--host` / `--port` on top of file and environment settings.
	pub fn apply_overrides(&self, config: &mut Config) {
		if let Some(host) = &self.host {
			config.store.host = host.clone();
		}
		if let Some(port) = self.port {
			config.store.port = port;
		}
	}
}

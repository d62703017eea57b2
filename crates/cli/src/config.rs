//! Configuration loading.
//!
//! Settings come from, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `config.toml` (`--config PATH`, or `$XDG_CONFIG_HOME/wordrank/config.toml`)
//! 3. `WORDRANK_REDIS_HOST` / `WORDRANK_REDIS_PORT`
//! 4. `--host` / `--port`
//!
//! ```toml
//! [store]
//! host = "localhost"
//! port = 6379
//!
//! [index]
//! namespace = "autocomplete"
//! delimiter = "*"
//! max_length = 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wordrank_core::{IndexConfig, IndexConfigError};
use wordrank_redis::StoreConfig;

pub const HOST_ENV: &str = "WORDRANK_REDIS_HOST";
pub const PORT_ENV: &str = "WORDRANK_REDIS_PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	#[error("failed to parse {path}: {error}")]
	Parse { path: PathBuf, error: toml::de::Error },

	#[error("invalid {var}={value:?}: expected a port number")]
	InvalidEnv { var: &'static str, value: String },

	#[error(transparent)]
	Index(#[from] IndexConfigError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Effective settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub store: StoreConfig,
	pub index: IndexConfig,
}

/// `$XDG_CONFIG_HOME/wordrank/config.toml`, if a config dir is known.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("wordrank").join("config.toml"))
}

impl Config {
	/// Loads `path`, or the default location when `path` is `None`.
	///
	/// An explicit path must exist; a missing default file yields defaults.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::from_file(path),
			None => match default_path() {
				Some(path) if path.is_file() => Self::from_file(&path),
				_ => Ok(Self::default()),
			},
		}
	}

	pub fn from_file(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config: Self = toml::from_str(&text).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})?;
		config.index.validate()?;
		tracing::debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}

	/// Applies store overrides found through `lookup` (normally the process env).
	pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
		if let Some(host) = lookup(HOST_ENV).filter(|h| !h.trim().is_empty()) {
			self.store.host = host;
		}
		if let Some(value) = lookup(PORT_ENV) {
			self.store.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv { var: PORT_ENV, value })?;
		}
		Ok(())
	}

	/// Renders the effective configuration.
	pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
		toml::to_string(self)
	}
}

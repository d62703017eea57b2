use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

/// Directory for per-process log files; stderr is used when unset.
pub const LOG_DIR_ENV: &str = "WORDRANK_LOG_DIR";

fn filter(verbose: bool) -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("wordrank=debug,info")
		} else {
			EnvFilter::new("wordrank=info,warn")
		}
	})
}

/// Installs the global subscriber. Stdout stays reserved for command output.
pub fn setup_tracing(verbose: bool) {
	if let Some(log_dir) = std::env::var(LOG_DIR_ENV).ok().map(PathBuf::from) {
		if std::fs::create_dir_all(&log_dir).is_ok() {
			let log_path = log_dir.join(format!("wordrank.{}.log", std::process::id()));

			if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
				let file_layer = tracing_subscriber::fmt::layer()
					.with_writer(file)
					.with_ansi(false)
					.with_span_events(FmtSpan::CLOSE)
					.with_target(true);

				tracing_subscriber::registry().with(filter(verbose)).with(file_layer).init();

				tracing::info!(path = ?log_path, "tracing initialized");
				return;
			}
		}
	}

	tracing_subscriber::fmt().with_env_filter(filter(verbose)).with_writer(std::io::stderr).init();
}

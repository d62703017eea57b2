use std::io::Write;

use anyhow::Context;
use wordrank_core::{Autocomplete, SortedSetStore};

use crate::cli::Command;

/// Executes one store-backed subcommand, writing results to `out`.
pub async fn run<S, W>(ac: &Autocomplete<S>, command: Command, out: &mut W) -> anyhow::Result<()>
where
	S: SortedSetStore + ?Sized,
	W: Write,
{
	match command {
		Command::Register { words } => {
			for word in &words {
				ac.register(word).await.with_context(|| format!("registering {word:?}"))?;
			}
			tracing::info!(count = words.len(), "registered");
		}
		Command::Bump { word } => match ac.bump(&word).await.with_context(|| format!("bumping {word:?}"))? {
			Some(score) => writeln!(out, "{score}")?,
			None => {
				tracing::warn!(word = word.trim(), "bump ignored: word is not registered");
				writeln!(out, "not registered: {}", word.trim())?;
			}
		},
		Command::Suggest { prefix, json } => {
			let hits = ac.suggest(&prefix).await.with_context(|| format!("suggesting {prefix:?}"))?;
			if json {
				serde_json::to_writer(&mut *out, &hits)?;
				writeln!(out)?;
			} else {
				for hit in &hits {
					writeln!(out, "{}\t{}", hit.value, hit.score)?;
				}
			}
		}
		Command::Config => anyhow::bail!("config does not use the store"),
	}
	Ok(())
}

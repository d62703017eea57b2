//! Popularity bumps for registered words.

use std::sync::Arc;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::keys::Word;
use crate::store::SortedSetStore;

pub struct PopularityUpdater<S: ?Sized> {
	store: Arc<S>,
	config: Arc<IndexConfig>,
}

impl<S> PopularityUpdater<S>
where
	S: SortedSetStore + ?Sized,
{
	pub fn new(store: Arc<S>, config: Arc<IndexConfig>) -> Self {
		Self { store, config }
	}

	/// Adds one to the popularity of `raw` and returns the new score.
	///
	/// Returns `None` without writing when the word has no terminal entry.
	/// The existence check and the increment are separate round-trips, so a
	/// bump racing the word's first registration may be dropped.
	pub async fn bump(&self, raw: &str) -> Result<Option<String>> {
		let word = Word::parse(raw, "bump")?;
		let scheme = self.config.key_scheme();
		let key = scheme.bucket_key(&word);
		let member = scheme.terminal_member(&word);

		if self.store.score(&key, &member).await?.is_none() {
			tracing::debug!(bucket = %key, word = word.as_str(), "autocomplete.bump.unregistered");
			return Ok(None);
		}

		let score = self.store.increment(&key, &member, 1.0).await?;
		tracing::debug!(bucket = %key, word = word.as_str(), score, "autocomplete.bump");
		Ok(Some(score.to_string()))
	}
}

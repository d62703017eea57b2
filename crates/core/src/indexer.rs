//! Word registration.

use std::sync::Arc;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::keys::Word;
use crate::store::{MemberWrite, SortedSetStore};

/// Writes a word's terminal entry and its prefix entries into its bucket.
pub struct WordIndexer<S: ?Sized> {
	store: Arc<S>,
	config: Arc<IndexConfig>,
}

impl<S> WordIndexer<S>
where
	S: SortedSetStore + ?Sized,
{
	pub fn new(store: Arc<S>, config: Arc<IndexConfig>) -> Self {
		Self { store, config }
	}

	/// Registers `raw` after trimming it.
	///
	/// The terminal entry and the first-character anchor go out in one
	/// transaction. The terminal entry is only created when missing, so
	/// registering a known word keeps its popularity. Prefix entries follow
	/// one write at a time at score 0; a failure part-way leaves the earlier
	/// prefixes in place and registering again completes them.
	pub async fn register(&self, raw: &str) -> Result<()> {
		let word = Word::parse(raw, "register")?;
		let scheme = self.config.key_scheme();
		let key = scheme.bucket_key(&word);

		let anchor = word.first_char().to_string();
		self.store
			.add_atomic(&key, &[MemberWrite::insert_new(scheme.terminal_member(&word), 1.0), MemberWrite::upsert(anchor, 1.0)])
			.await?;

		for prefix in word.prefixes() {
			self.store.add(&key, prefix, 0.0).await?;
		}

		tracing::debug!(bucket = %key, word = word.as_str(), prefixes = word.len(), "autocomplete.register");
		Ok(())
	}
}

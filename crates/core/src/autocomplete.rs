use std::sync::Arc;

use crate::config::{IndexConfig, IndexConfigError};
use crate::error::Result;
use crate::indexer::WordIndexer;
use crate::query::{PrefixQuery, Suggestion};
use crate::store::SortedSetStore;
use crate::updater::PopularityUpdater;

/// The three completion operations over one shared store handle.
///
/// Operations are independent: nothing here orders or serializes concurrent
/// calls beyond what each store command guarantees.
pub struct Autocomplete<S: ?Sized> {
	config: Arc<IndexConfig>,
	indexer: WordIndexer<S>,
	updater: PopularityUpdater<S>,
	query: PrefixQuery<S>,
}

impl<S> Autocomplete<S>
where
	S: SortedSetStore + ?Sized,
{
	/// Wires the components around `store` after validating `config`.
	pub fn new(store: Arc<S>, config: IndexConfig) -> std::result::Result<Self, IndexConfigError> {
		config.validate()?;
		let config = Arc::new(config);
		Ok(Self {
			indexer: WordIndexer::new(Arc::clone(&store), Arc::clone(&config)),
			updater: PopularityUpdater::new(Arc::clone(&store), Arc::clone(&config)),
			query: PrefixQuery::new(store, Arc::clone(&config)),
			config,
		})
	}

	pub fn config(&self) -> &IndexConfig {
		&self.config
	}

	/// See [`WordIndexer::register`].
	pub async fn register(&self, word: &str) -> Result<()> {
		self.indexer.register(word).await
	}

	/// See [`PopularityUpdater::bump`].
	pub async fn bump(&self, word: &str) -> Result<Option<String>> {
		self.updater.bump(word).await
	}

	/// See [`PrefixQuery::suggest`].
	pub async fn suggest(&self, prefix: &str) -> Result<Vec<Suggestion>> {
		self.query.suggest(prefix).await
	}
}

#[cfg(test)]
mod tests;

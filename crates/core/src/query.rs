//! Prefix completion over length buckets.
//!
//! The final length of the word being typed is unknown, so the engine walks
//! the buckets `base + n` for every candidate length `n` starting at the
//! length of the input, keeping terminal members that begin with the prefix.
//! Results come back bucket by bucket: each bucket's hits are in descending
//! score order, shorter words first overall. There is no global re-sort.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::config::IndexConfig;
use crate::error::Result;
use crate::keys::Word;
use crate::store::SortedSetStore;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
	pub value: String,
	#[serde(serialize_with = "whole_as_integer")]
	pub score: f64,
}

/// Largest magnitude below which every whole `f64` maps exactly to an `i64`.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Renders whole scores as integers: `3`, not `3.0`.
fn whole_as_integer<S: Serializer>(score: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	if score.fract() == 0.0 && score.abs() < EXACT_INT_LIMIT {
		serializer.serialize_i64(*score as i64)
	} else {
		serializer.serialize_f64(*score)
	}
}

pub struct PrefixQuery<S: ?Sized> {
	store: Arc<S>,
	config: Arc<IndexConfig>,
}

impl<S> PrefixQuery<S>
where
	S: SortedSetStore + ?Sized,
{
	pub fn new(store: Arc<S>, config: Arc<IndexConfig>) -> Self {
		Self { store, config }
	}

	/// Completions for `raw`, at most `max_length` of them.
	///
	/// Candidate lengths start at the untrimmed input length, so surrounding
	/// whitespace skips the shortest buckets, and scanning stops once the cap
	/// is reached. A member passes the prefix check when it starts with the
	/// trimmed prefix cut to the shorter of the bucket reply length (members
	/// and scores counted separately) and the member length. Only a marked
	/// member exactly one char longer than the bucket length is a terminal
	/// entry; a prefix entry of a word that itself ends in the delimiter is not.
	pub async fn suggest(&self, raw: &str) -> Result<Vec<Suggestion>> {
		let prefix = Word::parse(raw, "suggest")?;
		let config = &*self.config;
		let scheme = config.key_scheme();
		let base = scheme.base_key(prefix.first_char());
		let cap = config.max_length;

		let mut results = Vec::new();
		let mut scanned = 0usize;
		for len in raw.chars().count()..cap {
			if results.len() >= cap {
				break;
			}

			let key = scheme.length_key(&base, len);
			let entries = self.store.range_by_score_desc(&key, config.max_score, config.min_score, 0, config.bucket_scan_limit).await?;
			scanned += 1;
			tracing::trace!(bucket = %key, entries = entries.len(), "autocomplete.suggest.scan");
			if entries.is_empty() {
				continue;
			}

			let reply_len = entries.len() * 2;
			for (member, score) in entries {
				let Some(value) = scheme.strip_terminal(&member) else {
					continue;
				};
				if value.chars().count() != len {
					continue;
				}
				let needle = prefix.truncated(reply_len.min(member.chars().count()));
				if !member.starts_with(needle) {
					continue;
				}
				results.push(Suggestion {
					value: value.to_string(),
					score,
				});
			}
		}
		results.truncate(cap);

		tracing::debug!(prefix = prefix.as_str(), buckets = scanned, hits = results.len(), "autocomplete.suggest");
		Ok(results)
	}
}

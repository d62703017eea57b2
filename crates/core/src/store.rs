//! Sorted-set store capability.
//!
//! Components never reach for a global connection; they hold a shared handle
//! to something implementing [`SortedSetStore`]. Every method is one
//! round-trip and is atomic on its own. Nothing spans two calls.

use async_trait::async_trait;

use crate::config::ScoreBound;
use crate::error::StoreError;

/// One member write inside [`SortedSetStore::add_atomic`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberWrite {
	pub member: String,
	pub score: f64,
	/// Leave an existing member's score untouched (`ZADD NX`).
	pub only_if_absent: bool,
}

impl MemberWrite {
	/// Add-or-update write.
	pub fn upsert(member: impl Into<String>, score: f64) -> Self {
		Self {
			member: member.into(),
			score,
			only_if_absent: false,
		}
	}

	/// Write that is skipped when the member already exists.
	pub fn insert_new(member: impl Into<String>, score: f64) -> Self {
		Self {
			member: member.into(),
			score,
			only_if_absent: true,
		}
	}
}

/// Ordered key-value service holding named sorted collections.
#[async_trait]
pub trait SortedSetStore: Send + Sync {
	/// Applies all `writes` to `key` in one transaction.
	async fn add_atomic(&self, key: &str, writes: &[MemberWrite]) -> Result<(), StoreError>;

	/// Adds `member` with `score`, overwriting any previous score.
	async fn add(&self, key: &str, member: &str, score: f64) -> Result<(), StoreError>;

	/// Returns the score of `member`, or `None` if it is not in `key`.
	async fn score(&self, key: &str, member: &str) -> Result<Option<f64>, StoreError>;

	/// Adds `delta` to the score of `member` and returns the new score.
	async fn increment(&self, key: &str, member: &str, delta: f64) -> Result<f64, StoreError>;

	/// Members of `key` with scores in `[min, max]`, highest score first,
	/// skipping `offset` and returning at most `count` pairs.
	async fn range_by_score_desc(&self, key: &str, max: ScoreBound, min: ScoreBound, offset: usize, count: usize) -> Result<Vec<(String, f64)>, StoreError>;
}

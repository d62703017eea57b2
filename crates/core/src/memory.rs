//! In-process [`SortedSetStore`].

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::ScoreBound;
use crate::error::StoreError;
use crate::store::{MemberWrite, SortedSetStore};

/// Sorted sets held in memory behind one lock.
///
/// Mirrors Redis ordering: descending scans order equal scores by member in
/// reverse byte order. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
	sets: Mutex<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of members stored under `key`.
	pub fn len(&self, key: &str) -> usize {
		self.sets.lock().get(key).map_or(0, HashMap::len)
	}

	/// Returns `true` when no key holds any member.
	pub fn is_empty(&self) -> bool {
		self.sets.lock().values().all(HashMap::is_empty)
	}

	/// All members of `key`, highest score first.
	pub fn entries(&self, key: &str) -> Vec<(String, f64)> {
		let sets = self.sets.lock();
		let Some(set) = sets.get(key) else {
			return Vec::new();
		};
		let mut entries: Vec<_> = set.iter().map(|(m, s)| (m.clone(), *s)).collect();
		entries.sort_by(descending);
		entries
	}

	/// Keys that currently hold at least one member, sorted.
	pub fn keys(&self) -> Vec<String> {
		let mut keys: Vec<_> = self.sets.lock().iter().filter(|(_, set)| !set.is_empty()).map(|(k, _)| k.clone()).collect();
		keys.sort();
		keys
	}
}

fn descending(a: &(String, f64), b: &(String, f64)) -> Ordering {
	b.1.total_cmp(&a.1).then_with(|| b.0.as_bytes().cmp(a.0.as_bytes()))
}

fn apply(set: &mut HashMap<String, f64>, write: &MemberWrite) {
	if write.only_if_absent {
		set.entry(write.member.clone()).or_insert(write.score);
	} else {
		set.insert(write.member.clone(), write.score);
	}
}

#[async_trait]
impl SortedSetStore for MemoryStore {
	async fn add_atomic(&self, key: &str, writes: &[MemberWrite]) -> Result<(), StoreError> {
		let mut sets = self.sets.lock();
		let set = sets.entry(key.to_string()).or_default();
		for write in writes {
			apply(set, write);
		}
		Ok(())
	}

	async fn add(&self, key: &str, member: &str, score: f64) -> Result<(), StoreError> {
		self.sets.lock().entry(key.to_string()).or_default().insert(member.to_string(), score);
		Ok(())
	}

	async fn score(&self, key: &str, member: &str) -> Result<Option<f64>, StoreError> {
		Ok(self.sets.lock().get(key).and_then(|set| set.get(member)).copied())
	}

	async fn increment(&self, key: &str, member: &str, delta: f64) -> Result<f64, StoreError> {
		let mut sets = self.sets.lock();
		let score = sets.entry(key.to_string()).or_default().entry(member.to_string()).or_insert(0.0);
		*score += delta;
		Ok(*score)
	}

	async fn range_by_score_desc(&self, key: &str, max: ScoreBound, min: ScoreBound, offset: usize, count: usize) -> Result<Vec<(String, f64)>, StoreError> {
		let sets = self.sets.lock();
		let Some(set) = sets.get(key) else {
			return Ok(Vec::new());
		};
		let mut hits: Vec<_> = set
			.iter()
			.filter(|(_, score)| min.admits_from_below(**score) && max.admits_from_above(**score))
			.map(|(m, s)| (m.clone(), *s))
			.collect();
		hits.sort_by(descending);
		Ok(hits.into_iter().skip(offset).take(count).collect())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[tokio::test]
	async fn descending_scan_orders_ties_in_reverse() {
		let store = MemoryStore::new();
		store.add("k", "b", 0.0).await.unwrap();
		store.add("k", "a", 0.0).await.unwrap();
		store.add("k", "c", 2.0).await.unwrap();
		store.add("k", "d", 1.0).await.unwrap();

		let all = store.range_by_score_desc("k", ScoreBound::PosInf, ScoreBound::NegInf, 0, 10).await.unwrap();
		assert_eq!(all, vec![("c".to_string(), 2.0), ("d".to_string(), 1.0), ("b".to_string(), 0.0), ("a".to_string(), 0.0)]);
	}

	#[tokio::test]
	async fn scan_honours_bounds_and_limit() {
		let store = MemoryStore::new();
		for (i, m) in ["a", "b", "c", "d"].into_iter().enumerate() {
			store.add("k", m, i as f64).await.unwrap();
		}

		let page = store.range_by_score_desc("k", ScoreBound::PosInf, ScoreBound::Exclusive(0.0), 1, 2).await.unwrap();
		assert_eq!(page, vec![("c".to_string(), 2.0), ("b".to_string(), 1.0)]);

		let missing = store.range_by_score_desc("nope", ScoreBound::PosInf, ScoreBound::NegInf, 0, 10).await.unwrap();
		assert!(missing.is_empty());
	}

	#[tokio::test]
	async fn insert_new_keeps_existing_score() {
		let store = MemoryStore::new();
		store.add("k", "a", 5.0).await.unwrap();
		store
			.add_atomic("k", &[MemberWrite::insert_new("a", 1.0), MemberWrite::upsert("b", 1.0), MemberWrite::insert_new("c", 1.0)])
			.await
			.unwrap();

		assert_eq!(store.score("k", "a").await.unwrap(), Some(5.0));
		assert_eq!(store.score("k", "b").await.unwrap(), Some(1.0));
		assert_eq!(store.score("k", "c").await.unwrap(), Some(1.0));
	}

	#[tokio::test]
	async fn increment_creates_missing_members() {
		let store = MemoryStore::new();
		assert_eq!(store.increment("k", "a", 1.0).await.unwrap(), 1.0);
		assert_eq!(store.increment("k", "a", 2.0).await.unwrap(), 3.0);
		assert_eq!(store.len("k"), 1);
		assert_eq!(store.keys(), vec!["k".to_string()]);
	}
}

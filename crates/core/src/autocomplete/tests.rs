use pretty_assertions::assert_eq;

use super::*;
use crate::error::Error;
use crate::memory::MemoryStore;

fn service() -> (Arc<MemoryStore>, Autocomplete<MemoryStore>) {
	let store = Arc::new(MemoryStore::new());
	let service = Autocomplete::new(Arc::clone(&store), IndexConfig::default()).unwrap();
	(store, service)
}

fn pairs(hits: &[Suggestion]) -> Vec<(&str, f64)> {
	hits.iter().map(|h| (h.value.as_str(), h.score)).collect()
}

#[tokio::test]
async fn registered_word_completes_itself() {
	let (_, ac) = service();
	for word in ["a", "go", "rust", "zebra", "completion"] {
		ac.register(word).await.unwrap();
		let hits = ac.suggest(word).await.unwrap();
		assert!(hits.iter().any(|h| h.value == word && h.score == 1.0), "{word}: {hits:?}");
	}
}

#[tokio::test]
async fn bumps_accumulate_from_one() {
	let (_, ac) = service();
	ac.register("kiwi").await.unwrap();
	for n in 1..=5 {
		assert_eq!(ac.bump("kiwi").await.unwrap(), Some((1 + n).to_string()));
	}
	assert_eq!(pairs(&ac.suggest("kiwi").await.unwrap()), vec![("kiwi", 6.0)]);
}

#[tokio::test]
async fn bumping_unknown_word_is_a_silent_noop() {
	let (store, ac) = service();
	assert_eq!(ac.bump("ghost").await.unwrap(), None);
	assert!(ac.suggest("ghost").await.unwrap().is_empty());
	assert!(store.is_empty());
}

#[tokio::test]
async fn registration_is_idempotent() {
	let (store, ac) = service();
	ac.register("pear").await.unwrap();
	let before = store.entries("autocomplete*p*4");
	ac.register(" pear ").await.unwrap();

	assert_eq!(store.entries("autocomplete*p*4"), before);
	assert_eq!(pairs(&ac.suggest("pear").await.unwrap()), vec![("pear", 1.0)]);
}

#[tokio::test]
async fn blank_input_is_rejected_everywhere() {
	let (_, ac) = service();
	assert!(matches!(ac.register("").await, Err(Error::InvalidInput { op: "register" })));
	assert!(matches!(ac.bump("   ").await, Err(Error::InvalidInput { op: "bump" })));
	assert!(matches!(ac.suggest("").await, Err(Error::InvalidInput { op: "suggest" })));
}

#[tokio::test]
async fn words_sharing_a_prefix_stay_apart() {
	let (store, ac) = service();
	ac.register("apple").await.unwrap();
	ac.register("app").await.unwrap();
	ac.bump("apple").await.unwrap();
	ac.bump("apple").await.unwrap();

	assert_eq!(pairs(&ac.suggest("app").await.unwrap()), vec![("app", 1.0), ("apple", 3.0)]);
	assert_eq!(store.score("autocomplete*a*3", "app*").await.unwrap(), Some(1.0));
	assert_eq!(store.score("autocomplete*a*5", "apple*").await.unwrap(), Some(3.0));
}

#[tokio::test]
async fn empty_bucket_yields_no_suggestions() {
	let (_, ac) = service();
	ac.register("apple").await.unwrap();
	assert!(ac.suggest("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn prefix_past_the_length_bound_yields_nothing() {
	let (_, ac) = service();
	let long = "a".repeat(ac.config().max_length);
	ac.register(&long).await.unwrap();
	assert!(ac.suggest(&long).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_config_is_refused() {
	let config = IndexConfig {
		namespace: String::new(),
		..IndexConfig::default()
	};
	assert!(Autocomplete::new(Arc::new(MemoryStore::new()), config).is_err());
}

#[tokio::test]
async fn works_over_a_trait_object() {
	let store: Arc<dyn SortedSetStore> = Arc::new(MemoryStore::new());
	let ac = Autocomplete::new(store, IndexConfig::default()).unwrap();
	ac.register("dyn").await.unwrap();
	assert_eq!(ac.bump("dyn").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bumps_are_not_lost() {
	let (_, ac) = service();
	let ac = Arc::new(ac);
	ac.register("race").await.unwrap();

	let mut tasks = Vec::new();
	for _ in 0..32 {
		let ac = Arc::clone(&ac);
		tasks.push(tokio::spawn(async move { ac.bump("race").await.unwrap() }));
	}
	for task in tasks {
		assert!(task.await.unwrap().is_some());
	}

	assert_eq!(pairs(&ac.suggest("race").await.unwrap()), vec![("race", 33.0)]);
}

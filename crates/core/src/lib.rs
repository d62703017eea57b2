//! Popularity-ranked word completion.
//!
//! Words are stored in sorted-set buckets keyed by first character and length:
//! * [`WordIndexer`]: writes a word's terminal entry and its prefix entries
//! * [`PopularityUpdater`]: bumps the score of registered words
//! * [`PrefixQuery`]: walks candidate-length buckets to complete a prefix
//! * [`Autocomplete`]: the three of them over one shared [`SortedSetStore`]
//!
//! The store is injected. [`MemoryStore`] keeps everything in process; the
//! `wordrank-redis` crate talks to a Redis server.

mod autocomplete;
pub mod config;
pub mod error;
pub mod indexer;
pub mod keys;
pub mod memory;
pub mod query;
pub mod store;
pub mod updater;

pub use autocomplete::Autocomplete;
pub use config::{IndexConfig, IndexConfigError, ScoreBound};
pub use error::{BoxError, Error, Result, StoreError};
pub use indexer::WordIndexer;
pub use keys::{KeyScheme, Word};
pub use memory::MemoryStore;
pub use query::{PrefixQuery, Suggestion};
pub use store::{MemberWrite, SortedSetStore};
pub use updater::PopularityUpdater;

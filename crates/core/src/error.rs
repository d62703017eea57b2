//! Error types for completion operations.

use thiserror::Error;

/// Boxed source error carried by [`StoreError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`register`](crate::Autocomplete::register),
/// [`bump`](crate::Autocomplete::bump) and [`suggest`](crate::Autocomplete::suggest).
#[derive(Debug, Error)]
pub enum Error {
	/// The word or prefix was empty, or blank after trimming.
	///
	/// Raised before the store is touched.
	#[error("{op}: word cannot be empty or blank")]
	InvalidInput {
		/// Operation that rejected the input.
		op: &'static str,
	},

	/// The backing store failed to execute a command.
	#[error(transparent)]
	Backend(#[from] StoreError),
}

impl Error {
	/// Returns `true` for caller errors that must not be retried.
	pub fn is_invalid_input(&self) -> bool {
		matches!(self, Self::InvalidInput { .. })
	}
}

/// A failed store round-trip.
#[derive(Debug, Error)]
#[error("store backend unavailable during {op}: {source}")]
pub struct StoreError {
	/// Store primitive that failed (`ZADD`, `ZSCORE`, ...).
	pub op: &'static str,
	#[source]
	pub source: BoxError,
}

impl StoreError {
	pub fn new(op: &'static str, source: impl Into<BoxError>) -> Self {
		Self { op, source: source.into() }
	}
}

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, Error>;

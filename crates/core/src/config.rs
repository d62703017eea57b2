//! Index layout and query bounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::KeyScheme;

/// Tunables shared by the indexer, the updater and the query engine.
///
/// Writers and readers must agree on every field; changing `namespace` or
/// `delimiter` against a populated store orphans the existing buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
	/// Leading component of every bucket key.
	pub namespace: String,
	/// Separates key components and marks terminal entries.
	pub delimiter: char,
	/// Exclusive upper bound on candidate word length, and the result cap.
	pub max_length: usize,
	/// Raw entries fetched per bucket scan.
	pub bucket_scan_limit: usize,
	/// Lower score bound of a bucket scan.
	pub min_score: ScoreBound,
	/// Upper score bound of a bucket scan.
	pub max_score: ScoreBound,
}

impl Default for IndexConfig {
	fn default() -> Self {
		Self {
			namespace: "autocomplete".to_string(),
			delimiter: '*',
			max_length: 20,
			bucket_scan_limit: 30,
			min_score: ScoreBound::NegInf,
			max_score: ScoreBound::PosInf,
		}
	}
}

impl IndexConfig {
	/// Key scheme for this layout.
	pub fn key_scheme(&self) -> KeyScheme<'_> {
		KeyScheme::new(&self.namespace, self.delimiter)
	}

	/// Checks the invariants the key scheme and the scan loop depend on.
	pub fn validate(&self) -> Result<(), IndexConfigError> {
		if self.namespace.trim().is_empty() {
			return Err(IndexConfigError::EmptyNamespace);
		}
		if self.namespace.contains(self.delimiter) {
			return Err(IndexConfigError::DelimiterInNamespace(self.delimiter));
		}
		if self.delimiter.is_whitespace() {
			return Err(IndexConfigError::WhitespaceDelimiter);
		}
		if self.max_length == 0 {
			return Err(IndexConfigError::ZeroMaxLength);
		}
		if self.bucket_scan_limit == 0 {
			return Err(IndexConfigError::ZeroScanLimit);
		}
		Ok(())
	}
}

/// Rejected [`IndexConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexConfigError {
	#[error("index namespace cannot be empty")]
	EmptyNamespace,
	#[error("index namespace cannot contain the delimiter {0:?}")]
	DelimiterInNamespace(char),
	#[error("index delimiter cannot be whitespace")]
	WhitespaceDelimiter,
	#[error("max_length must be > 0")]
	ZeroMaxLength,
	#[error("bucket_scan_limit must be > 0")]
	ZeroScanLimit,
}

/// One end of a score range, in sorted-set range syntax.
///
/// Renders as `-inf`, `+inf`, `1.5` (inclusive) or `(1.5` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScoreBound {
	NegInf,
	PosInf,
	Inclusive(f64),
	Exclusive(f64),
}

impl ScoreBound {
	/// Returns `true` if `score` lies on the admitted side of this bound
	/// when used as a lower bound.
	pub fn admits_from_below(self, score: f64) -> bool {
		match self {
			Self::NegInf => true,
			Self::PosInf => false,
			Self::Inclusive(b) => score >= b,
			Self::Exclusive(b) => score > b,
		}
	}

	/// Upper-bound counterpart of [`Self::admits_from_below`].
	pub fn admits_from_above(self, score: f64) -> bool {
		match self {
			Self::NegInf => false,
			Self::PosInf => true,
			Self::Inclusive(b) => score <= b,
			Self::Exclusive(b) => score < b,
		}
	}
}

impl fmt::Display for ScoreBound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NegInf => f.write_str("-inf"),
			Self::PosInf => f.write_str("+inf"),
			Self::Inclusive(v) => write!(f, "{v}"),
			Self::Exclusive(v) => write!(f, "({v}"),
		}
	}
}

/// A score bound that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid score bound: {0:?}")]
pub struct ParseScoreBoundError(String);

impl FromStr for ScoreBound {
	type Err = ParseScoreBoundError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		match s {
			"-inf" => return Ok(Self::NegInf),
			"+inf" | "inf" => return Ok(Self::PosInf),
			_ => {}
		}
		let (exclusive, digits) = match s.strip_prefix('(') {
			Some(rest) => (true, rest),
			None => (false, s),
		};
		let value: f64 = digits.parse().map_err(|_| ParseScoreBoundError(s.to_string()))?;
		if value.is_nan() {
			return Err(ParseScoreBoundError(s.to_string()));
		}
		Ok(if exclusive { Self::Exclusive(value) } else { Self::Inclusive(value) })
	}
}

impl TryFrom<String> for ScoreBound {
	type Error = ParseScoreBoundError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<ScoreBound> for String {
	fn from(bound: ScoreBound) -> Self {
		bound.to_string()
	}
}

//! Bucket key naming and entry member encoding.
//!
//! A word lives in the bucket `{namespace}{d}{first char}{d}{char count}`,
//! where `d` is the configured delimiter. The same delimiter, appended to the
//! word, marks its terminal entry:
//!
//! ```text
//! autocomplete*a*5   apple*  -> 3   (terminal)
//!                    apple   -> 0   (prefix)
//!                    appl    -> 0
//!                    ...
//! ```
//!
//! Lengths count `char`s, not bytes.

use crate::error::{Error, Result};

/// A trimmed, non-empty word or prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
	text: &'a str,
	first: char,
	len: usize,
}

impl<'a> Word<'a> {
	/// Trims `raw` and rejects it if nothing is left.
	///
	/// `op` names the rejecting operation in the resulting error.
	pub fn parse(raw: &'a str, op: &'static str) -> Result<Self> {
		let text = raw.trim();
		let Some(first) = text.chars().next() else {
			return Err(Error::InvalidInput { op });
		};
		Ok(Self {
			text,
			first,
			len: text.chars().count(),
		})
	}

	pub fn as_str(&self) -> &'a str {
		self.text
	}

	pub fn first_char(&self) -> char {
		self.first
	}

	/// Length in `char`s.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Yields every non-empty prefix, shortest first, ending with the word itself.
	pub fn prefixes(self) -> impl Iterator<Item = &'a str> {
		let text = self.text;
		text.char_indices().map(move |(i, c)| &text[..i + c.len_utf8()])
	}

	/// Returns at most the first `n` chars.
	pub fn truncated(&self, n: usize) -> &'a str {
		match self.text.char_indices().nth(n) {
			Some((i, _)) => &self.text[..i],
			None => self.text,
		}
	}
}

/// Builds bucket keys and terminal members for one namespace.
#[derive(Debug, Clone, Copy)]
pub struct KeyScheme<'a> {
	namespace: &'a str,
	delimiter: char,
}

impl<'a> KeyScheme<'a> {
	pub fn new(namespace: &'a str, delimiter: char) -> Self {
		Self { namespace, delimiter }
	}

	/// Key of the bucket holding every entry of `word`.
	pub fn bucket_key(&self, word: &Word<'_>) -> String {
		self.length_key(&self.base_key(word.first_char()), word.len())
	}

	/// Key prefix shared by all buckets of words starting with `first`.
	pub fn base_key(&self, first: char) -> String {
		format!("{ns}{d}{first}{d}", ns = self.namespace, d = self.delimiter)
	}

	/// Appends a candidate length to a [`Self::base_key`].
	pub fn length_key(&self, base: &str, len: usize) -> String {
		format!("{base}{len}")
	}

	/// Member string of the terminal entry for `word`.
	pub fn terminal_member(&self, word: &Word<'_>) -> String {
		let mut member = String::with_capacity(word.as_str().len() + self.delimiter.len_utf8());
		member.push_str(word.as_str());
		member.push(self.delimiter);
		member
	}

	/// Returns the word of a terminal member, or `None` for prefix entries.
	pub fn strip_terminal<'m>(&self, member: &'m str) -> Option<&'m str> {
		member.strip_suffix(self.delimiter)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn scheme() -> KeyScheme<'static> {
		KeyScheme::new("autocomplete", '*')
	}

	#[rstest]
	#[case("apple", "autocomplete*a*5")]
	#[case("  app  ", "autocomplete*a*3")]
	#[case("x", "autocomplete*x*1")]
	#[case("über", "autocomplete*ü*4")]
	fn bucket_key_uses_first_char_and_length(#[case] raw: &str, #[case] expected: &str) {
		let word = Word::parse(raw, "test").unwrap();
		assert_eq!(scheme().bucket_key(&word), expected);
	}

	#[test]
	fn base_key_omits_length() {
		assert_eq!(scheme().base_key('a'), "autocomplete*a*");
		assert_eq!(scheme().length_key(&scheme().base_key('a'), 7), "autocomplete*a*7");
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("\t\n")]
	fn blank_words_are_rejected(#[case] raw: &str) {
		let err = Word::parse(raw, "register").unwrap_err();
		assert!(err.is_invalid_input());
	}

	#[test]
	fn prefixes_cover_every_length() {
		let word = Word::parse("héllo", "test").unwrap();
		let prefixes: Vec<_> = word.prefixes().collect();
		assert_eq!(prefixes, ["h", "hé", "hél", "héll", "héllo"]);
	}

	#[test]
	fn truncation_saturates_at_word_length() {
		let word = Word::parse("app", "test").unwrap();
		assert_eq!(word.truncated(0), "");
		assert_eq!(word.truncated(2), "ap");
		assert_eq!(word.truncated(8), "app");
	}

	#[test]
	fn terminal_members_round_trip() {
		let word = Word::parse("apple", "test").unwrap();
		let member = scheme().terminal_member(&word);
		assert_eq!(member, "apple*");
		assert_eq!(scheme().strip_terminal(&member), Some("apple"));
		assert_eq!(scheme().strip_terminal("apple"), None);
	}
}

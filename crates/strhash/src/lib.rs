//! Four-byte string identifiers.
//!
//! A [`StringHash32`] is the 32-bit FNV-1a hash of a string's UTF-16 code units. The hash is
//! the identity: equality, ordering and hashing only look at the numeric value, so two
//! strings that collide are the same identifier.
//!
//! # Reverse lookup
//!
//! Debug builds keep a process-wide `hash -> string` registry so identifiers can be printed
//! as the text they came from. See [`lookup`] for the availability rules.
//!
//! # Literal syntax
//!
//! [`StringHash32::try_parse`] understands, in order:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `@1A2B3C4D` | raw hash, exactly 8 hex digits |
//! | `0x1A2B` | raw hash, up to 8 hex digits; anything else after `0x` is an error |
//! | `'text` | hash of `text` |
//! | `"text"` | hash of `text` |
//! | `text` | hash of `text` |

use std::fmt;
use std::str::FromStr;

mod error;
mod hash;
pub mod lookup;
mod parse;

pub use error::{ParseHashError, ReverseLookupError};
pub use hash::{hash32, hash32_utf16};
pub use lookup::{
	HashCollision, REVERSE_LOOKUP_AVAILABLE, ReverseLookup, StoreOutcome, clear_reverse_lookup,
	collisions, enable_reverse_lookup, is_reverse_lookup_enabled, reverse_lookup,
};

/// Prefix for raw hash literals (`@1A2B3C4D`).
pub const CUSTOM_HASH_PREFIX: char = '@';
/// Prefix for verbatim string literals (`'text`).
pub const STRING_PREFIX: char = '\'';

/// Four-byte string hash.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct StringHash32(u32);

impl StringHash32 {
	/// The empty identifier.
	pub const NULL: Self = Self(0);

	/// Hashes `text` and records it for reverse lookup.
	///
	/// Empty input produces [`StringHash32::NULL`].
	pub fn new(text: &str) -> Self {
		Self(lookup::store(text))
	}

	/// Hashes raw UTF-16 code units and records them for reverse lookup.
	pub fn from_utf16(units: &[u16]) -> Self {
		Self(lookup::store_utf16(units))
	}

	/// Wraps an already computed hash value.
	#[inline]
	pub const fn from_hash(hash: u32) -> Self {
		Self(hash)
	}

	/// Returns the hash value.
	#[inline]
	pub const fn hash_value(self) -> u32 {
		self.0
	}

	/// Returns if this is the empty identifier.
	#[inline]
	pub const fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Parses a hash literal. See the crate docs for the accepted forms.
	///
	/// Returns `None` only for a `0x` prefix followed by something other than 1 to 8 hex
	/// digits; every other input hashes to some identifier.
	pub fn try_parse(text: &str) -> Option<Self> {
		parse::try_parse(text)
	}

	/// Parses a hash literal, falling back to `default` if it is malformed.
	pub fn parse(text: &str, default: Self) -> Self {
		Self::try_parse(text).unwrap_or(default)
	}

	/// Returns the original string if it is known, or a placeholder otherwise.
	pub fn to_debug_string(self) -> String {
		reverse_lookup(self.0).into_owned()
	}
}

impl From<&str> for StringHash32 {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<&String> for StringHash32 {
	fn from(text: &String) -> Self {
		Self::new(text)
	}
}

impl From<StringHash32> for u32 {
	fn from(hash: StringHash32) -> Self {
		hash.0
	}
}

impl FromStr for StringHash32 {
	type Err = ParseHashError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::try_parse(s).ok_or_else(|| ParseHashError::InvalidHex { text: s.to_string() })
	}
}

impl fmt::Display for StringHash32 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{CUSTOM_HASH_PREFIX}{:08X}", self.0)
	}
}

impl fmt::Debug for StringHash32 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("StringHash32")
			.field(&format_args!("{self}"))
			.field(&format_args!("{}", reverse_lookup(self.0)))
			.finish()
	}
}

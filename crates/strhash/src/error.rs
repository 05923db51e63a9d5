/// Error returned by [`StringHash32::from_str`](crate::StringHash32).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseHashError {
	/// A `0x` literal that is not 1 to 8 hex digits.
	#[error("invalid hex hash literal: {text:?}")]
	InvalidHex { text: String },
}

/// Errors from toggling the reverse-lookup registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReverseLookupError {
	#[error("reverse lookup cannot be enabled in non-development builds")]
	Unavailable,
}

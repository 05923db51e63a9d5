//! FNV-1a over UTF-16 code units.
//!
//! Hashing code units rather than UTF-8 bytes keeps identifiers bit-compatible with hosts
//! whose strings are UTF-16 natively. For ASCII the two encodings hash identically.

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

#[inline]
fn fnv1a(units: impl Iterator<Item = u16>) -> u32 {
	units.fold(FNV_OFFSET, |hash, unit| (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME))
}

/// Hashes `text` without touching the reverse-lookup registry.
///
/// The empty string hashes to `0`, not to the FNV offset basis.
pub fn hash32(text: &str) -> u32 {
	if text.is_empty() {
		return 0;
	}
	fnv1a(text.encode_utf16())
}

/// Hashes raw UTF-16 code units. Empty input hashes to `0`.
pub fn hash32_utf16(units: &[u16]) -> u32 {
	if units.is_empty() {
		return 0;
	}
	fnv1a(units.iter().copied())
}

use crate::{CUSTOM_HASH_PREFIX, STRING_PREFIX, StringHash32};

/// Parses at most `max_digits` hex digits. Signs, whitespace and empty input are rejected.
fn parse_hex(digits: &str, max_digits: usize) -> Option<u32> {
	if digits.is_empty() || digits.len() > max_digits || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None;
	}
	u32::from_str_radix(digits, 16).ok()
}

pub(crate) fn try_parse(text: &str) -> Option<StringHash32> {
	if let Some(digits) = text.strip_prefix(CUSTOM_HASH_PREFIX) {
		// Malformed custom literals are hashed as plain text below.
		if digits.len() == 8
			&& let Some(hash) = parse_hex(digits, 8)
		{
			return Some(StringHash32::from_hash(hash));
		}
	} else if let Some(digits) = text.strip_prefix("0x") {
		return parse_hex(digits, 8).map(StringHash32::from_hash);
	} else if let Some(rest) = text.strip_prefix(STRING_PREFIX) {
		return Some(StringHash32::new(rest));
	} else if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
		return Some(StringHash32::new(&text[1..text.len() - 1]));
	}

	Some(StringHash32::new(text))
}

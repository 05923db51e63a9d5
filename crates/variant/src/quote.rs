//! Scanning text that may contain `"..."` segments.

/// Byte offset of the first character outside quotes matching `pred`.
///
/// A backslash inside quotes escapes the next character. An unterminated quote runs to the end
/// of the text.
pub fn find_unquoted(text: &str, mut pred: impl FnMut(char) -> bool) -> Option<usize> {
	let mut in_quotes = false;
	let mut escaped = false;

	for (idx, c) in text.char_indices() {
		if in_quotes {
			match c {
				_ if escaped => escaped = false,
				'\\' => escaped = true,
				'"' => in_quotes = false,
				_ => {}
			}
		} else if c == '"' {
			in_quotes = true;
		} else if pred(c) {
			return Some(idx);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn skips_quoted_text() {
		assert_eq!(find_unquoted(r#""=" = 1"#, |c| c == '='), Some(4));
		assert_eq!(find_unquoted(r#""=""#, |c| c == '='), None);
	}

	#[test]
	fn escaped_quote_stays_inside() {
		assert_eq!(find_unquoted(r#""a\":b":c"#, |c| c == ':'), Some(7));
		assert_eq!(find_unquoted(r#""open:"#, |c| c == ':'), None);
	}
}

//! Quote-aware clause splitting.

use varitab_variant::find_unquoted;

/// Default separator between clauses in a clause list.
pub const CLAUSE_SEPARATOR: char = ',';

/// Splits `text` on `separator`, ignoring separators inside `"..."` segments.
///
/// Each clause is trimmed and empty clauses are skipped. A backslash inside quotes escapes the
/// next character. An unterminated quote runs to the end of the text.
pub fn split_clauses(text: &str, separator: char) -> SplitClauses<'_> {
	SplitClauses {
		rest: text,
		separator,
	}
}

/// Iterator returned by [`split_clauses`].
#[derive(Debug, Clone)]
pub struct SplitClauses<'a> {
	rest: &'a str,
	separator: char,
}

impl<'a> SplitClauses<'a> {
	fn next_raw(&mut self) -> Option<&'a str> {
		if self.rest.is_empty() {
			return None;
		}

		let end = find_unquoted(self.rest, |c| c == self.separator);
		let clause = match end {
			Some(idx) => {
				let clause = &self.rest[..idx];
				self.rest = &self.rest[idx + self.separator.len_utf8()..];
				clause
			}
			None => std::mem::take(&mut self.rest),
		};
		Some(clause)
	}
}

impl<'a> Iterator for SplitClauses<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(clause) = self.next_raw() {
			let clause = clause.trim();
			if !clause.is_empty() {
				return Some(clause);
			}
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("a=1", &["a=1"])]
	#[case("a=1, b=2", &["a=1", "b=2"])]
	#[case(" a=1 ,, ,b=2, ", &["a=1", "b=2"])]
	#[case(r#"name="x, y", b=2"#, &[r#"name="x, y""#, "b=2"])]
	#[case(r#"s="a\"b,c", t=1"#, &[r#"s="a\"b,c""#, "t=1"])]
	#[case(r#"s="open, still"#, &[r#"s="open, still"#])]
	#[case("", &[])]
	#[case(" , ", &[])]
	fn splits(#[case] text: &str, #[case] expected: &[&str]) {
		let clauses: Vec<_> = split_clauses(text, CLAUSE_SEPARATOR).collect();
		assert_eq!(clauses, expected);
	}

	#[test]
	fn custom_separator() {
		let clauses: Vec<_> = split_clauses("a==1; b", ';').collect();
		assert_eq!(clauses, ["a==1", "b"]);
	}
}

use std::fmt;

use varitab_strhash::StringHash32;

use crate::find_unquoted;

/// Separator between table and variable in `table:variable` keys.
pub const TABLE_SEPARATOR: char = ':';

/// Address of a variable within a specific table.
///
/// An empty `table_id` means "the resolver's default table".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableKeyPair {
	pub table_id: StringHash32,
	pub variable_id: StringHash32,
}

impl TableKeyPair {
	pub const fn new(table_id: StringHash32, variable_id: StringHash32) -> Self {
		Self { table_id, variable_id }
	}

	/// Key in the default table.
	pub const fn variable(variable_id: StringHash32) -> Self {
		Self {
			table_id: StringHash32::NULL,
			variable_id,
		}
	}

	/// Parses `table:variable` or `variable`. Each half accepts the
	/// [`StringHash32::try_parse`] literal forms; a separator inside `"..."` belongs to the name.
	///
	/// Returns `None` for an empty variable or a malformed `0x` literal.
	pub fn try_parse(text: &str) -> Option<Self> {
		let (table, variable) = match find_unquoted(text, |c| c == TABLE_SEPARATOR) {
			Some(idx) => (text[..idx].trim(), text[idx + TABLE_SEPARATOR.len_utf8()..].trim()),
			None => ("", text.trim()),
		};
		if variable.is_empty() {
			return None;
		}

		let table_id = if table.is_empty() { StringHash32::NULL } else { StringHash32::try_parse(table)? };
		let variable_id = StringHash32::try_parse(variable)?;
		Some(Self { table_id, variable_id })
	}
}

impl fmt::Display for TableKeyPair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.table_id.is_empty() {
			f.write_str(&self.variable_id.to_debug_string())
		} else {
			write!(
				f,
				"{}{TABLE_SEPARATOR}{}",
				self.table_id.to_debug_string(),
				self.variable_id.to_debug_string()
			)
		}
	}
}

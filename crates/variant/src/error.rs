use varitab_strhash::StringHash32;

/// Errors from mutating a [`VariantTable`](crate::VariantTable)'s base link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
	/// The proposed base already reaches this table through its own base chain.
	#[error("base table {base} of {table} would cause an infinite lookup loop")]
	BaseCycle { table: StringHash32, base: StringHash32 },
	/// A table in the proposed base chain is mutably borrowed, so the chain cannot be checked.
	#[error("base chain of {table} is borrowed and cannot be validated")]
	BaseBorrowed { table: StringHash32 },
}

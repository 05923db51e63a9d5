//! The resolver capability set and the two-tier lookup built on it.

use varitab_strhash::StringHash32;
use varitab_variant::{ModifyOperator, SharedTable, TableKeyPair, Variant, lookup_shared};

use crate::batch;

/// Routes variable keys to values or to the tables that own them.
///
/// Reads try [`VariantResolver::try_get_variant`] first and fall back to the table returned by
/// [`VariantResolver::try_get_table`]. Writes always go through the table.
pub trait VariantResolver {
	/// Caller state handed to every lookup.
	type Context: ?Sized;

	/// Rewrites `key` before any lookup. The default keeps it unchanged.
	fn remap_key(&self, _key: &mut TableKeyPair) {}

	/// Returns the table registered under `table_id`.
	fn try_get_table(&self, cx: &Self::Context, table_id: StringHash32) -> Option<SharedTable>;

	/// Answers `key` directly, bypassing tables. `None` defers to the table path.
	fn try_get_variant(&self, _cx: &Self::Context, _key: TableKeyPair) -> Option<Variant> {
		None
	}
}

/// Resolves `key`: remap, direct value, then the owning table and its base chain.
///
/// A missing table is reported through `tracing::error!` and answers `None`.
pub fn try_resolve<R>(resolver: &R, cx: &R::Context, mut key: TableKeyPair) -> Option<Variant>
where
	R: VariantResolver + ?Sized,
{
	resolver.remap_key(&mut key);

	if let Some(value) = resolver.try_get_variant(cx, key) {
		return Some(value);
	}

	let Some(table) = resolver.try_get_table(cx, key.table_id) else {
		tracing::error!(table = %key.table_id.to_debug_string(), %key, "unable to retrieve variant table");
		return None;
	};
	lookup_shared(&table, key.variable_id)
}

/// Applies `operator` with `operand` to `key` in its owning table.
///
/// Returns `false`, after reporting it, when the table cannot be found or is borrowed.
pub fn try_modify<R>(
	resolver: &R,
	cx: &R::Context,
	mut key: TableKeyPair,
	operator: ModifyOperator,
	operand: Variant,
) -> bool
where
	R: VariantResolver + ?Sized,
{
	resolver.remap_key(&mut key);

	let Some(table) = resolver.try_get_table(cx, key.table_id) else {
		tracing::error!(table = %key.table_id.to_debug_string(), %key, "unable to retrieve variant table");
		return false;
	};
	let Ok(mut table) = table.try_borrow_mut() else {
		tracing::error!(%key, "variant table is borrowed; modification dropped");
		return false;
	};

	table.modify(key.variable_id, operator, operand);
	true
}

/// Method-call sugar for the resolver free functions.
pub trait VariantResolverExt: VariantResolver {
	fn resolve(&self, cx: &Self::Context, key: TableKeyPair) -> Option<Variant> {
		try_resolve(self, cx, key)
	}

	fn modify(&self, cx: &Self::Context, key: TableKeyPair, operator: ModifyOperator, operand: Variant) -> bool {
		try_modify(self, cx, key, operator, operand)
	}

	/// See [`batch::apply_modifications`].
	fn apply_modifications(&self, cx: &Self::Context, text: &str) -> bool {
		batch::apply_modifications(self, cx, text)
	}

	/// See [`batch::evaluate_all`].
	fn evaluate_all(&self, cx: &Self::Context, text: &str) -> bool {
		batch::evaluate_all(self, cx, text)
	}
}

impl<R: VariantResolver + ?Sized> VariantResolverExt for R {}

use std::fmt;

use rustc_hash::FxHashMap as HashMap;
use varitab_strhash::StringHash32;
use varitab_variant::{SharedTable, TableKeyPair, Variant};

use crate::VariantResolver;

/// Computes a variable's value from the caller context.
pub type VariableGetter<C> = Box<dyn Fn(&C) -> Variant>;

/// A [`VariantResolver`] assembled at runtime.
///
/// Keys are first rewritten through the alias map (one hop), then answered by a computed
/// variable if one is registered, and otherwise by the table named in the key. Keys without a
/// table go to the default table.
pub struct CustomResolver<C: ?Sized = ()> {
	default_table: Option<SharedTable>,
	tables: HashMap<StringHash32, SharedTable>,
	aliases: HashMap<TableKeyPair, TableKeyPair>,
	getters: HashMap<TableKeyPair, VariableGetter<C>>,
}

impl<C: ?Sized> CustomResolver<C> {
	pub fn new() -> Self {
		Self {
			default_table: None,
			tables: HashMap::default(),
			aliases: HashMap::default(),
			getters: HashMap::default(),
		}
	}

	/// Table that answers keys with an empty table id.
	pub fn set_default_table(&mut self, table: SharedTable) -> Option<SharedTable> {
		self.default_table.replace(table)
	}

	pub fn default_table(&self) -> Option<&SharedTable> {
		self.default_table.as_ref()
	}

	/// Registers `table` under its own name.
	///
	/// Returns the table previously registered under that name. A mutably borrowed table cannot
	/// be named and is not registered.
	pub fn set_table(&mut self, table: SharedTable) -> Option<SharedTable> {
		let Ok(name) = table.try_borrow().map(|t| t.name()) else {
			tracing::error!("cannot register a variant table while it is mutably borrowed");
			return None;
		};
		self.set_table_as(name, table)
	}

	/// Registers `table` under `id`. An empty `id` sets the default table.
	pub fn set_table_as(&mut self, id: StringHash32, table: SharedTable) -> Option<SharedTable> {
		if id.is_empty() {
			return self.set_default_table(table);
		}
		self.tables.insert(id, table)
	}

	pub fn remove_table(&mut self, id: StringHash32) -> Option<SharedTable> {
		if id.is_empty() {
			return self.default_table.take();
		}
		self.tables.remove(&id)
	}

	pub fn table(&self, id: StringHash32) -> Option<&SharedTable> {
		if id.is_empty() {
			return self.default_table.as_ref();
		}
		self.tables.get(&id)
	}

	/// Redirects every lookup of `from` to `to`. Aliases do not chain.
	pub fn alias(&mut self, from: TableKeyPair, to: TableKeyPair) {
		if from == to {
			self.aliases.remove(&from);
			return;
		}
		self.aliases.insert(from, to);
	}

	pub fn remove_alias(&mut self, from: TableKeyPair) -> Option<TableKeyPair> {
		self.aliases.remove(&from)
	}

	/// Answers reads of `key` with `getter`. Writes to `key` still go to its table.
	pub fn set_var(&mut self, key: TableKeyPair, getter: impl Fn(&C) -> Variant + 'static) {
		self.getters.insert(key, Box::new(getter));
	}

	pub fn remove_var(&mut self, key: TableKeyPair) -> bool {
		self.getters.remove(&key).is_some()
	}

	/// Drops every table, alias and computed variable.
	pub fn clear(&mut self) {
		self.default_table = None;
		self.tables.clear();
		self.aliases.clear();
		self.getters.clear();
	}
}

impl<C: ?Sized> Default for CustomResolver<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: ?Sized> VariantResolver for CustomResolver<C> {
	type Context = C;

	fn remap_key(&self, key: &mut TableKeyPair) {
		if let Some(target) = self.aliases.get(key) {
			*key = *target;
		}
	}

	fn try_get_table(&self, _cx: &C, table_id: StringHash32) -> Option<SharedTable> {
		self.table(table_id).cloned()
	}

	fn try_get_variant(&self, cx: &C, key: TableKeyPair) -> Option<Variant> {
		self.getters.get(&key).map(|getter| getter(cx))
	}
}

impl<C: ?Sized> fmt::Debug for CustomResolver<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CustomResolver")
			.field("default_table", &self.default_table.is_some())
			.field("tables", &self.tables.keys().collect::<Vec<_>>())
			.field("aliases", &self.aliases)
			.field("vars", &self.getters.keys().collect::<Vec<_>>())
			.finish()
	}
}

//! Hash-keyed variable tables with base-table fallback.
//!
//! # Lookup strategy
//!
//! Entries live in insertion order until [`VariantTable::optimize`] sorts them by hash value.
//! Small tables (three entries or fewer) are never sorted and always scanned linearly; larger
//! optimized tables use binary search. Any insert or delete drops the optimized flag, and
//! [`VariantTable::try_lookup`] re-optimizes lazily.
//!
//! # Base chain
//!
//! A table may hold a non-owning link to a base table. Only `try_lookup` (and the read-only
//! [`VariantTable::lookup`]) fall back to it; `get`, `set`, `delete` and `modify` touch this
//! table alone. Several tables may share one base, and writes to the base are visible to all
//! of them immediately. A base that has been dropped counts as no base.
//!
//! # Invariants
//!
//! - `optimized && len > 3` implies entries are sorted ascending by hash value.
//!   - Enforced in: [`VariantTable::optimize`], [`VariantTable::set`], [`VariantTable::delete`].
//!   - Failure symptom: binary search misses entries that a linear scan finds.
//! - The base chain never loops back to the table that owns it.
//!   - Enforced in: [`VariantTable::set_base`].
//!   - Failure symptom: unbounded recursion in `try_lookup`.

use std::cell::RefCell;
use std::fmt;
use std::ops::Index;
use std::ptr;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use varitab_strhash::StringHash32;

use crate::{ModifyOperator, TableError, Variant};

/// Tables at or below this size are searched linearly even when optimized.
pub const LINEAR_SCAN_MAX: usize = 3;
const INLINE_ENTRIES: usize = 4;

/// Shared, single-threaded handle to a table.
pub type SharedTable = Rc<RefCell<VariantTable>>;

/// Runs [`VariantTable::try_lookup`] through a shared handle.
///
/// Falls back to the non-reordering [`VariantTable::lookup`] when the table is already
/// borrowed, and answers `None` if it is mutably borrowed.
pub fn lookup_shared(table: &SharedTable, id: StringHash32) -> Option<Variant> {
	if let Ok(mut table) = table.try_borrow_mut() {
		return table.try_lookup(id);
	}
	match table.try_borrow() {
		Ok(table) => table.lookup(id),
		Err(_) => {
			tracing::error!(variable = ?id, "variant table is mutably borrowed during lookup");
			None
		}
	}
}

/// An identifier paired with its value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedVariant {
	pub id: StringHash32,
	pub value: Variant,
}

impl NamedVariant {
	pub const fn new(id: StringHash32, value: Variant) -> Self {
		Self { id, value }
	}
}

impl fmt::Display for NamedVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} = {}", self.id.to_debug_string(), self.value)
	}
}

/// Collection of named variant values.
pub struct VariantTable {
	name: StringHash32,
	entries: SmallVec<[NamedVariant; INLINE_ENTRIES]>,
	base: Option<Weak<RefCell<VariantTable>>>,
	optimized: bool,
}

impl VariantTable {
	pub fn new() -> Self {
		Self {
			name: StringHash32::NULL,
			entries: SmallVec::new(),
			base: None,
			optimized: true,
		}
	}

	pub fn named(name: StringHash32) -> Self {
		Self { name, ..Self::new() }
	}

	/// Creates a table that falls back to `base` on lookup misses.
	pub fn with_base(name: StringHash32, base: &SharedTable) -> Self {
		Self {
			name,
			base: Some(Rc::downgrade(base)),
			..Self::new()
		}
	}

	pub fn into_shared(self) -> SharedTable {
		Rc::new(RefCell::new(self))
	}

	pub fn name(&self) -> StringHash32 {
		self.name
	}

	pub fn set_name(&mut self, name: StringHash32) {
		self.name = name;
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.entries.capacity()
	}

	/// Grows or shrinks storage. Never drops below the current length.
	pub fn set_capacity(&mut self, capacity: usize) {
		let capacity = capacity.max(self.entries.len());
		if capacity != self.entries.capacity() {
			self.entries.grow(capacity);
		}
	}

	/// Returns the entry at `index` in storage order.
	pub fn entry(&self, index: usize) -> Option<&NamedVariant> {
		self.entries.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, NamedVariant> {
		self.entries.iter()
	}

	/// Whether entries are known to be in search order.
	pub fn is_optimized(&self) -> bool {
		self.optimized
	}

	/// Returns the value stored on this table, ignoring the base chain.
	pub fn get(&self, id: StringHash32) -> Variant {
		self.value_at(self.index_of(id))
	}

	/// Inserts or overwrites the value for `id`.
	pub fn set(&mut self, id: StringHash32, value: Variant) {
		self.set_at(self.index_of(id), id, value);
	}

	/// Returns if `id` exists on this table, ignoring the base chain.
	pub fn has(&self, id: StringHash32) -> bool {
		self.index_of(id).is_some()
	}

	/// Removes `id` by swapping the last entry into its slot.
	pub fn delete(&mut self, id: StringHash32) -> bool {
		match self.index_of(id) {
			Some(idx) => {
				self.entries.swap_remove(idx);
				self.optimized = false;
				true
			}
			None => false,
		}
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.optimized = true;
	}

	/// Sorts entries for binary search. Does nothing if already optimized.
	pub fn optimize(&mut self) {
		if self.optimized {
			return;
		}

		if self.entries.len() > LINEAR_SCAN_MAX {
			self.entries.sort_unstable_by_key(|entry| entry.id);
			tracing::debug!(table = %self.name, len = self.entries.len(), "sorted variant table");
		}
		self.optimized = true;
	}

	/// Looks `id` up on this table, then along the base chain.
	pub fn try_lookup(&mut self, id: StringHash32) -> Option<Variant> {
		self.optimize();

		if let Some(idx) = self.index_of(id) {
			return Some(self.entries[idx].value);
		}

		let base = self.base()?;
		lookup_shared(&base, id)
	}

	/// Same as [`VariantTable::try_lookup`] but never reorders entries.
	pub fn lookup(&self, id: StringHash32) -> Option<Variant> {
		if let Some(idx) = self.index_of(id) {
			return Some(self.entries[idx].value);
		}

		let base = self.base()?;
		let Ok(base) = base.try_borrow() else {
			tracing::error!(table = ?self.name, "base table is mutably borrowed during lookup");
			return None;
		};
		base.lookup(id)
	}

	/// Applies `operator` to the local value of `id` (null if absent) and stores the result.
	pub fn modify(&mut self, id: StringHash32, operator: ModifyOperator, operand: Variant) {
		let idx = self.index_of(id);
		let value = match operator {
			ModifyOperator::Set => operand,
			op => op.apply(self.value_at(idx), operand),
		};
		self.set_at(idx, id, value);
	}

	/// Returns the live base table, if any.
	pub fn base(&self) -> Option<SharedTable> {
		self.base.as_ref().and_then(Weak::upgrade)
	}

	/// Replaces the base table.
	///
	/// # Errors
	///
	/// Returns [`TableError::BaseCycle`] if `base` is this table or already reaches it through
	/// its own chain, and [`TableError::BaseBorrowed`] if the chain cannot be inspected. The
	/// current base is kept on error.
	pub fn set_base(&mut self, base: Option<&SharedTable>) -> Result<(), TableError> {
		let Some(base) = base else {
			self.base = None;
			return Ok(());
		};

		self.check_base_chain(base)?;
		self.base = Some(Rc::downgrade(base));
		Ok(())
	}

	fn check_base_chain(&self, base: &SharedTable) -> Result<(), TableError> {
		let this: *const VariantTable = self;
		let mut current = Some(Rc::clone(base));

		while let Some(table) = current {
			if ptr::eq(table.as_ptr(), this) {
				let base_name = base.try_borrow().map_or(self.name, |b| b.name);
				tracing::error!(table = ?self.name, base = ?base_name, "rejected cyclic base table");
				return Err(TableError::BaseCycle {
					table: self.name,
					base: base_name,
				});
			}
			let Ok(link) = table.try_borrow() else {
				return Err(TableError::BaseBorrowed { table: self.name });
			};
			current = link.base();
		}

		Ok(())
	}

	/// Position of `id` in storage order.
	///
	/// Binary search when optimized and larger than [`LINEAR_SCAN_MAX`], linear scan otherwise.
	pub fn index_of(&self, id: StringHash32) -> Option<usize> {
		if self.optimized && self.entries.len() > LINEAR_SCAN_MAX {
			return self.entries.binary_search_by_key(&id, |entry| entry.id).ok();
		}
		self.index_of_linear(id)
	}

	/// Position of `id` found by scanning every entry.
	pub fn index_of_linear(&self, id: StringHash32) -> Option<usize> {
		self.entries.iter().position(|entry| entry.id == id)
	}

	fn value_at(&self, idx: Option<usize>) -> Variant {
		idx.map_or(Variant::Null, |idx| self.entries[idx].value)
	}

	fn set_at(&mut self, idx: Option<usize>, id: StringHash32, value: Variant) {
		match idx {
			Some(idx) => self.entries[idx].value = value,
			None => {
				self.entries.push(NamedVariant::new(id, value));
				self.optimized = false;
			}
		}
	}

	fn base_name(&self) -> Option<StringHash32> {
		let base = self.base()?;
		base.try_borrow().ok().map(|b| b.name)
	}

	/// Multi-line dump of the table for logs.
	pub fn debug_string(&self) -> String {
		self.to_string()
	}
}

impl Default for VariantTable {
	fn default() -> Self {
		Self::new()
	}
}

impl Index<usize> for VariantTable {
	type Output = NamedVariant;

	fn index(&self, index: usize) -> &Self::Output {
		&self.entries[index]
	}
}

impl<'a> IntoIterator for &'a VariantTable {
	type Item = &'a NamedVariant;
	type IntoIter = std::slice::Iter<'a, NamedVariant>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Display for VariantTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Variant Table '{}', {} entries", self.name.to_debug_string(), self.len())?;
		for entry in self {
			write!(f, "\n  {entry}")?;
		}
		Ok(())
	}
}

impl fmt::Debug for VariantTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VariantTable")
			.field("name", &self.name)
			.field("entries", &self.entries.as_slice())
			.field("base", &self.base_name())
			.field("optimized", &self.optimized)
			.finish()
	}
}

//! Property tests for [`VariantTable`] lookup invariants.

use proptest::prelude::*;
use varitab_variant::{LINEAR_SCAN_MAX, StringHash32, Variant, VariantTable};

#[derive(Debug, Clone)]
enum Op {
	Set(u32, i32),
	Delete(u32),
	Optimize,
	Lookup(u32),
}

fn arb_op() -> impl Strategy<Value = Op> {
	// Small key space so sets, deletes and lookups collide often.
	prop_oneof![
		4 => (0u32..24, any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
		2 => (0u32..24).prop_map(Op::Delete),
		1 => Just(Op::Optimize),
		2 => (0u32..24).prop_map(Op::Lookup),
	]
}

fn key(k: u32) -> StringHash32 {
	// Spread keys so storage order and hash order differ.
	StringHash32::from_hash(k.wrapping_mul(0x9E37_79B9) | 1)
}

fn apply(table: &mut VariantTable, op: &Op) {
	match *op {
		Op::Set(k, v) => table.set(key(k), Variant::Int(v)),
		Op::Delete(k) => {
			table.delete(key(k));
		}
		Op::Optimize => table.optimize(),
		Op::Lookup(k) => {
			table.try_lookup(key(k));
		}
	}
}

proptest! {
	/// Binary search and linear scan agree on every key, present or absent, in any state.
	#[test]
	fn prop_index_of_matches_linear(ops in prop::collection::vec(arb_op(), 0..64)) {
		let mut table = VariantTable::new();
		for op in &ops {
			apply(&mut table, op);
			for k in 0..24 {
				prop_assert_eq!(table.index_of(key(k)), table.index_of_linear(key(k)));
			}
		}
	}

	/// Optimized tables larger than the scan threshold are sorted by hash value.
	#[test]
	fn prop_optimized_implies_sorted(ops in prop::collection::vec(arb_op(), 0..64)) {
		let mut table = VariantTable::new();
		for op in &ops {
			apply(&mut table, op);
			if table.is_optimized() && table.len() > LINEAR_SCAN_MAX {
				let ids: Vec<_> = table.iter().map(|e| e.id).collect();
				prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
			}
		}
	}

	/// A second optimize leaves the order untouched.
	#[test]
	fn prop_optimize_is_idempotent(ops in prop::collection::vec(arb_op(), 0..64)) {
		let mut table = VariantTable::new();
		for op in &ops {
			apply(&mut table, op);
		}

		table.optimize();
		let once: Vec<_> = table.iter().copied().collect();
		table.optimize();
		let twice: Vec<_> = table.iter().copied().collect();
		prop_assert_eq!(once, twice);
	}

	/// `try_lookup` agrees with `get` for keys stored locally.
	#[test]
	fn prop_try_lookup_agrees_with_get(ops in prop::collection::vec(arb_op(), 0..64)) {
		let mut table = VariantTable::new();
		for op in &ops {
			apply(&mut table, op);
		}
		for k in 0..24 {
			let expected = table.has(key(k)).then(|| table.get(key(k)));
			prop_assert_eq!(table.try_lookup(key(k)), expected);
		}
	}
}

//! Debug-only reverse lookup from hash values to the strings that produced them.
//!
//! # Availability
//!
//! The registry exists when [`REVERSE_LOOKUP_AVAILABLE`] is true: in debug builds, or when the
//! `reverse-lookup` feature is on. It starts enabled in that case. In other builds
//! [`enable_reverse_lookup`] refuses to turn it on and every lookup answers `[Unavailable]`.
//!
//! # Invariants
//!
//! - First writer wins: a hash that is already registered keeps its original string.
//! - Every collision (same hash, different string) is appended to the collision log and, for
//!   the global registry, reported once per store attempt through `tracing::error!`.
//! - No event is emitted while the global registry is locked.
//!   - Enforced in: `record`.
//!   - Failure symptom: a subscriber that formats a [`StringHash32`](crate::StringHash32)
//!     deadlocks every thread that hashes.
//!
//! # Concurrency
//!
//! The global registry sits behind a mutex; an atomic flag keeps hashing lock-free while the
//! registry is disabled.

use std::borrow::Cow;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

use crate::error::ReverseLookupError;
use crate::hash::{hash32, hash32_utf16};

/// Whether this build may keep a reverse-lookup registry at all.
pub const REVERSE_LOOKUP_AVAILABLE: bool = cfg!(any(debug_assertions, feature = "reverse-lookup"));

const UNAVAILABLE: &str = "[Unavailable]";
const INITIAL_CAPACITY: usize = 256;

/// Two distinct strings that hash to the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCollision {
	pub hash: u32,
	/// String registered first; it keeps answering reverse lookups.
	pub existing: Box<str>,
	/// String that was rejected.
	pub incoming: Box<str>,
}

/// Result of [`ReverseLookup::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
	/// Hash was new; string recorded.
	Inserted,
	/// Hash was already recorded for the same string.
	Existing,
	/// Hash was already recorded for a different string; the existing one was kept.
	Collision(HashCollision),
}

/// A `hash -> string` table with collision tracking.
#[derive(Debug, Default)]
pub struct ReverseLookup {
	entries: HashMap<u32, Box<str>>,
	collisions: Vec<HashCollision>,
}

impl ReverseLookup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: HashMap::with_capacity_and_hasher(capacity, Default::default()),
			collisions: Vec::new(),
		}
	}

	/// Records `text` under `hash`. The zero hash is never recorded.
	///
	/// Collisions are appended to the log and returned; reporting them is left to the caller.
	pub fn store(&mut self, hash: u32, text: &str) -> StoreOutcome {
		if hash == 0 {
			return StoreOutcome::Existing;
		}

		match self.entries.get(&hash) {
			Some(existing) if &**existing == text => StoreOutcome::Existing,
			Some(existing) => {
				let collision = HashCollision {
					hash,
					existing: existing.clone(),
					incoming: text.into(),
				};
				self.collisions.push(collision.clone());
				StoreOutcome::Collision(collision)
			}
			None => {
				self.entries.insert(hash, text.into());
				StoreOutcome::Inserted
			}
		}
	}

	pub fn get(&self, hash: u32) -> Option<&str> {
		self.entries.get(&hash).map(|s| &**s)
	}

	/// Resolves `hash` to display text: empty for `0`, `[Unknown]:<hash>` when unregistered.
	pub fn describe(&self, hash: u32) -> Cow<'static, str> {
		if hash == 0 {
			return Cow::Borrowed("");
		}
		match self.get(hash) {
			Some(text) => Cow::Owned(text.to_string()),
			None => Cow::Owned(format!("[Unknown]:{hash}")),
		}
	}

	pub fn collisions(&self) -> &[HashCollision] {
		&self.collisions
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drops every entry and the collision log.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.collisions.clear();
	}
}

static ENABLED: AtomicBool = AtomicBool::new(REVERSE_LOOKUP_AVAILABLE);
static REGISTRY: LazyLock<Mutex<ReverseLookup>> =
	LazyLock::new(|| Mutex::new(ReverseLookup::with_capacity(INITIAL_CAPACITY)));

/// Enables or disables the global registry.
///
/// Disabling drops everything recorded so far.
///
/// # Errors
///
/// Returns [`ReverseLookupError::Unavailable`] when enabling in a build without
/// [`REVERSE_LOOKUP_AVAILABLE`].
pub fn enable_reverse_lookup(enabled: bool) -> Result<(), ReverseLookupError> {
	if !REVERSE_LOOKUP_AVAILABLE {
		return if enabled { Err(ReverseLookupError::Unavailable) } else { Ok(()) };
	}

	let was_enabled = ENABLED.swap(enabled, Ordering::SeqCst);
	if was_enabled && !enabled {
		REGISTRY.lock().clear();
	}
	Ok(())
}

pub fn is_reverse_lookup_enabled() -> bool {
	REVERSE_LOOKUP_AVAILABLE && ENABLED.load(Ordering::Relaxed)
}

/// Clears the global registry. Does nothing while disabled.
pub fn clear_reverse_lookup() {
	if is_reverse_lookup_enabled() {
		REGISTRY.lock().clear();
	}
}

/// Returns the string registered for `hash`, or a placeholder.
pub fn reverse_lookup(hash: u32) -> Cow<'static, str> {
	if hash == 0 {
		return Cow::Borrowed("");
	}
	if !is_reverse_lookup_enabled() {
		return Cow::Borrowed(UNAVAILABLE);
	}
	REGISTRY.lock().describe(hash)
}

/// Snapshot of the collisions recorded since the last clear.
pub fn collisions() -> Vec<HashCollision> {
	if !is_reverse_lookup_enabled() {
		return Vec::new();
	}
	REGISTRY.lock().collisions().to_vec()
}

/// Canonical hashing entry point: hashes and, when enabled, registers `text`.
pub(crate) fn store(text: &str) -> u32 {
	let hash = hash32(text);
	if hash != 0 && is_reverse_lookup_enabled() {
		record(hash, text);
	}
	hash
}

pub(crate) fn store_utf16(units: &[u16]) -> u32 {
	let hash = hash32_utf16(units);
	if hash != 0 && is_reverse_lookup_enabled() {
		record(hash, &String::from_utf16_lossy(units));
	}
	hash
}

fn record(hash: u32, text: &str) {
	// The guard must be gone before the event fires: subscribers may hash or print identifiers.
	let outcome = REGISTRY.lock().store(hash, text);
	if let StoreOutcome::Collision(collision) = outcome {
		report_collision(&collision);
	}
}

fn report_collision(collision: &HashCollision) {
	tracing::error!(
		hash = format_args!("{:08X}", collision.hash),
		existing = %collision.existing,
		incoming = %collision.incoming,
		"string hash collision detected"
	);
}

#[cfg(test)]
mod tests;

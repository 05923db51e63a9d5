use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serial_test::serial;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::*;
use crate::StringHash32;

#[test]
fn store_is_first_writer_wins() {
	let mut lookup = ReverseLookup::new();
	assert_eq!(lookup.store(7, "first"), StoreOutcome::Inserted);
	assert_eq!(lookup.store(7, "first"), StoreOutcome::Existing);
	assert_eq!(
		lookup.store(7, "second"),
		StoreOutcome::Collision(HashCollision {
			hash: 7,
			existing: "first".into(),
			incoming: "second".into(),
		})
	);

	assert_eq!(lookup.get(7), Some("first"));
	assert_eq!(lookup.len(), 1);
}

#[test]
fn each_collision_is_recorded_once() {
	let mut lookup = ReverseLookup::new();
	lookup.store(hash32("costarring"), "costarring");
	lookup.store(hash32("liquid"), "liquid");

	assert_eq!(
		lookup.collisions(),
		&[HashCollision {
			hash: hash32("liquid"),
			existing: "costarring".into(),
			incoming: "liquid".into(),
		}]
	);
	assert_eq!(lookup.get(hash32("liquid")), Some("costarring"));
}

#[test]
fn zero_hash_is_never_stored() {
	let mut lookup = ReverseLookup::new();
	lookup.store(0, "");
	assert!(lookup.is_empty());
	assert_eq!(lookup.describe(0), "");
}

#[test]
fn unknown_hash_gets_sentinel() {
	let lookup = ReverseLookup::new();
	assert_eq!(lookup.describe(42), "[Unknown]:42");
}

#[test]
fn clear_drops_entries_and_collisions() {
	let mut lookup = ReverseLookup::with_capacity(4);
	lookup.store(1, "a");
	lookup.store(1, "b");
	lookup.clear();
	assert!(lookup.is_empty());
	assert!(lookup.collisions().is_empty());
}

#[test]
#[serial]
fn global_registry_records_canonical_hashes() {
	if !REVERSE_LOOKUP_AVAILABLE {
		assert_eq!(enable_reverse_lookup(true), Err(ReverseLookupError::Unavailable));
		assert!(!is_reverse_lookup_enabled());
		assert_eq!(reverse_lookup(hash32("gold")), "[Unavailable]");
		return;
	}

	enable_reverse_lookup(true).unwrap();
	clear_reverse_lookup();

	let gold = StringHash32::new("gold");
	assert_eq!(gold.to_debug_string(), "gold");
	assert_eq!(StringHash32::from_hash(0x1234).to_debug_string(), "[Unknown]:4660");
	assert_eq!(StringHash32::NULL.to_debug_string(), "");
}

#[test]
#[serial]
fn global_collision_keeps_first_string() {
	if !REVERSE_LOOKUP_AVAILABLE {
		return;
	}

	enable_reverse_lookup(true).unwrap();
	clear_reverse_lookup();

	let first = StringHash32::new("declinate");
	let second = StringHash32::new("macallums");
	assert_eq!(first, second);

	let log = collisions();
	assert_eq!(log.len(), 1);
	assert_eq!(&*log[0].existing, "declinate");
	assert_eq!(&*log[0].incoming, "macallums");
	assert_eq!(second.to_debug_string(), "declinate");

	clear_reverse_lookup();
}

#[test]
#[serial]
fn disabling_reports_unavailable() {
	if !REVERSE_LOOKUP_AVAILABLE {
		return;
	}

	enable_reverse_lookup(true).unwrap();
	let hash = StringHash32::new("player");
	enable_reverse_lookup(false).unwrap();

	assert!(!is_reverse_lookup_enabled());
	assert_eq!(hash.to_debug_string(), "[Unavailable]");
	assert!(collisions().is_empty());

	enable_reverse_lookup(true).unwrap();
	assert_eq!(hash.to_debug_string(), format!("[Unknown]:{}", hash.hash_value()));
}

/// Reads the registry from inside every event it sees.
struct RegistryReadingLayer;

impl<S: Subscriber> Layer<S> for RegistryReadingLayer {
	fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
		let _ = reverse_lookup(1);
		let _ = StringHash32::new("layer-side hash");
	}
}

#[test]
#[serial]
fn collision_event_can_read_the_registry() {
	if !REVERSE_LOOKUP_AVAILABLE {
		return;
	}
	enable_reverse_lookup(true).unwrap();
	clear_reverse_lookup();

	let (done, finished) = mpsc::channel();
	thread::spawn(move || {
		let subscriber = tracing_subscriber::registry().with(RegistryReadingLayer);
		tracing::subscriber::with_default(subscriber, || {
			let first = StringHash32::new("costarring");
			let second = StringHash32::new("liquid");
			done.send(first == second).unwrap();
		});
	});

	let collided = finished
		.recv_timeout(Duration::from_secs(5))
		.expect("hashing stalled while a subscriber handled the collision event");
	assert!(collided);
	assert_eq!(collisions().len(), 1);
	assert_eq!(reverse_lookup(hash32("liquid")), "costarring");

	clear_reverse_lookup();
}

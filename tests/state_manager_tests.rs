//! Reactive state integration tests
//!
//! Success Criteria:
//! 1. Buffered handles return their stored value without blocking
//! 2. Live handles pair each `get` with a published `set`
//! 3. Stopping the manager releases every parked caller
//! 4. Closed handles leave the registry; registration indices are never reused
//! 5. A started runtime lets callbacks drive state into re-rendered subtrees
//!
//! Test Categories:
//! - Buffered mode: 2 tests
//! - Live mode: 3 tests
//! - Shutdown: 3 tests
//! - Runtime flow: 1 test
//! - Property-based: 1 test

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel;
use proptest::prelude::*;
use rstest::*;
use tagtree::attribute::on_click;
use tagtree::element::html::{button, div, p};
use tagtree::element::{Element, text};
use tagtree::host::MemorySurface;
use tagtree::{App, Runtime, StateError, StateManager};

const WAIT: Duration = Duration::from_secs(5);

#[fixture]
fn manager() -> StateManager {
	StateManager::new()
}

fn eventually(mut condition: impl FnMut() -> bool) -> bool {
	let deadline = Instant::now() + WAIT;
	while Instant::now() < deadline {
		if condition() {
			return true;
		}
		thread::sleep(Duration::from_millis(5));
	}
	condition()
}

// ============================================================================
// Buffered mode (2 tests)
// ============================================================================

/// A fresh handle returns its initial value, repeatedly
#[rstest]
fn test_buffered_get_returns_initial(manager: StateManager) {
	let padding = manager.register(20i64).unwrap();

	assert_eq!(padding.get(), 20);
	assert_eq!(padding.get(), 20);
	assert_eq!(manager.len(), 1);
}

/// Buffered `set` replaces the stored value without needing a reader
#[rstest]
fn test_buffered_set_replaces_value(manager: StateManager) {
	let label = manager.register(String::from("idle")).unwrap();

	label.set("busy".to_string()).unwrap();
	label.set("done".to_string()).unwrap();

	assert!(eventually(|| label.get() == "done"));
	assert!(!label.is_started());
}

// ============================================================================
// Live mode (3 tests)
// ============================================================================

/// A parked `get` receives the value of the next `set`
#[rstest]
fn test_live_get_receives_next_set(manager: StateManager) {
	let padding = manager.register(20i64).unwrap();
	manager.start();

	let (tx, rx) = channel::bounded(1);
	let reader = padding.clone();
	let consumer = thread::spawn(move || {
		tx.send(reader.get()).unwrap();
	});

	padding.set(21).unwrap();

	assert_eq!(rx.recv_timeout(WAIT), Ok(21));
	consumer.join().unwrap();
}

/// One `set` is consumed by exactly one of two parked readers
#[rstest]
fn test_live_set_pairs_with_exactly_one_reader(manager: StateManager) {
	let padding = manager.register(20i64).unwrap();
	manager.start();

	let (tx, rx) = channel::bounded(2);
	let readers: Vec<_> = (0..2)
		.map(|_| {
			let reader = padding.clone();
			let tx = tx.clone();
			thread::spawn(move || {
				tx.send(reader.get()).unwrap();
			})
		})
		.collect();
	thread::sleep(Duration::from_millis(20));

	padding.set(21).unwrap();

	assert_eq!(rx.recv_timeout(WAIT), Ok(21));
	assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

	manager.stop();
	assert_eq!(rx.recv_timeout(WAIT), Ok(21));
	for reader in readers {
		reader.join().unwrap();
	}
}

/// Handles registered after `start` stay buffered
#[rstest]
fn test_late_registration_is_buffered(manager: StateManager) {
	let early = manager.register(1u8).unwrap();
	manager.start();
	let late = manager.register(2u8).unwrap();

	assert!(early.is_started());
	assert!(!late.is_started());
	assert_eq!(late.get(), 2);
}

// ============================================================================
// Shutdown (3 tests)
// ============================================================================

/// Stop wakes a parked reader with the last stored value
#[rstest]
fn test_stop_releases_parked_reader(manager: StateManager) {
	let padding = manager.register(20i64).unwrap();
	manager.start();

	let (tx, rx) = channel::bounded(1);
	let reader = padding.clone();
	let consumer = thread::spawn(move || {
		tx.send(reader.get()).unwrap();
	});
	assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

	manager.stop();

	assert_eq!(rx.recv_timeout(WAIT), Ok(20));
	consumer.join().unwrap();
	assert_eq!(padding.set(5), Err(StateError::Stopped));
	assert_eq!(manager.register(0i64).unwrap_err(), StateError::Stopped);
}

/// Closing a handle deregisters it and rejects further writes
#[rstest]
fn test_close_deregisters(manager: StateManager) {
	let first = manager.register(0i64).unwrap();
	let second = manager.register(0i64).unwrap();

	first.close();

	assert!(first.is_closed());
	assert_eq!(first.set(1), Err(StateError::Closed));
	assert!(eventually(|| !manager.contains(first.id())));
	assert!(manager.contains(second.id()));
	assert_eq!(manager.len(), 1);
}

/// Indices keep increasing after handles leave the registry
#[rstest]
fn test_registration_indices_not_reused(manager: StateManager) {
	let a = manager.register(()).unwrap();
	let b = manager.register(()).unwrap();
	a.close();
	b.close();
	assert!(eventually(|| manager.is_empty()));

	let c = manager.register(()).unwrap();

	assert!(c.id() > b.id());
	assert!(b.id() > a.id());
}

// ============================================================================
// Runtime flow (1 test)
// ============================================================================

/// A click publishes a value; a watcher re-renders the label with it
#[rstest]
fn test_click_drives_state_into_render() {
	let app = App::new();
	let clicks = app.use_state(0i64).unwrap();
	let label = p([]).compose([text(clicks.get().to_string())]);

	let producer = clicks.clone();
	let clicker = button([on_click(move || {
		let _ = producer.set(1);
	})])
	.compose([text("+1")]);
	let app = app.use_element(div([]).compose([clicker.clone(), label.clone()]));

	let surface = Arc::new(MemorySurface::new());
	let runtime = Runtime::new(app, Arc::clone(&surface));
	runtime.mount().unwrap();
	assert!(clicks.is_started());

	let (done_tx, done_rx) = channel::bounded(1);
	let watcher = {
		let renderer = runtime.renderer().clone();
		let clicks = clicks.clone();
		let label = label.clone();
		thread::spawn(move || {
			let value = clicks.get();
			label.write().append_child(text(value.to_string()));
			renderer.update(&label).unwrap();
			done_tx.send(value).unwrap();
		})
	};

	let button_node = clicker.read().host_handle().unwrap();
	assert_eq!(surface.dispatch(button_node, "click"), 1);

	assert_eq!(done_rx.recv_timeout(WAIT), Ok(1));
	watcher.join().unwrap();
	let label_node = label.read().host_handle().unwrap();
	assert_eq!(surface.text_content(label_node), "1");

	runtime.handle().stop();
	assert!(runtime.app().state_manager().is_stopped());
}

// ============================================================================
// Property-based Tests (1 test)
// ============================================================================

/// In buffered mode the last write wins
#[rstest]
fn test_property_buffered_last_write_wins() {
	proptest!(ProptestConfig::with_cases(16), |(values in proptest::collection::vec(any::<i32>(), 1..8))| {
		let manager = StateManager::new();
		let state = manager.register(0i32).unwrap();
		for value in &values {
			prop_assert_eq!(state.set(*value), Ok(()));
		}
		let last = *values.last().unwrap();
		prop_assert!(eventually(|| state.get() == last));
		manager.stop();
	});
}

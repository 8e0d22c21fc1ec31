//! Reactive state
//!
//! A [`State`] is a value shared between the UI and background producers. It
//! has two modes:
//!
//! - **Buffered** (before [`StateManager::start`]): [`State::get`] returns the
//!   last stored value without blocking.
//! - **Live** (after start): [`State::get`] blocks until a new value has been
//!   published, then consumes it.
//!
//! [`State::set`] is a rendezvous in both modes: it hands the value to the
//! handle's listener over a zero-capacity channel and returns once the
//! listener has taken it. The listener stores the value and, in live mode,
//! publishes it to exactly one waiting or future `get`.
//!
//! # Architecture
//!
//! Every handle owns a dedicated listener thread. The manager keeps the
//! handles in a registry keyed by a registration index that is never reused.
//! [`StateManager::stop`] disconnects a shared cancellation channel: listeners
//! exit, parked `get` calls return the last stored value and parked `set`
//! calls return [`StateError::Stopped`]. [`State::close`] disconnects one
//! handle; its listener removes it from the registry. Dropping the last
//! manager clone disconnects the cancellation channel as well and has the
//! same effect as `stop`.
//!
//! Listener threads need OS threads, so registration fails with
//! [`StateError::ListenerSpawn`] on targets without them.
//!
//! # Example
//!
//! ```ignore
//! let manager = StateManager::new();
//! let clicks = manager.register(0i64)?;
//! assert_eq!(clicks.get(), 0);
//!
//! manager.start();
//! let producer = clicks.clone();
//! std::thread::spawn(move || producer.set(1));
//! assert_eq!(clicks.get(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use crossbeam::select;
use parking_lot::{Condvar, Mutex, RwLock};
use thiserror::Error;

use crate::{debug_log, info_log, warn_log};

/// Errors raised by reactive state handles and their manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
	/// The listener thread could not be started.
	#[error("failed to spawn state listener: {0}")]
	ListenerSpawn(String),
	/// The handle was closed.
	#[error("state handle is closed")]
	Closed,
	/// The manager was stopped.
	#[error("state manager is stopped")]
	Stopped,
}

struct Slot<T> {
	value: T,
	started: bool,
	fresh: bool,
	released: bool,
}

struct StateCell<T> {
	id: u64,
	slot: Mutex<Slot<T>>,
	published: Condvar,
	sender: Mutex<Option<Sender<T>>>,
	cancel: Receiver<()>,
}

impl<T> StateCell<T> {
	fn is_cancelled(&self) -> bool {
		matches!(self.cancel.try_recv(), Err(TryRecvError::Disconnected))
	}

	fn publish(&self, value: T) {
		let mut slot = self.slot.lock();
		slot.value = value;
		slot.fresh = slot.started;
		drop(slot);
		self.published.notify_all();
	}
}

/// Registry view of a handle, independent of its value type.
trait ManagedState: Send + Sync {
	fn mark_started(&self);
	fn release(&self);
}

impl<T: Send> ManagedState for StateCell<T> {
	fn mark_started(&self) {
		let mut slot = self.slot.lock();
		slot.started = true;
		slot.fresh = false;
	}

	fn release(&self) {
		self.slot.lock().released = true;
		self.published.notify_all();
	}
}

/// Handle to one reactive value. Clones share the value.
pub struct State<T> {
	cell: Arc<StateCell<T>>,
}

impl<T> Clone for State<T> {
	fn clone(&self) -> Self {
		Self {
			cell: Arc::clone(&self.cell),
		}
	}
}

impl<T> fmt::Debug for State<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slot = self.cell.slot.lock();
		f.debug_struct("State")
			.field("id", &self.cell.id)
			.field("started", &slot.started)
			.field("released", &slot.released)
			.finish()
	}
}

impl<T: Clone + Send + 'static> State<T> {
	/// Registration index within the manager.
	pub fn id(&self) -> u64 {
		self.cell.id
	}

	/// Whether the handle is in live mode.
	pub fn is_started(&self) -> bool {
		self.cell.slot.lock().started
	}

	/// Whether [`close`](Self::close) has been called.
	pub fn is_closed(&self) -> bool {
		self.cell.sender.lock().is_none()
	}

	/// Reads the value.
	///
	/// Buffered: returns the stored value immediately. Live: blocks until a
	/// value is published and consumes it. Once the handle is closed or its
	/// manager stopped, returns the stored value without blocking.
	pub fn get(&self) -> T {
		let mut slot = self.cell.slot.lock();
		if !slot.started {
			return slot.value.clone();
		}
		while !slot.fresh && !slot.released {
			self.cell.published.wait(&mut slot);
		}
		slot.fresh = false;
		slot.value.clone()
	}

	/// Hands `value` to the listener, blocking until it has been taken.
	///
	/// On error the value is dropped.
	pub fn set(&self, value: T) -> Result<(), StateError> {
		if self.cell.is_cancelled() {
			return Err(StateError::Stopped);
		}
		let sender = self
			.cell
			.sender
			.lock()
			.clone()
			.ok_or(StateError::Closed)?;

		select! {
			send(sender, value) -> sent => sent.map_err(|_| {
				if self.cell.is_cancelled() {
					StateError::Stopped
				} else {
					StateError::Closed
				}
			}),
			recv(self.cell.cancel) -> _ => {
				warn_log!("state {}: value dropped, manager stopped", self.cell.id);
				Err(StateError::Stopped)
			}
		}
	}

	/// Disconnects the handle. The listener exits and the manager forgets it.
	///
	/// Closing is irreversible; later `set` calls fail with
	/// [`StateError::Closed`].
	pub fn close(&self) {
		self.cell.sender.lock().take();
	}
}

struct ManagerInner {
	states: RwLock<BTreeMap<u64, Arc<dyn ManagedState>>>,
	next_id: AtomicU64,
	cancel_tx: Mutex<Option<Sender<()>>>,
	cancel_rx: Receiver<()>,
	stopped: AtomicBool,
}

/// Registry of reactive state handles and their listeners.
#[derive(Clone)]
pub struct StateManager {
	inner: Arc<ManagerInner>,
}

impl Default for StateManager {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for StateManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StateManager")
			.field("states", &self.len())
			.field("stopped", &self.is_stopped())
			.finish()
	}
}

impl StateManager {
	pub fn new() -> Self {
		let (cancel_tx, cancel_rx) = channel::bounded(0);
		Self {
			inner: Arc::new(ManagerInner {
				states: RwLock::new(BTreeMap::new()),
				next_id: AtomicU64::new(0),
				cancel_tx: Mutex::new(Some(cancel_tx)),
				cancel_rx,
				stopped: AtomicBool::new(false),
			}),
		}
	}

	/// Registers a buffered handle holding `initial` and starts its listener.
	pub fn register<T: Clone + Send + 'static>(
		&self,
		initial: T,
	) -> Result<State<T>, StateError> {
		if self.is_stopped() {
			return Err(StateError::Stopped);
		}

		let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
		let (sender, receiver) = channel::bounded(0);
		let cell = Arc::new(StateCell {
			id,
			slot: Mutex::new(Slot {
				value: initial,
				started: false,
				fresh: false,
				released: false,
			}),
			published: Condvar::new(),
			sender: Mutex::new(Some(sender)),
			cancel: self.inner.cancel_rx.clone(),
		});

		self.inner
			.states
			.write()
			.insert(id, Arc::clone(&cell) as Arc<dyn ManagedState>);

		let listener_cell = Arc::clone(&cell);
		let manager = Arc::downgrade(&self.inner);
		let spawned = thread::Builder::new()
			.name(format!("tagtree-state-{}", id))
			.spawn(move || listen(listener_cell, receiver, manager));
		if let Err(err) = spawned {
			self.inner.states.write().remove(&id);
			return Err(StateError::ListenerSpawn(err.to_string()));
		}

		if self.is_stopped() {
			cell.release();
		}
		debug_log!("state {} registered", id);
		Ok(State { cell })
	}

	/// Switches every registered handle to live mode.
	///
	/// Handles registered afterwards start buffered.
	pub fn start(&self) {
		let states = self.inner.states.read();
		for state in states.values() {
			state.mark_started();
		}
		info_log!("state manager started with {} handles", states.len());
	}

	/// Cancels every listener and releases parked callers. Idempotent.
	pub fn stop(&self) {
		let Some(cancel) = self.inner.cancel_tx.lock().take() else {
			return;
		};
		drop(cancel);
		self.inner.stopped.store(true, Ordering::SeqCst);
		for state in self.inner.states.read().values() {
			state.release();
		}
		info_log!("state manager stopped");
	}

	pub fn is_stopped(&self) -> bool {
		self.inner.stopped.load(Ordering::SeqCst)
	}

	/// Number of registered handles.
	pub fn len(&self) -> usize {
		self.inner.states.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.states.read().is_empty()
	}

	/// Whether a handle with this registration index is still registered.
	pub fn contains(&self, id: u64) -> bool {
		self.inner.states.read().contains_key(&id)
	}
}

fn listen<T: Send + 'static>(
	cell: Arc<StateCell<T>>,
	receiver: Receiver<T>,
	manager: Weak<ManagerInner>,
) {
	let id = cell.id;
	debug_log!("state {} listener running", id);
	loop {
		let message = select! {
			recv(cell.cancel) -> _ => None,
			recv(receiver) -> message => Some(message),
		};
		match message {
			Some(Ok(value)) => cell.publish(value),
			Some(Err(_)) => break,
			None => {
				cell.release();
				debug_log!("state {} listener cancelled", id);
				return;
			}
		}
	}

	cell.release();
	if let Some(inner) = manager.upgrade() {
		inner.states.write().remove(&id);
	}
	info_log!("state {} closed and deregistered", id);
}

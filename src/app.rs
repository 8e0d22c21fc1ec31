//! Application root and runtime lifecycle
//!
//! An [`App`] pairs the root element with the [`StateManager`] its reactive
//! values are registered with. A [`Runtime`] mounts the app onto a host
//! surface and wires the lifecycle hooks:
//!
//! 1. [`Runtime::mount`] builds the tree; the renderer then fires `loaded`
//!    and `state_manager_start`, which switches state to live mode.
//! 2. [`RuntimeHandle::stop`] is the process-level stop signal. It fires
//!    `state_manager_stop`, which stops the manager, and wakes
//!    [`Runtime::run`].
//!
//! ## Example
//!
//! ```ignore
//! let app = App::new();
//! let clicks = app.use_state(0i64)?;
//! let app = app.use_element(div([]).compose([textf!("{} clicks", clicks.get())]));
//!
//! let runtime = Runtime::new(app, Arc::new(MemorySurface::new()));
//! let handle = runtime.handle();
//! std::thread::spawn(move || handle.stop());
//! runtime.run()?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::config::RenderConfig;
use crate::element::ElementRef;
use crate::host::{HostSurface, NodeHandle};
use crate::info_log;
use crate::renderer::{RenderError, Renderer};
use crate::state::{State, StateError, StateManager};

/// Host-environment lifecycle notifications.
///
/// Every method defaults to doing nothing.
pub trait LifecycleHooks: Send + Sync {
	/// The first full build is attached.
	fn loaded(&self) {}

	/// Reactive state may start delivering live updates.
	fn state_manager_start(&self) {}

	/// The process-level stop signal fired.
	fn state_manager_stop(&self) {}
}

/// Errors raised by [`Runtime`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
	/// The app has no root element.
	#[error("app has no root element; call `App::use_element` first")]
	NoElement,
	#[error(transparent)]
	Render(#[from] RenderError),
}

/// Root element plus the state manager its reactive values live in.
#[derive(Default)]
pub struct App {
	element: Option<ElementRef>,
	state_manager: StateManager,
}

impl App {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a reactive value with the app's manager.
	///
	/// Fails with [`StateError::ListenerSpawn`] where threads cannot be
	/// spawned, which includes `wasm32` builds without thread support.
	pub fn use_state<T: Clone + Send + 'static>(
		&self,
		initial: T,
	) -> Result<State<T>, StateError> {
		self.state_manager.register(initial)
	}

	/// Sets the root element.
	pub fn use_element(mut self, element: ElementRef) -> Self {
		self.element = Some(element);
		self
	}

	pub fn element(&self) -> Option<&ElementRef> {
		self.element.as_ref()
	}

	pub fn state_manager(&self) -> &StateManager {
		&self.state_manager
	}
}

struct RuntimeHooks {
	manager: StateManager,
	loaded: AtomicBool,
	extra: RwLock<Option<Arc<dyn LifecycleHooks>>>,
}

impl RuntimeHooks {
	fn extra(&self) -> Option<Arc<dyn LifecycleHooks>> {
		self.extra.read().clone()
	}
}

impl LifecycleHooks for RuntimeHooks {
	fn loaded(&self) {
		self.loaded.store(true, Ordering::SeqCst);
		if let Some(extra) = self.extra() {
			extra.loaded();
		}
	}

	fn state_manager_start(&self) {
		self.manager.start();
		if let Some(extra) = self.extra() {
			extra.state_manager_start();
		}
	}

	fn state_manager_stop(&self) {
		self.manager.stop();
		if let Some(extra) = self.extra() {
			extra.state_manager_stop();
		}
	}
}

/// Cloneable stop signal for a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
	stop_tx: Arc<Mutex<Option<Sender<()>>>>,
	stop_rx: Receiver<()>,
	hooks: Arc<RuntimeHooks>,
}

impl RuntimeHandle {
	/// Fires the stop signal. Idempotent.
	pub fn stop(&self) {
		let Some(stop) = self.stop_tx.lock().take() else {
			return;
		};
		drop(stop);
		self.hooks.state_manager_stop();
		info_log!("runtime stopped");
	}

	pub fn is_stopped(&self) -> bool {
		self.stop_tx.lock().is_none()
	}

	/// Blocks until [`stop`](Self::stop) is called.
	pub fn wait(&self) {
		let _ = self.stop_rx.recv();
	}
}

/// Mounts an [`App`] onto a host surface and drives its lifecycle.
pub struct Runtime<H: HostSurface> {
	app: App,
	renderer: Renderer<H>,
	handle: RuntimeHandle,
}

impl<H: HostSurface> Runtime<H> {
	pub fn new(app: App, host: Arc<H>) -> Self {
		let hooks = Arc::new(RuntimeHooks {
			manager: app.state_manager.clone(),
			loaded: AtomicBool::new(false),
			extra: RwLock::new(None),
		});
		let (stop_tx, stop_rx) = channel::bounded(0);
		let renderer =
			Renderer::new(host).with_hooks(Arc::clone(&hooks) as Arc<dyn LifecycleHooks>);
		Self {
			app,
			renderer,
			handle: RuntimeHandle {
				stop_tx: Arc::new(Mutex::new(Some(stop_tx))),
				stop_rx,
				hooks,
			},
		}
	}

	pub fn with_config(mut self, config: RenderConfig) -> Self {
		self.renderer = self.renderer.with_config(config);
		self
	}

	/// Additional hooks, fired after the runtime's own handling.
	pub fn with_hooks(self, hooks: Arc<dyn LifecycleHooks>) -> Self {
		*self.handle.hooks.extra.write() = Some(hooks);
		self
	}

	pub fn app(&self) -> &App {
		&self.app
	}

	/// Renderer bound to this runtime's surface, for updates from callbacks.
	pub fn renderer(&self) -> &Renderer<H> {
		&self.renderer
	}

	pub fn handle(&self) -> RuntimeHandle {
		self.handle.clone()
	}

	/// Whether the `loaded` hook has fired.
	pub fn is_loaded(&self) -> bool {
		self.handle.hooks.loaded.load(Ordering::SeqCst)
	}

	/// Builds the app's root element under the surface root.
	pub fn mount(&self) -> Result<NodeHandle, RuntimeError> {
		let root = self.app.element().ok_or(RuntimeError::NoElement)?;
		Ok(self.renderer.build(root)?)
	}

	/// Mounts the app and blocks until the stop signal fires.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn run(&self) -> Result<(), RuntimeError> {
		self.mount()?;
		self.handle.wait();
		Ok(())
	}
}

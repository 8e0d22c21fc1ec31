//! tagtree - element trees projected onto a host document
//!
//! Applications describe their UI as a tree of host-independent element
//! descriptors, then let a renderer project that tree onto a host surface
//! (the browser document on wasm32, an in-memory surface elsewhere).
//! Background producers push values through reactive state handles, and the
//! application re-projects the affected subtree.
//!
//! ## Architecture
//!
//! - [`attribute`]: typed attribute constructors (`style`, `href`, `on_click`, ...)
//! - [`element`]: element variants, the HTML kind catalog and the composer
//! - [`binder`]: name-based field binding and the rendered field projection
//! - [`control`]: conditional and list composition
//! - [`host`]: the host-surface bridge and its implementations
//! - [`renderer`]: tree builder and full-subtree reconciler
//! - [`state`]: rendezvous-style reactive state and its manager
//! - [`app`]: application root, runtime and lifecycle hooks
//! - [`config`]: renderer settings
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tagtree::prelude::*;
//!
//! let app = App::new();
//! let padding = app.use_state(20i64)?;
//!
//! let app = app.use_element(div([style!("padding: ", padding.get(), "px;")]).compose([
//!     when(false, [text("hidden")]).otherwise([text("shown")]).value(),
//!     each(["a", "b"], |_, item| p([]).compose([text(item)])),
//!     button([on_click(move || info_log!("clicked"))]).compose([text("Hello World!")]),
//! ]));
//!
//! let runtime = Runtime::new(app, Arc::new(MemorySurface::new()));
//! runtime.mount()?;
//! ```
//!
//! ## Targets
//!
//! Reactive state runs one listener thread per handle. On `wasm32` without
//! thread support, [`StateManager::register`] and therefore
//! [`App::use_state`] return [`StateError::ListenerSpawn`]; element trees,
//! the renderer and `DomSurface` still work there.

pub mod app;
pub mod attribute;
pub mod binder;
pub mod callback;
pub mod config;
pub mod control;
pub mod element;
pub mod host;
pub mod logging;
pub mod renderer;
pub mod state;

// Unified prelude for simplified imports
pub mod prelude;

// Re-export commonly used types
pub use app::{App, LifecycleHooks, Runtime, RuntimeError, RuntimeHandle};
pub use attribute::{AttrValue, Attribute, custom_attr};
pub use binder::{BindError, FieldMap, Fields, bind, fields_to_map};
pub use callback::{Callback, IntoCallback};
pub use config::{ConfigError, RenderConfig, UnknownKindPolicy};
pub use control::{each, when};
pub use element::{
	BasicElement, Composer, CustomElement, Element, ElementRef, Fragment, Placeholder, Shape,
	Tagged, Text, custom, fragment, none, share, slice, text,
};
pub use host::{HostError, HostSurface, MemorySurface, NodeHandle};
#[cfg(target_arch = "wasm32")]
pub use host::DomSurface;
pub use renderer::{RenderError, Renderer};
pub use state::{State, StateError, StateManager};

// Logging macros are automatically exported via #[macro_export]
// Users can access them as: tagtree::debug_log!, tagtree::info_log!, etc.
#[doc(hidden)]
pub use tracing as __tracing;

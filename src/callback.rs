//! Callback types and handler conversion traits.
//!
//! Event slots on elements hold zero-argument callbacks. Any event argument the
//! host provides is discarded before the callback runs.
//!
//! ## Example
//!
//! ```ignore
//! use tagtree::{Callback, attribute::on_click};
//!
//! let handle_click = Callback::new(|| {
//!     info_log!("Button clicked!");
//! });
//!
//! let button = button([on_click(handle_click)]).compose([text("Click me")]);
//! ```

use std::sync::Arc;

/// A cloneable, thread-safe, zero-argument callback.
///
/// `Callback` wraps a closure in an `Arc`, so every clone shares the same
/// closure. Elements are shared across threads (reactive-state producers may
/// live anywhere), so the closure must be `Send + Sync`.
pub struct Callback {
	inner: Arc<dyn Fn() + Send + Sync + 'static>,
}

impl Callback {
	/// Creates a new Callback from a function or closure.
	///
	/// # Example
	///
	/// ```ignore
	/// let handler = Callback::new(|| {
	///     // Handle event
	/// });
	/// ```
	pub fn new<F>(f: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Calls the callback.
	pub fn call(&self) {
		(self.inner)()
	}

	/// Returns true if both callbacks share the same closure.
	pub fn ptr_eq(&self, other: &Callback) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Clone for Callback {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl std::fmt::Debug for Callback {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

/// Trait for converting handler types to [`Callback`].
///
/// Implemented for:
/// - Closures taking no arguments
/// - [`Callback`] (identity conversion)
///
/// The `on_*` attribute constructors use this trait so both inline closures
/// and shared callbacks can be passed.
pub trait IntoCallback {
	/// Converts self into a [`Callback`].
	fn into_callback(self) -> Callback;
}

impl<F> IntoCallback for F
where
	F: Fn() + Send + Sync + 'static,
{
	fn into_callback(self) -> Callback {
		Callback::new(self)
	}
}

impl IntoCallback for Callback {
	fn into_callback(self) -> Callback {
		self
	}
}

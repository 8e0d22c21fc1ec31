//! Host-surface bridge
//!
//! The renderer never touches real visual nodes. It talks to a
//! [`HostSurface`], which owns the nodes and hands out opaque
//! [`NodeHandle`]s. Two surfaces ship with the crate:
//!
//! - [`MemorySurface`]: an in-memory node arena with inspection and event
//!   dispatch, available on every target.
//! - `DomSurface` (wasm32 only): the browser document through `web-sys`.

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod dom;

use std::fmt;

use thiserror::Error;

use crate::callback::Callback;

pub use memory::MemorySurface;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;

/// Opaque reference to one node on a host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
	/// Wraps a surface-specific node id.
	pub const fn new(id: u64) -> Self {
		Self(id)
	}

	/// The surface-specific node id.
	pub const fn id(self) -> u64 {
		self.0
	}
}

impl fmt::Display for NodeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Errors reported by a host surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	/// The surface cannot create nodes of this kind.
	#[error("host cannot create node of kind `{0}`")]
	UnknownKind(String),
	/// The handle does not refer to a live node on this surface.
	#[error("no host node {0}")]
	UnknownNode(NodeHandle),
	/// The surface rejected the operation.
	#[error("host operation failed: {0}")]
	Rejected(String),
}

/// Rendering environment that owns real visual nodes.
///
/// Methods take `&self`: event callbacks run while the renderer may still
/// hold the surface, so implementations use interior mutability.
pub trait HostSurface: Send + Sync {
	/// Top-level container that `build` attaches trees under.
	fn root(&self) -> NodeHandle;

	/// Creates a detached node of `kind`.
	fn create_node(&self, kind: &str) -> Result<NodeHandle, HostError>;

	/// Sets a string property, overwriting any previous value.
	fn set_property(&self, node: NodeHandle, name: &str, value: &str) -> Result<(), HostError>;

	/// Registers `callback` for `event` on `node`. Event arguments are discarded.
	fn add_event_listener(
		&self,
		node: NodeHandle,
		event: &str,
		callback: Callback,
	) -> Result<(), HostError>;

	/// Appends `child` as the last child of `parent`, detaching it from any
	/// previous parent.
	fn append_child(&self, parent: NodeHandle, child: NodeHandle) -> Result<(), HostError>;

	/// Detaches `child` from `parent`.
	fn remove_child(&self, parent: NodeHandle, child: NodeHandle) -> Result<(), HostError>;

	/// First child of `parent`, if any.
	fn first_child(&self, parent: NodeHandle) -> Result<Option<NodeHandle>, HostError>;

	/// Replaces the content of `node` with a single text child.
	fn set_text(&self, node: NodeHandle, text: &str) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_node_handle_display() {
		assert_eq!(NodeHandle::new(7).to_string(), "#7");
		assert_eq!(NodeHandle::new(7).id(), 7);
	}

	#[rstest]
	fn test_host_error_messages() {
		assert_eq!(
			HostError::UnknownKind("blink".into()).to_string(),
			"host cannot create node of kind `blink`"
		);
		assert_eq!(
			HostError::UnknownNode(NodeHandle::new(3)).to_string(),
			"no host node #3"
		);
	}
}

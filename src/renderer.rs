//! Tree builder and reconciler
//!
//! [`Renderer::build`] projects an element tree onto a [`HostSurface`] under
//! the surface root. [`Renderer::update`] re-projects one already built
//! element: its properties are re-applied, its host children are removed and
//! its children are rebuilt from scratch. There is no diffing; update cost is
//! proportional to the size of the subtree.
//!
//! ## Projection rules
//!
//! | Shape | Host effect | Node returned |
//! |-------|-------------|---------------|
//! | text | parent text content replaced | the parent, also recorded as the text's handle |
//! | placeholder | none | the parent |
//! | fragment | wrapper node, children inside it | the wrapper |
//! | tagged / custom | node of the element's kind | the new node |
//!
//! Field names become host names by lower-casing and dropping underscores
//! (`tab_index` becomes `tabindex`). Callback fields become listeners named
//! without their `on` prefix (`on_dbl_click` listens for `dblclick`). Map
//! fields expand into one `<field>-<key>` property per entry.

use std::sync::Arc;

use thiserror::Error;

use crate::app::LifecycleHooks;
use crate::attribute::AttrValue;
use crate::binder::fields_to_map;
use crate::config::{RenderConfig, UnknownKindPolicy};
use crate::element::{Element, ElementRef, Shape};
use crate::host::{HostError, HostSurface, NodeHandle};
use crate::{debug_log, error_log, info_log, warn_log};

/// Errors that abort a build or update.
///
/// Attribute problems never show up here; they are logged while composing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	#[error("host error: {0}")]
	Host(#[from] HostError),
}

/// Builds element trees onto a host surface.
pub struct Renderer<H: HostSurface> {
	host: Arc<H>,
	config: RenderConfig,
	hooks: Option<Arc<dyn LifecycleHooks>>,
}

impl<H: HostSurface> Clone for Renderer<H> {
	fn clone(&self) -> Self {
		Self {
			host: Arc::clone(&self.host),
			config: self.config.clone(),
			hooks: self.hooks.clone(),
		}
	}
}

impl<H: HostSurface> Renderer<H> {
	/// Creates a renderer with default settings and no lifecycle hooks.
	pub fn new(host: Arc<H>) -> Self {
		Self {
			host,
			config: RenderConfig::default(),
			hooks: None,
		}
	}

	pub fn with_config(mut self, config: RenderConfig) -> Self {
		self.config = config;
		self
	}

	/// Hooks fired after every successful [`build`](Self::build).
	pub fn with_hooks(mut self, hooks: Arc<dyn LifecycleHooks>) -> Self {
		self.hooks = Some(hooks);
		self
	}

	pub fn host(&self) -> &Arc<H> {
		&self.host
	}

	pub fn config(&self) -> &RenderConfig {
		&self.config
	}

	/// Builds `root` and its subtree under the surface root.
	///
	/// Once the tree is attached, the `loaded` and `state_manager_start`
	/// hooks fire in that order. Returns the host node produced for `root`.
	pub fn build(&self, root: &ElementRef) -> Result<NodeHandle, RenderError> {
		let container = self.host.root();
		let node = self.build_node(root, container)?;
		info_log!("tree attached under {}", container);
		if let Some(hooks) = &self.hooks {
			hooks.loaded();
			hooks.state_manager_start();
		}
		Ok(node)
	}

	/// Builds `element` under `parent` without firing hooks.
	pub fn build_into(
		&self,
		element: &ElementRef,
		parent: NodeHandle,
	) -> Result<NodeHandle, RenderError> {
		self.build_node(element, parent)
	}

	/// Re-projects an already built element.
	///
	/// Non-callback properties are written again over the existing ones.
	/// Listeners attached by the first build stay in place and are not added
	/// again. Every host child is then removed and the children are rebuilt.
	/// An element that was never built is left alone.
	pub fn update(&self, element: &ElementRef) -> Result<(), RenderError> {
		let guard = element.read();
		let Some(node) = guard.host_handle() else {
			warn_log!("update skipped: <{}> has not been built", guard.kind_name());
			return Ok(());
		};

		match guard.shape() {
			Shape::Text(content) => {
				self.host.set_text(node, content)?;
				return Ok(());
			}
			Shape::Placeholder => return Ok(()),
			Shape::Fragment => {}
			Shape::Tagged => self.apply_fields(&*guard, node, false)?,
		}

		while let Some(child) = self.host.first_child(node)? {
			self.host.remove_child(node, child)?;
		}

		let children = guard.children().to_vec();
		drop(guard);
		for child in &children {
			self.build_node(child, node)?;
		}
		debug_log!("rebuilt {} children under {}", children.len(), node);
		Ok(())
	}

	fn build_node(
		&self,
		element: &ElementRef,
		parent: NodeHandle,
	) -> Result<NodeHandle, RenderError> {
		let mut guard = element.write();
		let node = match guard.shape() {
			Shape::Text(content) => {
				self.host.set_text(parent, content)?;
				guard.set_host_handle(parent);
				return Ok(parent);
			}
			Shape::Placeholder => return Ok(parent),
			Shape::Fragment => self.create_node(&self.config.fragment_wrapper_kind)?,
			Shape::Tagged => {
				let node = self.create_node(guard.kind_name())?;
				self.apply_fields(&*guard, node, true)?;
				node
			}
		};

		let children = guard.children().to_vec();
		for child in &children {
			self.build_node(child, node)?;
		}
		self.host.append_child(parent, node)?;
		guard.set_host_handle(node);
		debug_log!("built <{}> as {}", guard.kind_name(), node);
		Ok(node)
	}

	fn create_node(&self, kind: &str) -> Result<NodeHandle, RenderError> {
		match self.host.create_node(kind) {
			Ok(node) => Ok(node),
			Err(HostError::UnknownKind(_))
				if self.config.unknown_kind == UnknownKindPolicy::Degrade =>
			{
				warn_log!(
					"host rejected <{}>, degrading to <{}>",
					kind,
					self.config.fallback_kind
				);
				Ok(self.host.create_node(&self.config.fallback_kind)?)
			}
			Err(err) => {
				error_log!("failed to create <{}>: {}", kind, err);
				Err(err.into())
			}
		}
	}

	fn apply_fields(
		&self,
		element: &dyn Element,
		node: NodeHandle,
		listeners: bool,
	) -> Result<(), RenderError> {
		for (field, value) in fields_to_map(element) {
			match value {
				AttrValue::Callback(callback) => {
					if listeners {
						self.host
							.add_event_listener(node, &event_name(field), callback)?;
					}
				}
				AttrValue::Map(entries) => {
					let prefix = property_name(field);
					for (key, entry) in entries {
						self.host
							.set_property(node, &format!("{}-{}", prefix, key), &entry)?;
					}
				}
				other => {
					self.host
						.set_property(node, &property_name(field), &other.to_string())?;
				}
			}
		}
		Ok(())
	}
}

/// Host property name for a field: lower-cased, underscores dropped.
pub fn property_name(field: &str) -> String {
	field.chars().filter(|c| *c != '_').flat_map(char::to_lowercase).collect()
}

/// Host event name for a callback field: `on` prefix stripped, then as
/// [`property_name`].
pub fn event_name(field: &str) -> String {
	let bare = field
		.strip_prefix("on_")
		.or_else(|| field.strip_prefix("on"))
		.unwrap_or(field);
	property_name(bare)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("style", "style")]
	#[case("tab_index", "tabindex")]
	#[case("content_editable", "contenteditable")]
	#[case("for", "for")]
	#[case("ID", "id")]
	fn test_property_name(#[case] field: &str, #[case] expected: &str) {
		assert_eq!(property_name(field), expected);
	}

	#[rstest]
	#[case("on_click", "click")]
	#[case("on_dbl_click", "dblclick")]
	#[case("on_mouse_enter", "mouseenter")]
	#[case("onKeyDown", "keydown")]
	#[case("toggle", "toggle")]
	fn test_event_name(#[case] field: &str, #[case] expected: &str) {
		assert_eq!(event_name(field), expected);
	}
}

//! Element model
//!
//! An element is a host-independent descriptor of one piece of UI. Every
//! variant implements the [`Element`] capability surface: children, append,
//! kind name and the host node it currently occupies. Variants differ in how
//! the renderer treats them, which they report through [`Element::shape`].
//!
//! | Variant | Kind name | Children | Host node |
//! |---------|-----------|----------|-----------|
//! | [`Tagged`] | `div`, `a`, ... | yes (void tags: no) | one |
//! | [`Text`] | `rawtext` | no | the parent's, whose text it replaces |
//! | [`Placeholder`] | `none` | no | none |
//! | [`Fragment`] | `slice` | yes | one wrapper |
//! | [`CustomElement`] | caller supplied | yes | one |
//!
//! Elements are shared as [`ElementRef`] so application code can keep a
//! handle to a subtree, append to it later and ask the renderer to update it.
//!
//! ## Example
//!
//! ```ignore
//! use tagtree::prelude::*;
//!
//! let greeting = div([class("greeting")]).compose([
//!     p([style("color: blue;")]).compose([text("Hello")]),
//!     br([]),
//! ]);
//! ```

pub mod custom;
pub mod fragment;
pub mod html;
pub mod placeholder;
pub mod tagged;
pub mod text;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::attribute::Attribute;
use crate::binder::{Fields, apply_attributes};
use crate::callback::Callback;
use crate::host::NodeHandle;

pub use custom::{CustomElement, custom};
pub use fragment::{Fragment, fragment, slice};
pub use placeholder::{Placeholder, none};
pub use tagged::{NoFields, Tagged};
pub use text::{Text, text};

/// Shared, lockable handle to an element of any variant.
pub type ElementRef = Arc<RwLock<dyn Element>>;

/// Wraps a concrete element into an [`ElementRef`].
pub fn share<E: Element>(element: E) -> ElementRef {
	Arc::new(RwLock::new(element))
}

/// How the renderer projects an element onto the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
	/// Literal text written into the parent host node.
	Text(&'a str),
	/// Renders nothing.
	Placeholder,
	/// Children rendered inside a throwaway wrapper node.
	Fragment,
	/// A host node of the element's kind.
	Tagged,
}

/// Read-only view of an element's field layers.
#[derive(Default)]
pub struct Layers<'a> {
	/// Kind-specific fields.
	pub own: Option<&'a dyn Fields>,
	/// Shared global fields.
	pub base: Option<&'a dyn Fields>,
	/// Caller-defined extension payload.
	pub extension: Option<&'a dyn Fields>,
}

/// Mutable view of an element's field layers.
#[derive(Default)]
pub struct LayersMut<'a> {
	/// Kind-specific fields.
	pub own: Option<&'a mut dyn Fields>,
	/// Shared global fields.
	pub base: Option<&'a mut dyn Fields>,
	/// Caller-defined extension payload.
	pub extension: Option<&'a mut dyn Fields>,
}

/// Capability surface shared by every element variant.
pub trait Element: Send + Sync + 'static {
	/// Children in render order.
	fn children(&self) -> &[ElementRef];

	/// Appends a child. Leaf variants drop the argument.
	fn append_child(&mut self, child: ElementRef);

	/// Kind name, constant per variant instance.
	fn kind_name(&self) -> &str;

	/// Host node this element currently occupies, if built.
	fn host_handle(&self) -> Option<NodeHandle>;

	/// Rebinds the element to a host node.
	fn set_host_handle(&mut self, handle: NodeHandle);

	/// Rendering behaviour of the variant.
	fn shape(&self) -> Shape<'_> {
		Shape::Tagged
	}

	/// Field layers consulted by [`fields_to_map`](crate::binder::fields_to_map).
	fn layers(&self) -> Layers<'_>;

	/// Field layers consulted by [`bind`](crate::binder::bind).
	fn layers_mut(&mut self) -> LayersMut<'_>;
}

crate::element_fields! {
	/// Global attributes and event slots carried by every element.
	pub struct BasicElement {
		/// Element identity.
		pub id: String,
		/// CSS class list.
		pub class: String,
		/// Inline CSS text.
		pub style: String,
		/// Language tag.
		pub lang: String,
		/// Advisory title.
		pub title: String,
		/// Text direction.
		pub dir: String,
		/// Keyboard shortcut hint.
		pub access_key: String,
		/// Editable content flag.
		pub content_editable: String,
		/// Drag behaviour.
		pub draggable: String,
		/// Spell checking.
		pub spell_check: String,
		/// Virtual keyboard hint.
		pub input_mode: String,
		/// Accessibility role.
		pub role: String,
		/// Hidden flag.
		pub hidden: bool,
		/// Tab order.
		pub tab_index: i64,
		/// `data-*` entries.
		pub data: BTreeMap<String, String>,
		/// `aria-*` entries.
		pub aria: BTreeMap<String, String>,
		pub on_click: Option<Callback>,
		pub on_dbl_click: Option<Callback>,
		pub on_mouse_down: Option<Callback>,
		pub on_mouse_up: Option<Callback>,
		pub on_mouse_move: Option<Callback>,
		pub on_mouse_enter: Option<Callback>,
		pub on_mouse_leave: Option<Callback>,
		pub on_key_down: Option<Callback>,
		pub on_key_up: Option<Callback>,
		pub on_focus: Option<Callback>,
		pub on_blur: Option<Callback>,
		pub on_change: Option<Callback>,
		pub on_submit: Option<Callback>,
		pub on_reset: Option<Callback>,
	}
}

/// Finishes an element after its attributes have been applied.
///
/// A composer appends the children it is given, in argument order, and hands
/// back the shared element.
#[must_use = "a composer does nothing until `compose` or `finish` is called"]
pub struct Composer {
	element: ElementRef,
}

impl Composer {
	/// Applies `attributes` to `element` and wraps it for composition.
	///
	/// Attributes that fail to bind are logged and dropped.
	pub fn new<E: Element>(mut element: E, attributes: impl IntoIterator<Item = Attribute>) -> Self {
		apply_attributes(&mut element, attributes);
		Self {
			element: share(element),
		}
	}

	/// Appends `children` in order and returns the element.
	pub fn compose(self, children: impl IntoIterator<Item = ElementRef>) -> ElementRef {
		{
			let mut element = self.element.write();
			for child in children {
				element.append_child(child);
			}
		}
		self.element
	}

	/// Returns the element without children.
	pub fn finish(self) -> ElementRef {
		self.element
	}
}

impl From<Composer> for ElementRef {
	fn from(composer: Composer) -> Self {
		composer.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attribute::{on_click, style, tab_index};
	use crate::binder::{bind, fields_to_map};
	use rstest::rstest;

	#[rstest]
	fn test_basic_element_declares_event_slots() {
		let base = BasicElement::default();
		let names = base.field_names();
		for slot in ["on_click", "on_mouse_enter", "on_key_up", "on_reset"] {
			assert!(names.contains(&slot), "missing {}", slot);
		}
	}

	#[rstest]
	fn test_composer_appends_in_order() {
		let first = text("one");
		let second = text("two");
		let parent = Composer::new(Tagged::<NoFields>::new("div"), [])
			.compose([first.clone(), second.clone()]);

		let guard = parent.read();
		let children = guard.children();
		assert_eq!(children.len(), 2);
		assert!(Arc::ptr_eq(&children[0], &first));
		assert!(Arc::ptr_eq(&children[1], &second));
	}

	#[rstest]
	fn test_composer_applies_attributes() {
		let element = Composer::new(
			Tagged::<NoFields>::new("button"),
			[style("color:red;"), tab_index(2), on_click(|| {})],
		)
		.finish();

		let fields = fields_to_map(&*element.read());
		assert_eq!(fields.len(), 3);
		assert!(fields.get("on_click").is_some());
	}

	#[rstest]
	fn test_bind_on_shared_element() {
		let element = Composer::new(Tagged::<NoFields>::new("div"), []).finish();
		bind(&mut *element.write(), "id", "main".into()).unwrap();
		assert!(fields_to_map(&*element.read()).contains_key("id"));
	}
}

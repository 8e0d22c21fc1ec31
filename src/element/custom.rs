//! Caller-defined element kinds.
//!
//! A custom element takes its kind name at construction time and carries an
//! extension payload declared with [`element_fields!`](crate::element_fields).
//! Payload fields are the last layer the binder consults, so they can hold
//! extra properties and extra event callbacks.
//!
//! ```ignore
//! tagtree::element_fields! {
//!     pub struct Counter {
//!         pub start: i64,
//!         pub on_increment: Option<Callback>,
//!     }
//! }
//!
//! let widget = custom::<Counter>("x-counter", [custom_attr("start", 3)])
//!     .compose([text("0")]);
//! ```

use super::{BasicElement, Composer, Element, ElementRef, Layers, LayersMut};
use crate::attribute::Attribute;
use crate::binder::Fields;
use crate::host::NodeHandle;

/// Element with a caller-supplied kind name and extension payload `T`.
pub struct CustomElement<T> {
	kind: String,
	base: BasicElement,
	payload: T,
	children: Vec<ElementRef>,
	host: Option<NodeHandle>,
}

impl<T: Fields + Default> CustomElement<T> {
	/// Creates a zero-valued custom element of `kind`.
	pub fn new(kind: impl Into<String>) -> Self {
		Self::with_payload(kind, T::default())
	}
}

impl<T: Fields> CustomElement<T> {
	/// Creates a custom element with a prepared payload.
	pub fn with_payload(kind: impl Into<String>, payload: T) -> Self {
		Self {
			kind: kind.into(),
			base: BasicElement::default(),
			payload,
			children: Vec::new(),
			host: None,
		}
	}

	/// The extension payload.
	pub fn payload(&self) -> &T {
		&self.payload
	}

	pub fn payload_mut(&mut self) -> &mut T {
		&mut self.payload
	}
}

impl<T: Fields + 'static> Element for CustomElement<T> {
	fn children(&self) -> &[ElementRef] {
		&self.children
	}

	fn append_child(&mut self, child: ElementRef) {
		self.children.push(child);
	}

	fn kind_name(&self) -> &str {
		&self.kind
	}

	fn host_handle(&self) -> Option<NodeHandle> {
		self.host
	}

	fn set_host_handle(&mut self, handle: NodeHandle) {
		self.host = Some(handle);
	}

	fn layers(&self) -> Layers<'_> {
		Layers {
			own: None,
			base: Some(&self.base),
			extension: Some(&self.payload),
		}
	}

	fn layers_mut(&mut self) -> LayersMut<'_> {
		LayersMut {
			own: None,
			base: Some(&mut self.base),
			extension: Some(&mut self.payload),
		}
	}
}

/// Starts a custom element of `kind` with payload type `T`.
pub fn custom<T: Fields + Default + 'static>(
	kind: impl Into<String>,
	attributes: impl IntoIterator<Item = Attribute>,
) -> Composer {
	Composer::new(CustomElement::<T>::new(kind), attributes)
}

//! Standard tagged elements.

use super::{BasicElement, Element, ElementRef, Layers, LayersMut};
use crate::binder::Fields;
use crate::debug_log;
use crate::host::NodeHandle;

crate::element_fields! {
	/// Own-field table for kinds that only carry the shared base.
	pub struct NoFields {}
}

/// A host element of a fixed kind with kind-specific fields `F`.
///
/// Void kinds (`br`, `img`, ...) are constructed with [`Tagged::void`] and
/// silently drop appended children.
#[derive(Default)]
pub struct Tagged<F = NoFields> {
	kind: &'static str,
	void: bool,
	base: BasicElement,
	fields: F,
	children: Vec<ElementRef>,
	host: Option<NodeHandle>,
}

impl<F: Fields + Default> Tagged<F> {
	/// Creates a zero-valued element of `kind`.
	pub fn new(kind: &'static str) -> Self {
		Self {
			kind,
			void: false,
			base: BasicElement::default(),
			fields: F::default(),
			children: Vec::new(),
			host: None,
		}
	}

	/// Creates a zero-valued element of a kind that never has children.
	pub fn void(kind: &'static str) -> Self {
		Self {
			void: true,
			..Self::new(kind)
		}
	}

	pub fn is_void(&self) -> bool {
		self.void
	}

	/// Shared global fields.
	pub fn base(&self) -> &BasicElement {
		&self.base
	}

	/// Kind-specific fields.
	pub fn fields(&self) -> &F {
		&self.fields
	}

	pub fn fields_mut(&mut self) -> &mut F {
		&mut self.fields
	}
}

impl<F: Fields + Default + 'static> Element for Tagged<F> {
	fn children(&self) -> &[ElementRef] {
		&self.children
	}

	fn append_child(&mut self, child: ElementRef) {
		if self.void {
			debug_log!("ignoring child appended to void <{}>", self.kind);
			return;
		}
		self.children.push(child);
	}

	fn kind_name(&self) -> &str {
		self.kind
	}

	fn host_handle(&self) -> Option<NodeHandle> {
		self.host
	}

	fn set_host_handle(&mut self, handle: NodeHandle) {
		self.host = Some(handle);
	}

	fn layers(&self) -> Layers<'_> {
		Layers {
			own: Some(&self.fields),
			base: Some(&self.base),
			extension: None,
		}
	}

	fn layers_mut(&mut self) -> LayersMut<'_> {
		LayersMut {
			own: Some(&mut self.fields),
			base: Some(&mut self.base),
			extension: None,
		}
	}
}

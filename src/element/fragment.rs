//! List fragment.

use super::{BasicElement, Composer, Element, ElementRef, Layers, LayersMut, Shape, share};
use crate::attribute::Attribute;
use crate::host::NodeHandle;

/// Groups children without a visual identity of its own.
///
/// The renderer materializes a fragment as a wrapper host node so the
/// fragment can be updated later; its children are built inside it.
#[derive(Default)]
pub struct Fragment {
	base: BasicElement,
	children: Vec<ElementRef>,
	host: Option<NodeHandle>,
}

impl Fragment {
	/// Creates a fragment holding `children` in order.
	pub fn new(children: impl IntoIterator<Item = ElementRef>) -> Self {
		Self {
			children: children.into_iter().collect(),
			..Self::default()
		}
	}
}

impl Element for Fragment {
	fn children(&self) -> &[ElementRef] {
		&self.children
	}

	fn append_child(&mut self, child: ElementRef) {
		self.children.push(child);
	}

	fn kind_name(&self) -> &str {
		"slice"
	}

	fn host_handle(&self) -> Option<NodeHandle> {
		self.host
	}

	fn set_host_handle(&mut self, handle: NodeHandle) {
		self.host = Some(handle);
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Fragment
	}

	fn layers(&self) -> Layers<'_> {
		Layers {
			base: Some(&self.base),
			..Layers::default()
		}
	}

	fn layers_mut(&mut self) -> LayersMut<'_> {
		LayersMut {
			base: Some(&mut self.base),
			..LayersMut::default()
		}
	}
}

/// Creates a shared fragment from `children`.
pub fn fragment(children: impl IntoIterator<Item = ElementRef>) -> ElementRef {
	share(Fragment::new(children))
}

/// Starts a fragment with attributes; children are supplied to the composer.
pub fn slice(attributes: impl IntoIterator<Item = Attribute>) -> Composer {
	Composer::new(Fragment::default(), attributes)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::text;
	use rstest::rstest;

	#[rstest]
	fn test_fragment_keeps_order() {
		let items: Vec<ElementRef> = (0..3).map(|i| text(i.to_string())).collect();
		let list = fragment(items.clone());
		let guard = list.read();
		assert_eq!(guard.kind_name(), "slice");
		for (expected, actual) in items.iter().zip(guard.children()) {
			assert!(std::sync::Arc::ptr_eq(expected, actual));
		}
	}

	#[rstest]
	fn test_slice_composer_appends() {
		let list = slice([]).compose([text("a"), text("b")]);
		assert_eq!(list.read().children().len(), 2);
		assert_eq!(list.read().shape(), Shape::Fragment);
	}
}

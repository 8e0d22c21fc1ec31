//! Placeholder leaf that renders nothing.

use super::{BasicElement, Element, ElementRef, Layers, LayersMut, Shape, share};
use crate::host::NodeHandle;

/// Renders nothing. Default branch of a conditional.
#[derive(Debug, Clone, Default)]
pub struct Placeholder {
	base: BasicElement,
	host: Option<NodeHandle>,
}

impl Element for Placeholder {
	fn children(&self) -> &[ElementRef] {
		&[]
	}

	fn append_child(&mut self, _child: ElementRef) {}

	fn kind_name(&self) -> &str {
		"none"
	}

	fn host_handle(&self) -> Option<NodeHandle> {
		self.host
	}

	fn set_host_handle(&mut self, handle: NodeHandle) {
		self.host = Some(handle);
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Placeholder
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

/// Creates a shared placeholder.
pub fn none() -> ElementRef {
	share(Placeholder::default())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_placeholder_is_leaf() {
		let placeholder = none();
		placeholder.write().append_child(none());
		let guard = placeholder.read();
		assert!(guard.children().is_empty());
		assert_eq!(guard.kind_name(), "none");
		assert_eq!(guard.shape(), Shape::Placeholder);
	}
}

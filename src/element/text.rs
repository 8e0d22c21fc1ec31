//! Literal text leaf.

use super::{BasicElement, Element, ElementRef, Layers, LayersMut, Shape, share};
use crate::debug_log;
use crate::host::NodeHandle;

crate::element_fields! {
	/// Own fields of [`Text`].
	pub struct TextFields {
		/// Literal content.
		pub text: String,
	}
}

/// Literal text, rendered as the text content of its parent host node.
#[derive(Debug, Clone, Default)]
pub struct Text {
	base: BasicElement,
	fields: TextFields,
	host: Option<NodeHandle>,
}

impl Text {
	/// Creates a text leaf holding `content`.
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			fields: TextFields {
				text: content.into(),
			},
			..Self::default()
		}
	}

	/// The literal content.
	pub fn content(&self) -> &str {
		&self.fields.text
	}
}

impl Element for Text {
	fn children(&self) -> &[ElementRef] {
		&[]
	}

	fn append_child(&mut self, _child: ElementRef) {
		debug_log!("ignoring child appended to <rawtext>");
	}

	fn kind_name(&self) -> &str {
		"rawtext"
	}

	fn host_handle(&self) -> Option<NodeHandle> {
		self.host
	}

	fn set_host_handle(&mut self, handle: NodeHandle) {
		self.host = Some(handle);
	}

	fn shape(&self) -> Shape<'_> {
		Shape::Text(&self.fields.text)
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

/// Creates a shared text element.
pub fn text(content: impl Into<String>) -> ElementRef {
	share(Text::new(content))
}

/// Creates a shared text element from format arguments.
///
/// ```ignore
/// let counter = textf!("clicked {} times", count);
/// ```
#[macro_export]
macro_rules! textf {
	($($arg:tt)*) => {
		$crate::element::text(format!($($arg)*))
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_text_ignores_children() {
		let leaf = text("leaf");
		leaf.write().append_child(text("child"));
		leaf.write().append_child(text("another"));
		assert!(leaf.read().children().is_empty());
	}

	#[rstest]
	fn test_text_shape_carries_content() {
		let leaf = Text::new("Hello");
		assert_eq!(leaf.shape(), Shape::Text("Hello"));
		assert_eq!(leaf.kind_name(), "rawtext");
	}

	#[rstest]
	fn test_textf_formats() {
		let leaf = crate::textf!("{}-{}", 1, "two");
		assert_eq!(leaf.read().shape(), Shape::Text("1-two"));
	}
}

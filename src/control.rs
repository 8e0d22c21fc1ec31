//! Conditional and list composition.
//!
//! Both helpers resolve eagerly while the tree is being composed. To react to
//! a state change, recompose the branch and pass its parent to
//! [`Renderer::update`](crate::renderer::Renderer::update).
//!
//! ```ignore
//! let status = when(clicks > 3, [text("Enough!")])
//!     .elif(clicks > 0, [textf!("{} clicks", clicks)])
//!     .otherwise([text("Click the button")])
//!     .value();
//!
//! let rows = each(&users, |index, user| {
//!     li([]).compose([textf!("{}. {}", index + 1, user.name)])
//! });
//! ```

use crate::element::{ElementRef, fragment, none};

/// Chain of conditional branches, resolved by [`Conditional::value`].
#[must_use = "call `value` to obtain the selected branch"]
pub struct Conditional {
	selected: Option<Vec<ElementRef>>,
}

/// Starts a conditional with its first branch.
pub fn when(condition: bool, children: impl IntoIterator<Item = ElementRef>) -> Conditional {
	Conditional { selected: None }.elif(condition, children)
}

impl Conditional {
	/// Adds a branch taken when no earlier branch matched and `condition` holds.
	pub fn elif(mut self, condition: bool, children: impl IntoIterator<Item = ElementRef>) -> Self {
		if self.selected.is_none() && condition {
			self.selected = Some(children.into_iter().collect());
		}
		self
	}

	/// Adds a branch taken when no earlier branch matched.
	pub fn otherwise(self, children: impl IntoIterator<Item = ElementRef>) -> Self {
		self.elif(true, children)
	}

	/// Whether any branch matched so far.
	pub fn is_matched(&self) -> bool {
		self.selected.is_some()
	}

	/// A fragment holding the selected branch, or a placeholder.
	pub fn value(self) -> ElementRef {
		match self.selected {
			Some(children) => fragment(children),
			None => none(),
		}
	}
}

/// Maps every item to an element and collects them into a fragment.
pub fn each<I, F>(items: I, mut render: F) -> ElementRef
where
	I: IntoIterator,
	F: FnMut(usize, I::Item) -> ElementRef,
{
	fragment(
		items
			.into_iter()
			.enumerate()
			.map(|(index, item)| render(index, item)),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::{Shape, text};
	use rstest::rstest;

	fn first_text(element: &ElementRef) -> String {
		let guard = element.read();
		let child = guard.children()[0].read();
		match child.shape() {
			Shape::Text(content) => content.to_string(),
			other => panic!("expected text, got {:?}", other),
		}
	}

	#[rstest]
	#[case(true, false, "first")]
	#[case(false, true, "second")]
	#[case(true, true, "first")]
	#[case(false, false, "fallback")]
	fn test_first_matching_branch_wins(#[case] a: bool, #[case] b: bool, #[case] expected: &str) {
		let selected = when(a, [text("first")])
			.elif(b, [text("second")])
			.otherwise([text("fallback")])
			.value();
		assert_eq!(selected.read().kind_name(), "slice");
		assert_eq!(first_text(&selected), expected);
	}

	#[rstest]
	fn test_no_match_yields_placeholder() {
		let selected = when(false, [text("hidden")]).elif(false, []).value();
		assert_eq!(selected.read().shape(), Shape::Placeholder);
	}

	#[rstest]
	fn test_each_passes_index_and_item() {
		let list = each(["a", "b", "c"], |index, item| text(format!("{}{}", index, item)));
		let guard = list.read();
		assert_eq!(guard.children().len(), 3);
		assert_eq!(guard.children()[2].read().shape(), Shape::Text("2c"));
	}
}

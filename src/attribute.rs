//! Attribute registry
//!
//! An [`Attribute`] is a named, typed value that the binder assigns to the
//! matching field of an element. Constructors in this module only build
//! values; nothing checks that a given attribute is meaningful for a given
//! element kind. An attribute with no matching field is dropped (and logged)
//! when the element is composed.
//!
//! ## Example
//!
//! ```ignore
//! use tagtree::attribute::{href, on_click, style};
//!
//! let link = a([href("https://example.com"), style("color: red;")])
//!     .compose([text("Example")]);
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::callback::{Callback, IntoCallback};

/// The value carried by an attribute, and the rendered value of a field.
#[derive(Debug, Clone)]
pub enum AttrValue {
	/// Text value.
	Str(String),
	/// Boolean flag.
	Bool(bool),
	/// 64-bit integer.
	Int(i64),
	/// Floating point number.
	Float(f64),
	/// Zero-argument event callback.
	Callback(Callback),
	/// Keyed string map (`data-*`, `aria-*`).
	Map(BTreeMap<String, String>),
}

impl AttrValue {
	/// Name of the value's kind, used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			AttrValue::Str(_) => "string",
			AttrValue::Bool(_) => "bool",
			AttrValue::Int(_) => "i64",
			AttrValue::Float(_) => "f64",
			AttrValue::Callback(_) => "callback",
			AttrValue::Map(_) => "map",
		}
	}

	/// Returns the callback if this value is one.
	pub fn as_callback(&self) -> Option<&Callback> {
		match self {
			AttrValue::Callback(cb) => Some(cb),
			_ => None,
		}
	}
}

/// Renders the value the way it is written onto a host node property.
///
/// Callbacks have no textual form and render as an empty string; maps render
/// as space separated `key=value` pairs.
impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttrValue::Str(s) => f.write_str(s),
			AttrValue::Bool(b) => write!(f, "{}", b),
			AttrValue::Int(i) => write!(f, "{}", i),
			AttrValue::Float(x) => write!(f, "{}", x),
			AttrValue::Callback(_) => Ok(()),
			AttrValue::Map(map) => {
				let mut first = true;
				for (key, value) in map {
					if !first {
						f.write_str(" ")?;
					}
					write!(f, "{}={}", key, value)?;
					first = false;
				}
				Ok(())
			}
		}
	}
}

impl PartialEq for AttrValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(AttrValue::Str(a), AttrValue::Str(b)) => a == b,
			(AttrValue::Bool(a), AttrValue::Bool(b)) => a == b,
			(AttrValue::Int(a), AttrValue::Int(b)) => a == b,
			(AttrValue::Float(a), AttrValue::Float(b)) => a == b,
			(AttrValue::Callback(a), AttrValue::Callback(b)) => a.ptr_eq(b),
			(AttrValue::Map(a), AttrValue::Map(b)) => a == b,
			_ => false,
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		AttrValue::Str(value.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		AttrValue::Str(value)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		AttrValue::Bool(value)
	}
}

impl From<i64> for AttrValue {
	fn from(value: i64) -> Self {
		AttrValue::Int(value)
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		AttrValue::Float(value)
	}
}

impl From<Callback> for AttrValue {
	fn from(value: Callback) -> Self {
		AttrValue::Callback(value)
	}
}

impl From<BTreeMap<String, String>> for AttrValue {
	fn from(value: BTreeMap<String, String>) -> Self {
		AttrValue::Map(value)
	}
}

/// A named attribute, applied to an element when it is composed.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
	name: Cow<'static, str>,
	value: AttrValue,
}

impl Attribute {
	/// Creates an attribute targeting the field called `name`.
	pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}

	/// Returns the target field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the value.
	pub fn value(&self) -> &AttrValue {
		&self.value
	}

	/// Splits the attribute into its name and value.
	pub fn into_parts(self) -> (Cow<'static, str>, AttrValue) {
		(self.name, self.value)
	}
}

/// Attribute targeting an arbitrary field, typically one declared by a
/// custom element's extension payload.
pub fn custom_attr(name: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Attribute {
	Attribute::new(name, value)
}

/// Macro for defining string-valued attribute constructors
macro_rules! string_attr {
	($($(#[$meta:meta])* $func:ident => $field:literal),* $(,)?) => {
		$(
			$(#[$meta])*
			pub fn $func(value: impl Into<String>) -> Attribute {
				Attribute::new($field, AttrValue::Str(value.into()))
			}
		)*
	};
}

/// Macro for defining integer-valued attribute constructors
macro_rules! int_attr {
	($($(#[$meta:meta])* $func:ident => $field:literal),* $(,)?) => {
		$(
			$(#[$meta])*
			pub fn $func(value: i64) -> Attribute {
				Attribute::new($field, AttrValue::Int(value))
			}
		)*
	};
}

/// Macro for defining flag attribute constructors (always `true`)
macro_rules! flag_attr {
	($($(#[$meta:meta])* $func:ident => $field:literal),* $(,)?) => {
		$(
			$(#[$meta])*
			pub fn $func() -> Attribute {
				Attribute::new($field, AttrValue::Bool(true))
			}
		)*
	};
}

/// Macro for defining event attribute constructors
macro_rules! event_attr {
	($($(#[$meta:meta])* $func:ident),* $(,)?) => {
		$(
			$(#[$meta])*
			pub fn $func(handler: impl IntoCallback) -> Attribute {
				Attribute::new(stringify!($func), AttrValue::Callback(handler.into_callback()))
			}
		)*
	};
}

string_attr! {
	/// Identity of the element.
	id => "id",
	/// CSS class list (space separated).
	class => "class",
	/// Inline CSS text.
	style => "style",
	/// Language tag.
	lang => "lang",
	/// Advisory title text.
	title => "title",
	/// Text direction (`ltr`, `rtl`, `auto`).
	dir => "dir",
	/// Keyboard shortcut hint.
	access_key => "access_key",
	/// Whether the content is editable (`true`, `false`).
	content_editable => "content_editable",
	/// Drag behaviour (`true`, `false`, `auto`).
	draggable => "draggable",
	/// Spell checking (`true`, `false`).
	spell_check => "spell_check",
	/// Virtual keyboard hint.
	input_mode => "input_mode",
	/// Link target URL.
	href => "href",
	/// Browsing context for links and forms.
	target => "target",
	/// Link relationship.
	rel => "rel",
	/// Resource URL.
	src => "src",
	/// Alternative text for images.
	alt => "alt",
	/// Control type (`text`, `submit`, ...).
	r#type => "type",
	/// Control value.
	value => "value",
	/// Control name.
	name => "name",
	/// Placeholder text.
	placeholder => "placeholder",
	/// Form submission URL.
	action => "action",
	/// Form submission method.
	method => "method",
	/// Form encoding type.
	enc_type => "enc_type",
	/// Accepted file types.
	accept => "accept",
	/// Autocomplete hint.
	auto_complete => "auto_complete",
	/// Validation pattern.
	pattern => "pattern",
	/// Control the label belongs to.
	r#for => "for",
	/// Owning form id.
	form_attr => "form",
	/// Document metadata content.
	content => "content",
	/// Character encoding.
	charset => "charset",
	/// Image loading strategy.
	loading => "loading",
	/// Accessibility role.
	role => "role",
	/// Responsive image sources.
	src_set => "src_set",
	/// Video poster image.
	poster => "poster",
	/// Media preload hint.
	preload => "preload",
}

/// Builds a `style` attribute from fragments written back to back.
///
/// Every fragment is rendered with `Display` and the results are concatenated
/// without separators, so values mix freely with literal CSS.
///
/// ```ignore
/// div([tagtree::style!("padding: ", padding, "px;", "color: red;")])
/// ```
#[macro_export]
macro_rules! style {
	($($part:expr),+ $(,)?) => {
		$crate::attribute::style([$(::std::string::ToString::to_string(&$part)),+].concat())
	};
}

/// Builds a `class` attribute from fragments written back to back.
///
/// Fragments are concatenated without separators, as with
/// [`style!`](crate::style); spell out the spaces between class names.
#[macro_export]
macro_rules! class {
	($($part:expr),+ $(,)?) => {
		$crate::attribute::class([$(::std::string::ToString::to_string(&$part)),+].concat())
	};
}

int_attr! {
	/// Tab order.
	tab_index => "tab_index",
	/// Width in pixels.
	width => "width",
	/// Height in pixels.
	height => "height",
	/// Textarea columns.
	cols => "cols",
	/// Textarea rows.
	rows => "rows",
	/// Table cell column span.
	col_span => "col_span",
	/// Table cell row span.
	row_span => "row_span",
	/// Maximum value.
	max => "max",
	/// Minimum value.
	min => "min",
	/// Maximum text length.
	max_length => "max_length",
	/// Minimum text length.
	min_length => "min_length",
}

flag_attr! {
	/// Hides the element.
	hidden => "hidden",
	/// Disables the control.
	disabled => "disabled",
	/// Checks a checkbox or radio control.
	checked => "checked",
	/// Selects an option.
	selected => "selected",
	/// Makes the control read-only.
	read_only => "read_only",
	/// Marks the control as required.
	required => "required",
	/// Allows multiple values.
	multiple => "multiple",
	/// Focuses the control on load.
	auto_focus => "auto_focus",
	/// Starts media playback on load.
	auto_play => "auto_play",
	/// Shows media controls.
	controls => "controls",
	/// Loops media playback.
	r#loop => "loop",
	/// Mutes media.
	muted => "muted",
	/// Opens a details element.
	open => "open",
}

event_attr! {
	/// Pointer click.
	on_click,
	/// Pointer double click.
	on_dbl_click,
	/// Pointer button pressed.
	on_mouse_down,
	/// Pointer button released.
	on_mouse_up,
	/// Pointer moved.
	on_mouse_move,
	/// Pointer entered the element.
	on_mouse_enter,
	/// Pointer left the element.
	on_mouse_leave,
	/// Key pressed.
	on_key_down,
	/// Key released.
	on_key_up,
	/// Element gained focus.
	on_focus,
	/// Element lost focus.
	on_blur,
	/// Control value changed.
	on_change,
	/// Form submitted.
	on_submit,
	/// Form reset.
	on_reset,
	/// Text control edited.
	on_input,
	/// Resource finished loading.
	on_load,
	/// Resource failed to load.
	on_error,
	/// Media playback started.
	on_play,
	/// Media playback paused.
	on_pause,
	/// Media playback reached the end.
	on_ended,
	/// Disclosure opened or closed.
	on_toggle,
}

/// Numeric step for range and number inputs.
pub fn step(value: f64) -> Attribute {
	Attribute::new("step", AttrValue::Float(value))
}

/// A single `data-<name>` entry; merges into the element's data map.
pub fn data(name: impl Into<String>, value: impl Into<String>) -> Attribute {
	Attribute::new("data", keyed(name, value))
}

/// A single `aria-<name>` entry; merges into the element's aria map.
pub fn aria(name: impl Into<String>, value: impl Into<String>) -> Attribute {
	Attribute::new("aria", keyed(name, value))
}

fn keyed(name: impl Into<String>, value: impl Into<String>) -> AttrValue {
	let mut map = BTreeMap::new();
	map.insert(name.into(), value.into());
	AttrValue::Map(map)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_string_constructor() {
		let attr = style("color: red;");
		assert_eq!(attr.name(), "style");
		assert_eq!(attr.value(), &AttrValue::Str("color: red;".to_string()));
	}

	#[rstest]
	fn test_fragment_macros_concatenate() {
		let padding = 20;
		let attr = style!("padding: ", padding, "px;", "color: red;");
		assert_eq!(attr.name(), "style");
		assert_eq!(
			attr.value(),
			&AttrValue::Str("padding: 20px;color: red;".to_string())
		);

		let active = "active";
		assert_eq!(
			class!("btn ", active).value(),
			&AttrValue::Str("btn active".to_string())
		);
		assert_eq!(class!("solo"), class("solo"));
	}

	#[rstest]
	fn test_flag_constructor_is_true() {
		assert_eq!(disabled().value(), &AttrValue::Bool(true));
	}

	#[rstest]
	fn test_event_constructor_uses_slot_name() {
		let attr = on_dbl_click(|| {});
		assert_eq!(attr.name(), "on_dbl_click");
		assert!(attr.value().as_callback().is_some());
	}

	#[rstest]
	fn test_keyed_constructors() {
		let attr = data("user-id", "42");
		assert_eq!(attr.name(), "data");
		match attr.value() {
			AttrValue::Map(map) => assert_eq!(map.get("user-id").map(String::as_str), Some("42")),
			other => panic!("expected map, got {:?}", other),
		}
	}

	#[rstest]
	#[case(AttrValue::Str("a".into()), "a")]
	#[case(AttrValue::Bool(true), "true")]
	#[case(AttrValue::Int(-3), "-3")]
	#[case(AttrValue::Float(0.5), "0.5")]
	fn test_display_renders_value(#[case] value: AttrValue, #[case] expected: &str) {
		assert_eq!(value.to_string(), expected);
	}

	#[rstest]
	fn test_display_renders_map_pairs() {
		let mut map = BTreeMap::new();
		map.insert("a".to_string(), "1".to_string());
		map.insert("b".to_string(), "2".to_string());
		assert_eq!(AttrValue::Map(map).to_string(), "a=1 b=2");
	}
}

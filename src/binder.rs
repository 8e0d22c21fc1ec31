//! Dynamic attribute binder
//!
//! Elements expose their assignable fields through explicit name tables
//! generated by [`element_fields!`](crate::element_fields). Binding an
//! attribute walks three layers in order:
//!
//! 1. the element's own kind-specific fields,
//! 2. the shared [`BasicElement`](crate::element::BasicElement) base,
//! 3. the extension payload of a custom element.
//!
//! The first layer that knows the name receives the value. The value must
//! match the field's storage kind; otherwise the field keeps its previous value
//! and a [`BindError`] is reported.
//!
//! [`fields_to_map`] is the reverse projection: every field whose value
//! differs from its zero value, flattened into one namespace. This is what the
//! renderer writes onto host nodes.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::attribute::{AttrValue, Attribute};
use crate::callback::Callback;
use crate::element::Element;
use crate::warn_log;

/// Rendered projection of an element: field name to non-default value.
pub type FieldMap = BTreeMap<&'static str, AttrValue>;

/// Errors produced while binding an attribute to an element.
///
/// None of these abort composition; the attribute is logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
	/// No layer of the element declares a field with this name.
	#[error("<{kind}> has no field `{name}`")]
	FieldNotFound {
		/// Kind name of the element.
		kind: String,
		/// Attribute name.
		name: String,
	},
	/// The field exists but stores a different kind of value.
	#[error("field `{name}` on <{kind}> expects {expected}, got {found}")]
	TypeMismatch {
		/// Kind name of the element.
		kind: String,
		/// Attribute name.
		name: String,
		/// Storage kind of the field.
		expected: &'static str,
		/// Kind of the supplied value.
		found: &'static str,
	},
	/// The field's storage kind cannot be assigned from an attribute.
	#[error("field `{name}` on <{kind}> has unsupported storage kind {storage}")]
	UnsupportedFieldKind {
		/// Kind name of the element.
		kind: String,
		/// Attribute name.
		name: String,
		/// Storage kind of the field.
		storage: &'static str,
	},
}

/// Mutable view of one field, tagged with its storage kind.
#[derive(Debug)]
pub enum FieldSlot<'a> {
	/// Text field.
	Str(&'a mut String),
	/// Boolean field.
	Bool(&'a mut bool),
	/// 64-bit integer field.
	Int(&'a mut i64),
	/// Event callback field.
	Callback(&'a mut Option<Callback>),
	/// Keyed string map; bound values merge into it.
	Map(&'a mut BTreeMap<String, String>),
	/// A field the binder cannot assign to.
	Unsupported(&'static str),
}

impl FieldSlot<'_> {
	/// Name of the storage kind, used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			FieldSlot::Str(_) => "string",
			FieldSlot::Bool(_) => "bool",
			FieldSlot::Int(_) => "i64",
			FieldSlot::Callback(_) => "callback",
			FieldSlot::Map(_) => "map",
			FieldSlot::Unsupported(kind) => *kind,
		}
	}
}

/// Storage types usable as element fields.
pub trait FieldStorage {
	/// Borrows the field as an assignable slot.
	fn slot(&mut self) -> FieldSlot<'_>;

	/// Returns the rendered value, or `None` when the field holds its zero value.
	fn snapshot(&self) -> Option<AttrValue>;
}

impl FieldStorage for String {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Str(self)
	}

	fn snapshot(&self) -> Option<AttrValue> {
		(!self.is_empty()).then(|| AttrValue::Str(self.clone()))
	}
}

impl FieldStorage for bool {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Bool(self)
	}

	fn snapshot(&self) -> Option<AttrValue> {
		self.then_some(AttrValue::Bool(true))
	}
}

impl FieldStorage for i64 {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Int(self)
	}

	fn snapshot(&self) -> Option<AttrValue> {
		(*self != 0).then_some(AttrValue::Int(*self))
	}
}

impl FieldStorage for f64 {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Unsupported("f64")
	}

	fn snapshot(&self) -> Option<AttrValue> {
		(*self != 0.0).then_some(AttrValue::Float(*self))
	}
}

impl FieldStorage for Option<Callback> {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Callback(self)
	}

	fn snapshot(&self) -> Option<AttrValue> {
		self.as_ref().map(|cb| AttrValue::Callback(cb.clone()))
	}
}

impl FieldStorage for BTreeMap<String, String> {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Map(self)
	}

	fn snapshot(&self) -> Option<AttrValue> {
		(!self.is_empty()).then(|| AttrValue::Map(self.clone()))
	}
}

/// A name-addressable table of fields.
///
/// Implemented by [`element_fields!`](crate::element_fields); hand-written
/// implementations must keep `field_mut`, `collect_into` and `field_names`
/// consistent.
pub trait Fields: Send + Sync {
	/// Looks up a field by attribute name.
	fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>>;

	/// Inserts every non-zero field into `out`, overwriting existing entries.
	fn collect_into(&self, out: &mut FieldMap);

	/// Declared field names, in declaration order.
	fn field_names(&self) -> &'static [&'static str];
}

/// Declares a field table struct and its [`Fields`] implementation.
///
/// Fields use one of the [`FieldStorage`] types. A field can be exposed under
/// a different attribute name with `= "name"`, which is how reserved words
/// such as `type` and `for` are declared. The struct derives `Debug`,
/// `Clone` and `Default`.
///
/// # Example
///
/// ```ignore
/// tagtree::element_fields! {
///     /// Extension payload for a rating widget.
///     pub struct RatingFields {
///         pub stars: i64,
///         pub input_kind = "type": String,
///         pub on_rate: Option<Callback>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! element_fields {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$fmeta:meta])*
				$fvis:vis $field:ident $(= $alias:literal)? : $ty:ty
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Default)]
		$vis struct $name {
			$(
				$(#[$fmeta])*
				$fvis $field: $ty,
			)*
		}

		impl $crate::binder::Fields for $name {
			#[allow(unused_variables)]
			fn field_mut(&mut self, name: &str) -> Option<$crate::binder::FieldSlot<'_>> {
				$(
					if name == $crate::__field_name!($field $(, $alias)?) {
						return Some($crate::binder::FieldStorage::slot(&mut self.$field));
					}
				)*
				None
			}

			#[allow(unused_variables)]
			fn collect_into(&self, out: &mut $crate::binder::FieldMap) {
				$(
					if let Some(value) = $crate::binder::FieldStorage::snapshot(&self.$field) {
						out.insert($crate::__field_name!($field $(, $alias)?), value);
					}
				)*
			}

			fn field_names(&self) -> &'static [&'static str] {
				&[$($crate::__field_name!($field $(, $alias)?)),*]
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
	($field:ident) => {
		stringify!($field)
	};
	($field:ident, $alias:literal) => {
		$alias
	};
}

/// Assigns `value` to the field called `name` on `element`.
///
/// Lookup order is own fields, then the shared base, then the extension
/// payload. On error the element is left unchanged.
pub fn bind(element: &mut dyn Element, name: &str, value: AttrValue) -> Result<(), BindError> {
	let kind = element.kind_name().to_string();
	let layers = element.layers_mut();

	for layer in [layers.own, layers.base, layers.extension]
		.into_iter()
		.flatten()
	{
		if let Some(slot) = layer.field_mut(name) {
			return assign(slot, value).map_err(|failure| failure.into_error(kind, name));
		}
	}

	Err(BindError::FieldNotFound {
		kind,
		name: name.to_string(),
	})
}

/// Applies attributes in order, logging and dropping those that fail.
///
/// Returns the errors for the dropped attributes.
pub fn apply_attributes(
	element: &mut dyn Element,
	attributes: impl IntoIterator<Item = Attribute>,
) -> Vec<BindError> {
	let mut dropped = Vec::new();
	for attribute in attributes {
		let (name, value) = attribute.into_parts();
		if let Err(err) = bind(element, &name, value) {
			warn_log!("attribute dropped: {}", err);
			dropped.push(err);
		}
	}
	dropped
}

/// Flattens the element's non-default fields into one map.
///
/// Base fields are collected first, then own fields, then the extension
/// payload; a later layer overwrites an earlier one on a name clash. The map
/// is a snapshot: later mutations of the element are not reflected.
pub fn fields_to_map(element: &dyn Element) -> FieldMap {
	let layers = element.layers();
	let mut out = FieldMap::new();
	for layer in [layers.base, layers.own, layers.extension]
		.into_iter()
		.flatten()
	{
		layer.collect_into(&mut out);
	}
	out
}

enum AssignFailure {
	Mismatch {
		expected: &'static str,
		found: &'static str,
	},
	Unsupported(&'static str),
}

impl AssignFailure {
	fn into_error(self, kind: String, name: &str) -> BindError {
		let name = name.to_string();
		match self {
			AssignFailure::Mismatch { expected, found } => BindError::TypeMismatch {
				kind,
				name,
				expected,
				found,
			},
			AssignFailure::Unsupported(storage) => BindError::UnsupportedFieldKind {
				kind,
				name,
				storage,
			},
		}
	}
}

fn assign(slot: FieldSlot<'_>, value: AttrValue) -> Result<(), AssignFailure> {
	match (slot, value) {
		(FieldSlot::Str(field), AttrValue::Str(v)) => *field = v,
		(FieldSlot::Bool(field), AttrValue::Bool(v)) => *field = v,
		(FieldSlot::Int(field), AttrValue::Int(v)) => *field = v,
		(FieldSlot::Callback(field), AttrValue::Callback(v)) => *field = Some(v),
		(FieldSlot::Map(field), AttrValue::Map(v)) => field.extend(v),
		(FieldSlot::Unsupported(storage), _) => return Err(AssignFailure::Unsupported(storage)),
		(slot, value) => {
			return Err(AssignFailure::Mismatch {
				expected: slot.kind_name(),
				found: value.kind_name(),
			});
		}
	}
	Ok(())
}

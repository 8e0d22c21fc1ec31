//! HTML element catalog
//!
//! Constructors for the standard tagged kinds, and the kind registry that
//! lists each kind's extra fields beyond [`BasicElement`](super::BasicElement).
//!
//! Container kinds return a [`Composer`] that takes the children; void kinds
//! return the finished element directly.
//!
//! ## Example
//!
//! ```ignore
//! let nav = nav([class("menu")]).compose([
//!     a([href("/"), target("_self")]).compose([text("Home")]),
//!     hr([]),
//! ]);
//! ```

use super::tagged::{NoFields, Tagged};
use super::{Composer, ElementRef};
use crate::attribute::Attribute;
use crate::binder::Fields;
use crate::callback::Callback;

crate::element_fields! {
	/// Fields of `<a>`.
	pub struct AnchorFields {
		pub href: String,
		pub target: String,
		pub rel: String,
		pub media_type = "type": String,
	}
}

crate::element_fields! {
	/// Fields of `<button>`.
	pub struct ButtonFields {
		pub button_type = "type": String,
		pub name: String,
		pub value: String,
		pub form: String,
		pub disabled: bool,
		pub auto_focus: bool,
	}
}

crate::element_fields! {
	/// Fields of `<form>`.
	pub struct FormFields {
		pub action: String,
		pub method: String,
		pub enc_type: String,
		pub name: String,
		pub target: String,
		pub auto_complete: String,
	}
}

crate::element_fields! {
	/// Fields of `<label>`.
	pub struct LabelFields {
		pub html_for = "for": String,
		pub form: String,
	}
}

crate::element_fields! {
	/// Fields of `<textarea>`.
	pub struct TextAreaFields {
		pub name: String,
		pub value: String,
		pub placeholder: String,
		pub form: String,
		pub rows: i64,
		pub cols: i64,
		pub max_length: i64,
		pub min_length: i64,
		pub disabled: bool,
		pub read_only: bool,
		pub required: bool,
		pub auto_focus: bool,
	}
}

crate::element_fields! {
	/// Fields of `<select>`.
	pub struct SelectFields {
		pub name: String,
		pub form: String,
		pub multiple: bool,
		pub disabled: bool,
		pub required: bool,
		pub auto_focus: bool,
	}
}

crate::element_fields! {
	/// Fields of `<option>`.
	pub struct OptionFields {
		pub value: String,
		pub selected: bool,
		pub disabled: bool,
	}
}

crate::element_fields! {
	/// Fields of `<td>` and `<th>`.
	pub struct CellFields {
		pub col_span: i64,
		pub row_span: i64,
	}
}

crate::element_fields! {
	/// Fields of `<video>` and `<audio>`.
	pub struct MediaFields {
		pub src: String,
		pub poster: String,
		pub preload: String,
		pub width: i64,
		pub height: i64,
		pub auto_play: bool,
		pub controls: bool,
		pub looping = "loop": bool,
		pub muted: bool,
		pub on_play: Option<Callback>,
		pub on_pause: Option<Callback>,
		pub on_ended: Option<Callback>,
	}
}

crate::element_fields! {
	/// Fields of `<details>` and `<dialog>`.
	pub struct DisclosureFields {
		pub open: bool,
		pub on_toggle: Option<Callback>,
	}
}

crate::element_fields! {
	/// Fields of `<img>`.
	pub struct ImageFields {
		pub src: String,
		pub alt: String,
		pub src_set: String,
		pub loading: String,
		pub width: i64,
		pub height: i64,
		pub on_load: Option<Callback>,
		pub on_error: Option<Callback>,
	}
}

crate::element_fields! {
	/// Fields of `<input>`.
	pub struct InputFields {
		pub input_type = "type": String,
		pub name: String,
		pub value: String,
		pub placeholder: String,
		pub accept: String,
		pub auto_complete: String,
		pub pattern: String,
		pub form: String,
		pub max: i64,
		pub min: i64,
		pub max_length: i64,
		pub min_length: i64,
		pub step: f64,
		pub checked: bool,
		pub disabled: bool,
		pub read_only: bool,
		pub required: bool,
		pub multiple: bool,
		pub auto_focus: bool,
		pub on_input: Option<Callback>,
	}
}

crate::element_fields! {
	/// Fields of `<embed>`.
	pub struct EmbedFields {
		pub src: String,
		pub media_type = "type": String,
		pub width: i64,
		pub height: i64,
	}
}

crate::element_fields! {
	/// Fields of `<source>`.
	pub struct SourceFields {
		pub src: String,
		pub src_set: String,
		pub media_type = "type": String,
	}
}

crate::element_fields! {
	/// Fields of `<meta>`.
	pub struct MetaFields {
		pub name: String,
		pub content: String,
		pub charset: String,
	}
}

crate::element_fields! {
	/// Fields of `<link>`.
	pub struct LinkFields {
		pub href: String,
		pub rel: String,
		pub media_type = "type": String,
	}
}

crate::element_fields! {
	/// Fields of `<area>`.
	pub struct AreaFields {
		pub href: String,
		pub alt: String,
		pub target: String,
		pub rel: String,
	}
}

/// Registry entry for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindEntry {
	/// Kind name.
	pub kind: &'static str,
	/// Whether the kind drops appended children.
	pub void: bool,
	/// Extra fields beyond the shared base.
	pub fields: &'static [&'static str],
}

fn entry<F: Fields + Default>(kind: &'static str, void: bool) -> KindEntry {
	KindEntry {
		kind,
		void,
		fields: F::default().field_names(),
	}
}

macro_rules! fields_or_none {
	() => {
		NoFields
	};
	($fields:ty) => {
		$fields
	};
}

macro_rules! define_elements {
	(
		containers {
			$($(#[$cmeta:meta])* $cname:ident = $ctag:literal $(: $cfields:ty)?),* $(,)?
		}
		voids {
			$($(#[$vmeta:meta])* $vname:ident = $vtag:literal $(: $vfields:ty)?),* $(,)?
		}
	) => {
		$(
			$(#[$cmeta])*
			pub fn $cname(attributes: impl IntoIterator<Item = Attribute>) -> Composer {
				Composer::new(
					Tagged::<fields_or_none!($($cfields)?)>::new($ctag),
					attributes,
				)
			}
		)*

		$(
			$(#[$vmeta])*
			pub fn $vname(attributes: impl IntoIterator<Item = Attribute>) -> ElementRef {
				Composer::new(
					Tagged::<fields_or_none!($($vfields)?)>::void($vtag),
					attributes,
				)
				.finish()
			}
		)*

		/// Every kind in the catalog, containers first, in declaration order.
		pub fn registry() -> Vec<KindEntry> {
			vec![
				$(entry::<fields_or_none!($($cfields)?)>($ctag, false),)*
				$(entry::<fields_or_none!($($vfields)?)>($vtag, true),)*
			]
		}
	};
}

define_elements! {
	containers {
		/// Create a `<div>` element
		div = "div",
		/// Create a `<span>` element
		span = "span",
		/// Create a `<p>` element (paragraph)
		p = "p",
		/// Create an `<a>` element (hyperlink)
		a = "a": AnchorFields,
		/// Create a `<button>` element
		button = "button": ButtonFields,
		h1 = "h1",
		h2 = "h2",
		h3 = "h3",
		h4 = "h4",
		h5 = "h5",
		h6 = "h6",
		/// Create a `<ul>` element (unordered list)
		ul = "ul",
		/// Create an `<ol>` element (ordered list)
		ol = "ol",
		/// Create an `<li>` element (list item)
		li = "li",
		nav = "nav",
		header = "header",
		footer = "footer",
		section = "section",
		article = "article",
		aside = "aside",
		/// Create a `<form>` element
		form = "form": FormFields,
		/// Create a `<label>` element
		label = "label": LabelFields,
		/// Create a `<textarea>` element
		textarea = "textarea": TextAreaFields,
		/// Create a `<select>` element
		select = "select": SelectFields,
		/// Create an `<option>` element
		option = "option": OptionFields,
		table = "table",
		thead = "thead",
		tbody = "tbody",
		tr = "tr",
		td = "td": CellFields,
		th = "th": CellFields,
		strong = "strong",
		em = "em",
		code = "code",
		pre = "pre",
		blockquote = "blockquote",
		video = "video": MediaFields,
		audio = "audio": MediaFields,
		/// Create a `<details>` element
		details = "details": DisclosureFields,
		summary = "summary",
		dialog = "dialog": DisclosureFields,
	}
	voids {
		/// Create a `<br>` element (line break)
		br = "br",
		/// Create an `<hr>` element (horizontal rule)
		hr = "hr",
		/// Create an `<img>` element
		img = "img": ImageFields,
		/// Create an `<input>` element
		input = "input": InputFields,
		embed = "embed": EmbedFields,
		source = "source": SourceFields,
		meta = "meta": MetaFields,
		link = "link": LinkFields,
		area = "area": AreaFields,
		wbr = "wbr",
	}
}

/// Looks up a kind in the catalog.
pub fn lookup(kind: &str) -> Option<KindEntry> {
	registry().into_iter().find(|entry| entry.kind == kind)
}

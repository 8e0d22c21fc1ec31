//! Unified prelude
//!
//! `use tagtree::prelude::*;` brings in the attribute constructors, the HTML
//! element constructors, composition helpers and the runtime types.

pub use crate::app::{App, LifecycleHooks, Runtime, RuntimeHandle};
pub use crate::attribute::*;
pub use crate::callback::{Callback, IntoCallback};
pub use crate::config::{RenderConfig, UnknownKindPolicy};
pub use crate::control::{each, when};
pub use crate::element::html::*;
pub use crate::element::{
	Composer, CustomElement, Element, ElementRef, custom, fragment, none, slice, text,
};
pub use crate::host::{HostSurface, MemorySurface, NodeHandle};
pub use crate::renderer::Renderer;
pub use crate::state::{State, StateManager};
pub use crate::{class, debug_log, element_fields, error_log, info_log, style, textf, warn_log};

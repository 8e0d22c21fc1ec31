//! Browser document surface (wasm32).
//!
//! `web_sys` nodes are not `Send`, so the surface keeps them in thread-local
//! tables keyed by [`NodeHandle`] id and the surface value itself only carries
//! ids. All calls must come from the thread that created the surface, which in
//! a browser is the only thread there is.
//!
//! Detached subtrees are forgotten: removing a child or replacing content
//! with text drops the table entries and listener closures of every node
//! inside it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::{HostError, HostSurface, NodeHandle};
use crate::callback::Callback;
use crate::debug_log;

thread_local! {
	static NODES: RefCell<HashMap<u64, web_sys::Node>> = RefCell::new(HashMap::new());

	/// Listener closures, kept alive as long as their node is registered.
	static LISTENERS: RefCell<HashMap<u64, Vec<Closure<dyn FnMut(web_sys::Event)>>>> =
		RefCell::new(HashMap::new());
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn register(node: web_sys::Node) -> NodeHandle {
	let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
	NODES.with(|nodes| nodes.borrow_mut().insert(id, node));
	NodeHandle::new(id)
}

fn lookup(handle: NodeHandle) -> Result<web_sys::Node, HostError> {
	NODES
		.with(|nodes| nodes.borrow().get(&handle.id()).cloned())
		.ok_or(HostError::UnknownNode(handle))
}

fn find_or_register(node: web_sys::Node) -> NodeHandle {
	let known = NODES.with(|nodes| {
		nodes
			.borrow()
			.iter()
			.find(|(_, candidate)| candidate.is_same_node(Some(&node)))
			.map(|(id, _)| *id)
	});
	match known {
		Some(id) => NodeHandle::new(id),
		None => register(node),
	}
}

/// Drops the table entries and listeners of every registered node inside
/// `root`. `root` itself is dropped only when `include_root` is set.
fn forget_within(root: &web_sys::Node, include_root: bool) {
	let stale: Vec<u64> = NODES.with(|nodes| {
		nodes
			.borrow()
			.iter()
			.filter(|(_, node)| {
				let node: &web_sys::Node = node;
				root.contains(Some(node)) && (include_root || !root.is_same_node(Some(node)))
			})
			.map(|(id, _)| *id)
			.collect()
	});
	NODES.with(|nodes| {
		let mut nodes = nodes.borrow_mut();
		for id in &stale {
			nodes.remove(id);
		}
	});
	LISTENERS.with(|listeners| {
		let mut listeners = listeners.borrow_mut();
		for id in &stale {
			listeners.remove(id);
		}
	});
	debug_log!("forgot {} detached nodes", stale.len());
}

fn document() -> Result<web_sys::Document, HostError> {
	web_sys::window()
		.and_then(|window| window.document())
		.ok_or_else(|| HostError::Rejected("no document available".to_string()))
}

fn rejected(err: wasm_bindgen::JsValue) -> HostError {
	let message = match err.dyn_ref::<js_sys::Error>() {
		Some(error) => String::from(error.message()),
		None => format!("{:?}", err),
	};
	HostError::Rejected(message)
}

/// Host surface over the page's `document`, rooted at `document.body`.
#[derive(Debug)]
pub struct DomSurface {
	root: NodeHandle,
}

impl DomSurface {
	/// Binds to the current page body.
	pub fn new() -> Result<Self, HostError> {
		let body = document()?
			.body()
			.ok_or_else(|| HostError::Rejected("document has no body".to_string()))?;
		Ok(Self {
			root: find_or_register(body.into()),
		})
	}
}

impl HostSurface for DomSurface {
	fn root(&self) -> NodeHandle {
		self.root
	}

	fn create_node(&self, kind: &str) -> Result<NodeHandle, HostError> {
		let element = document()?
			.create_element(kind)
			.map_err(|_| HostError::UnknownKind(kind.to_string()))?;
		Ok(register(element.into()))
	}

	fn set_property(&self, node: NodeHandle, name: &str, value: &str) -> Result<(), HostError> {
		let node = lookup(node)?;
		let element = node
			.dyn_ref::<web_sys::Element>()
			.ok_or_else(|| HostError::Rejected(format!("cannot set `{}` on a non-element", name)))?;
		element.set_attribute(name, value).map_err(rejected)
	}

	fn add_event_listener(
		&self,
		node: NodeHandle,
		event: &str,
		callback: Callback,
	) -> Result<(), HostError> {
		let target = lookup(node)?;
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			callback.call();
		}) as Box<dyn FnMut(web_sys::Event)>);
		target
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
			.map_err(rejected)?;
		LISTENERS.with(|listeners| {
			listeners
				.borrow_mut()
				.entry(node.id())
				.or_default()
				.push(closure)
		});
		debug_log!("listening for `{}` on {}", event, node);
		Ok(())
	}

	fn append_child(&self, parent: NodeHandle, child: NodeHandle) -> Result<(), HostError> {
		lookup(parent)?
			.append_child(&lookup(child)?)
			.map(|_| ())
			.map_err(rejected)
	}

	fn remove_child(&self, parent: NodeHandle, child: NodeHandle) -> Result<(), HostError> {
		let child_node = lookup(child)?;
		lookup(parent)?
			.remove_child(&child_node)
			.map_err(rejected)?;
		forget_within(&child_node, true);
		Ok(())
	}

	fn first_child(&self, parent: NodeHandle) -> Result<Option<NodeHandle>, HostError> {
		Ok(lookup(parent)?.first_child().map(find_or_register))
	}

	fn set_text(&self, node: NodeHandle, text: &str) -> Result<(), HostError> {
		let target = lookup(node)?;
		forget_within(&target, false);
		target.set_text_content(Some(text));
		Ok(())
	}
}

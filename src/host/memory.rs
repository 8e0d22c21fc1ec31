//! In-memory host surface.
//!
//! Nodes live in an arena keyed by id. The surface behaves like a document for
//! the operations the renderer uses: appending moves a node, assigning text
//! replaces the content with one `#text` node, and [`MemorySurface::dispatch`]
//! fires listeners the way a user interaction would.
//!
//! Removing a child, or replacing content with text, drops the detached
//! subtree from the arena together with its listeners. Their handles become
//! unknown nodes.

use std::collections::{BTreeMap, HashMap, HashSet};

use parking_lot::Mutex;

use super::{HostError, HostSurface, NodeHandle};
use crate::callback::Callback;

/// Kind name of the root container.
pub const ROOT_KIND: &str = "body";

/// Kind name of nodes created by [`HostSurface::set_text`].
pub const TEXT_KIND: &str = "#text";

#[derive(Debug)]
struct Node {
	kind: String,
	text: Option<String>,
	properties: BTreeMap<String, String>,
	listeners: Vec<(String, Callback)>,
	children: Vec<NodeHandle>,
	parent: Option<NodeHandle>,
}

impl Node {
	fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			text: None,
			properties: BTreeMap::new(),
			listeners: Vec::new(),
			children: Vec::new(),
			parent: None,
		}
	}
}

#[derive(Debug)]
struct Arena {
	nodes: HashMap<NodeHandle, Node>,
	next_id: u64,
}

impl Arena {
	fn insert(&mut self, node: Node) -> NodeHandle {
		let handle = NodeHandle::new(self.next_id);
		self.next_id += 1;
		self.nodes.insert(handle, node);
		handle
	}

	fn get(&self, handle: NodeHandle) -> Result<&Node, HostError> {
		self.nodes.get(&handle).ok_or(HostError::UnknownNode(handle))
	}

	fn get_mut(&mut self, handle: NodeHandle) -> Result<&mut Node, HostError> {
		self.nodes
			.get_mut(&handle)
			.ok_or(HostError::UnknownNode(handle))
	}

	fn detach(&mut self, child: NodeHandle) -> Result<(), HostError> {
		if let Some(parent) = self.get_mut(child)?.parent.take() {
			self.get_mut(parent)?.children.retain(|c| *c != child);
		}
		Ok(())
	}

	/// Drops `handle` and its whole subtree, listeners included.
	fn free(&mut self, handle: NodeHandle) {
		let mut pending = vec![handle];
		while let Some(current) = pending.pop() {
			if let Some(node) = self.nodes.remove(&current) {
				pending.extend(node.children);
			}
		}
	}

	fn is_ancestor(&self, candidate: NodeHandle, of: NodeHandle) -> bool {
		let mut cursor = Some(of);
		while let Some(current) = cursor {
			if current == candidate {
				return true;
			}
			cursor = self.nodes.get(&current).and_then(|node| node.parent);
		}
		false
	}

	fn text_content(&self, handle: NodeHandle, out: &mut String) {
		if let Some(node) = self.nodes.get(&handle) {
			if let Some(text) = &node.text {
				out.push_str(text);
			}
			for child in &node.children {
				self.text_content(*child, out);
			}
		}
	}
}

/// Host surface backed by an in-memory node arena.
#[derive(Debug)]
pub struct MemorySurface {
	root: NodeHandle,
	known_kinds: Option<HashSet<String>>,
	arena: Mutex<Arena>,
}

impl Default for MemorySurface {
	fn default() -> Self {
		Self::new()
	}
}

impl MemorySurface {
	/// Creates a surface that accepts every kind name.
	pub fn new() -> Self {
		let mut arena = Arena {
			nodes: HashMap::new(),
			next_id: 0,
		};
		let root = arena.insert(Node::new(ROOT_KIND));
		Self {
			root,
			known_kinds: None,
			arena: Mutex::new(arena),
		}
	}

	/// Creates a surface that rejects kinds outside `kinds`.
	pub fn with_known_kinds<I, S>(kinds: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			known_kinds: Some(kinds.into_iter().map(Into::into).collect()),
			..Self::new()
		}
	}

	/// Kind name of `node`.
	pub fn kind_of(&self, node: NodeHandle) -> Option<String> {
		self.arena.lock().nodes.get(&node).map(|n| n.kind.clone())
	}

	/// Value of property `name` on `node`.
	pub fn property(&self, node: NodeHandle, name: &str) -> Option<String> {
		self.arena
			.lock()
			.nodes
			.get(&node)
			.and_then(|n| n.properties.get(name).cloned())
	}

	/// Every property on `node`.
	pub fn properties(&self, node: NodeHandle) -> BTreeMap<String, String> {
		self.arena
			.lock()
			.nodes
			.get(&node)
			.map(|n| n.properties.clone())
			.unwrap_or_default()
	}

	/// Children of `node` in order.
	pub fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
		self.arena
			.lock()
			.nodes
			.get(&node)
			.map(|n| n.children.clone())
			.unwrap_or_default()
	}

	/// Parent of `node`, if attached.
	pub fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
		self.arena.lock().nodes.get(&node).and_then(|n| n.parent)
	}

	/// Text held by a `#text` node.
	pub fn text_of(&self, node: NodeHandle) -> Option<String> {
		self.arena
			.lock()
			.nodes
			.get(&node)
			.and_then(|n| n.text.clone())
	}

	/// Concatenated text of `node` and its descendants.
	pub fn text_content(&self, node: NodeHandle) -> String {
		let mut out = String::new();
		self.arena.lock().text_content(node, &mut out);
		out
	}

	/// Number of listeners registered for `event` on `node`.
	pub fn listener_count(&self, node: NodeHandle, event: &str) -> usize {
		self.arena.lock().nodes.get(&node).map_or(0, |n| {
			n.listeners
				.iter()
				.filter(|(name, _)| name == event)
				.count()
		})
	}

	/// Number of live nodes, including created ones not yet attached.
	pub fn node_count(&self) -> usize {
		self.arena.lock().nodes.len()
	}

	/// Invokes every listener for `event` on `node`, in registration order.
	///
	/// Listeners run without the arena lock held, so they may call back into
	/// the surface. Returns how many listeners ran.
	pub fn dispatch(&self, node: NodeHandle, event: &str) -> usize {
		let callbacks: Vec<Callback> = {
			let arena = self.arena.lock();
			match arena.nodes.get(&node) {
				Some(n) => n
					.listeners
					.iter()
					.filter(|(name, _)| name == event)
					.map(|(_, callback)| callback.clone())
					.collect(),
				None => Vec::new(),
			}
		};
		for callback in &callbacks {
			callback.call();
		}
		callbacks.len()
	}

	/// Depth-first search for the first node of `kind` under `from`.
	pub fn find_kind(&self, from: NodeHandle, kind: &str) -> Option<NodeHandle> {
		let arena = self.arena.lock();
		let mut stack = vec![from];
		while let Some(current) = stack.pop() {
			let node = arena.nodes.get(&current)?;
			if node.kind == kind {
				return Some(current);
			}
			stack.extend(node.children.iter().rev().copied());
		}
		None
	}
}

impl HostSurface for MemorySurface {
	fn root(&self) -> NodeHandle {
		self.root
	}

	fn create_node(&self, kind: &str) -> Result<NodeHandle, HostError> {
		if let Some(known) = &self.known_kinds {
			if !known.contains(kind) {
				return Err(HostError::UnknownKind(kind.to_string()));
			}
		}
		Ok(self.arena.lock().insert(Node::new(kind)))
	}

	fn set_property(&self, node: NodeHandle, name: &str, value: &str) -> Result<(), HostError> {
		self.arena
			.lock()
			.get_mut(node)?
			.properties
			.insert(name.to_string(), value.to_string());
		Ok(())
	}

	fn add_event_listener(
		&self,
		node: NodeHandle,
		event: &str,
		callback: Callback,
	) -> Result<(), HostError> {
		self.arena
			.lock()
			.get_mut(node)?
			.listeners
			.push((event.to_string(), callback));
		Ok(())
	}

	fn append_child(&self, parent: NodeHandle, child: NodeHandle) -> Result<(), HostError> {
		let mut arena = self.arena.lock();
		arena.get(parent)?;
		arena.get(child)?;
		if arena.is_ancestor(child, parent) {
			return Err(HostError::Rejected(format!(
				"{} cannot be appended under its own descendant {}",
				child, parent
			)));
		}
		arena.detach(child)?;
		arena.get_mut(parent)?.children.push(child);
		arena.get_mut(child)?.parent = Some(parent);
		Ok(())
	}

	fn remove_child(&self, parent: NodeHandle, child: NodeHandle) -> Result<(), HostError> {
		let mut arena = self.arena.lock();
		if arena.get(child)?.parent != Some(parent) {
			return Err(HostError::Rejected(format!(
				"{} is not a child of {}",
				child, parent
			)));
		}
		arena.detach(child)?;
		arena.free(child);
		Ok(())
	}

	fn first_child(&self, parent: NodeHandle) -> Result<Option<NodeHandle>, HostError> {
		Ok(self.arena.lock().get(parent)?.children.first().copied())
	}

	fn set_text(&self, node: NodeHandle, text: &str) -> Result<(), HostError> {
		let mut arena = self.arena.lock();
		let previous = std::mem::take(&mut arena.get_mut(node)?.children);
		for child in previous {
			arena.free(child);
		}
		let mut text_node = Node::new(TEXT_KIND);
		text_node.text = Some(text.to_string());
		text_node.parent = Some(node);
		let handle = arena.insert(text_node);
		arena.get_mut(node)?.children.push(handle);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[fixture]
	fn surface() -> MemorySurface {
		MemorySurface::new()
	}

	#[rstest]
	fn test_root_is_body(surface: MemorySurface) {
		assert_eq!(surface.kind_of(surface.root()).as_deref(), Some(ROOT_KIND));
		assert_eq!(surface.node_count(), 1);
	}

	#[rstest]
	fn test_append_moves_node(surface: MemorySurface) {
		let a = surface.create_node("div").unwrap();
		let b = surface.create_node("div").unwrap();
		let child = surface.create_node("span").unwrap();

		surface.append_child(a, child).unwrap();
		surface.append_child(b, child).unwrap();

		assert!(surface.children(a).is_empty());
		assert_eq!(surface.children(b), vec![child]);
		assert_eq!(surface.parent_of(child), Some(b));
	}

	#[rstest]
	fn test_append_rejects_cycles(surface: MemorySurface) {
		let outer = surface.create_node("div").unwrap();
		let inner = surface.create_node("div").unwrap();
		surface.append_child(outer, inner).unwrap();
		assert!(matches!(
			surface.append_child(inner, outer),
			Err(HostError::Rejected(_))
		));
	}

	#[rstest]
	fn test_set_text_replaces_children(surface: MemorySurface) {
		let node = surface.create_node("p").unwrap();
		let stale = surface.create_node("span").unwrap();
		surface.append_child(node, stale).unwrap();

		surface.set_text(node, "Hello").unwrap();

		let children = surface.children(node);
		assert_eq!(children.len(), 1);
		assert_eq!(surface.text_of(children[0]).as_deref(), Some("Hello"));
		assert_eq!(surface.parent_of(stale), None);
		assert_eq!(surface.kind_of(stale), None);
		assert_eq!(surface.text_content(node), "Hello");
	}

	#[rstest]
	fn test_remove_child_requires_parent(surface: MemorySurface) {
		let parent = surface.create_node("ul").unwrap();
		let item = surface.create_node("li").unwrap();
		assert!(surface.remove_child(parent, item).is_err());

		surface.append_child(parent, item).unwrap();
		surface.remove_child(parent, item).unwrap();
		assert_eq!(surface.first_child(parent).unwrap(), None);
	}

	#[rstest]
	fn test_remove_child_frees_subtree_and_listeners(surface: MemorySurface) {
		let list = surface.create_node("ul").unwrap();
		let item = surface.create_node("li").unwrap();
		let link = surface.create_node("a").unwrap();
		surface.append_child(list, item).unwrap();
		surface.append_child(item, link).unwrap();

		let captured = Arc::new(());
		let held = Arc::clone(&captured);
		surface
			.add_event_listener(
				link,
				"click",
				Callback::new(move || {
					let _ = &held;
				}),
			)
			.unwrap();
		assert_eq!(Arc::strong_count(&captured), 2);

		surface.remove_child(list, item).unwrap();

		assert_eq!(surface.node_count(), 2);
		assert_eq!(surface.kind_of(link), None);
		assert_eq!(Arc::strong_count(&captured), 1);
		assert_eq!(
			surface.append_child(list, item),
			Err(HostError::UnknownNode(item))
		);
	}

	#[rstest]
	fn test_known_kinds_reject_unknown() {
		let surface = MemorySurface::with_known_kinds(["div"]);
		assert!(surface.create_node("div").is_ok());
		assert_eq!(
			surface.create_node("blink"),
			Err(HostError::UnknownKind("blink".into()))
		);
	}

	#[rstest]
	fn test_unknown_node_is_reported(surface: MemorySurface) {
		let missing = NodeHandle::new(99);
		assert_eq!(
			surface.set_property(missing, "id", "x"),
			Err(HostError::UnknownNode(missing))
		);
	}

	#[rstest]
	fn test_dispatch_runs_matching_listeners(surface: MemorySurface) {
		let surface = Arc::new(surface);
		let node = surface.create_node("button").unwrap();
		let hits = Arc::new(AtomicUsize::new(0));

		let counter = Arc::clone(&hits);
		let reentrant = Arc::clone(&surface);
		surface
			.add_event_listener(
				node,
				"click",
				Callback::new(move || {
					counter.fetch_add(1, Ordering::SeqCst);
					reentrant.set_property(node, "clicked", "true").unwrap();
				}),
			)
			.unwrap();
		surface
			.add_event_listener(node, "focus", Callback::new(|| {}))
			.unwrap();

		assert_eq!(surface.dispatch(node, "click"), 1);
		assert_eq!(hits.load(Ordering::SeqCst), 1);
		assert_eq!(surface.property(node, "clicked").as_deref(), Some("true"));
		assert_eq!(surface.listener_count(node, "focus"), 1);
	}
}

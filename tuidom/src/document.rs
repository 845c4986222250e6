use std::collections::BTreeMap;
use std::fmt;

use crate::element::{Element, Tag};
use crate::error::DomError;
use crate::focus::FocusListeners;
use crate::geometry::{Rect, ScrollOffset};

/// Handle to a node in a [`Document`].
///
/// Ids are never reused, so a handle to a removed node stays dead instead of
/// silently pointing at whatever was inserted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live element in the document.
#[derive(Debug, Clone)]
pub struct Node {
    tag: Tag,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    tabindex: Option<i32>,
    text: Option<String>,
    bounds: Rect,
    pub(crate) scroll: ScrollOffset,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn from_element(element: Element, parent: Option<NodeId>) -> (Self, Vec<Element>) {
        let Element {
            tag,
            attributes,
            classes,
            tabindex,
            text,
            bounds,
            scroll_offset,
            children,
        } = element;
        let node = Self {
            tag,
            attributes,
            classes,
            tabindex,
            text,
            bounds,
            scroll: scroll_offset,
            parent,
            children: Vec::new(),
        };
        (node, children)
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn tabindex(&self) -> Option<i32> {
        self.tabindex
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Focusable at all, by script or by Tab.
    pub fn is_focusable(&self) -> bool {
        self.tabindex.is_some() || self.tag.natively_focusable()
    }

    /// Reachable with Tab.
    pub fn is_tabbable(&self) -> bool {
        match self.tabindex {
            Some(index) => index >= 0,
            None => self.tag.natively_focusable(),
        }
    }

    // Presentation setters. Tree structure is only changed through Document.
    pub fn set_attributes(&mut self, attributes: BTreeMap<String, String>) {
        self.attributes = attributes;
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn set_classes(&mut self, classes: Vec<String>) {
        self.classes = classes;
    }

    pub fn set_tabindex(&mut self, tabindex: Option<i32>) {
        self.tabindex = tabindex;
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Deferred work, run on the next [`Document::run_deferred`] tick.
pub type Deferred = Box<dyn FnOnce(&mut Document) + Send>;

/// An element tree with focus, scroll and a next-tick task queue.
///
/// The root node is the scrolling element: ancestor walks stop below it.
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    pub(crate) active: Option<NodeId>,
    pub(crate) hovered: Vec<NodeId>,
    pub(crate) listeners: FocusListeners,
    deferred: Vec<Deferred>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.len())
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

impl Document {
    /// Create a document whose root spans a `width` x `height` viewport.
    pub fn new(width: u16, height: u16) -> Self {
        let root = Element::new(Tag::Custom("html".into())).bounds(Rect::from_size(width, height));
        let (node, _) = Node::from_element(root, None);
        Self {
            nodes: vec![Some(node)],
            root: NodeId(0),
            active: None,
            hovered: Vec::new(),
            listeners: FocusListeners::default(),
            deferred: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The element whose scrolling is the viewport's own scrolling.
    pub fn scrolling_element(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node, DomError> {
        self.node(id).ok_or(DomError::NodeNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.node_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Parent chain of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// True if `id` is `ancestor` or lies somewhere beneath it.
    pub fn is_inclusive_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        (id == ancestor && self.contains(id)) || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Insert `element` and its subtree as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        self.get(parent)?;
        let id = self.insert_tree(parent, element);
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn insert_tree(&mut self, parent: NodeId, element: Element) -> NodeId {
        let (node, children) = Node::from_element(element, Some(parent));
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.insert_tree(id, child))
            .collect();
        if let Some(node) = self.node_mut(id) {
            node.children = child_ids;
        }
        id
    }

    /// Detach and drop `id` with its subtree. Drops native focus if the
    /// focused element was inside.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::RemoveRoot);
        }
        let parent = self.get(id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        if let Some(active) = self.active {
            if self.is_inclusive_descendant(active, id) {
                log::debug!("[dom] focused node {} removed with {}", active, id);
                self.active = None;
            }
        }
        self.hovered.retain(|hovered| *hovered != id);
        self.drop_tree(id);
        Ok(())
    }

    fn drop_tree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        for child in node.children {
            self.drop_tree(child);
        }
    }

    /// Replace every child of `id` with freshly inserted `children`.
    pub fn replace_children(
        &mut self,
        id: NodeId,
        children: Vec<Element>,
    ) -> Result<Vec<NodeId>, DomError> {
        let old = self.get(id)?.children.clone();
        for child in old {
            self.remove(child)?;
        }
        children
            .into_iter()
            .map(|child| self.append(id, child))
            .collect()
    }

    /// Put `order` first among `parent`'s children, in that order. Children
    /// not listed keep their relative order after them.
    pub fn reorder_children(&mut self, parent: NodeId, order: &[NodeId]) -> Result<(), DomError> {
        let node = self.get(parent)?;
        if let Some(stray) = order.iter().find(|id| !node.children.contains(id)) {
            return Err(DomError::NotAChild {
                parent,
                child: *stray,
            });
        }
        let rest = node
            .children
            .iter()
            .copied()
            .filter(|id| !order.contains(id));
        let children: Vec<NodeId> = order.iter().copied().chain(rest).collect();
        self.get_mut(parent)?.children = children;
        Ok(())
    }

    /// All live nodes under `id` (inclusive) in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        out.push(id);
        for child in &node.children {
            self.collect_descendants(*child, out);
        }
    }

    /// Concatenated text of `id` and its subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.node(n).and_then(Node::text))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Deferred tasks
    // -------------------------------------------------------------------------

    /// Schedule `task` for the next tick, like a zero-delay timer.
    pub fn defer(&mut self, task: impl FnOnce(&mut Document) + Send + 'static) {
        self.deferred.push(Box::new(task));
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Run every task scheduled before this call. Tasks scheduled while
    /// running wait for the following tick. Returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let tasks = std::mem::take(&mut self.deferred);
        let count = tasks.len();
        for task in tasks {
            task(self);
        }
        if count > 0 {
            log::trace!("[dom] ran {} deferred task(s)", count);
        }
        count
    }
}

/// Iterator over a node's ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

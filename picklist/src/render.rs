//! Rendering items into the document.

use std::collections::{BTreeMap, HashMap, HashSet};

use tuidom::{Document, DomError, Element, NodeId, Rect, Tag};

use crate::error::ItemsError;
use crate::item::Item;
use crate::state::Items;

/// Per-item render state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    pub index: usize,
    /// Whether this item has the focus index.
    pub focused: bool,
}

/// Turns an item into its visual content.
///
/// The widget wraps whatever this returns in a focusable wrapper element;
/// the renderer only draws the inside.
pub trait RenderItem: Send + Sync {
    /// Height of the item in rows.
    fn height(&self, _item: &Item) -> u16 {
        1
    }

    fn render(&self, item: &Item, state: ItemState) -> Element;
}

impl<F> RenderItem for F
where
    F: Fn(&Item, ItemState) -> Element + Send + Sync,
{
    fn render(&self, item: &Item, state: ItemState) -> Element {
        self(item, state)
    }
}

/// Renders an item's `label` field as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelRenderer;

impl RenderItem for LabelRenderer {
    fn render(&self, item: &Item, _state: ItemState) -> Element {
        Element::text(item.label().unwrap_or(&item.id))
    }
}

impl Items {
    /// Render every item as a wrapper element inside `container`.
    ///
    /// Wrappers are keyed by item id. An item whose id was rendered in the
    /// previous pass keeps its wrapper node (so native focus on it
    /// survives); wrappers of vanished items are removed. Wrappers stack
    /// vertically at the container's width, each `renderer.height` rows.
    pub fn render(
        &self,
        doc: &mut Document,
        container: NodeId,
        renderer: &dyn RenderItem,
    ) -> Result<(), ItemsError> {
        let items = self.items();
        let (focus, previous, previous_refs) = match self.inner.read() {
            Ok(guard) => (
                guard.focus_index,
                guard.keyed.clone(),
                guard.element_refs.clone(),
            ),
            Err(_) => return Ok(()),
        };
        let width = doc
            .node(container)
            .ok_or(DomError::NodeNotFound(container))?
            .bounds()
            .width;

        let mut keyed: HashMap<String, NodeId> = HashMap::with_capacity(items.len());
        let mut refs = Vec::with_capacity(items.len());
        let mut y: u16 = 0;

        for (index, item) in items.iter().enumerate() {
            let state = ItemState {
                index,
                focused: focus == Some(index),
            };
            let tag = item
                .wrapper_tag
                .as_deref()
                .map(Tag::from)
                .unwrap_or_else(|| self.config.wrapper_tag.clone());
            let height = renderer.height(item);
            let bounds = Rect::new(0, y, width, height);
            y = y.saturating_add(height);
            let content = renderer.render(item, state);

            // Duplicate ids get their own wrapper instead of sharing one.
            let reusable = previous.get(&item.id).copied().filter(|node| {
                !keyed.contains_key(&item.id)
                    && doc
                        .node(*node)
                        .is_some_and(|n| n.tag() == &tag && n.parent() == Some(container))
            });
            let node = match reusable {
                Some(node) => {
                    doc.replace_children(node, vec![content])?;
                    node
                }
                None => doc.append(container, Element::new(tag).child(content))?,
            };

            self.decorate(doc, node, item, state, bounds)?;
            keyed.entry(item.id.clone()).or_insert(node);
            refs.push(node);
        }

        let live: HashSet<NodeId> = refs.iter().copied().collect();
        for node in previous_refs.iter().chain(previous.values()) {
            if !live.contains(node) && doc.contains(*node) {
                doc.remove(*node)?;
            }
        }
        doc.reorder_children(container, &refs)?;

        log::trace!("[items] rendered {} item(s)", refs.len());
        if let Ok(mut guard) = self.inner.write() {
            guard.element_refs = refs;
            guard.keyed = keyed;
        }
        Ok(())
    }

    /// Apply the wrapper's attributes, classes, tabindex and box.
    /// Pass-through attributes go last and win, except `class`, which is
    /// merged into the class list.
    fn decorate(
        &self,
        doc: &mut Document,
        node: NodeId,
        item: &Item,
        state: ItemState,
        bounds: Rect,
    ) -> Result<(), ItemsError> {
        let mut attributes = BTreeMap::new();
        attributes.insert(self.config.marker_attribute.clone(), String::new());
        attributes.extend(item.wrapper_attributes.clone());

        let mut classes = vec![self.config.item_class.clone()];
        if state.focused {
            classes.push(self.config.focused_class.clone());
        }
        if let Some(extra) = attributes.remove("class") {
            classes.extend(extra.split_whitespace().map(String::from));
        }

        let tabindex = match attributes.remove("tabindex") {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                log::debug!("[items] ignoring tabindex {:?} on {}", value, item.id);
                0
            }),
            None => 0,
        };

        let wrapper = doc.node_mut(node).ok_or(DomError::NodeNotFound(node))?;
        wrapper.set_attributes(attributes);
        wrapper.set_classes(classes);
        wrapper.set_tabindex(Some(tabindex));
        wrapper.set_bounds(bounds);
        Ok(())
    }
}

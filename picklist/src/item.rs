//! Item records shown in the list.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::IdGenerator;
use crate::render::RenderItem;

/// Callback invoked with the item when it is chosen.
pub type SelectCallback = Arc<dyn Fn(&Item) + Send + Sync>;

/// One selectable entry, optionally carrying a nested menu.
///
/// Data fields serialize with serde; `on_select` and
/// `expand_menu_component` are runtime-only and skipped. Unknown fields are
/// kept in `extra` and written back out flattened.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity. Empty means "not assigned yet".
    #[serde(default)]
    pub id: String,

    #[serde(skip)]
    pub on_select: Option<SelectCallback>,

    /// Tag for the wrapper element (`"li"`, `"a"`, ...). `None` uses the
    /// widget's configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_tag: Option<String>,

    /// Passed through onto the wrapper element, after the widget's own
    /// attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub wrapper_attributes: BTreeMap<String, String>,

    /// Renderer for the nested menu, if this item opens one.
    #[serde(skip)]
    pub expand_menu_component: Option<Arc<dyn RenderItem>>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub expand_menu_props: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand_menu_items: Option<Vec<Item>>,

    /// Everything else, handed to the renderer untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Shorthand for an item with a `label` field.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self::new().field("label", label.into())
    }

    pub fn on_select(mut self, callback: impl Fn(&Item) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(callback));
        self
    }

    pub fn wrapper_tag(mut self, tag: impl Into<String>) -> Self {
        self.wrapper_tag = Some(tag.into());
        self
    }

    pub fn wrapper_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.wrapper_attributes.insert(name.into(), value.into());
        self
    }

    pub fn expand_menu(mut self, items: Vec<Item>) -> Self {
        self.expand_menu_items = Some(items);
        self
    }

    pub fn expand_menu_component(mut self, component: Arc<dyn RenderItem>) -> Self {
        self.expand_menu_component = Some(component);
        self
    }

    pub fn expand_menu_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.expand_menu_props.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn label(&self) -> Option<&str> {
        self.get("label").and_then(Value::as_str)
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Assign a fresh id if this item has none. Returns true if one was
    /// assigned.
    pub fn ensure_id(&mut self, ids: &dyn IdGenerator) -> bool {
        if self.has_id() {
            return false;
        }
        self.id = ids.new_id();
        true
    }
}

fn same_arc<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        _ => false,
    }
}

/// Deep equality over the data fields; callbacks and renderers compare by
/// pointer.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.wrapper_tag == other.wrapper_tag
            && self.wrapper_attributes == other.wrapper_attributes
            && self.expand_menu_props == other.expand_menu_props
            && self.expand_menu_items == other.expand_menu_items
            && self.extra == other.extra
            && same_arc(&self.on_select, &other.on_select)
            && same_arc(&self.expand_menu_component, &other.expand_menu_component)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("on_select", &self.on_select.is_some())
            .field("wrapper_tag", &self.wrapper_tag)
            .field("wrapper_attributes", &self.wrapper_attributes)
            .field(
                "expand_menu_component",
                &self.expand_menu_component.is_some(),
            )
            .field("expand_menu_props", &self.expand_menu_props)
            .field("expand_menu_items", &self.expand_menu_items)
            .field("extra", &self.extra)
            .finish()
    }
}

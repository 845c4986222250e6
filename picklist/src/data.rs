//! The shared, two-way-bound item collection.

use std::sync::{Arc, RwLock};

use crate::item::Item;

/// Handle to an item collection shared between the owner and the widget.
///
/// Clones share the same collection: editing through one handle is an
/// in-place mutation seen by every clone. Passing a handle built with
/// [`ItemsData::new`] is a structural replacement. Ids the widget assigns
/// are written into the shared collection, so the owner sees them too.
#[derive(Debug, Clone, Default)]
pub struct ItemsData {
    inner: Arc<RwLock<Vec<Item>>>,
}

impl ItemsData {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Item> {
        self.inner.read().ok().and_then(|g| g.get(index).cloned())
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Item> {
        self.inner.read().map(|g| g.clone()).unwrap_or_default()
    }

    /// Edit the collection in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<Item>) -> R) -> Option<R> {
        self.inner.write().ok().map(|mut g| f(&mut g))
    }

    /// Whether both handles point at the same collection.
    pub fn same_collection(&self, other: &ItemsData) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Vec<Item>> for ItemsData {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

/// What [`Items::sync`](crate::Items::sync) observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChange {
    /// Same collection, same contents.
    Unchanged,
    /// Same collection, edited in place.
    Mutated,
    /// A different collection was supplied.
    Replaced,
}

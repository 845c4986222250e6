//! Widget state and lifecycle.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tuidom::{BindOptions, BindingOwner, Document, Keybinds, ListenerId, NodeId};

use crate::config::ItemsConfig;
use crate::data::{DataChange, ItemsData};
use crate::error::ItemsError;
use crate::events::ItemsEvent;
use crate::identity::{IdGenerator, UuidIds, identify};
use crate::item::Item;

/// Internal state for the widget.
#[derive(Debug)]
pub(crate) struct ItemsInner {
    /// The bound collection.
    pub data: ItemsData,
    /// Contents as of the last sync, for deep change detection.
    pub snapshot: Vec<Item>,
    /// Focused position in `data`.
    pub focus_index: Option<usize>,
    /// Wrapper element per item, by index. Rebuilt on every render pass.
    pub element_refs: Vec<NodeId>,
    /// Wrapper element per item id, for reuse across passes.
    pub keyed: HashMap<String, NodeId>,
    /// Events waiting for the owner.
    pub events: Vec<ItemsEvent>,
    /// Document focus-in listener while mounted.
    pub listener: Option<ListenerId>,
}

impl ItemsInner {
    /// Move focus, queuing a change event. Returns true if it moved.
    pub fn set_focus(&mut self, index: Option<usize>) -> bool {
        if self.focus_index == index {
            return false;
        }
        let previous = std::mem::replace(&mut self.focus_index, index);
        log::debug!("[items] focus {:?} -> {:?}", previous, index);
        self.events.push(ItemsEvent::FocusChanged {
            previous,
            current: index,
        });
        true
    }
}

/// A focus-navigable selectable list.
///
/// `Items` is a cheap handle: clones share state. The document listener and
/// key bindings installed by [`mount`](Self::mount) hold clones, so state
/// lives until [`unmount`](Self::unmount).
///
/// Locks on the shared state are never held across a call into the
/// document, because focusing an element synchronously runs every focus-in
/// listener, this widget's included.
#[derive(Clone)]
pub struct Items {
    owner: BindingOwner,
    pub(crate) inner: Arc<RwLock<ItemsInner>>,
    pub(crate) config: Arc<ItemsConfig>,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for Items {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Items")
            .field("owner", &self.owner)
            .field("inner", &self.inner)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Items {
    /// Create a widget bound to `data` with default configuration.
    /// Items without ids get one immediately.
    pub fn new(data: ItemsData) -> Self {
        Self::with_config(data, ItemsConfig::default())
    }

    pub fn with_config(data: ItemsData, config: ItemsConfig) -> Self {
        Self::with_id_generator(data, config, Arc::new(UuidIds))
    }

    pub fn with_id_generator(
        data: ItemsData,
        config: ItemsConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        data.update(|items| {
            identify(items, ids.as_ref());
        });
        let snapshot = data.snapshot();
        Self {
            owner: BindingOwner::new(),
            inner: Arc::new(RwLock::new(ItemsInner {
                data,
                snapshot,
                focus_index: None,
                element_refs: Vec::new(),
                keyed: HashMap::new(),
                events: Vec::new(),
                listener: None,
            })),
            config: Arc::new(config),
            ids,
        }
    }

    pub fn config(&self) -> &ItemsConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Handle to the bound collection.
    pub fn data(&self) -> ItemsData {
        self.inner
            .read()
            .map(|g| g.data.clone())
            .unwrap_or_default()
    }

    /// The identified items, for binding back to the owner.
    pub fn items(&self) -> Vec<Item> {
        self.data().snapshot()
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.focus_index)
    }

    pub fn focused_item(&self) -> Option<Item> {
        let index = self.focus_index()?;
        self.data().get(index)
    }

    /// Wrapper elements from the last render pass, by item index.
    pub fn element_refs(&self) -> Vec<NodeId> {
        self.inner
            .read()
            .map(|g| g.element_refs.clone())
            .unwrap_or_default()
    }

    pub fn element_at(&self, index: usize) -> Option<NodeId> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.element_refs.get(index).copied())
    }

    /// Index of the item whose wrapper is `node` or contains it.
    pub fn index_of(&self, doc: &Document, node: NodeId) -> Option<usize> {
        let refs = self.element_refs();
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .find_map(|candidate| refs.iter().position(|r| *r == candidate))
    }

    /// Take every event queued since the last call.
    pub fn take_events(&self) -> Vec<ItemsEvent> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.events))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Upstream data
    // -------------------------------------------------------------------------

    /// Reconcile with the owner's collection.
    ///
    /// A different handle than the one currently bound is a structural
    /// replacement: it is adopted, identified and focus resets. The same
    /// handle with different contents is an in-place edit: it is
    /// re-identified and focus survives unless it now points past the end.
    pub fn sync(&self, data: &ItemsData) -> DataChange {
        let (replaced, changed) = match self.inner.read() {
            Ok(guard) => {
                let replaced = !guard.data.same_collection(data);
                (replaced, replaced || guard.snapshot != data.snapshot())
            }
            Err(_) => return DataChange::Unchanged,
        };
        if !changed {
            return DataChange::Unchanged;
        }

        data.update(|items| {
            identify(items, self.ids.as_ref());
        });
        let snapshot = data.snapshot();

        if let Ok(mut guard) = self.inner.write() {
            if replaced {
                log::debug!("[items] collection replaced ({} items)", snapshot.len());
                guard.data = data.clone();
                guard.set_focus(None);
            } else if guard.focus_index.is_some_and(|i| i >= snapshot.len()) {
                log::debug!("[items] focus past end after edit, clearing");
                guard.set_focus(None);
            }
            guard.snapshot = snapshot;
        }

        if replaced {
            DataChange::Replaced
        } else {
            DataChange::Mutated
        }
    }

    /// Replace the bound collection with new contents.
    pub fn set_items(&self, items: Vec<Item>) -> ItemsData {
        let data = ItemsData::new(items);
        self.sync(&data);
        data
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn is_mounted(&self) -> bool {
        self.inner.read().is_ok_and(|g| g.listener.is_some())
    }

    /// Install the document focus-in listener and the list key bindings.
    /// Mounting twice is a no-op.
    pub fn mount(&self, doc: &mut Document, keybinds: &mut Keybinds) -> Result<(), ItemsError> {
        if self.is_mounted() {
            return Ok(());
        }
        let keys = self.config.keys.parse()?;

        let widget = self.clone();
        let listener = doc.add_focus_listener(move |doc, event| widget.handle_focus_in(doc, event));

        let typing_ok = BindOptions {
            input: true,
            prevent: true,
            stop: true,
        };
        let not_while_typing = BindOptions {
            input: false,
            ..typing_ok
        };

        let widget = self.clone();
        keybinds.bind(keys.up, self.owner, typing_ok, move |doc| {
            if let Err(err) = widget.focus_previous(doc, false) {
                log::warn!("[items] focus_previous failed: {}", err);
            }
        });
        let widget = self.clone();
        keybinds.bind(keys.down, self.owner, typing_ok, move |doc| {
            if let Err(err) = widget.focus_next(doc, false) {
                log::warn!("[items] focus_next failed: {}", err);
            }
        });
        let widget = self.clone();
        keybinds.bind(keys.enter, self.owner, typing_ok, move |_| {
            widget.select();
        });
        let widget = self.clone();
        keybinds.bind(keys.space, self.owner, not_while_typing, move |_| {
            widget.select();
        });

        if let Ok(mut guard) = self.inner.write() {
            guard.listener = Some(listener);
        }
        log::debug!("[items] mounted {:?}", self.owner);
        Ok(())
    }

    /// Remove the listener and key bindings. Safe to call repeatedly.
    pub fn unmount(&self, doc: &mut Document, keybinds: &mut Keybinds) {
        let listener = self.inner.write().ok().and_then(|mut g| g.listener.take());
        if let Some(listener) = listener {
            doc.remove_focus_listener(listener);
        }
        let removed = keybinds.unbind_owner(self.owner);
        if removed > 0 {
            log::debug!("[items] unmounted {:?}", self.owner);
        }
    }
}

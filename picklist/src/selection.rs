//! Committing a selection.

use crate::events::ItemsEvent;
use crate::item::Item;
use crate::state::Items;

impl Items {
    /// Choose the focused item: run its `on_select`, then queue
    /// [`ItemsEvent::Selected`]. Does nothing when no item is focused.
    pub fn select(&self) -> Option<Item> {
        let index = self.focus_index()?;
        self.select_index(index)
    }

    /// Choose the item at `index` without moving focus. This is the click
    /// path. Returns `None` if there is no such item.
    pub fn select_index(&self, index: usize) -> Option<Item> {
        let item = self.data().get(index)?;
        log::debug!("[items] select {} ({})", index, item.id);

        // No lock is held here; the callback may call back into the widget.
        if let Some(on_select) = &item.on_select {
            on_select(&item);
        }

        if let Ok(mut guard) = self.inner.write() {
            guard.events.push(ItemsEvent::Selected(item.clone()));
        }
        Some(item)
    }
}

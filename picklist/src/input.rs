//! Pointer events on item wrappers.

use tuidom::{Document, Event, MouseButton};

use crate::error::ItemsError;
use crate::state::Items;

impl Items {
    /// Route a pointer event to the list. Returns true if it was handled.
    ///
    /// The pointer entering a wrapper focuses that item without scrolling.
    /// A left click on a wrapper, or anything inside one, selects that item.
    /// Key events go through [`Keybinds`](tuidom::Keybinds) instead and are
    /// ignored here.
    pub fn handle_event(&self, doc: &mut Document, event: &Event) -> Result<bool, ItemsError> {
        match event {
            Event::MouseEnter { target } => {
                let position = self.element_refs().iter().position(|r| r == target);
                let Some(index) = position else {
                    return Ok(false);
                };
                self.focus_to_index(doc, index, true)?;
                Ok(true)
            }
            Event::Click {
                target,
                button: MouseButton::Left,
            } => match self.index_of(doc, *target) {
                Some(index) => Ok(self.select_index(index).is_some()),
                None => Ok(false),
            },
            _ => Ok(false),
        }
    }
}

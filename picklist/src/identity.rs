//! Stable identity for items.

use uuid::Uuid;

use crate::item::Item;

/// Source of fresh, globally unique ids.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random v4 UUIDs in their 32-character simple form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn new_id(&self) -> String {
        self()
    }
}

/// Give every item without an id a fresh one, recursing depth-first into
/// nested menus. Existing ids are never touched, so running this twice is
/// the same as running it once.
///
/// Returns the same slice for chaining.
pub fn identify<'a>(items: &'a mut [Item], ids: &dyn IdGenerator) -> &'a mut [Item] {
    for item in items.iter_mut() {
        if item.ensure_id(ids) {
            log::trace!("[items] assigned id {}", item.id);
        }
        if let Some(children) = item.expand_menu_items.as_mut() {
            identify(children, ids);
        }
    }
    items
}

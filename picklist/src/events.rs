//! Events the widget reports to its owner.

use crate::item::Item;

/// Drained with [`Items::take_events`](crate::Items::take_events).
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsEvent {
    /// An item was chosen (Enter, Space or click).
    Selected(Item),
    /// The focus index moved. `None` means nothing is focused.
    FocusChanged {
        previous: Option<usize>,
        current: Option<usize>,
    },
}

mod node;
mod tag;

pub use node::Element;
pub use tag::{InputType, Tag};

/// Attribute that marks an element as a wrapper owned by a list widget.
///
/// Kept here so widgets and hosts agree on the name without depending on
/// each other.
pub const ITEM_MARKER: &str = "data-select-item";

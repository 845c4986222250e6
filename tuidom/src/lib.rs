pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod geometry;
pub mod keybinds;
pub mod scroll;

pub use document::{Document, Node, NodeId};
pub use element::{Element, InputType, Tag, ITEM_MARKER};
pub use error::{DomError, KeyParseError};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use focus::{FocusEvent, FocusOptions, ListenerId};
pub use geometry::{Rect, ScrollOffset};
pub use keybinds::{BindOptions, BindingOwner, KeyCombo, KeyOutcome, Keybinds};
pub use scroll::{ScrollAlign, ScrollBehavior, ScrollIntoViewOptions};

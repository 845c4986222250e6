//! A focus-navigable selectable list for [`tuidom`] documents.
//!
//! [`Items`] binds to a shared [`ItemsData`] collection, renders each item
//! into a focusable wrapper element, moves focus with the arrow keys or the
//! pointer, and reports choices as [`ItemsEvent`]s.

mod config;
mod data;
mod error;
mod events;
mod focus;
mod identity;
mod input;
mod item;
mod render;
mod selection;
mod state;

pub use config::{ItemsConfig, KeyMap};
pub use data::{DataChange, ItemsData};
pub use error::ItemsError;
pub use events::ItemsEvent;
pub use identity::{IdGenerator, UuidIds, identify};
pub use item::{Item, SelectCallback};
pub use render::{ItemState, LabelRenderer, RenderItem};
pub use state::Items;

//! Widget configuration.

use tuidom::{ITEM_MARKER, KeyCombo, ScrollIntoViewOptions, Tag};

use crate::error::ItemsError;

/// Per-widget configuration.
#[derive(Debug, Clone)]
pub struct ItemsConfig {
    /// Wrapper tag for items that don't name one.
    pub wrapper_tag: Tag,

    /// Class on every wrapper.
    pub item_class: String,

    /// Extra class on the focused wrapper.
    pub focused_class: String,

    /// Attribute marking wrappers as list items. Focus moving to an element
    /// without it counts as focus leaving the list.
    pub marker_attribute: String,

    pub keys: KeyMap,

    /// How keyboard moves bring the focused item into view.
    pub scroll_into_view: ScrollIntoViewOptions,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            wrapper_tag: Tag::Div,
            item_class: "select-item".into(),
            focused_class: "select-item-focused".into(),
            marker_attribute: ITEM_MARKER.into(),
            keys: KeyMap::default(),
            scroll_into_view: ScrollIntoViewOptions::smooth_center(),
        }
    }
}

impl ItemsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrapper_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.wrapper_tag = tag.into();
        self
    }

    pub fn item_class(mut self, class: impl Into<String>) -> Self {
        self.item_class = class.into();
        self
    }

    pub fn focused_class(mut self, class: impl Into<String>) -> Self {
        self.focused_class = class.into();
        self
    }

    pub fn marker_attribute(mut self, name: impl Into<String>) -> Self {
        self.marker_attribute = name.into();
        self
    }

    pub fn keys(mut self, keys: KeyMap) -> Self {
        self.keys = keys;
        self
    }

    pub fn scroll_into_view(mut self, options: ScrollIntoViewOptions) -> Self {
        self.scroll_into_view = options;
        self
    }
}

/// Key combos for the list actions, in `"ctrl+n"` notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub up: String,
    pub down: String,
    pub enter: String,
    pub space: String,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            up: "up".into(),
            down: "down".into(),
            enter: "enter".into(),
            space: "space".into(),
        }
    }
}

/// A key map with every combo parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedKeyMap {
    pub up: KeyCombo,
    pub down: KeyCombo,
    pub enter: KeyCombo,
    pub space: KeyCombo,
}

impl KeyMap {
    pub(crate) fn parse(&self) -> Result<ParsedKeyMap, ItemsError> {
        Ok(ParsedKeyMap {
            up: self.up.parse()?,
            down: self.down.parse()?,
            enter: self.enter.parse()?,
            space: self.space.parse()?,
        })
    }
}

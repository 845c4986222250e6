use std::collections::BTreeMap;

use super::{InputType, Tag};
use crate::geometry::{Rect, ScrollOffset};

/// A detached element description.
///
/// Elements are built with chained setters and then inserted into a
/// [`Document`](crate::Document), which takes ownership of the tree and hands
/// back a [`NodeId`](crate::NodeId) for the root of what was inserted.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: Tag,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    /// `None` means no tabindex attribute. Negative values are focusable
    /// programmatically but skipped by Tab.
    pub tabindex: Option<i32>,
    pub text: Option<String>,

    // Layout box relative to the parent's content origin.
    pub bounds: Rect,
    pub scroll_offset: ScrollOffset,

    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: Tag::Span,
            text: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            tag: Tag::Button,
            text: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn input(ty: InputType) -> Self {
        Self::new(Tag::Input(ty))
    }

    pub fn textarea() -> Self {
        Self::new(Tag::TextArea)
    }

    pub fn select() -> Self {
        Self::new(Tag::Select)
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attrs<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    // Layout
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn scroll_offset(mut self, x: u16, y: u16) -> Self {
        self.scroll_offset = ScrollOffset::new(x, y);
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

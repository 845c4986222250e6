use crate::document::{Document, NodeId};
use crate::error::DomError;
use crate::geometry::ScrollOffset;

/// How a scroll request should move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    /// Requested as an animated scroll. Offsets are applied immediately;
    /// the behavior is recorded for whoever animates the frame.
    Smooth,
}

/// Where the target should land inside each scrolled ancestor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
    /// Scroll the least amount needed; leave alone if already visible.
    #[default]
    Nearest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    /// Vertical alignment.
    pub block: ScrollAlign,
    /// Horizontal alignment.
    pub inline: ScrollAlign,
}

impl ScrollIntoViewOptions {
    /// What native focus uses to reveal an element.
    pub const fn nearest() -> Self {
        Self {
            behavior: ScrollBehavior::Instant,
            block: ScrollAlign::Nearest,
            inline: ScrollAlign::Nearest,
        }
    }

    /// Smooth scroll that centers the target on both axes.
    pub const fn smooth_center() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollAlign::Center,
            inline: ScrollAlign::Center,
        }
    }
}

impl Document {
    pub fn scroll_offset(&self, id: NodeId) -> Option<ScrollOffset> {
        self.node(id).map(|node| node.scroll)
    }

    /// Set the scroll offset, clamped to what the content allows.
    /// Returns the offset actually applied.
    pub fn set_scroll_offset(
        &mut self,
        id: NodeId,
        x: u16,
        y: u16,
    ) -> Result<ScrollOffset, DomError> {
        let (max_x, max_y) = self.max_scroll(id)?;
        let offset = ScrollOffset::new(x.min(max_x), y.min(max_y));
        self.get_mut(id)?.scroll = offset;
        Ok(offset)
    }

    /// Scroll by a delta. Returns true if the offset changed.
    pub fn scroll_by(&mut self, id: NodeId, dx: i32, dy: i32) -> Result<bool, DomError> {
        let current = self.get(id)?.scroll;
        let x = (i32::from(current.x) + dx).clamp(0, i32::from(u16::MAX)) as u16;
        let y = (i32::from(current.y) + dy).clamp(0, i32::from(u16::MAX)) as u16;
        Ok(self.set_scroll_offset(id, x, y)? != current)
    }

    /// Size of the element's box.
    pub fn client_size(&self, id: NodeId) -> Result<(u16, u16), DomError> {
        let bounds = self.get(id)?.bounds();
        Ok((bounds.width, bounds.height))
    }

    /// Size of the element's content: its own box, grown to cover every
    /// child box.
    pub fn content_size(&self, id: NodeId) -> Result<(u16, u16), DomError> {
        let node = self.get(id)?;
        let bounds = node.bounds();
        let (mut width, mut height) = (bounds.width, bounds.height);
        for child in node.children() {
            if let Some(child) = self.node(*child) {
                let child = child.bounds();
                width = width.max(child.right());
                height = height.max(child.bottom());
            }
        }
        Ok((width, height))
    }

    pub fn max_scroll(&self, id: NodeId) -> Result<(u16, u16), DomError> {
        let (client_w, client_h) = self.client_size(id)?;
        let (content_w, content_h) = self.content_size(id)?;
        Ok((
            content_w.saturating_sub(client_w),
            content_h.saturating_sub(client_h),
        ))
    }

    /// True if the content does not fit the box on either axis, i.e. the
    /// element is a scroll container.
    pub fn is_overflowing(&self, id: NodeId) -> bool {
        self.max_scroll(id).is_ok_and(|(x, y)| x > 0 || y > 0)
    }

    /// Position of `id` inside `ancestor`'s content, accounting for the
    /// scroll of every element in between.
    pub fn offset_within(&self, id: NodeId, ancestor: NodeId) -> Option<(i32, i32)> {
        let (mut x, mut y) = (0i32, 0i32);
        let mut current = id;
        loop {
            let node = self.node(current)?;
            x += i32::from(node.bounds().x);
            y += i32::from(node.bounds().y);
            let parent = node.parent()?;
            if parent == ancestor {
                return Some((x, y));
            }
            let scroll = self.node(parent)?.scroll;
            x -= i32::from(scroll.x);
            y -= i32::from(scroll.y);
            current = parent;
        }
    }

    /// Scroll every overflowing ancestor of `id`, innermost first, so the
    /// element lands where `options` asks.
    pub fn scroll_into_view(
        &mut self,
        id: NodeId,
        options: ScrollIntoViewOptions,
    ) -> Result<(), DomError> {
        let target = self.get(id)?.bounds();
        let containers: Vec<NodeId> = self
            .ancestors(id)
            .filter(|ancestor| self.is_overflowing(*ancestor))
            .collect();

        for container in containers {
            let Some((x, y)) = self.offset_within(id, container) else {
                continue;
            };
            let (client_w, client_h) = self.client_size(container)?;
            let current = self.get(container)?.scroll;
            let new_x = align(options.inline, x, target.width, client_w, current.x);
            let new_y = align(options.block, y, target.height, client_h, current.y);
            let applied = self.set_scroll_offset(container, new_x, new_y)?;
            if applied != current {
                log::trace!(
                    "[scroll] {} in {}: {:?} -> {:?} ({:?})",
                    id,
                    container,
                    current,
                    applied,
                    options.behavior
                );
            }
        }
        Ok(())
    }
}

fn align(mode: ScrollAlign, pos: i32, size: u16, client: u16, current: u16) -> u16 {
    let size = i32::from(size);
    let client = i32::from(client);
    let current_i = i32::from(current);
    let wanted = match mode {
        ScrollAlign::Start => pos,
        ScrollAlign::End => pos + size - client,
        ScrollAlign::Center => pos + size / 2 - client / 2,
        ScrollAlign::Nearest => {
            if pos < current_i {
                pos
            } else if pos + size > current_i + client {
                // Larger than the box: show its start.
                if size > client {
                    pos
                } else {
                    pos + size - client
                }
            } else {
                return current;
            }
        }
    };
    wanted.clamp(0, i32::from(u16::MAX)) as u16
}

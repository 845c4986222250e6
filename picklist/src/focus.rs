//! Focus navigation and native focus reconciliation.

use tuidom::{Document, FocusEvent, NodeId, ScrollOffset};

use crate::error::ItemsError;
use crate::state::Items;

/// Scroll offsets of a target's scrolled ancestors, captured before a
/// programmatic focus so they can be put back afterwards.
#[derive(Debug, Clone, Default)]
struct ScrollPreservation {
    saved: Vec<(NodeId, ScrollOffset)>,
}

impl ScrollPreservation {
    /// Record every overflowing ancestor from the target's parent up to,
    /// not including, the scrolling root.
    fn capture(doc: &Document, target: NodeId) -> Self {
        let root = doc.scrolling_element();
        let saved = doc
            .ancestors(target)
            .take_while(|ancestor| *ancestor != root)
            .filter(|ancestor| doc.is_overflowing(*ancestor))
            .filter_map(|ancestor| Some((ancestor, doc.scroll_offset(ancestor)?)))
            .collect();
        Self { saved }
    }

    /// Put every recorded offset back. Ancestors gone since the capture are
    /// skipped.
    fn restore(&self, doc: &mut Document) {
        for (ancestor, offset) in &self.saved {
            if let Err(err) = doc.set_scroll_offset(*ancestor, offset.x, offset.y) {
                log::trace!("[scroll] restore skipped: {}", err);
            }
        }
    }
}

impl Items {
    /// Move focus to the next item, wrapping from the last to the first.
    /// From no focus it lands on the first item. Returns the new index, or
    /// `None` for an empty list.
    pub fn focus_next(
        &self,
        doc: &mut Document,
        via_pointer: bool,
    ) -> Result<Option<usize>, ItemsError> {
        self.step(doc, via_pointer, |current, len| match current {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        })
    }

    /// Move focus to the previous item, wrapping from the first to the last.
    /// From no focus it lands on the last item.
    pub fn focus_previous(
        &self,
        doc: &mut Document,
        via_pointer: bool,
    ) -> Result<Option<usize>, ItemsError> {
        self.step(doc, via_pointer, |current, len| match current {
            Some(i) if i > 0 => (i - 1).min(len - 1),
            _ => len - 1,
        })
    }

    /// Focus `index` directly. Pointer hover uses this with
    /// `via_pointer = true`.
    pub fn focus_to_index(
        &self,
        doc: &mut Document,
        index: usize,
        via_pointer: bool,
    ) -> Result<(), ItemsError> {
        let len = self.len();
        if index >= len {
            return Err(ItemsError::IndexOutOfBounds { index, len });
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.set_focus(Some(index));
        }
        self.after_focus(doc, index, via_pointer)
    }

    fn step(
        &self,
        doc: &mut Document,
        via_pointer: bool,
        next: impl FnOnce(Option<usize>, usize) -> usize,
    ) -> Result<Option<usize>, ItemsError> {
        let index = {
            let Ok(mut guard) = self.inner.write() else {
                return Ok(None);
            };
            let len = guard.data.len();
            if len == 0 {
                return Ok(None);
            }
            let index = next(guard.focus_index, len);
            guard.set_focus(Some(index));
            index
        };
        self.after_focus(doc, index, via_pointer)?;
        Ok(Some(index))
    }

    /// Runs after every focus move.
    ///
    /// Moving native focus makes the document scroll ancestors to reveal the
    /// target. Their offsets are captured first and restored on the next
    /// tick, after that scroll has happened. Keyboard moves then scroll the
    /// target into view explicitly; pointer moves leave the viewport alone.
    /// Native focus is not taken while the user is typing in a text field.
    ///
    /// The index has already moved when this runs. A wrapper that was
    /// removed or made unfocusable since the last render keeps the index
    /// and is only logged.
    fn after_focus(
        &self,
        doc: &mut Document,
        index: usize,
        via_pointer: bool,
    ) -> Result<(), ItemsError> {
        let Some(target) = self.element_at(index) else {
            log::debug!("[items] no element for index {} yet, skipping focus", index);
            return Ok(());
        };

        let preserved = ScrollPreservation::capture(doc, target);
        let scroll_options = self.config.scroll_into_view;
        doc.defer(move |doc| {
            preserved.restore(doc);
            if via_pointer {
                return;
            }
            if let Err(err) = doc.scroll_into_view(target, scroll_options) {
                log::trace!("[scroll] scroll into view skipped: {}", err);
            }
        });

        if doc.is_text_input_active() {
            log::trace!("[items] text input active, not taking focus");
            return Ok(());
        }
        if let Err(err) = doc.focus(target) {
            log::debug!("[items] native focus on {} failed: {}", target, err);
        }
        Ok(())
    }

    /// Document-level focus-in handler.
    ///
    /// Focus landing on one of this list's wrappers syncs the index to it.
    /// Focus landing on anything not marked as a list item means focus left
    /// the list, and the index clears.
    pub(crate) fn handle_focus_in(&self, doc: &Document, event: &FocusEvent) {
        let marked = doc
            .node(event.target)
            .is_some_and(|node| node.has_attribute(&self.config.marker_attribute));

        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let position = guard.element_refs.iter().position(|r| *r == event.target);
        if let Some(index) = position {
            guard.set_focus(Some(index));
        } else if !marked {
            guard.set_focus(None);
        }
    }
}

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::document::{Document, NodeId};
use crate::error::DomError;
use crate::scroll::ScrollIntoViewOptions;

/// Payload of a document-level focus-in notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    /// The element that just received focus.
    pub target: NodeId,
    /// The element that held focus before, if any.
    pub related: Option<NodeId>,
}

/// Options for [`Document::focus_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOptions {
    /// Skip the reveal-scroll that focusing normally performs.
    pub prevent_scroll: bool,
}

/// Handle returned by [`Document::add_focus_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

pub type FocusListener = Arc<dyn Fn(&Document, &FocusEvent) + Send + Sync>;

/// Registered focus-in listeners, in registration order.
#[derive(Default)]
pub(crate) struct FocusListeners {
    entries: Vec<(ListenerId, FocusListener)>,
}

impl FocusListeners {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for FocusListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

impl Document {
    /// The natively focused element, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// True while the user is typing: the active element is a textarea, a
    /// select, or an input of a text-like type.
    pub fn is_text_input_active(&self) -> bool {
        self.active
            .and_then(|id| self.node(id))
            .is_some_and(|node| node.tag().accepts_text())
    }

    /// Move native focus to `id`, revealing it in scrolled ancestors.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: NodeId) -> Result<bool, DomError> {
        self.focus_with(id, FocusOptions::default())
    }

    /// Move native focus to `id`.
    ///
    /// Unless `prevent_scroll` is set, every overflowing ancestor is scrolled
    /// just enough to bring the element into view, the way a browser does.
    /// Focus-in listeners run after the scroll, synchronously.
    pub fn focus_with(&mut self, id: NodeId, options: FocusOptions) -> Result<bool, DomError> {
        let node = self.get(id)?;
        if !node.is_focusable() {
            return Err(DomError::NotFocusable(id));
        }
        if self.active == Some(id) {
            return Ok(false);
        }

        let related = self.active.replace(id);
        log::debug!("[focus] {:?} -> {}", related, id);

        if !options.prevent_scroll {
            self.scroll_into_view(id, ScrollIntoViewOptions::nearest())?;
        }

        self.dispatch_focus_in(&FocusEvent {
            target: id,
            related,
        });
        Ok(true)
    }

    /// Clear native focus. Returns the element that lost it.
    pub fn blur(&mut self) -> Option<NodeId> {
        let previous = self.active.take();
        if let Some(previous) = previous {
            log::debug!("[focus] blur {}", previous);
        }
        previous
    }

    /// Tab navigation: focus the next (or previous) tabbable element in
    /// document order, wrapping at either end.
    /// Returns the newly focused element if focus changed.
    pub fn tab(&mut self, forward: bool) -> Result<Option<NodeId>, DomError> {
        let tabbable = self.collect_tabbable();
        if tabbable.is_empty() {
            return Ok(None);
        }

        let last = tabbable.len() - 1;
        let current = self
            .active
            .and_then(|active| tabbable.iter().position(|id| *id == active));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) if i == last => 0,
            (Some(i), true) => i + 1,
            (Some(0), false) => last,
            (Some(i), false) => i - 1,
        };

        let target = tabbable[next];
        Ok(self.focus(target)?.then_some(target))
    }

    /// Tabbable elements in document order.
    pub fn collect_tabbable(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|node| node.is_tabbable()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a document-level focus-in listener. It sees every focus
    /// change in the document, not only those inside the caller's subtree.
    pub fn add_focus_listener(
        &mut self,
        listener: impl Fn(&Document, &FocusEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.entries.push((id, Arc::new(listener)));
        log::trace!("[focus] listener {:?} added", id);
        id
    }

    /// Remove a listener. Removing an unknown or already removed id is a
    /// no-op that returns false.
    pub fn remove_focus_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.entries.len();
        self.listeners.entries.retain(|(entry, _)| *entry != id);
        before != self.listeners.entries.len()
    }

    pub fn focus_listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn dispatch_focus_in(&self, event: &FocusEvent) {
        for (_, listener) in &self.listeners.entries {
            listener(self, event);
        }
    }
}

use crate::document::{Document, NodeId};

/// Input events, targeted at document nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press. Routed through [`Keybinds`](crate::Keybinds), not a target.
    Key { key: Key, modifiers: Modifiers },
    /// Pointer click on the deepest element under the pointer.
    /// Widgets resolve it against their own nodes by walking ancestors.
    Click { target: NodeId, button: MouseButton },
    /// Pointer entered `target`. Fired once per element entered, outermost
    /// first; does not bubble.
    MouseEnter { target: NodeId },
    /// Pointer left `target`. Innermost first; does not bubble.
    MouseLeave { target: NodeId },
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl Document {
    /// Move the pointer onto `target` (or off the document with `None`) and
    /// return the leave/enter events that produces.
    pub fn hover(&mut self, target: Option<NodeId>) -> Vec<Event> {
        let mut chain: Vec<NodeId> = match target.filter(|id| self.contains(*id)) {
            Some(id) => std::iter::once(id).chain(self.ancestors(id)).collect(),
            None => Vec::new(),
        };
        chain.reverse();

        let previous = std::mem::take(&mut self.hovered);
        let mut events: Vec<Event> = previous
            .iter()
            .rev()
            .filter(|id| !chain.contains(id))
            .map(|id| Event::MouseLeave { target: *id })
            .collect();
        events.extend(
            chain
                .iter()
                .filter(|id| !previous.contains(id))
                .map(|id| Event::MouseEnter { target: *id }),
        );

        log::trace!("[pointer] hover {:?}: {} event(s)", target, events.len());
        self.hovered = chain;
        events
    }

    /// The element directly under the pointer.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered.last().copied()
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for Event {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Event::Key {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}

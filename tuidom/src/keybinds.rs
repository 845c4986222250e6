use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::document::Document;
use crate::error::KeyParseError;
use crate::event::{Event, Key, Modifiers};

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

/// Parses combos like `"up"`, `"space"`, `"ctrl+n"`, `"shift+f5"`, `"a"`.
impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        // A lone "+" is the plus key, and "ctrl++" is ctrl with plus.
        let (mods, key) = match s.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None => match s.rsplit_once('+') {
                Some((mods, key)) if !key.is_empty() => (mods, key),
                _ => ("", s),
            },
        };

        let mut combo = KeyCombo::key(parse_key(key)?);
        for modifier in mods.split('+').filter(|m| !m.is_empty()) {
            combo = match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => combo.ctrl(),
                "shift" => combo.shift(),
                "alt" | "option" => combo.alt(),
                other => return Err(KeyParseError::UnknownModifier(other.to_string())),
            };
        }
        Ok(combo)
    }
}

fn parse_key(name: &str) -> Result<Key, KeyParseError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(if c == ' ' { Key::Space } else { Key::Char(c) });
    }

    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "enter" | "return" => Key::Enter,
        "space" => Key::Space,
        "tab" => Key::Tab,
        "backtab" => Key::BackTab,
        "esc" | "escape" => Key::Escape,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "insert" => Key::Insert,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=24).contains(&n) => Key::F(n),
            _ => return Err(KeyParseError::UnknownKey(name.to_string())),
        },
    };
    Ok(key)
}

/// Identifies who registered a binding, so the owner can remove all of its
/// bindings at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingOwner(u64);

impl BindingOwner {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for BindingOwner {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-binding dispatch options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Fire even while a text input has focus.
    pub input: bool,
    /// Ask the host to suppress the key's default action.
    pub prevent: bool,
    /// Stop lower-priority bindings for the same key from firing.
    pub stop: bool,
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Number of handlers that ran.
    pub handled: usize,
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

pub type KeyHandler = Arc<dyn Fn(&mut Document) + Send + Sync>;

struct Keybind {
    combo: KeyCombo,
    owner: BindingOwner,
    options: BindOptions,
    handler: KeyHandler,
}

/// Collection of keybinds. Later registrations take priority.
#[derive(Default)]
pub struct Keybinds {
    binds: Vec<Keybind>,
}

impl fmt::Debug for Keybinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.binds.iter().map(|b| (b.combo, b.owner, b.options)))
            .finish()
    }
}

impl Keybinds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(
        &mut self,
        combo: KeyCombo,
        owner: BindingOwner,
        options: BindOptions,
        handler: impl Fn(&mut Document) + Send + Sync + 'static,
    ) {
        log::trace!("[keys] bind {:?} for {:?} ({:?})", combo, owner, options);
        self.binds.push(Keybind {
            combo,
            owner,
            options,
            handler: Arc::new(handler),
        });
    }

    /// Remove every binding registered by `owner`. Returns how many went.
    pub fn unbind_owner(&mut self, owner: BindingOwner) -> usize {
        let before = self.binds.len();
        self.binds.retain(|bind| bind.owner != owner);
        before - self.binds.len()
    }

    pub fn len(&self) -> usize {
        self.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    pub fn is_bound(&self, combo: &KeyCombo) -> bool {
        self.binds.iter().any(|bind| bind.combo == *combo)
    }

    /// Run the handlers bound to `combo`, newest first.
    ///
    /// Bindings without `input` are skipped while the document reports a
    /// text input as active. A handler with `stop` ends the walk.
    pub fn dispatch(&self, combo: &KeyCombo, doc: &mut Document) -> KeyOutcome {
        let typing = doc.is_text_input_active();
        let mut outcome = KeyOutcome::default();

        for bind in self.binds.iter().rev().filter(|b| b.combo == *combo) {
            if typing && !bind.options.input {
                log::trace!("[keys] {:?} skipped: text input active", combo);
                continue;
            }
            (bind.handler)(doc);
            outcome.handled += 1;
            outcome.prevent_default |= bind.options.prevent;
            if bind.options.stop {
                outcome.stop_propagation = true;
                break;
            }
        }

        log::debug!("[keys] {:?} -> {:?}", combo, outcome);
        outcome
    }

    /// Dispatch a key event. Other events are ignored.
    pub fn dispatch_event(&self, event: &Event, doc: &mut Document) -> KeyOutcome {
        match event {
            Event::Key { key, modifiers } => self.dispatch(&KeyCombo::new(*key, *modifiers), doc),
            _ => KeyOutcome::default(),
        }
    }
}

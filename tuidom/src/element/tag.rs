use std::fmt;

/// The element kind. Mirrors the handful of HTML tags whose behavior matters
/// to focus handling; anything else is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Div,
    Span,
    Ul,
    Li,
    Button,
    Anchor,
    Input(InputType),
    TextArea,
    Select,
    Custom(String),
}

impl Tag {
    /// Elements that can take focus without an explicit tabindex.
    pub fn natively_focusable(&self) -> bool {
        match self {
            Tag::Button | Tag::Anchor | Tag::TextArea | Tag::Select => true,
            Tag::Input(ty) => *ty != InputType::Hidden,
            _ => false,
        }
    }

    /// Whether focus on this element means the user is typing into it.
    pub fn accepts_text(&self) -> bool {
        match self {
            Tag::TextArea | Tag::Select => true,
            Tag::Input(ty) => ty.is_text_like(),
            _ => false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Button => "button",
            Tag::Anchor => "a",
            Tag::Input(_) => "input",
            Tag::TextArea => "textarea",
            Tag::Select => "select",
            Tag::Custom(name) => name,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "div" => Tag::Div,
            "span" => Tag::Span,
            "ul" => Tag::Ul,
            "li" => Tag::Li,
            "button" => Tag::Button,
            "a" => Tag::Anchor,
            "input" => Tag::Input(InputType::Text),
            "textarea" => Tag::TextArea,
            "select" => Tag::Select,
            other => Tag::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `type` of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Url,
    Time,
    Tel,
    Search,
    Checkbox,
    Radio,
    Range,
    Date,
    Color,
    File,
    Submit,
    Button,
    Hidden,
}

impl InputType {
    /// Input types that take typed text. Keyboard list navigation must not
    /// pull focus away from these.
    pub const TEXT_LIKE: [InputType; 8] = [
        InputType::Email,
        InputType::Password,
        InputType::Text,
        InputType::Number,
        InputType::Url,
        InputType::Time,
        InputType::Tel,
        InputType::Search,
    ];

    pub fn is_text_like(self) -> bool {
        Self::TEXT_LIKE.contains(&self)
    }
}

//! Named keys and key input values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named keys with their WebDriver private-use code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Releases all held modifiers
    Null,
    Cancel,
    Help,
    Backspace,
    Tab,
    Clear,
    Return,
    Enter,
    Shift,
    Control,
    Alt,
    Pause,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Insert,
    Delete,
    Meta,
}

impl Key {
    pub fn codepoint(self) -> char {
        match self {
            Key::Null => '\u{E000}',
            Key::Cancel => '\u{E001}',
            Key::Help => '\u{E002}',
            Key::Backspace => '\u{E003}',
            Key::Tab => '\u{E004}',
            Key::Clear => '\u{E005}',
            Key::Return => '\u{E006}',
            Key::Enter => '\u{E007}',
            Key::Shift => '\u{E008}',
            Key::Control => '\u{E009}',
            Key::Alt => '\u{E00A}',
            Key::Pause => '\u{E00B}',
            Key::Escape => '\u{E00C}',
            Key::Space => '\u{E00D}',
            Key::PageUp => '\u{E00E}',
            Key::PageDown => '\u{E00F}',
            Key::End => '\u{E010}',
            Key::Home => '\u{E011}',
            Key::ArrowLeft => '\u{E012}',
            Key::ArrowUp => '\u{E013}',
            Key::ArrowRight => '\u{E014}',
            Key::ArrowDown => '\u{E015}',
            Key::Insert => '\u{E016}',
            Key::Delete => '\u{E017}',
            Key::Meta => '\u{E03D}',
        }
    }

    /// Keys accepted by legacy key down/up
    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }
}

/// A value passed to key gestures: either a named key or literal text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyInput {
    Key(Key),
    Text(String),
}

impl KeyInput {
    /// Code points typed for this value, in order
    pub fn codepoints(&self) -> Vec<char> {
        match self {
            KeyInput::Key(key) => vec![key.codepoint()],
            KeyInput::Text(text) => text.chars().collect(),
        }
    }

    /// The named key when it is a modifier
    pub fn as_modifier(&self) -> Option<Key> {
        match self {
            KeyInput::Key(key) if key.is_modifier() => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyInput::Key(key) => write!(f, "Key::{:?}", key),
            KeyInput::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::Key(key)
    }
}

impl From<&str> for KeyInput {
    fn from(text: &str) -> Self {
        KeyInput::Text(text.to_string())
    }
}

impl From<String> for KeyInput {
    fn from(text: String) -> Self {
        KeyInput::Text(text)
    }
}

impl From<char> for KeyInput {
    fn from(ch: char) -> Self {
        KeyInput::Text(ch.to_string())
    }
}

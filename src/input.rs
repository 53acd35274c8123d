//! Terminal inputs: keypresses and the identifiers used to name keys.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// A key was pressed.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct KeyPress {
    /// Which key was pressed.
    pub key: Key,
    /// The modifiers active while the key was pressed.
    pub modifiers: Modifiers,
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

impl From<char> for KeyPress {
    fn from(key: char) -> Self {
        Self {
            key: Key::Char(key.to_ascii_lowercase()),
            modifiers: Modifiers {
                shift: key.is_ascii_uppercase(),
                ..Modifiers::default()
            },
        }
    }
}

/// Any key.
///
/// The enter/return, tab and delete keys are mapped to their respective ASCII characters.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Key {
    /// The backspace key.
    Backspace,
    /// The left arrow.
    Left,
    /// The right arrow.
    Right,
    /// The up arrow.
    Up,
    /// The down arrow.
    Down,
    /// The Home key,
    Home,
    /// The End key.
    End,
    /// The page up key.
    PageUp,
    /// The page down key.
    PageDown,
    /// The insert key.
    Insert,
    /// The escape key.
    Escape,
    /// A function key (e.g. F(5) is F5).
    F(u8),
    /// A key which maps to a character. This character will never be uppercase.
    Char(char),
}

impl Default for Key {
    fn default() -> Self {
        Self::Escape
    }
}

const NAMED_KEYS: &[(&str, Key)] = &[
    ("Backspace", Key::Backspace),
    ("Left", Key::Left),
    ("Right", Key::Right),
    ("Up", Key::Up),
    ("Down", Key::Down),
    ("Home", Key::Home),
    ("End", Key::End),
    ("PageUp", Key::PageUp),
    ("PageDown", Key::PageDown),
    ("Insert", Key::Insert),
    ("Escape", Key::Escape),
    ("Esc", Key::Escape),
    ("Enter", Key::Char('\n')),
    ("Tab", Key::Char('\t')),
    ("Delete", Key::Char('\x7f')),
    ("Space", Key::Char(' ')),
];

/// Keys are named the way they are written in configuration: `Escape`, `PageUp`, `F5`, `Space`
/// or a single character such as `q`. Names are matched case-insensitively.
impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(&(_, key)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
        {
            return Ok(key);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => return Ok(Self::Char(c.to_ascii_lowercase())),
            (Some('F' | 'f'), Some(_)) => {
                if let Ok(n @ 1..=24) = s[1..].parse::<u8>() {
                    return Ok(Self::F(n));
                }
            }
            _ => {}
        }

        Err(ParseKeyError {
            name: s.to_owned(),
        })
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, key)| key == self) {
            return f.write_str(name);
        }
        match self {
            Self::F(n) => write!(f, "F{}", n),
            Self::Char(c) => write!(f, "{}", c),
            // Every other variant has an entry in `NAMED_KEYS`.
            _ => write!(f, "{:?}", self),
        }
    }
}

/// An error parsing a [`Key`] from its name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key `{name}`")]
pub struct ParseKeyError {
    name: String,
}

/// Key modifiers.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Modifiers {
    /// The shift key.
    pub shift: bool,
    /// The control key.
    pub control: bool,
    /// The alt key.
    pub alt: bool,
}

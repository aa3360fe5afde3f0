use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use std::fmt;

/// A normalized key value as consumed by the reducer.
///
/// Printable characters arrive already case-folded by the shift state.
/// Non-printable keys other than the four sentinels keep their DOM-style
/// name (`ArrowLeft`, `Tab`, `F5`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Shift,
    Escape,
    Backspace,
    Enter,
    Named(String),
}

impl Key {
    /// Parses a canonical key name. A single character is a printable key.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(Key::Char(c)),
            _ => Some(match name {
                "Shift" => Key::Shift,
                "Escape" => Key::Escape,
                "Backspace" => Key::Backspace,
                "Enter" => Key::Enter,
                other => Key::Named(other.to_string()),
            }),
        }
    }

    /// Normalizes a terminal key event. Releases and keys with no
    /// meaningful name yield `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let key = match event.code {
            KeyCode::Char(c) => Key::Char(fold_case(c, shift)),
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                Key::Shift
            }
            KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl) => {
                Key::Named("Control".into())
            }
            KeyCode::Modifier(ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt) => {
                Key::Named("Alt".into())
            }
            KeyCode::Modifier(ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper) => {
                Key::Named("Meta".into())
            }
            KeyCode::Tab | KeyCode::BackTab => Key::Named("Tab".into()),
            KeyCode::Left => Key::Named("ArrowLeft".into()),
            KeyCode::Right => Key::Named("ArrowRight".into()),
            KeyCode::Up => Key::Named("ArrowUp".into()),
            KeyCode::Down => Key::Named("ArrowDown".into()),
            KeyCode::Home => Key::Named("Home".into()),
            KeyCode::End => Key::Named("End".into()),
            KeyCode::PageUp => Key::Named("PageUp".into()),
            KeyCode::PageDown => Key::Named("PageDown".into()),
            KeyCode::Delete => Key::Named("Delete".into()),
            KeyCode::Insert => Key::Named("Insert".into()),
            KeyCode::F(n) => Key::Named(format!("F{n}")),
            _ => return None,
        };
        Some(key)
    }

    pub fn is_char(&self, expected: char) -> bool {
        matches!(self, Key::Char(c) if *c == expected)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Shift => f.write_str("Shift"),
            Key::Escape => f.write_str("Escape"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Enter => f.write_str("Enter"),
            Key::Named(name) => f.write_str(name),
        }
    }
}

/// Upper-cases with shift held, lower-cases otherwise. Characters whose
/// case mapping is not a single character are left alone.
pub fn fold_case(c: char, shift: bool) -> char {
    let mut mapped = if shift {
        c.to_uppercase().collect::<Vec<char>>()
    } else {
        c.to_lowercase().collect::<Vec<char>>()
    };
    match mapped.len() {
        1 => mapped.remove(0),
        _ => c,
    }
}

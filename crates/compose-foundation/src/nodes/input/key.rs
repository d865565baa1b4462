/// Keys the toolkit reacts to. Everything else arrives as [`KeyCode::Other`]
/// and is only interesting for the text it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Escape,
    D,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub logo: bool,
}

impl KeyModifiers {
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.control || self.alt || self.logo)
    }
}

/// A key press, optionally carrying the character it typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub text: Option<char>,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            text: None,
            modifiers: KeyModifiers::default(),
        }
    }

    /// A typed character with no dedicated key code.
    pub fn character(ch: char) -> Self {
        Self {
            code: KeyCode::Other,
            text: Some(ch),
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

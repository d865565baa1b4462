//! Single-line text editing driven by key events.

use crate::nodes::input::{KeyCode, KeyEvent};

/// Applies `event` to `value` and returns the edited text, or `None` when
/// the key does not change the text.
///
/// Editing always happens at the end of the value; there is no caret.
pub fn apply_key_event(value: &str, event: &KeyEvent) -> Option<String> {
    match event.code {
        KeyCode::Backspace => {
            let mut chars = value.chars();
            chars.next_back()?;
            Some(chars.as_str().to_string())
        }
        _ if event.modifiers.control || event.modifiers.logo => None,
        _ => match event.text {
            Some(ch) if !ch.is_control() => {
                let mut edited = String::with_capacity(value.len() + ch.len_utf8());
                edited.push_str(value);
                edited.push(ch);
                Some(edited)
            }
            _ => None,
        },
    }
}

#[cfg(test)]
#[path = "tests/text_input_tests.rs"]
mod tests;

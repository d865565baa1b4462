//! Foundation elements for MyCompose: pointer, keyboard and focus plumbing
//! shared by the UI toolkit, the renderers and the platform adapters.

pub mod nodes;
pub mod text_input;

pub use nodes::input::*;
pub use text_input::apply_key_event;

pub mod prelude {
    pub use crate::nodes::input::{
        FocusManager, KeyCode, KeyEvent, KeyModifiers, PointerButton, PointerEvent,
        PointerEventKind,
    };
}

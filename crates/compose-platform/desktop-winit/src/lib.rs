//! winit adapter: converts window coordinates and keyboard input into the
//! toolkit's logical-pixel pointer events and key events.

use compose_foundation::{KeyCode, KeyEvent, KeyModifiers, PointerEvent, PointerEventKind};
use compose_ui_graphics::Point;
use winit::dpi::PhysicalPosition;
use winit::event::{ModifiersState, VirtualKeyCode};

pub struct DesktopWinitPlatform {
    scale_factor: f64,
    modifiers: KeyModifiers,
}

impl DesktopWinitPlatform {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        if factor > 0.0 && factor.is_finite() {
            self.scale_factor = factor;
        } else {
            log::warn!("ignoring invalid scale factor {factor}");
        }
    }

    pub fn pointer_position(&self, position: PhysicalPosition<f64>) -> Point {
        Point {
            x: (position.x / self.scale_factor) as f32,
            y: (position.y / self.scale_factor) as f32,
        }
    }

    pub fn pointer_event(
        &self,
        kind: PointerEventKind,
        position: PhysicalPosition<f64>,
    ) -> PointerEvent {
        PointerEvent::new(kind, self.pointer_position(position))
    }

    pub fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = KeyModifiers {
            shift: state.shift(),
            control: state.ctrl(),
            alt: state.alt(),
            logo: state.logo(),
        };
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Key event for a pressed key that the toolkit handles by code.
    /// Printable keys return `None`; their text arrives through
    /// [`character_event`](Self::character_event). Text fields edit at the
    /// end of their value, so caret keys are not reported.
    pub fn key_event(&self, key: VirtualKeyCode) -> Option<KeyEvent> {
        let code = match key {
            VirtualKeyCode::Back => KeyCode::Backspace,
            VirtualKeyCode::Escape => KeyCode::Escape,
            VirtualKeyCode::D => KeyCode::D,
            _ => return None,
        };
        Some(KeyEvent::new(code).with_modifiers(self.modifiers))
    }

    /// Key event for a typed character. Control characters are dropped
    /// since their keys are reported through [`key_event`](Self::key_event).
    pub fn character_event(&self, ch: char) -> Option<KeyEvent> {
        if ch.is_control() {
            return None;
        }
        Some(KeyEvent::character(ch).with_modifiers(self.modifiers))
    }
}

impl Default for DesktopWinitPlatform {
    fn default() -> Self {
        Self::new(1.0)
    }
}

//! Keyboard focus tracking.

use compose_core::NodeId;

/// Remembers which node, if any, receives keyboard input.
#[derive(Default, Debug)]
pub struct FocusManager {
    focused: Option<NodeId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_focus(&mut self, id: NodeId) {
        if self.focused != Some(id) {
            log::debug!("focus moved to node #{id}");
        }
        self.focused = Some(id);
    }

    pub fn clear_focus(&mut self) {
        if let Some(id) = self.focused.take() {
            log::debug!("focus cleared from node #{id}");
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.focused == Some(id)
    }
}

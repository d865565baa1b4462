use super::{ModOp, Modifier, Point};
use std::rc::Rc;

impl Modifier {
    /// Invokes `handler` with the tap position relative to the node.
    pub fn clickable(handler: impl Fn(Point) + 'static) -> Self {
        Self::with_op(ModOp::Clickable(Rc::new(handler)))
    }

    pub fn click_handler(&self) -> Option<Rc<dyn Fn(Point)>> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::Clickable(handler) => Some(Rc::clone(handler)),
            _ => None,
        })
    }
}

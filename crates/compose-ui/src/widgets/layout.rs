//! Generic container widget.

#![allow(non_snake_case)]

use std::rc::Rc;

use compose_core::NodeId;

use super::nodes::LayoutNode;
use crate::composable;
use crate::layout::core::MeasurePolicy;
use crate::modifier::Modifier;

/// Emits a [`LayoutNode`] measured by `measure_policy` and composes
/// `content` as its children.
#[composable]
pub fn Layout<F>(modifier: Modifier, measure_policy: Rc<dyn MeasurePolicy>, content: F) -> NodeId
where
    F: FnOnce(),
{
    let id = compose_core::emit_node(|| LayoutNode::new(modifier.clone(), Rc::clone(&measure_policy)));
    if let Err(err) = compose_core::with_node_mut(id, |node: &mut LayoutNode| {
        node.modifier = modifier.clone();
        node.set_measure_policy(Rc::clone(&measure_policy));
    }) {
        log::error!("failed to update Layout node: {err}");
    }
    compose_core::push_parent(id);
    content();
    compose_core::pop_parent();
    id
}

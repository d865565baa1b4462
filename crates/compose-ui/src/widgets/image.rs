#![allow(non_snake_case)]

use compose_core::NodeId;

use super::nodes::ImageNode;
use crate::composable;
use crate::modifier::Modifier;
use crate::resources::Painter;

/// Draws `painter` scaled to fit the node while keeping its aspect ratio.
#[composable]
pub fn Image(painter: Painter, content_description: Option<&str>, modifier: Modifier) -> NodeId {
    let description = content_description.map(str::to_owned);
    let id = compose_core::emit_node(|| ImageNode {
        modifier: modifier.clone(),
        painter: painter.clone(),
        content_description: description.clone(),
    });
    if let Err(err) = compose_core::with_node_mut(id, |node: &mut ImageNode| {
        node.modifier = modifier.clone();
        if node.painter != painter {
            node.painter = painter.clone();
        }
        node.content_description = description.clone();
    }) {
        log::error!("failed to update Image node: {err}");
    }
    id
}

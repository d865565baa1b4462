//! Text widget implementation

#![allow(non_snake_case)]

use compose_core::NodeId;

use super::nodes::TextNode;
use crate::composable;
use crate::modifier::Modifier;
use crate::theme::{LocalContentColor, LocalTextStyle};

/// Single line of text in the ambient text style and content color.
#[composable]
pub fn Text<S>(value: S, modifier: Modifier) -> NodeId
where
    S: Into<String>,
{
    let text: String = value.into();
    let style = LocalTextStyle().current();
    let color = style
        .color
        .unwrap_or_else(|| LocalContentColor().current());
    let id = compose_core::emit_node(|| TextNode {
        modifier: modifier.clone(),
        text: text.clone(),
        style,
        color,
    });
    if let Err(err) = compose_core::with_node_mut(id, |node: &mut TextNode| {
        if node.text != text {
            node.text = text.clone();
        }
        node.modifier = modifier.clone();
        node.style = style;
        node.color = color;
    }) {
        log::error!("failed to update Text node: {err}");
    }
    id
}

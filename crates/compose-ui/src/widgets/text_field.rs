#![allow(non_snake_case)]

use std::rc::Rc;

use compose_core::NodeId;

use super::nodes::TextFieldNode;
use crate::composable;
use crate::modifier::Modifier;
use crate::theme::{LocalContentColor, LocalTextStyle};

/// Editable single line of text. The field shows `value`, or `label` while
/// `value` is empty, and reports every edit through `on_value_change`; the
/// caller decides what the next `value` is.
#[composable]
pub fn TextField<S, L, F>(value: S, on_value_change: F, label: L, modifier: Modifier) -> NodeId
where
    S: Into<String>,
    L: Into<String>,
    F: Fn(String) + 'static,
{
    let value: String = value.into();
    let label: String = label.into();
    let on_value_change: Rc<dyn Fn(String)> = Rc::new(on_value_change);
    let style = LocalTextStyle().current();
    let color = style
        .color
        .unwrap_or_else(|| LocalContentColor().current());
    let id = compose_core::emit_node(|| TextFieldNode {
        modifier: modifier.clone(),
        value: value.clone(),
        label: label.clone(),
        style,
        color,
        on_value_change: Rc::clone(&on_value_change),
    });
    if let Err(err) = compose_core::with_node_mut(id, |node: &mut TextFieldNode| {
        node.modifier = modifier.clone();
        node.value = value.clone();
        node.label = label.clone();
        node.style = style;
        node.color = color;
        node.on_value_change = Rc::clone(&on_value_change);
    }) {
        log::error!("failed to update TextField node: {err}");
    }
    id
}

#![allow(non_snake_case)]

use compose_core::{CompositionLocalProvider, NodeId};
use compose_ui_graphics::Color;

use super::box_widget::{Box, BoxSpec};
use crate::composable;
use crate::modifier::Modifier;
use crate::theme::{contentColorFor, LocalContentColor};

/// A filled container. Children receive the surface's minimum size and the
/// content color matching `color`.
#[composable]
pub fn Surface<F>(modifier: Modifier, color: Color, content: F) -> NodeId
where
    F: FnOnce(),
{
    let content_color = contentColorFor(color);
    Box(
        modifier.then(Modifier::background(color)),
        BoxSpec::new().propagate_min_constraints(true),
        move || {
            CompositionLocalProvider([LocalContentColor().provides(content_color)], content);
        },
    )
}

#![allow(non_snake_case)]

use std::rc::Rc;

use compose_core::NodeId;

use super::layout::Layout;
use crate::composable;
use crate::layout::core::{LinearArrangement, VerticalAlignment};
use crate::layout::policies::RowMeasurePolicy;
use crate::modifier::Modifier;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowSpec {
    pub horizontal_arrangement: LinearArrangement,
    pub vertical_alignment: VerticalAlignment,
}

impl RowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizontal_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.horizontal_arrangement = arrangement;
        self
    }

    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }
}

#[composable]
pub fn Row<F>(modifier: Modifier, spec: RowSpec, content: F) -> NodeId
where
    F: FnOnce(),
{
    let policy = RowMeasurePolicy::new(spec.horizontal_arrangement, spec.vertical_alignment);
    Layout(modifier, Rc::new(policy), content)
}

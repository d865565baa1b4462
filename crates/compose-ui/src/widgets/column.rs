//! Column widget implementation

#![allow(non_snake_case)]

use std::rc::Rc;

use compose_core::NodeId;

use super::layout::Layout;
use crate::composable;
use crate::layout::core::{HorizontalAlignment, LinearArrangement};
use crate::layout::policies::ColumnMeasurePolicy;
use crate::modifier::Modifier;

/// Specification for Column layout behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnSpec {
    pub vertical_arrangement: LinearArrangement,
    pub horizontal_alignment: HorizontalAlignment,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertical_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.vertical_arrangement = arrangement;
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }
}

#[composable]
pub fn Column<F>(modifier: Modifier, spec: ColumnSpec, content: F) -> NodeId
where
    F: FnOnce(),
{
    let policy = ColumnMeasurePolicy::new(spec.vertical_arrangement, spec.horizontal_alignment);
    Layout(modifier, Rc::new(policy), content)
}

#![allow(non_snake_case)]

use std::rc::Rc;

use compose_core::NodeId;

use super::layout::Layout;
use crate::composable;
use crate::layout::core::Alignment;
use crate::layout::policies::BoxMeasurePolicy;
use crate::modifier::Modifier;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxSpec {
    pub content_alignment: Alignment,
    /// Hands the Box's minimum size down to its children.
    pub propagate_min_constraints: bool,
}

impl BoxSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_alignment(mut self, alignment: Alignment) -> Self {
        self.content_alignment = alignment;
        self
    }

    pub fn propagate_min_constraints(mut self, propagate: bool) -> Self {
        self.propagate_min_constraints = propagate;
        self
    }
}

/// Stacks its children on top of each other.
#[composable]
pub fn Box<F>(modifier: Modifier, spec: BoxSpec, content: F) -> NodeId
where
    F: FnOnce(),
{
    let policy = BoxMeasurePolicy::new(spec.content_alignment, spec.propagate_min_constraints);
    Layout(modifier, Rc::new(policy), content)
}

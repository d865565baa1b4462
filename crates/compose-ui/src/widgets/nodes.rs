//! Node types emitted by the widgets.

use std::fmt;
use std::rc::Rc;

use compose_core::{Node, NodeId};
use compose_ui_graphics::Color;
use indexmap::IndexSet;

use crate::layout::core::MeasurePolicy;
use crate::modifier::Modifier;
use crate::resources::Painter;
use crate::text::TextStyle;

/// Container node; its measure policy decides where the children go.
#[derive(Clone)]
pub struct LayoutNode {
    pub modifier: Modifier,
    pub measure_policy: Rc<dyn MeasurePolicy>,
    pub children: IndexSet<NodeId>,
}

impl LayoutNode {
    pub fn new(modifier: Modifier, measure_policy: Rc<dyn MeasurePolicy>) -> Self {
        Self {
            modifier,
            measure_policy,
            children: IndexSet::new(),
        }
    }

    pub fn set_measure_policy(&mut self, policy: Rc<dyn MeasurePolicy>) {
        self.measure_policy = policy;
    }
}

impl Node for LayoutNode {
    fn insert_child(&mut self, child: NodeId) {
        self.children.insert(child);
    }

    fn remove_child(&mut self, child: NodeId) {
        self.children.shift_remove(&child);
    }

    fn move_child(&mut self, from: usize, to: usize) {
        if from == to || from >= self.children.len() {
            return;
        }
        let target = to.min(self.children.len() - 1);
        self.children.move_index(from, target);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextNode {
    pub modifier: Modifier,
    pub text: String,
    pub style: TextStyle,
    pub color: Color,
}

impl Node for TextNode {}

#[derive(Clone, Debug, Default)]
pub struct ImageNode {
    pub modifier: Modifier,
    pub painter: Painter,
    pub content_description: Option<String>,
}

impl Node for ImageNode {}

/// Single-line editable text. Key input is routed to the focused field by
/// the host, which calls `on_value_change` with the edited value.
#[derive(Clone)]
pub struct TextFieldNode {
    pub modifier: Modifier,
    pub value: String,
    pub label: String,
    pub style: TextStyle,
    pub color: Color,
    pub on_value_change: Rc<dyn Fn(String)>,
}

impl Default for TextFieldNode {
    fn default() -> Self {
        Self {
            modifier: Modifier::empty(),
            value: String::new(),
            label: String::new(),
            style: TextStyle::default(),
            color: Color::BLACK,
            on_value_change: Rc::new(|_| {}),
        }
    }
}

impl fmt::Debug for TextFieldNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFieldNode")
            .field("value", &self.value)
            .field("label", &self.label)
            .finish()
    }
}

impl Node for TextFieldNode {}

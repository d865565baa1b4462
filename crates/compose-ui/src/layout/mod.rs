pub mod core;
pub mod policies;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use compose_core::{MemoryApplier, NodeError, NodeId};
use compose_ui_graphics::{Color, Point, Rect, Size};
use compose_ui_layout::Constraints;

use self::core::{Measurable, MeasureResult};
use crate::modifier::{DimensionConstraint, LayoutProperties, Modifier};
use crate::resources::Painter;
use crate::text::{measure_text, TextStyle};
use crate::widgets::{ImageNode, LayoutNode, TextFieldNode, TextNode};

/// Minimum width of a text field, in glyphs of its style.
const TEXT_FIELD_MIN_GLYPHS: f32 = 12.0;
const TEXT_FIELD_PADDING: f32 = 8.0;

/// Result of running layout for a Compose tree.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    root: LayoutBox,
}

impl LayoutTree {
    pub fn new(root: LayoutBox) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &LayoutBox {
        &self.root
    }

    /// Depth-first search for the box of `node_id`.
    pub fn find(&self, node_id: NodeId) -> Option<&LayoutBox> {
        self.root.find(node_id)
    }
}

/// What a laid out node draws, copied out of the node tree so renderers
/// never need the applier.
#[derive(Clone)]
pub enum LayoutNodeKind {
    Layout,
    Text {
        value: String,
        style: TextStyle,
        color: Color,
    },
    Image {
        painter: Painter,
        content_description: Option<String>,
    },
    TextField {
        value: String,
        label: String,
        style: TextStyle,
        color: Color,
        on_value_change: Rc<dyn Fn(String)>,
    },
    Unknown,
}

impl fmt::Debug for LayoutNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutNodeKind::Layout => f.write_str("Layout"),
            LayoutNodeKind::Text { value, .. } => f.debug_struct("Text").field("value", value).finish(),
            LayoutNodeKind::Image {
                painter,
                content_description,
            } => f
                .debug_struct("Image")
                .field("painter", &painter.name())
                .field("content_description", content_description)
                .finish(),
            LayoutNodeKind::TextField { value, label, .. } => f
                .debug_struct("TextField")
                .field("value", value)
                .field("label", label)
                .finish(),
            LayoutNodeKind::Unknown => f.write_str("Unknown"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LayoutNodeData {
    pub modifier: Modifier,
    pub kind: LayoutNodeKind,
}

impl LayoutNodeData {
    pub fn new(modifier: Modifier, kind: LayoutNodeKind) -> Self {
        Self { modifier, kind }
    }
}

/// Layout information for a single node. `rect` is in absolute coordinates;
/// `content_rect` is `rect` minus the node's padding.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    pub node_id: NodeId,
    pub rect: Rect,
    pub content_rect: Rect,
    pub node_data: LayoutNodeData,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    pub fn find(&self, node_id: NodeId) -> Option<&LayoutBox> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(node_id))
    }

    /// Pre-order walk over this box and its descendants.
    pub fn visit(&self, f: &mut impl FnMut(&LayoutBox)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

/// Extension trait that equips `MemoryApplier` with layout computation.
pub trait LayoutEngine {
    fn compute_layout(&self, root: NodeId, max_size: Size) -> Result<LayoutTree, NodeError>;
}

impl LayoutEngine for MemoryApplier {
    fn compute_layout(&self, root: NodeId, max_size: Size) -> Result<LayoutTree, NodeError> {
        let builder = LayoutBuilder { applier: self };
        let measured = builder.measure_node(root, Constraints::loose(max_size.width, max_size.height))?;
        Ok(LayoutTree::new(place_node(measured, Point::ZERO)))
    }
}

struct MeasuredNode {
    node_id: NodeId,
    size: Size,
    props: LayoutProperties,
    data: LayoutNodeData,
    children: Vec<(MeasuredNode, Point)>,
}

struct LayoutBuilder<'a> {
    applier: &'a MemoryApplier,
}

impl LayoutBuilder<'_> {
    fn measure_node(&self, node_id: NodeId, constraints: Constraints) -> Result<MeasuredNode, NodeError> {
        let node = self.applier.node(node_id)?.as_any();
        if let Some(layout) = node.downcast_ref::<LayoutNode>() {
            return self.measure_layout_node(node_id, layout, constraints);
        }
        if let Some(text) = node.downcast_ref::<TextNode>() {
            let metrics = measure_text(&text.text, &text.style);
            let data = LayoutNodeData::new(
                text.modifier.clone(),
                LayoutNodeKind::Text {
                    value: text.text.clone(),
                    style: text.style,
                    color: text.color,
                },
            );
            return Ok(measure_leaf(node_id, data, constraints, |_| metrics.size()));
        }
        if let Some(image) = node.downcast_ref::<ImageNode>() {
            let intrinsic = image.painter.intrinsic_size();
            let data = LayoutNodeData::new(
                image.modifier.clone(),
                LayoutNodeKind::Image {
                    painter: image.painter.clone(),
                    content_description: image.content_description.clone(),
                },
            );
            return Ok(measure_leaf(node_id, data, constraints, |inner| {
                fit_image(intrinsic, inner)
            }));
        }
        if let Some(field) = node.downcast_ref::<TextFieldNode>() {
            let shown = if field.value.is_empty() {
                &field.label
            } else {
                &field.value
            };
            let metrics = measure_text(shown, &field.style);
            let min_width = field.style.font_size * 0.6 * TEXT_FIELD_MIN_GLYPHS;
            let content = Size::new(
                metrics.width.max(min_width) + TEXT_FIELD_PADDING * 2.0,
                metrics.height + TEXT_FIELD_PADDING * 2.0,
            );
            let data = LayoutNodeData::new(
                field.modifier.clone(),
                LayoutNodeKind::TextField {
                    value: field.value.clone(),
                    label: field.label.clone(),
                    style: field.style,
                    color: field.color,
                    on_value_change: Rc::clone(&field.on_value_change),
                },
            );
            return Ok(measure_leaf(node_id, data, constraints, |_| content));
        }
        log::debug!("node #{node_id} has no layout; measuring as empty");
        Ok(MeasuredNode {
            node_id,
            size: Size::ZERO,
            props: LayoutProperties::default(),
            data: LayoutNodeData::new(Modifier::empty(), LayoutNodeKind::Unknown),
            children: Vec::new(),
        })
    }

    fn measure_layout_node(
        &self,
        node_id: NodeId,
        node: &LayoutNode,
        constraints: Constraints,
    ) -> Result<MeasuredNode, NodeError> {
        let props = node.modifier.layout_properties();
        let outer = resolve_constraints(constraints, &props);
        let inner = outer.deflate(props.padding());

        let error = RefCell::new(None);
        let children: Vec<ChildMeasurable<'_, '_>> = node
            .children
            .iter()
            .map(|&child| ChildMeasurable {
                builder: self,
                node_id: child,
                measured: RefCell::new(None),
                error: &error,
            })
            .collect();
        let measurables: Vec<&dyn Measurable> =
            children.iter().map(|child| child as &dyn Measurable).collect();
        let MeasureResult { size, placements } = node.measure_policy.measure(&measurables, inner);
        drop(measurables);

        if let Some(err) = error.borrow_mut().take() {
            return Err(err);
        }

        let mut measured_children = Vec::with_capacity(children.len());
        for (child, placement) in children.into_iter().zip(placements) {
            if let Some(measured) = child.measured.into_inner() {
                measured_children.push((measured, placement));
            }
        }

        Ok(MeasuredNode {
            node_id,
            size: outer.constrain(with_padding(size, &props)),
            props,
            data: LayoutNodeData::new(node.modifier.clone(), LayoutNodeKind::Layout),
            children: measured_children,
        })
    }
}

struct ChildMeasurable<'b, 'a> {
    builder: &'b LayoutBuilder<'a>,
    node_id: NodeId,
    measured: RefCell<Option<MeasuredNode>>,
    error: &'b RefCell<Option<NodeError>>,
}

impl Measurable for ChildMeasurable<'_, '_> {
    fn measure(&self, constraints: Constraints) -> Size {
        match self.builder.measure_node(self.node_id, constraints) {
            Ok(measured) => {
                let size = measured.size;
                *self.measured.borrow_mut() = Some(measured);
                size
            }
            Err(err) => {
                let mut slot = self.error.borrow_mut();
                if slot.is_none() {
                    *slot = Some(err);
                }
                Size::ZERO
            }
        }
    }
}

fn measure_leaf(
    node_id: NodeId,
    data: LayoutNodeData,
    constraints: Constraints,
    content: impl FnOnce(Constraints) -> Size,
) -> MeasuredNode {
    let props = data.modifier.layout_properties();
    let outer = resolve_constraints(constraints, &props);
    let inner = outer.deflate(props.padding());
    let size = outer.constrain(with_padding(inner.constrain(content(inner)), &props));
    MeasuredNode {
        node_id,
        size,
        props,
        data,
        children: Vec::new(),
    }
}

/// Applies the modifier's width and height requests: fixed sizes and
/// fractions of a bounded maximum become tight constraints.
fn resolve_constraints(constraints: Constraints, props: &LayoutProperties) -> Constraints {
    let (min_width, max_width) = resolve_dimension(
        props.width(),
        constraints.min_width,
        constraints.max_width,
    );
    let (min_height, max_height) = resolve_dimension(
        props.height(),
        constraints.min_height,
        constraints.max_height,
    );
    Constraints {
        min_width,
        max_width,
        min_height,
        max_height,
    }
}

fn resolve_dimension(dimension: DimensionConstraint, min: f32, max: f32) -> (f32, f32) {
    match dimension {
        DimensionConstraint::Points(value) => {
            let value = value.max(min).min(max);
            (value, value)
        }
        DimensionConstraint::Fraction(fraction) if max.is_finite() => {
            let value = (max * fraction).max(min).min(max);
            (value, value)
        }
        _ => (min, max),
    }
}

fn with_padding(size: Size, props: &LayoutProperties) -> Size {
    let padding = props.padding();
    Size::new(
        size.width + padding.horizontal_sum(),
        size.height + padding.vertical_sum(),
    )
}

/// Scales `intrinsic` to fit `constraints` while keeping its aspect ratio.
/// A tight dimension is honoured and the other one follows the ratio.
fn fit_image(intrinsic: Size, constraints: Constraints) -> Size {
    if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
        return Size::new(constraints.min_width, constraints.min_height);
    }
    let aspect = intrinsic.width / intrinsic.height;
    let tight_width = constraints.min_width == constraints.max_width;
    let tight_height = constraints.min_height == constraints.max_height;
    let size = match (tight_width, tight_height) {
        (true, true) => Size::new(constraints.max_width, constraints.max_height),
        (true, false) => Size::new(constraints.max_width, constraints.max_width / aspect),
        (false, true) => Size::new(constraints.max_height * aspect, constraints.max_height),
        (false, false) => {
            let scale = (constraints.max_width / intrinsic.width)
                .min(constraints.max_height / intrinsic.height)
                .min(1.0);
            Size::new(intrinsic.width * scale, intrinsic.height * scale)
        }
    };
    constraints.constrain(size)
}

fn place_node(measured: MeasuredNode, origin: Point) -> LayoutBox {
    let rect = Rect::from_origin_size(origin, measured.size);
    let padding = measured.props.padding();
    let content_rect = rect.inset(padding);
    let children = measured
        .children
        .into_iter()
        .map(|(child, offset)| {
            place_node(
                child,
                Point::new(
                    origin.x + padding.left + offset.x,
                    origin.y + padding.top + offset.y,
                ),
            )
        })
        .collect();
    LayoutBox {
        node_id: measured.node_id,
        rect,
        content_rect,
        node_data: measured.data,
        children,
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;

use compose_assets::{PathShape, VectorPath};
use compose_core::NodeId;
use compose_ui_graphics::{Color, CornerRadii, DrawPrimitive, Rect, Size};

use crate::layout::{LayoutBox, LayoutNodeKind, LayoutTree};
use crate::modifier::Modifier;
use crate::resources::Painter;
use crate::text::{measure_text, TextStyle};

/// Layer that a paint operation targets within the rendering pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintLayer {
    Behind,
    Content,
    Overlay,
}

/// A rendered operation emitted by the headless renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    Primitive {
        node_id: NodeId,
        layer: PaintLayer,
        primitive: DrawPrimitive,
    },
    Text {
        node_id: NodeId,
        rect: Rect,
        value: String,
        color: Color,
        font_size: f32,
    },
    /// Marks where an image is painted; its vector paths follow as
    /// content-layer primitives clipped to `clip`.
    Image {
        node_id: NodeId,
        rect: Rect,
        name: String,
        clip: Rect,
    },
}

impl RenderOp {
    pub fn node_id(&self) -> NodeId {
        match self {
            RenderOp::Primitive { node_id, .. }
            | RenderOp::Text { node_id, .. }
            | RenderOp::Image { node_id, .. } => *node_id,
        }
    }
}

/// A collection of render operations for a composed scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedRenderScene {
    operations: Vec<RenderOp>,
}

impl RecordedRenderScene {
    pub fn new(operations: Vec<RenderOp>) -> Self {
        Self { operations }
    }

    /// Returns a slice of recorded render operations in submission order.
    pub fn operations(&self) -> &[RenderOp] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<RenderOp> {
        self.operations
    }

    /// Returns an iterator over primitives that target the provided paint layer.
    pub fn primitives_for(&self, layer: PaintLayer) -> impl Iterator<Item = &DrawPrimitive> {
        self.operations.iter().filter_map(move |op| match op {
            RenderOp::Primitive {
                layer: op_layer,
                primitive,
                ..
            } if *op_layer == layer => Some(primitive),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().filter_map(|op| match op {
            RenderOp::Text { value, .. } => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Walks a layout tree and materialises paint operations, parents before
/// children. The output depends only on the tree.
#[derive(Debug, Default)]
pub struct HeadlessRenderer;

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, tree: &LayoutTree) -> RecordedRenderScene {
        let mut operations = Vec::new();
        render_box(tree.root(), &mut operations);
        RecordedRenderScene::new(operations)
    }
}

fn render_box(layout: &LayoutBox, operations: &mut Vec<RenderOp>) {
    let node_id = layout.node_id;
    let modifier = &layout.node_data.modifier;
    if let Some(primitive) = background_primitive(modifier, layout.rect) {
        operations.push(RenderOp::Primitive {
            node_id,
            layer: PaintLayer::Behind,
            primitive,
        });
    }

    match &layout.node_data.kind {
        LayoutNodeKind::Text {
            value,
            style,
            color,
        } => operations.push(text_op(node_id, layout.content_rect, value, style, *color)),
        LayoutNodeKind::Image { painter, .. } => {
            render_image(node_id, painter, layout, operations);
        }
        LayoutNodeKind::TextField {
            value,
            label,
            style,
            color,
            ..
        } => render_text_field(node_id, layout.rect, value, label, style, *color, operations),
        LayoutNodeKind::Layout | LayoutNodeKind::Unknown => {}
    }

    for child in &layout.children {
        render_box(child, operations);
    }
}

/// The node's background, rounded when the chain clips to a shape.
pub fn background_primitive(modifier: &Modifier, rect: Rect) -> Option<DrawPrimitive> {
    let color = modifier.background_color()?;
    Some(match clip_radii(modifier, rect) {
        Some(radii) => DrawPrimitive::RoundRect { rect, color, radii },
        None => DrawPrimitive::Rect { rect, color },
    })
}

pub fn clip_radii(modifier: &Modifier, rect: Rect) -> Option<CornerRadii> {
    modifier
        .clip_shape()
        .map(|shape| shape.resolve(rect.size()))
        .filter(|radii| !radii.is_zero())
}

fn text_op(node_id: NodeId, content: Rect, value: &str, style: &TextStyle, color: Color) -> RenderOp {
    let metrics = measure_text(value, style);
    RenderOp::Text {
        node_id,
        rect: Rect {
            x: content.x,
            y: content.y,
            width: metrics.width.min(content.width),
            height: metrics.height,
        },
        value: value.to_string(),
        color,
        font_size: style.font_size,
    }
}

fn render_image(node_id: NodeId, painter: &Painter, layout: &LayoutBox, operations: &mut Vec<RenderOp>) {
    let Some(vector) = painter.image_vector() else {
        return;
    };
    let target = fit_rect(painter.intrinsic_size(), layout.content_rect);
    operations.push(RenderOp::Image {
        node_id,
        rect: target,
        name: vector.name.clone(),
        clip: layout.rect,
    });
    for path in vector.paths_in(target) {
        if let Some(primitive) = path_primitive(&path, layout.rect) {
            operations.push(RenderOp::Primitive {
                node_id,
                layer: PaintLayer::Content,
                primitive,
            });
        }
    }
}

fn render_text_field(
    node_id: NodeId,
    rect: Rect,
    value: &str,
    label: &str,
    style: &TextStyle,
    color: Color,
    operations: &mut Vec<RenderOp>,
) {
    operations.push(RenderOp::Primitive {
        node_id,
        layer: PaintLayer::Behind,
        primitive: DrawPrimitive::RoundRect {
            rect,
            color: color.with_alpha(0.06),
            radii: CornerRadii {
                top_left: 4.0,
                top_right: 4.0,
                bottom_right: 0.0,
                bottom_left: 0.0,
            },
        },
    });
    operations.push(RenderOp::Primitive {
        node_id,
        layer: PaintLayer::Overlay,
        primitive: DrawPrimitive::Rect {
            rect: Rect {
                x: rect.x,
                y: rect.bottom() - 1.0,
                width: rect.width,
                height: 1.0,
            },
            color: color.with_alpha(0.42),
        },
    });
    let inner = rect.inset(compose_ui_graphics::EdgeInsets::uniform(8.0));
    if value.is_empty() {
        operations.push(text_op(node_id, inner, label, style, color.with_alpha(0.6)));
    } else {
        operations.push(text_op(node_id, inner, value, style, color));
    }
}

/// Largest rect with the aspect ratio of `intrinsic` that fits in `bounds`,
/// centered.
pub fn fit_rect(intrinsic: Size, bounds: Rect) -> Rect {
    if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width / intrinsic.width).min(bounds.height / intrinsic.height);
    let width = intrinsic.width * scale;
    let height = intrinsic.height * scale;
    Rect {
        x: bounds.x + (bounds.width - width) / 2.0,
        y: bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    }
}

fn path_primitive(path: &VectorPath, clip: Rect) -> Option<DrawPrimitive> {
    let rect = path.bounds;
    clip.intersect(rect)?;
    let color = path.fill;
    Some(match path.shape {
        PathShape::Rect => DrawPrimitive::Rect { rect, color },
        PathShape::RoundRect { radius } => DrawPrimitive::RoundRect {
            rect,
            color,
            radii: CornerRadii::uniform(radius),
        },
        PathShape::Oval => DrawPrimitive::Oval { rect, color },
    })
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;

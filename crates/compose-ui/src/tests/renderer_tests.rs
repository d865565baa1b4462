use super::*;
use crate::layout::{LayoutBox, LayoutNodeData, LayoutNodeKind, LayoutTree};
use crate::modifier::Modifier;
use crate::resources::Painter;
use crate::text::TextStyle;
use compose_assets::{ImageVector, VectorPath};
use compose_ui_graphics::{Color, RoundedCornerShape, Size};

fn boxed(node_id: usize, rect: Rect, modifier: Modifier, kind: LayoutNodeKind) -> LayoutBox {
    LayoutBox {
        node_id,
        rect,
        content_rect: rect,
        node_data: LayoutNodeData::new(modifier, kind),
        children: vec![],
    }
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn background_is_painted_before_children() {
    let mut root = boxed(
        0,
        rect(0.0, 0.0, 100.0, 100.0),
        Modifier::background(Color::WHITE),
        LayoutNodeKind::Layout,
    );
    root.children.push(boxed(
        1,
        rect(4.0, 4.0, 40.0, 20.0),
        Modifier::empty(),
        LayoutNodeKind::Text {
            value: "Name:".into(),
            style: TextStyle::default(),
            color: Color::BLACK,
        },
    ));
    let scene = HeadlessRenderer::new().render(&LayoutTree::new(root));
    let ops = scene.operations();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].node_id(), 0);
    assert!(matches!(
        ops[0],
        RenderOp::Primitive {
            layer: PaintLayer::Behind,
            primitive: DrawPrimitive::Rect { .. },
            ..
        }
    ));
    match &ops[1] {
        RenderOp::Text {
            value, color, rect, ..
        } => {
            assert_eq!(value, "Name:");
            assert_eq!(*color, Color::BLACK);
            assert_eq!(rect.x, 4.0);
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn clipped_background_uses_rounded_corners() {
    let modifier = Modifier::clip(RoundedCornerShape::uniform(8.0)).then(Modifier::background(Color::BLUE));
    let primitive = background_primitive(&modifier, rect(0.0, 0.0, 50.0, 50.0));
    match primitive {
        Some(DrawPrimitive::RoundRect { color, radii, .. }) => {
            assert_eq!(color, Color::BLUE);
            assert_eq!(radii, CornerRadii::uniform(8.0));
        }
        other => panic!("expected rounded rect, got {other:?}"),
    }
    assert!(background_primitive(&Modifier::clip(RoundedCornerShape::uniform(8.0)), rect(0.0, 0.0, 1.0, 1.0)).is_none());
}

#[test]
fn image_paths_are_scaled_into_the_fitted_rect() {
    let vector = ImageVector::new("ic_test", Size::new(10.0, 10.0), Size::new(10.0, 10.0))
        .with_path(VectorPath::rect(rect(0.0, 0.0, 10.0, 10.0), Color::RED));
    let image = boxed(
        3,
        rect(0.0, 0.0, 200.0, 100.0),
        Modifier::empty(),
        LayoutNodeKind::Image {
            painter: Painter::vector(vector),
            content_description: None,
        },
    );
    let scene = HeadlessRenderer::new().render(&LayoutTree::new(image));
    match &scene.operations()[0] {
        RenderOp::Image { rect: fitted, name, .. } => {
            assert_eq!(name, "ic_test");
            assert_eq!(*fitted, rect(50.0, 0.0, 100.0, 100.0));
        }
        other => panic!("expected image, got {other:?}"),
    }
    let content: Vec<_> = scene.primitives_for(PaintLayer::Content).collect();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].color(), Color::RED);
    assert_eq!(content[0].rect(), rect(50.0, 0.0, 100.0, 100.0));
}

#[test]
fn empty_painter_draws_only_the_background() {
    let image = boxed(
        1,
        rect(0.0, 0.0, 20.0, 20.0),
        Modifier::background(Color::BLUE),
        LayoutNodeKind::Image {
            painter: Painter::empty(),
            content_description: None,
        },
    );
    let scene = HeadlessRenderer::new().render(&LayoutTree::new(image));
    assert_eq!(scene.operations().len(), 1);
}

#[test]
fn empty_text_field_shows_its_label() {
    let field = boxed(
        2,
        rect(0.0, 0.0, 160.0, 40.0),
        Modifier::empty(),
        LayoutNodeKind::TextField {
            value: String::new(),
            label: "Name".into(),
            style: TextStyle::default(),
            color: Color::BLACK,
            on_value_change: std::rc::Rc::new(|_| {}),
        },
    );
    let scene = HeadlessRenderer::new().render(&LayoutTree::new(field));
    assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["Name"]);
    assert_eq!(scene.primitives_for(PaintLayer::Overlay).count(), 1);
}

#[test]
fn fit_rect_centers_along_the_slack_axis() {
    let fitted = fit_rect(Size::new(2.0, 1.0), rect(0.0, 0.0, 100.0, 100.0));
    assert_eq!(fitted, rect(0.0, 25.0, 100.0, 50.0));
}

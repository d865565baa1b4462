use std::collections::HashMap;
use std::rc::Rc;

use compose_ui::{
    clip_radii, DrawPrimitive, HeadlessRenderer, LayoutBox, LayoutNodeKind, LayoutTree, NodeId,
    PaintLayer, RenderOp,
};
use compose_ui_graphics::Rect;

use crate::scene::{ClickAction, Scene, ShapeKind};

/// Clip rects for one node: `own` bounds what the node paints behind
/// itself, `content` what it paints on top and what its children paint.
#[derive(Clone, Copy)]
struct NodeClip {
    own: Option<Rect>,
    content: Option<Rect>,
}

pub(crate) fn render_layout_tree(tree: &LayoutTree, scene: &mut Scene) {
    let mut clips = HashMap::new();
    collect_node(tree.root(), None, scene, &mut clips);

    for op in HeadlessRenderer::new().render(tree).into_operations() {
        let Some(clip) = clips.get(&op.node_id()).copied() else {
            continue;
        };
        match op {
            RenderOp::Primitive {
                layer, primitive, ..
            } => {
                let clip = match layer {
                    PaintLayer::Behind => clip.own,
                    PaintLayer::Content | PaintLayer::Overlay => clip.content,
                };
                push_primitive(scene, primitive, clip);
            }
            RenderOp::Text {
                rect,
                value,
                color,
                font_size,
                ..
            } => scene.push_text(rect, value, color, font_size, clip.content),
            RenderOp::Image { .. } => {}
        }
    }
}

fn collect_node(
    layout: &LayoutBox,
    parent_clip: Option<Rect>,
    scene: &mut Scene,
    clips: &mut HashMap<NodeId, NodeClip>,
) {
    let modifier = &layout.node_data.modifier;
    let rect = layout.rect;
    let content = if modifier.clip_shape().is_some() {
        match parent_clip {
            Some(clip) => Some(clip.intersect(rect).unwrap_or(Rect {
                x: rect.x,
                y: rect.y,
                width: 0.0,
                height: 0.0,
            })),
            None => Some(rect),
        }
    } else {
        parent_clip
    };
    clips.insert(
        layout.node_id,
        NodeClip {
            own: parent_clip,
            content,
        },
    );

    if let Some(handler) = modifier.click_handler() {
        scene.push_hit(
            layout.node_id,
            rect,
            clip_radii(modifier, rect),
            ClickAction::WithPoint(handler),
            parent_clip,
        );
    }
    if let LayoutNodeKind::TextField {
        value,
        on_value_change,
        ..
    } = &layout.node_data.kind
    {
        scene.push_text_input(layout.node_id, rect, value.clone(), Rc::clone(on_value_change));
    }

    for child in &layout.children {
        collect_node(child, content, scene, clips);
    }
}

fn push_primitive(scene: &mut Scene, primitive: DrawPrimitive, clip: Option<Rect>) {
    match primitive {
        DrawPrimitive::Rect { rect, color } => scene.push_shape(rect, color, ShapeKind::Rect, clip),
        DrawPrimitive::RoundRect { rect, color, radii } => {
            scene.push_shape(rect, color, ShapeKind::RoundRect(radii), clip)
        }
        DrawPrimitive::Oval { rect, color } => scene.push_shape(rect, color, ShapeKind::Oval, clip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compose_render_common::RenderScene;
    use compose_ui::{Color, LayoutNodeData, Modifier, RoundedCornerShape, TextStyle};

    fn boxed(node_id: NodeId, rect: Rect, modifier: Modifier, kind: LayoutNodeKind) -> LayoutBox {
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
    fn clipped_container_bounds_its_children() {
        let mut root = boxed(
            0,
            rect(0.0, 0.0, 50.0, 50.0),
            Modifier::clip(RoundedCornerShape::uniform(8.0))
                .then(Modifier::background(Color::BLUE))
                .then(Modifier::clickable(|_| {})),
            LayoutNodeKind::Layout,
        );
        root.children.push(boxed(
            1,
            rect(40.0, 0.0, 80.0, 20.0),
            Modifier::empty(),
            LayoutNodeKind::Text {
                value: "overflowing".into(),
                style: TextStyle::default(),
                color: Color::WHITE,
            },
        ));
        let mut scene = Scene::new();
        render_layout_tree(&LayoutTree::new(root), &mut scene);

        assert_eq!(scene.shapes.len(), 1);
        assert!(matches!(scene.shapes[0].shape, ShapeKind::RoundRect(_)));
        assert_eq!(scene.shapes[0].clip, None);
        assert_eq!(scene.texts[0].clip, Some(rect(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(scene.hit_test(25.0, 25.0).map(|hit| hit.node_id), Some(0));
    }

    #[test]
    fn text_fields_become_input_regions() {
        let field = boxed(
            5,
            rect(0.0, 0.0, 120.0, 36.0),
            Modifier::empty(),
            LayoutNodeKind::TextField {
                value: "Ada".into(),
                label: "Name".into(),
                style: TextStyle::default(),
                color: Color::BLACK,
                on_value_change: Rc::new(|_| {}),
            },
        );
        let mut scene = Scene::new();
        render_layout_tree(&LayoutTree::new(field), &mut scene);
        let input = scene.text_input_at(10.0, 10.0).expect("input region");
        assert_eq!(input.node_id, 5);
        assert_eq!(input.value, "Ada");
        assert!(scene.text_input(5).is_some());
    }
}

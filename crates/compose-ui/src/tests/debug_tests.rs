use super::*;
use crate::layout::{LayoutBox, LayoutNodeData, LayoutNodeKind, LayoutTree};
use crate::modifier::Modifier;
use crate::renderer::HeadlessRenderer;
use crate::text::TextStyle;
use compose_ui_graphics::{Color, Rect};

fn leaf(node_id: usize, kind: LayoutNodeKind, modifier: Modifier) -> LayoutBox {
    let rect = Rect {
        x: 0.0,
        y: 10.0 * node_id as f32,
        width: 40.0,
        height: 10.0,
    };
    LayoutBox {
        node_id,
        rect,
        content_rect: rect,
        node_data: LayoutNodeData::new(modifier, kind),
        children: vec![],
    }
}

fn text(node_id: usize, value: &str) -> LayoutBox {
    leaf(
        node_id,
        LayoutNodeKind::Text {
            value: value.to_string(),
            style: TextStyle::default(),
            color: Color::BLACK,
        },
        Modifier::empty(),
    )
}

fn sample_tree() -> LayoutTree {
    let mut root = leaf(
        0,
        LayoutNodeKind::Layout,
        Modifier::background(Color::WHITE).then(Modifier::clickable(|_| {})),
    );
    root.children = vec![text(1, "Born:"), text(2, "1998")];
    LayoutTree::new(root)
}

#[test]
fn test_count_nodes() {
    let tree = sample_tree();
    assert_eq!(count_nodes(tree.root()), 3);
}

#[test]
fn layout_dump_indents_children_and_flags_modifiers() {
    let dump = format_layout_tree(&sample_tree());
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("#0 Layout"));
    assert!(lines[0].contains("[clickable]"));
    assert!(lines[0].contains("[bg"));
    assert!(lines[1].starts_with("  #1 Text(\"Born:\")"));
}

#[test]
fn summary_lists_texts_in_paint_order() {
    let tree = sample_tree();
    let scene = HeadlessRenderer::new().render(&tree);
    let summary = screen_summary(&tree, &scene);
    assert!(summary.starts_with("3 nodes, 1 clickable"));
    assert!(summary.contains("[\"Born:\", \"1998\"]"));
    assert_eq!(format_render_scene(&scene).lines().count(), scene.operations().len());
}

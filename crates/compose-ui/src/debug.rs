//! Text dumps of the layout tree and the recorded scene, used by the
//! debug key binding of the desktop shell.

use std::fmt::Write;

use crate::layout::{LayoutBox, LayoutNodeKind, LayoutTree};
use crate::renderer::{RecordedRenderScene, RenderOp};

pub fn format_layout_tree(tree: &LayoutTree) -> String {
    let mut output = String::new();
    format_layout_box(&mut output, tree.root(), 0);
    output
}

fn format_layout_box(output: &mut String, layout: &LayoutBox, depth: usize) {
    let indent = "  ".repeat(depth);
    let rect = layout.rect;
    let _ = write!(
        output,
        "{indent}#{} {} at ({:.1}, {:.1}) size {:.1}x{:.1}",
        layout.node_id,
        describe_kind(&layout.node_data.kind),
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );
    let modifier = &layout.node_data.modifier;
    if modifier.click_handler().is_some() {
        output.push_str(" [clickable]");
    }
    if let Some(color) = modifier.background_color() {
        let [r, g, b, a] = color.to_rgba();
        let _ = write!(output, " [bg {r:.2} {g:.2} {b:.2} {a:.2}]");
    }
    output.push('\n');
    for child in &layout.children {
        format_layout_box(output, child, depth + 1);
    }
}

fn describe_kind(kind: &LayoutNodeKind) -> String {
    match kind {
        LayoutNodeKind::Layout => "Layout".to_string(),
        LayoutNodeKind::Text { value, .. } => format!("Text({value:?})"),
        LayoutNodeKind::Image { painter, .. } => format!("Image({})", painter.name()),
        LayoutNodeKind::TextField { value, label, .. } => {
            format!("TextField({value:?}, label {label:?})")
        }
        LayoutNodeKind::Unknown => "Unknown".to_string(),
    }
}

pub fn format_render_scene(scene: &RecordedRenderScene) -> String {
    let mut output = String::new();
    for (index, op) in scene.operations().iter().enumerate() {
        let _ = match op {
            RenderOp::Primitive {
                node_id,
                layer,
                primitive,
            } => writeln!(output, "{index:3}: #{node_id} {layer:?} {primitive:?}"),
            RenderOp::Text {
                node_id,
                rect,
                value,
                font_size,
                ..
            } => writeln!(
                output,
                "{index:3}: #{node_id} Text {value:?} at ({:.1}, {:.1}) {font_size}px",
                rect.x, rect.y
            ),
            RenderOp::Image {
                node_id, rect, name, ..
            } => writeln!(
                output,
                "{index:3}: #{node_id} Image {name} at ({:.1}, {:.1}) size {:.1}x{:.1}",
                rect.x, rect.y, rect.width, rect.height
            ),
        };
    }
    output
}

pub fn log_layout_tree(tree: &LayoutTree) {
    log::debug!("layout tree:\n{}", format_layout_tree(tree));
}

pub fn log_render_scene(scene: &RecordedRenderScene) {
    log::debug!("render scene:\n{}", format_render_scene(scene));
}

/// One-line overview: node count, clickable regions and visible texts.
pub fn log_screen_summary(tree: &LayoutTree, scene: &RecordedRenderScene) {
    log::info!("{}", screen_summary(tree, scene));
}

pub fn screen_summary(tree: &LayoutTree, scene: &RecordedRenderScene) -> String {
    let mut clickable = 0;
    tree.root().visit(&mut |layout| {
        if layout.node_data.modifier.click_handler().is_some() {
            clickable += 1;
        }
    });
    let texts: Vec<&str> = scene.texts().collect();
    format!(
        "{} nodes, {} clickable, {} ops, texts {:?}",
        count_nodes(tree.root()),
        clickable,
        scene.operations().len(),
        texts
    )
}

pub fn count_nodes(layout: &LayoutBox) -> usize {
    1 + layout.children.iter().map(count_nodes).sum::<usize>()
}

#[cfg(test)]
#[path = "tests/debug_tests.rs"]
mod tests;

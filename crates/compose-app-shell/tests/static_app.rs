use compose_app_shell::{default_root_key, AppShell};
use compose_foundation::PointerEventKind;
use compose_render_common::{HitTestTarget, RenderScene, Renderer, TextInputTarget};
use compose_ui::{Column, ColumnSpec, LayoutTree, Modifier, NodeId, Row, RowSpec, Text};
use compose_ui_graphics::Size;

#[derive(Clone, Copy, Debug, Default)]
struct DummyHitTarget;

impl HitTestTarget for DummyHitTarget {
    fn node_id(&self) -> NodeId {
        0
    }

    fn dispatch(&self, _kind: PointerEventKind, _x: f32, _y: f32) {}
}

#[derive(Clone, Copy, Debug, Default)]
struct DummyTextInput;

impl TextInputTarget for DummyTextInput {
    fn node_id(&self) -> NodeId {
        0
    }

    fn value(&self) -> &str {
        ""
    }

    fn commit(&self, _value: String) {}
}

#[derive(Debug, Default)]
struct DummyScene {
    rebuilds: usize,
}

impl RenderScene for DummyScene {
    type HitTarget = DummyHitTarget;
    type TextInput = DummyTextInput;

    fn clear(&mut self) {}

    fn hit_test(&self, _x: f32, _y: f32) -> Option<Self::HitTarget> {
        None
    }

    fn text_input_at(&self, _x: f32, _y: f32) -> Option<Self::TextInput> {
        None
    }

    fn text_input(&self, _node_id: NodeId) -> Option<Self::TextInput> {
        None
    }
}

#[derive(Debug, Default)]
struct DummyRenderer {
    scene: DummyScene,
}

impl Renderer for DummyRenderer {
    type Scene = DummyScene;
    type Error = ();

    fn scene(&self) -> &Self::Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Self::Scene {
        &mut self.scene
    }

    fn rebuild_scene(&mut self, _layout_tree: &LayoutTree, _viewport: Size) -> Result<(), Self::Error> {
        self.scene.rebuilds += 1;
        Ok(())
    }
}

#[test]
fn static_content_settles() {
    let renderer = DummyRenderer::default();
    let mut shell = AppShell::new(renderer, default_root_key(), || {
        Column(Modifier::empty(), ColumnSpec::default(), || {
            Row(Modifier::empty(), RowSpec::default(), || {
                Text("Name:", Modifier::empty());
                Text("Android", Modifier::empty());
            });
            Row(Modifier::padding(4.0), RowSpec::default(), || {
                Text("Born:", Modifier::empty());
                Text("1998", Modifier::empty());
            });
        });
    });
    shell.set_viewport(800.0, 600.0);
    for _ in 0..8 {
        if shell.should_render() {
            shell.update();
        } else {
            break;
        }
    }
    assert!(!shell.should_render());
    assert!(shell.active_toast().is_none());
    let layout = shell.layout().expect("layout computed");
    assert_eq!(layout.root().children.len(), 2);
    assert!(layout.root().rect.width <= 800.0);
    assert!(shell.renderer().scene().rebuilds >= 2);
}

#[test]
fn empty_content_has_no_layout() {
    let shell = AppShell::new(DummyRenderer::default(), default_root_key(), || {});
    assert!(shell.layout().is_none());
}

//! Common rendering contracts shared between renderer backends.

use compose_foundation::PointerEventKind;
use compose_ui::{LayoutTree, NodeId};
use compose_ui_graphics::Size;

/// Trait implemented by hit-test targets stored inside a [`RenderScene`].
pub trait HitTestTarget {
    /// Node whose region was hit; pointer sequences are matched on it.
    fn node_id(&self) -> NodeId;

    fn dispatch(&self, kind: PointerEventKind, x: f32, y: f32);
}

/// An editable text region. `commit` hands a new value to the field's
/// change callback; the field shows it once the content is composed again.
pub trait TextInputTarget {
    fn node_id(&self) -> NodeId;
    fn value(&self) -> &str;
    fn commit(&self, value: String);
}

/// Trait describing the minimal surface area required by the application
/// shell to process pointer and key events and refresh the frame graph.
pub trait RenderScene {
    type HitTarget: HitTestTarget;
    type TextInput: TextInputTarget;

    fn clear(&mut self);
    fn hit_test(&self, x: f32, y: f32) -> Option<Self::HitTarget>;
    fn text_input_at(&self, x: f32, y: f32) -> Option<Self::TextInput>;
    fn text_input(&self, node_id: NodeId) -> Option<Self::TextInput>;
}

/// Abstraction implemented by concrete renderer backends.
pub trait Renderer {
    type Scene: RenderScene;
    type Error;

    fn scene(&self) -> &Self::Scene;
    fn scene_mut(&mut self) -> &mut Self::Scene;

    fn rebuild_scene(
        &mut self,
        layout_tree: &LayoutTree,
        viewport: Size,
    ) -> Result<(), Self::Error>;
}

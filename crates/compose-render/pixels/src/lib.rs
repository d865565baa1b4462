//! Software renderer that rasterizes layout trees into an RGBA frame, the
//! format the `pixels` crate uploads to the window surface.

mod draw;
mod font;
mod pipeline;
mod scene;

use std::convert::Infallible;

use compose_render_common::{RenderScene, Renderer};
use compose_ui::LayoutTree;
use compose_ui_graphics::Size;

pub use draw::{draw_scene, draw_toast, toast_rect};
pub use font::{install_font, FontError, FontSource, FONT_ENV_VAR};
pub use scene::{
    ClickAction, DrawShape, HitRegion, Scene, ShapeKind, TextDraw, TextInputRegion,
};

#[derive(Default)]
pub struct PixelsRenderer {
    scene: Scene,
}

impl PixelsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pixels per logical pixel, applied when the scene is drawn.
    pub fn set_scale_factor(&mut self, scale: f32) {
        self.scene.set_scale(scale);
    }
}

impl Renderer for PixelsRenderer {
    type Scene = Scene;
    type Error = Infallible;

    fn scene(&self) -> &Self::Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Self::Scene {
        &mut self.scene
    }

    fn rebuild_scene(&mut self, layout_tree: &LayoutTree, viewport: Size) -> Result<(), Self::Error> {
        self.scene.clear();
        pipeline::render_layout_tree(layout_tree, &mut self.scene);
        log::trace!(
            "scene rebuilt for {}x{}: {} shapes, {} texts, {} hit regions",
            viewport.width,
            viewport.height,
            self.scene.shapes.len(),
            self.scene.texts.len(),
            self.scene.hits.len()
        );
        Ok(())
    }
}

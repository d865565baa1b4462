use std::rc::Rc;

use compose_foundation::PointerEventKind;
use compose_render_common::{HitTestTarget, RenderScene, TextInputTarget};
use compose_ui::NodeId;
use compose_ui_graphics::{Color, CornerRadii, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Rect,
    RoundRect(CornerRadii),
    Oval,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawShape {
    pub rect: Rect,
    pub color: Color,
    pub shape: ShapeKind,
    pub clip: Option<Rect>,
    pub z_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextDraw {
    pub rect: Rect,
    pub text: String,
    pub color: Color,
    pub font_size: f32,
    pub clip: Option<Rect>,
    pub z_index: usize,
}

#[derive(Clone)]
pub enum ClickAction {
    WithPoint(Rc<dyn Fn(Point)>),
}

impl ClickAction {
    fn invoke(&self, rect: Rect, x: f32, y: f32) {
        match self {
            ClickAction::WithPoint(handler) => handler(Point {
                x: x - rect.x,
                y: y - rect.y,
            }),
        }
    }
}

/// A clickable region. Only a release completes a click; the shell pairs it
/// with the press on the same node.
#[derive(Clone)]
pub struct HitRegion {
    pub node_id: NodeId,
    pub rect: Rect,
    pub radii: Option<CornerRadii>,
    pub clip: Option<Rect>,
    pub action: ClickAction,
    pub z_index: usize,
}

impl HitRegion {
    fn contains(&self, x: f32, y: f32) -> bool {
        if let Some(clip) = self.clip {
            if !clip.contains(x, y) {
                return false;
            }
        }
        match self.radii {
            Some(radii) => point_in_round_rect(self.rect, radii, x, y),
            None => self.rect.contains(x, y),
        }
    }
}

impl HitTestTarget for HitRegion {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn dispatch(&self, kind: PointerEventKind, x: f32, y: f32) {
        if kind == PointerEventKind::Up {
            self.action.invoke(self.rect, x, y);
        }
    }
}

#[derive(Clone)]
pub struct TextInputRegion {
    pub node_id: NodeId,
    pub rect: Rect,
    pub value: String,
    pub on_value_change: Rc<dyn Fn(String)>,
    pub z_index: usize,
}

impl TextInputTarget for TextInputRegion {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn commit(&self, value: String) {
        (self.on_value_change)(value);
    }
}

/// Everything needed to draw one frame, in logical coordinates. `scale`
/// maps them to buffer pixels when drawing.
pub struct Scene {
    pub shapes: Vec<DrawShape>,
    pub texts: Vec<TextDraw>,
    pub hits: Vec<HitRegion>,
    pub inputs: Vec<TextInputRegion>,
    pub clear_color: Color,
    scale: f32,
    next_z: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            texts: Vec::new(),
            hits: Vec::new(),
            inputs: Vec::new(),
            clear_color: Color::WHITE,
            scale: 1.0,
            next_z: 0,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        if scale > 0.0 && scale.is_finite() {
            self.scale = scale;
        }
    }

    fn next_z(&mut self) -> usize {
        let z_index = self.next_z;
        self.next_z += 1;
        z_index
    }

    pub fn push_shape(&mut self, rect: Rect, color: Color, shape: ShapeKind, clip: Option<Rect>) {
        let z_index = self.next_z();
        self.shapes.push(DrawShape {
            rect,
            color,
            shape,
            clip,
            z_index,
        });
    }

    pub fn push_text(
        &mut self,
        rect: Rect,
        text: String,
        color: Color,
        font_size: f32,
        clip: Option<Rect>,
    ) {
        let z_index = self.next_z();
        self.texts.push(TextDraw {
            rect,
            text,
            color,
            font_size,
            clip,
            z_index,
        });
    }

    pub fn push_hit(
        &mut self,
        node_id: NodeId,
        rect: Rect,
        radii: Option<CornerRadii>,
        action: ClickAction,
        clip: Option<Rect>,
    ) {
        let z_index = self.next_z();
        self.hits.push(HitRegion {
            node_id,
            rect,
            radii,
            clip,
            action,
            z_index,
        });
    }

    pub fn push_text_input(
        &mut self,
        node_id: NodeId,
        rect: Rect,
        value: String,
        on_value_change: Rc<dyn Fn(String)>,
    ) {
        let z_index = self.next_z();
        self.inputs.push(TextInputRegion {
            node_id,
            rect,
            value,
            on_value_change,
            z_index,
        });
    }
}

impl RenderScene for Scene {
    type HitTarget = HitRegion;
    type TextInput = TextInputRegion;

    fn clear(&mut self) {
        self.shapes.clear();
        self.texts.clear();
        self.hits.clear();
        self.inputs.clear();
        self.next_z = 0;
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<HitRegion> {
        self.hits
            .iter()
            .filter(|hit| hit.contains(x, y))
            .max_by(|a, b| a.z_index.cmp(&b.z_index))
            .cloned()
    }

    fn text_input_at(&self, x: f32, y: f32) -> Option<TextInputRegion> {
        self.inputs
            .iter()
            .filter(|input| input.rect.contains(x, y))
            .max_by(|a, b| a.z_index.cmp(&b.z_index))
            .cloned()
    }

    fn text_input(&self, node_id: NodeId) -> Option<TextInputRegion> {
        self.inputs
            .iter()
            .find(|input| input.node_id == node_id)
            .cloned()
    }
}

pub(crate) fn point_in_round_rect(rect: Rect, radii: CornerRadii, x: f32, y: f32) -> bool {
    if !rect.contains(x, y) {
        return false;
    }
    let limit = rect.width.min(rect.height) / 2.0;
    let corners = [
        (radii.top_left.min(limit), rect.x, rect.y, 1.0, 1.0),
        (radii.top_right.min(limit), rect.right(), rect.y, -1.0, 1.0),
        (radii.bottom_right.min(limit), rect.right(), rect.bottom(), -1.0, -1.0),
        (radii.bottom_left.min(limit), rect.x, rect.bottom(), 1.0, -1.0),
    ];
    for (radius, corner_x, corner_y, sx, sy) in corners {
        if radius <= 0.0 {
            continue;
        }
        let cx = corner_x + sx * radius;
        let cy = corner_y + sy * radius;
        let in_corner_x = if sx > 0.0 { x < cx } else { x > cx };
        let in_corner_y = if sy > 0.0 { y < cy } else { y > cy };
        if in_corner_x && in_corner_y {
            let dx = x - cx;
            let dy = y - cy;
            return dx * dx + dy * dy <= radius * radius;
        }
    }
    true
}

use super::{Color, ModOp, Modifier, RoundedCornerShape};

impl Modifier {
    pub fn background(color: Color) -> Self {
        Self::with_op(ModOp::Background(color))
    }

    /// Clips the node's background and content to `shape`.
    pub fn clip(shape: RoundedCornerShape) -> Self {
        Self::with_op(ModOp::Clip(shape))
    }

    pub fn rounded_corners(radius: f32) -> Self {
        Self::clip(RoundedCornerShape::uniform(radius))
    }

    pub fn background_color(&self) -> Option<Color> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::Background(color) => Some(*color),
            _ => None,
        })
    }

    pub fn clip_shape(&self) -> Option<RoundedCornerShape> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::Clip(shape) => Some(*shape),
            _ => None,
        })
    }
}

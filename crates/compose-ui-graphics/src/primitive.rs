use crate::{Color, CornerRadii, Rect};

/// Low level paint operation shared between the headless renderer and the
/// rasterizing backends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawPrimitive {
    Rect {
        rect: Rect,
        color: Color,
    },
    RoundRect {
        rect: Rect,
        color: Color,
        radii: CornerRadii,
    },
    Oval {
        rect: Rect,
        color: Color,
    },
}

impl DrawPrimitive {
    pub fn rect(&self) -> Rect {
        match self {
            DrawPrimitive::Rect { rect, .. }
            | DrawPrimitive::RoundRect { rect, .. }
            | DrawPrimitive::Oval { rect, .. } => *rect,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawPrimitive::Rect { color, .. }
            | DrawPrimitive::RoundRect { color, .. }
            | DrawPrimitive::Oval { color, .. } => *color,
        }
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        match self {
            DrawPrimitive::Rect { rect, color } => DrawPrimitive::Rect {
                rect: rect.translate(dx, dy),
                color,
            },
            DrawPrimitive::RoundRect { rect, color, radii } => DrawPrimitive::RoundRect {
                rect: rect.translate(dx, dy),
                color,
                radii,
            },
            DrawPrimitive::Oval { rect, color } => DrawPrimitive::Oval {
                rect: rect.translate(dx, dy),
                color,
            },
        }
    }
}

//! Text styling and the fixed-advance metrics used by layout.

use compose_ui_graphics::{Color, Size};

const GLYPH_ADVANCE: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in sp.
    pub font_size: f32,
    /// Overrides the ambient content color when set.
    pub color: Option<Color>,
}

impl TextStyle {
    pub const fn new(font_size: f32) -> Self {
        Self {
            font_size,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

impl TextMetrics {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Single-line metrics: every glyph advances by `font_size * 0.6` and the
/// line is `font_size * 1.25` tall. Empty text keeps the line height.
pub fn measure_text(text: &str, style: &TextStyle) -> TextMetrics {
    let glyphs = text.chars().count() as f32;
    TextMetrics {
        width: glyphs * (style.font_size * GLYPH_ADVANCE),
        height: style.line_height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_scale_with_glyph_count() {
        let style = TextStyle::new(10.0);
        let metrics = measure_text("Born:", &style);
        assert!((metrics.width - 30.0).abs() < 1e-4, "width {}", metrics.width);
        assert!((metrics.height - 12.5).abs() < 1e-4, "height {}", metrics.height);
        let longer = measure_text("Born: 1998", &style);
        assert!((longer.width - 2.0 * metrics.width).abs() < 1e-4);
    }

    #[test]
    fn empty_text_keeps_line_height() {
        let metrics = measure_text("", &TextStyle::default());
        assert_eq!(metrics.width, 0.0);
        assert_eq!(metrics.height, 20.0);
    }
}

//! Software rasterization of a [`Scene`] into an RGBA8 frame.

use compose_ui_graphics::{Color, CornerRadii, Rect};
use rusttype::{point, Font, Scale};

use crate::font::font;
use crate::scene::{point_in_round_rect, DrawShape, Scene, ShapeKind, TextDraw};

const TOAST_HEIGHT: f32 = 44.0;
const TOAST_BOTTOM_MARGIN: f32 = 80.0;
const TOAST_FONT_SIZE: f32 = 16.0;
/// Sub-pixel sample offsets used for edge coverage.
const SAMPLES: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl Canvas<'_> {
    fn clear(&mut self, color: Color) {
        let rgba = to_bytes(color);
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Source-over blend of `color` scaled by `coverage` at pixel (px, py).
    fn blend(&mut self, px: i32, py: i32, color: [f32; 4], coverage: f32) {
        if px < 0 || py < 0 || px as u32 >= self.width || py as u32 >= self.height {
            return;
        }
        let alpha = color[3] * coverage;
        if alpha <= 0.0 {
            return;
        }
        let idx = ((py as u32 * self.width + px as u32) * 4) as usize;
        let Some(existing) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        for i in 0..3 {
            let dst = existing[i] as f32 / 255.0;
            let blended = color[i] * alpha + dst * (1.0 - alpha);
            existing[i] = (blended.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let dst_alpha = existing[3] as f32 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        existing[3] = (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    /// Pixel range covered by `rect`, limited to `clip` and the frame.
    fn pixel_bounds(&self, rect: Rect, clip: Option<Rect>) -> Option<(i32, i32, i32, i32)> {
        let frame = Rect {
            x: 0.0,
            y: 0.0,
            width: self.width as f32,
            height: self.height as f32,
        };
        let mut area = rect.intersect(frame)?;
        if let Some(clip) = clip {
            area = area.intersect(clip)?;
        }
        Some((
            area.x.floor() as i32,
            area.y.floor() as i32,
            area.right().ceil() as i32,
            area.bottom().ceil() as i32,
        ))
    }
}

pub fn draw_scene(frame: &mut [u8], width: u32, height: u32, scene: &Scene) {
    let mut canvas = Canvas {
        frame,
        width,
        height,
    };
    canvas.clear(scene.clear_color);

    let scale = scene.scale();
    let mut shapes = scene.shapes.iter().peekable();
    let mut texts = scene.texts.iter().peekable();
    loop {
        let next_is_shape = match (shapes.peek(), texts.peek()) {
            (Some(shape), Some(text)) => shape.z_index < text.z_index,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if next_is_shape {
            if let Some(shape) = shapes.next() {
                draw_shape(&mut canvas, shape, scale);
            }
        } else if let Some(text) = texts.next() {
            draw_text(&mut canvas, text, scale);
        }
    }
}

fn scale_rect(rect: Rect, scale: f32) -> Rect {
    Rect {
        x: rect.x * scale,
        y: rect.y * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}

fn scale_radii(radii: CornerRadii, scale: f32) -> CornerRadii {
    CornerRadii {
        top_left: radii.top_left * scale,
        top_right: radii.top_right * scale,
        bottom_right: radii.bottom_right * scale,
        bottom_left: radii.bottom_left * scale,
    }
}

fn draw_shape(canvas: &mut Canvas<'_>, draw: &DrawShape, scale: f32) {
    let rect = scale_rect(draw.rect, scale);
    let shape = match draw.shape {
        ShapeKind::RoundRect(radii) => ShapeKind::RoundRect(scale_radii(radii, scale)),
        other => other,
    };
    fill_shape(
        canvas,
        rect,
        shape,
        to_rgba(draw.color),
        draw.clip.map(|clip| scale_rect(clip, scale)),
    );
}

fn fill_shape(canvas: &mut Canvas<'_>, rect: Rect, shape: ShapeKind, color: [f32; 4], clip: Option<Rect>) {
    let Some((start_x, start_y, end_x, end_y)) = canvas.pixel_bounds(rect, clip) else {
        return;
    };
    for py in start_y..end_y {
        for px in start_x..end_x {
            let inside = SAMPLES
                .iter()
                .filter(|(dx, dy)| {
                    let x = px as f32 + dx;
                    let y = py as f32 + dy;
                    clip.map_or(true, |clip| clip.contains(x, y)) && shape_contains(rect, shape, x, y)
                })
                .count();
            if inside > 0 {
                canvas.blend(px, py, color, inside as f32 / SAMPLES.len() as f32);
            }
        }
    }
}

fn shape_contains(rect: Rect, shape: ShapeKind, x: f32, y: f32) -> bool {
    match shape {
        ShapeKind::Rect => rect.contains(x, y),
        ShapeKind::RoundRect(radii) => point_in_round_rect(rect, radii, x, y),
        ShapeKind::Oval => {
            let rx = rect.width / 2.0;
            let ry = rect.height / 2.0;
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }
            let dx = (x - (rect.x + rx)) / rx;
            let dy = (y - (rect.y + ry)) / ry;
            dx * dx + dy * dy <= 1.0
        }
    }
}

fn draw_text(canvas: &mut Canvas<'_>, draw: &TextDraw, scale: f32) {
    let rect = scale_rect(draw.rect, scale);
    let clip = draw.clip.map(|clip| scale_rect(clip, scale));
    draw_string(
        canvas,
        &draw.text,
        rect.x,
        rect.y,
        draw.font_size * scale,
        to_rgba(draw.color),
        clip,
    );
}

/// Draws `text` with its top-left corner at (x, y) in buffer pixels.
fn draw_string(
    canvas: &mut Canvas<'_>,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    color: [f32; 4],
    clip: Option<Rect>,
) {
    let visible = |px: i32, py: i32| {
        clip.map_or(true, |clip| clip.contains(px as f32 + 0.5, py as f32 + 0.5))
    };
    match font() {
        Some(font) => {
            let scale = Scale::uniform(size);
            let ascent = font.v_metrics(scale).ascent;
            for glyph in font.layout(text, scale, point(x, y + ascent)) {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                glyph.draw(|gx, gy, coverage| {
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if visible(px, py) {
                        canvas.blend(px, py, color, coverage);
                    }
                });
            }
        }
        None => {
            let advance = size * 0.6;
            for (index, ch) in text.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let cell = Rect {
                    x: x + index as f32 * advance + advance * 0.1,
                    y: y + size * 0.3,
                    width: advance * 0.8,
                    height: size * 0.7,
                };
                fill_shape(canvas, cell, ShapeKind::Rect, color, clip);
            }
        }
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    match font() {
        Some(font) => layout_width(font, text, size),
        None => text.chars().count() as f32 * size * 0.6,
    }
}

fn layout_width(font: &Font<'static>, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Bottom-centred pill, three quarters of the frame wide, for the active
/// toast.
pub fn draw_toast(frame: &mut [u8], width: u32, height: u32, text: &str) {
    let mut canvas = Canvas {
        frame,
        width,
        height,
    };
    let pill = toast_rect(width, height);
    fill_shape(
        &mut canvas,
        pill,
        ShapeKind::RoundRect(CornerRadii::uniform(pill.height / 2.0)),
        to_rgba(Color::DARK_GRAY.with_alpha(0.9)),
        None,
    );
    let text_size = TOAST_FONT_SIZE.min(pill.height);
    let text_x = pill.x + (pill.width - text_width(text, text_size)).max(0.0) / 2.0;
    let text_y = pill.y + (pill.height - text_size * 1.25) / 2.0;
    draw_string(
        &mut canvas,
        text,
        text_x,
        text_y,
        text_size,
        to_rgba(Color::WHITE),
        Some(pill),
    );
}

pub fn toast_rect(width: u32, height: u32) -> Rect {
    let pill_width = width as f32 * 0.75;
    Rect {
        x: (width as f32 - pill_width) / 2.0,
        y: (height as f32 - TOAST_BOTTOM_MARGIN - TOAST_HEIGHT).max(0.0),
        width: pill_width,
        height: TOAST_HEIGHT,
    }
}

fn to_rgba(color: Color) -> [f32; 4] {
    color.to_rgba().map(|channel| channel.clamp(0.0, 1.0))
}

fn to_bytes(color: Color) -> [u8; 4] {
    to_rgba(color).map(|channel| (channel * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
    }

    #[test]
    fn scene_background_and_opaque_rect() {
        let (width, height) = (8, 8);
        let mut frame = vec![0u8; (width * height * 4) as usize];
        let mut scene = Scene::new();
        scene.push_shape(
            Rect {
                x: 2.0,
                y: 2.0,
                width: 4.0,
                height: 4.0,
            },
            Color::BLUE,
            ShapeKind::Rect,
            None,
        );
        draw_scene(&mut frame, width, height, &scene);
        assert_eq!(pixel(&frame, width, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, width, 3, 3), [0, 0, 255, 255]);
    }

    #[test]
    fn clip_limits_painting() {
        let (width, height) = (8, 8);
        let mut frame = vec![0u8; (width * height * 4) as usize];
        let mut scene = Scene::new();
        scene.push_shape(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 8.0,
                height: 8.0,
            },
            Color::RED,
            ShapeKind::Rect,
            Some(Rect {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 8.0,
            }),
        );
        draw_scene(&mut frame, width, height, &scene);
        assert_eq!(pixel(&frame, width, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, width, 6, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn scale_maps_logical_to_buffer_pixels() {
        let (width, height) = (8, 8);
        let mut frame = vec![0u8; (width * height * 4) as usize];
        let mut scene = Scene::new();
        scene.set_scale(2.0);
        scene.push_shape(
            Rect {
                x: 2.0,
                y: 2.0,
                width: 1.0,
                height: 1.0,
            },
            Color::BLACK,
            ShapeKind::Rect,
            None,
        );
        draw_scene(&mut frame, width, height, &scene);
        assert_eq!(pixel(&frame, width, 5, 5), [0, 0, 0, 255]);
        assert_eq!(pixel(&frame, width, 3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn toast_pill_sits_above_the_bottom_margin() {
        let rect = toast_rect(400, 600);
        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.x, 50.0);
        assert_eq!(rect.bottom(), 520.0);
        let mut frame = vec![255u8; (400 * 600 * 4) as usize];
        draw_toast(&mut frame, 400, 600, "Clicked");
        let inside = pixel(&frame, 400, 70, 498);
        assert!(inside[0] < 128);
    }
}

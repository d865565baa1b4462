//! Color values stored as normalized RGBA components.

/// RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);
    pub const DARK_GRAY: Color = Color(0.27, 0.27, 0.27, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);

    /// Builds a color from a packed `0xAARRGGBB` value, the way Android
    /// resources spell colors.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
        Color(channel(16), channel(8), channel(0), channel(24))
    }

    pub fn red(&self) -> f32 {
        self.0
    }

    pub fn green(&self) -> f32 {
        self.1
    }

    pub fn blue(&self) -> f32 {
        self.2
    }

    pub fn alpha(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Color(self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }

    /// Relative luminance following the sRGB weighting.
    pub fn luminance(&self) -> f32 {
        0.2126 * self.0 + 0.7152 * self.1 + 0.0722 * self.2
    }

    /// Components clamped and converted to `[r, g, b, a]` floats.
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.0.clamp(0.0, 1.0),
            self.1.clamp(0.0, 1.0),
            self.2.clamp(0.0, 1.0),
            self.3.clamp(0.0, 1.0),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

//! Material-style theming: a color palette and typography handed down the
//! tree through composition locals.

#![allow(non_snake_case)]

use compose_core::{
    compositionLocalOf, staticCompositionLocalOf, CompositionLocal, CompositionLocalProvider,
    StaticCompositionLocal,
};
use compose_ui_graphics::Color;

use crate::text::TextStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colors {
    pub primary: Color,
    pub primary_variant: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub on_primary: Color,
    pub on_secondary: Color,
    pub on_background: Color,
    pub on_surface: Color,
    pub is_light: bool,
}

impl Colors {
    /// The Material baseline light palette.
    pub fn light() -> Self {
        Self {
            primary: Color::from_argb(0xFF62_00EE),
            primary_variant: Color::from_argb(0xFF37_00B3),
            secondary: Color::from_argb(0xFF03_DAC5),
            background: Color::WHITE,
            surface: Color::WHITE,
            on_primary: Color::WHITE,
            on_secondary: Color::BLACK,
            on_background: Color::BLACK,
            on_surface: Color::BLACK,
            is_light: true,
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::from_argb(0xFFBB_86FC),
            primary_variant: Color::from_argb(0xFF37_00B3),
            secondary: Color::from_argb(0xFF03_DAC5),
            background: Color::from_argb(0xFF12_1212),
            surface: Color::from_argb(0xFF12_1212),
            on_primary: Color::BLACK,
            on_secondary: Color::BLACK,
            on_background: Color::WHITE,
            on_surface: Color::WHITE,
            is_light: false,
        }
    }

    /// Matching foreground for a palette background, `None` for colors
    /// outside the palette.
    pub fn content_color_for(&self, background: Color) -> Option<Color> {
        if background == self.primary || background == self.primary_variant {
            Some(self.on_primary)
        } else if background == self.secondary {
            Some(self.on_secondary)
        } else if background == self.background {
            Some(self.on_background)
        } else if background == self.surface {
            Some(self.on_surface)
        } else {
            None
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::light()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typography {
    pub h6: TextStyle,
    pub body1: TextStyle,
    pub body2: TextStyle,
    pub caption: TextStyle,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h6: TextStyle::new(20.0),
            body1: TextStyle::new(16.0),
            body2: TextStyle::new(14.0),
            caption: TextStyle::new(12.0),
        }
    }
}

thread_local! {
    static LOCAL_COLORS: StaticCompositionLocal<Colors> = staticCompositionLocalOf(Colors::light);
    static LOCAL_TYPOGRAPHY: StaticCompositionLocal<Typography> =
        staticCompositionLocalOf(Typography::default);
    static LOCAL_CONTENT_COLOR: CompositionLocal<Color> = compositionLocalOf(|| Color::BLACK);
    static LOCAL_TEXT_STYLE: CompositionLocal<TextStyle> = compositionLocalOf(TextStyle::default);
}

pub fn LocalColors() -> StaticCompositionLocal<Colors> {
    LOCAL_COLORS.with(Clone::clone)
}

pub fn LocalTypography() -> StaticCompositionLocal<Typography> {
    LOCAL_TYPOGRAPHY.with(Clone::clone)
}

/// Foreground color for text and icons in the current subtree.
pub fn LocalContentColor() -> CompositionLocal<Color> {
    LOCAL_CONTENT_COLOR.with(Clone::clone)
}

pub fn LocalTextStyle() -> CompositionLocal<TextStyle> {
    LOCAL_TEXT_STYLE.with(Clone::clone)
}

/// Provides `colors` and `typography` to `content`, with the body text
/// style and the on-background content color as defaults.
pub fn MaterialTheme(colors: Colors, typography: Typography, content: impl FnOnce()) {
    CompositionLocalProvider(
        [
            LocalColors().provides(colors),
            LocalTypography().provides(typography),
            LocalContentColor().provides(colors.on_background),
            LocalTextStyle().provides(typography.body1),
        ],
        content,
    );
}

/// Read access to the theme provided by the nearest `MaterialTheme` call.
pub enum MaterialTheme {}

impl MaterialTheme {
    pub fn colors() -> Colors {
        LocalColors().current()
    }

    pub fn typography() -> Typography {
        LocalTypography().current()
    }
}

/// Foreground for `background` according to the current palette, falling
/// back to the ambient content color.
pub fn contentColorFor(background: Color) -> Color {
    MaterialTheme::colors()
        .content_color_for(background)
        .unwrap_or_else(|| LocalContentColor().current())
}

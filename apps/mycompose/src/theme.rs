#![allow(non_snake_case)]

use compose_ui::{Color, Colors, MaterialTheme, Typography};

const PURPLE_500: u32 = 0xFF62_00EE;
const PURPLE_700: u32 = 0xFF37_00B3;
const TEAL_200: u32 = 0xFF03_DAC5;

pub fn light_colors() -> Colors {
    Colors {
        primary: Color::from_argb(PURPLE_500),
        primary_variant: Color::from_argb(PURPLE_700),
        secondary: Color::from_argb(TEAL_200),
        ..Colors::light()
    }
}

/// The app's Material theme.
pub fn MyComposeTheme(content: impl FnOnce()) {
    MaterialTheme(light_colors(), Typography::default(), content);
}

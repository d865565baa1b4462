//! Drawables bundled with the app.

use compose_assets::{ImageVector, ResourceRegistry, VectorPath};
use compose_ui::{Color, Rect, Size};

#[allow(non_snake_case)]
pub mod R {
    pub mod drawable {
        use compose_assets::ResourceId;

        pub const IC_LAUNCHER_FOREGROUND: ResourceId = ResourceId(0x7f08_0001);
    }
}

const ANDROID_GREEN: u32 = 0xFF3D_DC84;

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Launcher foreground: the robot head and body on a 108x108 viewport.
pub fn launcher_foreground() -> ImageVector {
    let green = Color::from_argb(ANDROID_GREEN);
    ImageVector::new(
        "ic_launcher_foreground",
        Size::new(108.0, 108.0),
        Size::new(108.0, 108.0),
    )
    .with_path(VectorPath::oval(rect(34.0, 30.0, 40.0, 36.0), green))
    .with_path(VectorPath::rect(rect(34.0, 48.0, 40.0, 4.0), Color::WHITE))
    .with_path(VectorPath::oval(rect(43.0, 38.0, 5.0, 5.0), Color::WHITE))
    .with_path(VectorPath::oval(rect(60.0, 38.0, 5.0, 5.0), Color::WHITE))
    .with_path(VectorPath::round_rect(rect(34.0, 54.0, 40.0, 26.0), 5.0, green))
}

pub fn registry() -> ResourceRegistry {
    ResourceRegistry::new().with(R::drawable::IC_LAUNCHER_FOREGROUND, launcher_foreground())
}

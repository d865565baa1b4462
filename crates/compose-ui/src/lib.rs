//! High level UI primitives built on top of the Compose core runtime.

use compose_core::{location_key, MemoryApplier, NodeError};
pub use compose_core::{Composition, Key, MutableState, NodeId};
pub use compose_macros::composable;

mod debug;
mod layout;
mod modifier;
pub mod platform;
mod renderer;
pub mod resources;
mod text;
pub mod theme;
pub mod widgets;

pub use compose_assets::{ResourceId, ResourceRegistry};
pub use compose_ui_graphics::{Dp, DrawPrimitive, Sp};
pub use layout::{
    core::{
        Alignment, Arrangement, Axis, HorizontalAlignment, LinearArrangement, Measurable,
        MeasurePolicy, MeasureResult, VerticalAlignment,
    },
    policies::{BoxMeasurePolicy, ColumnMeasurePolicy, RowMeasurePolicy},
    LayoutBox, LayoutEngine, LayoutNodeData, LayoutNodeKind, LayoutTree,
};
pub use compose_foundation::{
    FocusManager, KeyCode, KeyEvent, KeyModifiers, PointerEvent, PointerEventKind,
};
pub use compose_ui_layout::Constraints;
pub use modifier::{
    Color, CornerRadii, EdgeInsets, ModOp, Modifier, Point, Rect, RoundedCornerShape, Size,
};
pub use platform::{
    LocalContext, PlatformContext, Toast, ToastDuration, ToastHost, ToastRequest,
};
pub use renderer::{
    background_primitive, clip_radii, fit_rect, HeadlessRenderer, PaintLayer,
    RecordedRenderScene, RenderOp,
};
pub use resources::{painterResource, LocalResources, Painter};
pub use text::{measure_text, TextMetrics, TextStyle};
pub use theme::{
    contentColorFor, Colors, LocalColors, LocalContentColor, LocalTextStyle, LocalTypography,
    MaterialTheme, Typography,
};
pub use widgets::{
    Box, BoxSpec, Column, ColumnSpec, Image, ImageNode, Layout, LayoutNode, Row, RowSpec,
    Surface, Text, TextField, TextFieldNode, TextNode,
};

// Debug utilities
pub use debug::{
    count_nodes, format_layout_tree, format_render_scene, log_layout_tree, log_render_scene,
    log_screen_summary, screen_summary,
};

/// Composition over the in-memory applier, as used by tests.
pub type TestComposition = Composition<MemoryApplier>;

/// Build a composition with a simple in-memory applier and run the provided closure once.
pub fn run_test_composition(mut build: impl FnMut()) -> Result<TestComposition, NodeError> {
    let mut composition = Composition::new(MemoryApplier::new());
    composition.render(location_key(file!(), line!(), column!()), || build())?;
    Ok(composition)
}

#[cfg(test)]
#[path = "tests/primitives_tests.rs"]
mod primitives_tests;

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod theme_tests;

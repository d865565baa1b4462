//! Modifier chains for MyCompose widgets.
//!
//! A [`Modifier`] is an immutable, cheaply clonable list of operations.
//! Layout reads the sizing and padding operations, the renderers read the
//! drawing ones and pointer dispatch reads the click handler.

use std::fmt;
use std::rc::Rc;

mod background;
mod clickable;
mod padding;

pub use compose_ui_graphics::{
    Color, CornerRadii, EdgeInsets, Point, Rect, RoundedCornerShape, Size,
};

#[derive(Clone)]
pub enum ModOp {
    Padding(EdgeInsets),
    Background(Color),
    Clip(RoundedCornerShape),
    Clickable(Rc<dyn Fn(Point)>),
    Size(Size),
    Width(f32),
    Height(f32),
    FillMaxWidth(f32),
    FillMaxHeight(f32),
}

impl fmt::Debug for ModOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModOp::Padding(insets) => f.debug_tuple("Padding").field(insets).finish(),
            ModOp::Background(color) => f.debug_tuple("Background").field(color).finish(),
            ModOp::Clip(shape) => f.debug_tuple("Clip").field(shape).finish(),
            ModOp::Clickable(_) => f.write_str("Clickable"),
            ModOp::Size(size) => f.debug_tuple("Size").field(size).finish(),
            ModOp::Width(width) => f.debug_tuple("Width").field(width).finish(),
            ModOp::Height(height) => f.debug_tuple("Height").field(height).finish(),
            ModOp::FillMaxWidth(fraction) => f.debug_tuple("FillMaxWidth").field(fraction).finish(),
            ModOp::FillMaxHeight(fraction) => {
                f.debug_tuple("FillMaxHeight").field(fraction).finish()
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct Modifier(Rc<Vec<ModOp>>);

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Modifier {}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    fn with_op(op: ModOp) -> Self {
        Self(Rc::new(vec![op]))
    }

    fn with_ops(ops: Vec<ModOp>) -> Self {
        Self(Rc::new(ops))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ops(&self) -> &[ModOp] {
        &self.0
    }

    pub fn size(size: Size) -> Self {
        Self::with_op(ModOp::Size(size))
    }

    pub fn size_points(width: f32, height: f32) -> Self {
        Self::size(Size { width, height })
    }

    pub fn width(width: f32) -> Self {
        Self::with_op(ModOp::Width(width))
    }

    pub fn height(height: f32) -> Self {
        Self::with_op(ModOp::Height(height))
    }

    pub fn fill_max_size() -> Self {
        Self::fill_max_size_fraction(1.0)
    }

    pub fn fill_max_size_fraction(fraction: f32) -> Self {
        let clamped = fraction.clamp(0.0, 1.0);
        Self::with_ops(vec![
            ModOp::FillMaxWidth(clamped),
            ModOp::FillMaxHeight(clamped),
        ])
    }

    pub fn fill_max_width() -> Self {
        Self::fill_max_width_fraction(1.0)
    }

    pub fn fill_max_width_fraction(fraction: f32) -> Self {
        Self::with_op(ModOp::FillMaxWidth(fraction.clamp(0.0, 1.0)))
    }

    pub fn fill_max_height() -> Self {
        Self::fill_max_height_fraction(1.0)
    }

    pub fn fill_max_height_fraction(fraction: f32) -> Self {
        Self::with_op(ModOp::FillMaxHeight(fraction.clamp(0.0, 1.0)))
    }

    /// Appends `next` after this chain.
    pub fn then(&self, next: Modifier) -> Modifier {
        if self.0.is_empty() {
            return next;
        }
        if next.0.is_empty() {
            return self.clone();
        }
        let mut ops = (*self.0).clone();
        ops.extend(next.0.iter().cloned());
        Modifier(Rc::new(ops))
    }

    pub fn explicit_size(&self) -> Option<Size> {
        let props = self.layout_properties();
        match (props.width, props.height) {
            (DimensionConstraint::Points(width), DimensionConstraint::Points(height)) => {
                Some(Size { width, height })
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum DimensionConstraint {
    #[default]
    Unspecified,
    Points(f32),
    Fraction(f32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct LayoutProperties {
    padding: EdgeInsets,
    width: DimensionConstraint,
    height: DimensionConstraint,
}

impl LayoutProperties {
    pub fn padding(&self) -> EdgeInsets {
        self.padding
    }

    pub fn width(&self) -> DimensionConstraint {
        self.width
    }

    pub fn height(&self) -> DimensionConstraint {
        self.height
    }
}

impl Modifier {
    /// Folds the sizing operations of the chain. Later size operations win;
    /// padding accumulates.
    pub(crate) fn layout_properties(&self) -> LayoutProperties {
        let mut props = LayoutProperties::default();
        for op in self.0.iter() {
            match op {
                ModOp::Padding(padding) => props.padding += *padding,
                ModOp::Size(size) => {
                    props.width = DimensionConstraint::Points(size.width);
                    props.height = DimensionConstraint::Points(size.height);
                }
                ModOp::Width(width) => props.width = DimensionConstraint::Points(*width),
                ModOp::Height(height) => props.height = DimensionConstraint::Points(*height),
                ModOp::FillMaxWidth(fraction) => {
                    props.width = DimensionConstraint::Fraction(*fraction);
                }
                ModOp::FillMaxHeight(fraction) => {
                    props.height = DimensionConstraint::Fraction(*fraction);
                }
                ModOp::Background(_) | ModOp::Clip(_) | ModOp::Clickable(_) => {}
            }
        }
        props
    }
}

#[cfg(test)]
#[path = "tests/modifier_tests.rs"]
mod tests;

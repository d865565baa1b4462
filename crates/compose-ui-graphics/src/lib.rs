//! Pure math/data for drawing & units in MyCompose
//!
//! This crate contains geometry primitives, color definitions, draw
//! primitives and unit types that are used throughout the MyCompose
//! framework.

mod color;
mod geometry;
mod primitive;
mod unit;

pub use color::*;
pub use geometry::*;
pub use primitive::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{CornerRadii, EdgeInsets, Point, Rect, RoundedCornerShape, Size};
    pub use crate::primitive::DrawPrimitive;
    pub use crate::unit::Dp;
}

use compose_ui_graphics::{Point, Size};
use compose_ui_layout::Constraints;

pub use compose_ui_layout::{
    Alignment, Arrangement, Axis, HorizontalAlignment, LinearArrangement, VerticalAlignment,
};

/// A child that can be measured once per layout pass.
pub trait Measurable {
    /// Measures the child with the provided constraints and returns the
    /// size it settled on.
    fn measure(&self, constraints: Constraints) -> Size;
}

/// Outcome of a measure policy: the container's content size and one
/// position per child, relative to the content origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasureResult {
    pub size: Size,
    pub placements: Vec<Point>,
}

impl MeasureResult {
    pub fn new(size: Size, placements: Vec<Point>) -> Self {
        Self { size, placements }
    }
}

/// Policy responsible for measuring and placing children.
pub trait MeasurePolicy {
    fn measure(&self, measurables: &[&dyn Measurable], constraints: Constraints) -> MeasureResult;
}

use compose_ui_graphics::{Point, Size};
use compose_ui_layout::Constraints;

use crate::layout::core::{
    Alignment, Arrangement, Axis, HorizontalAlignment, LinearArrangement, Measurable,
    MeasurePolicy, MeasureResult, VerticalAlignment,
};

/// MeasurePolicy for Box layout - overlays children according to alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxMeasurePolicy {
    pub content_alignment: Alignment,
    pub propagate_min_constraints: bool,
}

impl BoxMeasurePolicy {
    pub fn new(content_alignment: Alignment, propagate_min_constraints: bool) -> Self {
        Self {
            content_alignment,
            propagate_min_constraints,
        }
    }
}

impl MeasurePolicy for BoxMeasurePolicy {
    fn measure(&self, measurables: &[&dyn Measurable], constraints: Constraints) -> MeasureResult {
        let child_constraints = if self.propagate_min_constraints {
            constraints
        } else {
            constraints.loosen()
        };

        let sizes: Vec<Size> = measurables
            .iter()
            .map(|measurable| measurable.measure(child_constraints))
            .collect();
        let content = sizes.iter().fold(Size::ZERO, |acc, size| Size {
            width: acc.width.max(size.width),
            height: acc.height.max(size.height),
        });
        let size = constraints.constrain(content);

        let placements = sizes
            .iter()
            .map(|child| Point {
                x: self
                    .content_alignment
                    .horizontal
                    .align(size.width, child.width),
                y: self
                    .content_alignment
                    .vertical
                    .align(size.height, child.height),
            })
            .collect();
        MeasureResult::new(size, placements)
    }
}

/// MeasurePolicy for Column layout - arranges children vertically.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMeasurePolicy {
    pub vertical_arrangement: LinearArrangement,
    pub horizontal_alignment: HorizontalAlignment,
}

impl ColumnMeasurePolicy {
    pub fn new(
        vertical_arrangement: LinearArrangement,
        horizontal_alignment: HorizontalAlignment,
    ) -> Self {
        Self {
            vertical_arrangement,
            horizontal_alignment,
        }
    }
}

impl MeasurePolicy for ColumnMeasurePolicy {
    fn measure(&self, measurables: &[&dyn Measurable], constraints: Constraints) -> MeasureResult {
        let alignment = self.horizontal_alignment;
        measure_linear(
            Axis::Vertical,
            self.vertical_arrangement,
            |available, size| alignment.align(available, size),
            measurables,
            constraints,
        )
    }
}

/// MeasurePolicy for Row layout - arranges children horizontally.
#[derive(Clone, Debug, PartialEq)]
pub struct RowMeasurePolicy {
    pub horizontal_arrangement: LinearArrangement,
    pub vertical_alignment: VerticalAlignment,
}

impl RowMeasurePolicy {
    pub fn new(
        horizontal_arrangement: LinearArrangement,
        vertical_alignment: VerticalAlignment,
    ) -> Self {
        Self {
            horizontal_arrangement,
            vertical_alignment,
        }
    }
}

impl MeasurePolicy for RowMeasurePolicy {
    fn measure(&self, measurables: &[&dyn Measurable], constraints: Constraints) -> MeasureResult {
        let alignment = self.vertical_alignment;
        measure_linear(
            Axis::Horizontal,
            self.horizontal_arrangement,
            |available, size| alignment.align(available, size),
            measurables,
            constraints,
        )
    }
}

/// Stacks children along `axis`. Each child sees the main-axis space left
/// by its predecessors and no minimum size.
fn measure_linear(
    axis: Axis,
    arrangement: LinearArrangement,
    align_cross: impl Fn(f32, f32) -> f32,
    measurables: &[&dyn Measurable],
    constraints: Constraints,
) -> MeasureResult {
    let max = Size::new(constraints.max_width, constraints.max_height);
    let max_main = axis.main(max);
    let max_cross = axis.cross(max);

    let mut main_sizes = Vec::with_capacity(measurables.len());
    let mut cross_sizes = Vec::with_capacity(measurables.len());
    let mut used_main = 0.0_f32;
    for measurable in measurables {
        let remaining = (max_main - used_main).max(0.0);
        let child_max = axis.size(remaining, max_cross);
        let size = measurable.measure(Constraints::loose(child_max.width, child_max.height));
        used_main += axis.main(size);
        main_sizes.push(axis.main(size));
        cross_sizes.push(axis.cross(size));
    }

    let content_main = used_main + arrangement.fixed_spacing(measurables.len());
    let content_cross = cross_sizes.iter().copied().fold(0.0, f32::max);
    let size = constraints.constrain(axis.size(content_main, content_cross));
    let total_main = axis.main(size);
    let total_cross = axis.cross(size);

    let mut positions = vec![0.0; main_sizes.len()];
    arrangement.arrange(total_main, &main_sizes, &mut positions);

    let placements = positions
        .into_iter()
        .zip(cross_sizes)
        .map(|(main, cross)| {
            let cross = align_cross(total_cross, cross);
            match axis {
                Axis::Horizontal => Point { x: main, y: cross },
                Axis::Vertical => Point { x: cross, y: main },
            }
        })
        .collect();
    MeasureResult::new(size, placements)
}

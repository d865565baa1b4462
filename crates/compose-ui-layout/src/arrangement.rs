//! Main-axis arrangement for `Column` and `Row`.

/// Places children along the main axis.
pub trait Arrangement {
    /// Writes the offset of every child into `positions`, given the
    /// `total` main-axis space and the children's main-axis `sizes`.
    fn arrange(&self, total: f32, sizes: &[f32], positions: &mut [f32]);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LinearArrangement {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceEvenly,
    SpaceAround,
    SpacedBy(f32),
}

impl LinearArrangement {
    pub fn spaced_by(spacing: f32) -> Self {
        LinearArrangement::SpacedBy(spacing.max(0.0))
    }

    /// Space consumed between children beyond their own sizes.
    pub fn fixed_spacing(&self, count: usize) -> f32 {
        match self {
            LinearArrangement::SpacedBy(spacing) if count > 1 => spacing * (count - 1) as f32,
            _ => 0.0,
        }
    }

    fn place(start: f32, gap: f32, sizes: &[f32], positions: &mut [f32]) {
        let mut cursor = start;
        for (size, position) in sizes.iter().zip(positions.iter_mut()) {
            *position = cursor;
            cursor += size + gap;
        }
    }
}

impl Arrangement for LinearArrangement {
    fn arrange(&self, total: f32, sizes: &[f32], positions: &mut [f32]) {
        let count = sizes.len();
        if count == 0 {
            return;
        }
        let used: f32 = sizes.iter().sum();
        let free = (total - used).max(0.0);
        match *self {
            LinearArrangement::Start => Self::place(0.0, 0.0, sizes, positions),
            LinearArrangement::End => Self::place(free, 0.0, sizes, positions),
            LinearArrangement::Center => Self::place(free / 2.0, 0.0, sizes, positions),
            LinearArrangement::SpaceBetween => {
                let gap = if count > 1 {
                    free / (count - 1) as f32
                } else {
                    0.0
                };
                Self::place(0.0, gap, sizes, positions)
            }
            LinearArrangement::SpaceEvenly => {
                let gap = free / (count + 1) as f32;
                Self::place(gap, gap, sizes, positions)
            }
            LinearArrangement::SpaceAround => {
                let gap = free / count as f32;
                Self::place(gap / 2.0, gap, sizes, positions)
            }
            LinearArrangement::SpacedBy(spacing) => Self::place(0.0, spacing, sizes, positions),
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;

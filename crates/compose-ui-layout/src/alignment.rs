//! Alignment of a child inside the space its parent offers.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Start,
    CenterHorizontally,
    End,
}

impl HorizontalAlignment {
    /// Offset of a child of width `size` inside `available`.
    pub fn align(self, available: f32, size: f32) -> f32 {
        let free = (available - size).max(0.0);
        match self {
            HorizontalAlignment::Start => 0.0,
            HorizontalAlignment::CenterHorizontally => free / 2.0,
            HorizontalAlignment::End => free,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    CenterVertically,
    Bottom,
}

impl VerticalAlignment {
    pub fn align(self, available: f32, size: f32) -> f32 {
        let free = (available - size).max(0.0);
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::CenterVertically => free / 2.0,
            VerticalAlignment::Bottom => free,
        }
    }
}

/// Two dimensional alignment used by `Box`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Alignment {
    pub const CENTER: Alignment = Alignment::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::CenterVertically,
    );

    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_splits_free_space() {
        assert_eq!(HorizontalAlignment::CenterHorizontally.align(100.0, 40.0), 30.0);
        assert_eq!(VerticalAlignment::Bottom.align(50.0, 20.0), 30.0);
    }

    #[test]
    fn oversized_child_starts_at_zero() {
        assert_eq!(HorizontalAlignment::End.align(10.0, 40.0), 0.0);
    }
}

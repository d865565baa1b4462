//! Density independent units.

/// Density independent pixels. One `Dp` equals one logical pixel at a
/// density of `1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<Dp> for f32 {
    fn from(dp: Dp) -> Self {
        dp.0
    }
}

/// Scale independent pixels used for font sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Sp(pub f32);

impl Sp {
    pub fn value(self) -> f32 {
        self.0
    }
}

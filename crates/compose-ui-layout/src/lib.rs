//! Layout contracts & policies for MyCompose

mod alignment;
mod arrangement;
mod axis;
mod constraints;

pub use alignment::*;
pub use arrangement::*;
pub use axis::*;
pub use constraints::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
    pub use crate::arrangement::{Arrangement, LinearArrangement};
    pub use crate::axis::Axis;
    pub use crate::constraints::Constraints;
}

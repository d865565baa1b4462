//! Testing utilities and harness for MyCompose

pub mod testing;

// Re-export testing utilities
pub use testing::*;

pub mod prelude {
    pub use crate::testing::{ComposeTestRule, NodeHandle, RecordingToastHost};
}

//! Input event types and focus tracking.

mod focus;
mod key;
mod types;

pub use focus::*;
pub use key::*;
pub use types::*;

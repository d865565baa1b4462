//! Hash maps for scope and local bookkeeping. The `std-hash` feature swaps
//! hashbrown for the std collections.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use hashbrown::{HashMap, HashSet};
}

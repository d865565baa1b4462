#![doc = r"Core runtime pieces for the MyCompose toolkit."]

extern crate self as compose_core;

mod applier;
mod collections;
mod composer;
mod composition;
pub mod hash;
mod local;
mod owned;
pub mod platform;
pub mod runtime;
mod scope;
mod slot_table;
mod state;

pub use applier::{Applier, MemoryApplier, Node};
pub use composer::Composer;
pub use composition::Composition;
pub use local::{
    compositionLocalOf, staticCompositionLocalOf, CompositionLocal, CompositionLocalProvider,
    ProvidedValue, StaticCompositionLocal,
};
pub use owned::Owned;
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use scope::RecomposeScope;
pub use slot_table::SlotTable;
pub use state::{MutableState, State};

use std::cell::RefCell;
use std::hash::Hash;
use std::mem;
use std::thread_local;

pub type Key = u64;
pub type NodeId = usize;

pub(crate) type ScopeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    TypeMismatch { id: NodeId, expected: &'static str },
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} missing"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} type mismatch; expected {expected}")
            }
        }
    }
}

impl std::error::Error for NodeError {}

thread_local! {
    pub(crate) static CURRENT_COMPOSER: RefCell<Vec<*mut ()>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` against the innermost installed composer.
///
/// # Panics
///
/// Panics when called outside of a composition pass.
pub fn with_current_composer<R>(f: impl FnOnce(&mut Composer<'_>) -> R) -> R {
    with_current_composer_opt(f).expect("no composer installed")
}

pub(crate) fn with_current_composer_opt<R>(f: impl FnOnce(&mut Composer<'_>) -> R) -> Option<R> {
    let ptr = CURRENT_COMPOSER.with(|stack| stack.borrow().last().copied())?;
    // SAFETY: the pointer was pushed by `Composer::install`, whose guard pops
    // it before the composer goes out of scope.
    let composer = unsafe { &mut *(ptr as *mut Composer<'static>) };
    let composer: &mut Composer<'_> =
        unsafe { mem::transmute::<&mut Composer<'static>, &mut Composer<'_>>(composer) };
    Some(f(composer))
}

/// Whether a composition pass is currently running on this thread.
pub fn is_composing() -> bool {
    CURRENT_COMPOSER.with(|stack| !stack.borrow().is_empty())
}

pub fn with_key<K: Hash>(key: &K, content: impl FnOnce()) {
    with_current_composer(|composer| composer.with_key(key, |_| content()));
}

pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Owned<T> {
    with_current_composer(|composer| composer.remember(init))
}

#[allow(non_snake_case)]
pub fn useState<T: 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    with_current_composer(|composer| composer.use_state(init))
}

pub fn emit_node<N: Node + 'static>(init: impl FnOnce() -> N) -> NodeId {
    with_current_composer(|composer| composer.emit_node(init))
}

pub fn with_node_mut<N: Node + 'static, R>(
    id: NodeId,
    f: impl FnOnce(&mut N) -> R,
) -> Result<R, NodeError> {
    with_current_composer(|composer| composer.with_node_mut(id, f))
}

pub fn push_parent(id: NodeId) {
    with_current_composer(|composer| composer.push_parent(id));
}

pub fn pop_parent() {
    with_current_composer(|composer| composer.pop_parent());
}

/// Group key for a source location; `#[composable]` derives one per function.
pub fn location_key(file: &str, line: u32, column: u32) -> Key {
    hash::hash_one(&(file, line, column))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

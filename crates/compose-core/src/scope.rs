use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::local::LocalContext;
use crate::runtime::RuntimeHandle;
use crate::{Composer, ScopeId};

static NEXT_SCOPE_ID: AtomicUsize = AtomicUsize::new(1);

fn next_scope_id() -> ScopeId {
    NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) type RecomposeCallback = Box<dyn for<'a> FnMut(&mut Composer<'a>) + 'static>;

pub(crate) struct RecomposeScopeInner {
    pub(crate) id: ScopeId,
    runtime: RuntimeHandle,
    invalid: Cell<bool>,
    enqueued: Cell<bool>,
    group_index: Cell<Option<usize>>,
    recompose: RefCell<Option<RecomposeCallback>>,
    locals: RefCell<Vec<Rc<LocalContext>>>,
}

impl Drop for RecomposeScopeInner {
    fn drop(&mut self) {
        if self.enqueued.get() {
            self.runtime.mark_scope_recomposed(self.id);
        }
    }
}

/// The unit of invalidation: one per composition group.
///
/// States read inside a group subscribe its scope; writing such a state
/// marks the scope invalid and asks the runtime for a frame.
#[derive(Clone)]
pub struct RecomposeScope {
    pub(crate) inner: Rc<RecomposeScopeInner>,
}

impl RecomposeScope {
    pub(crate) fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RecomposeScopeInner {
                id: next_scope_id(),
                runtime,
                invalid: Cell::new(false),
                enqueued: Cell::new(false),
                group_index: Cell::new(None),
                recompose: RefCell::new(None),
                locals: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn id(&self) -> ScopeId {
        self.inner.id
    }

    pub fn is_invalid(&self) -> bool {
        self.inner.invalid.get()
    }

    /// Whether the scope can be re-run in place without recomposing its parent.
    pub fn can_recompose_in_place(&self) -> bool {
        self.inner.recompose.borrow().is_some() && self.inner.group_index.get().is_some()
    }

    pub(crate) fn invalidate(&self) {
        self.inner.invalid.set(true);
        if !self.inner.enqueued.replace(true) {
            self.inner
                .runtime
                .register_invalid_scope(self.inner.id, Rc::downgrade(&self.inner));
        }
    }

    pub(crate) fn mark_recomposed(&self) {
        self.inner.invalid.set(false);
        if self.inner.enqueued.replace(false) {
            self.inner.runtime.mark_scope_recomposed(self.inner.id);
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<RecomposeScopeInner> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn set_group_index(&self, index: usize) {
        self.inner.group_index.set(Some(index));
    }

    pub(crate) fn group_index(&self) -> Option<usize> {
        self.inner.group_index.get()
    }

    pub(crate) fn set_recompose(&self, callback: RecomposeCallback, locals: Vec<Rc<LocalContext>>) {
        *self.inner.recompose.borrow_mut() = Some(callback);
        *self.inner.locals.borrow_mut() = locals;
    }

    pub(crate) fn captured_locals(&self) -> Vec<Rc<LocalContext>> {
        self.inner.locals.borrow().clone()
    }

    /// Runs the stored callback. The callback is put back afterwards unless
    /// the body registered a fresh one.
    pub(crate) fn run_recompose(&self, composer: &mut Composer<'_>) {
        let taken = self.inner.recompose.borrow_mut().take();
        if let Some(mut callback) = taken {
            callback(composer);
            let mut slot = self.inner.recompose.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }
}

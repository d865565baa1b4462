use std::sync::Arc;

use crate::applier::Applier;
use crate::runtime::{DefaultScheduler, Runtime, RuntimeHandle};
use crate::scope::RecomposeScope;
use crate::slot_table::SlotTable;
use crate::{Composer, Key, NodeError, NodeId};

/// A slot table, an applier and a runtime bundled into one renderable unit.
pub struct Composition<A: Applier> {
    slots: SlotTable,
    applier: A,
    runtime: Runtime,
    root: Option<NodeId>,
    root_stale: bool,
}

impl<A: Applier> Composition<A> {
    pub fn new(applier: A) -> Self {
        Self::with_runtime(applier, Runtime::new(Arc::new(DefaultScheduler)))
    }

    pub fn with_runtime(applier: A, runtime: Runtime) -> Self {
        Self {
            slots: SlotTable::new(),
            applier,
            runtime,
            root: None,
            root_stale: false,
        }
    }

    /// Composes `content` from the top. Remembered values and nodes are
    /// matched positionally, so rendering the same content again reuses
    /// the same node ids.
    pub fn render(&mut self, key: Key, mut content: impl FnMut()) -> Result<(), NodeError> {
        self.slots.reset();
        self.root_stale = false;
        let runtime_handle = self.runtime_handle();
        let (root, commands) = {
            let mut composer = Composer::new(
                &mut self.slots,
                &mut self.applier,
                runtime_handle.clone(),
                self.root,
            );
            composer.install(|composer| {
                composer.with_group(key, |_| content());
                (composer.root, composer.take_commands())
            })
        };
        for mut command in commands {
            command(&mut self.applier)?;
        }
        self.root = root;
        self.slots.trim_to_cursor();
        self.process_invalid_scopes()
    }

    /// True while a frame was requested or invalidated work remains.
    pub fn should_render(&self) -> bool {
        self.root_stale || self.runtime.needs_frame()
    }

    /// True when an invalidated group could not be re-run in place, so the
    /// host has to call [`render`](Self::render) again.
    pub fn needs_full_render(&self) -> bool {
        self.root_stale
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn applier(&self) -> &A {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut A {
        &mut self.applier
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Re-runs the invalidated groups that registered a recompose callback.
    /// Any other invalid group marks the root stale.
    pub fn process_invalid_scopes(&mut self) -> Result<(), NodeError> {
        let runtime_handle = self.runtime_handle();
        loop {
            let pending = runtime_handle.take_invalidated_scopes();
            if pending.is_empty() {
                break;
            }
            let mut scopes = Vec::new();
            for (id, weak) in pending {
                match weak.upgrade() {
                    Some(inner) => {
                        let scope = RecomposeScope { inner };
                        if !scope.is_invalid() {
                            continue;
                        }
                        if scope.can_recompose_in_place() {
                            scopes.push(scope);
                        } else {
                            self.root_stale = true;
                        }
                    }
                    None => runtime_handle.mark_scope_recomposed(id),
                }
            }
            if scopes.is_empty() {
                continue;
            }
            let commands = {
                let mut composer = Composer::new(
                    &mut self.slots,
                    &mut self.applier,
                    runtime_handle.clone(),
                    self.root,
                );
                composer.install(|composer| {
                    for scope in scopes.iter() {
                        if scope.is_invalid() {
                            composer.recompose_group(scope);
                        }
                    }
                    composer.take_commands()
                })
            };
            for mut command in commands {
                command(&mut self.applier)?;
            }
        }
        if !self.root_stale && !runtime_handle.has_invalid_scopes() {
            self.runtime.set_needs_frame(false);
        }
        Ok(())
    }
}

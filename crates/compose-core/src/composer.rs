use std::hash::Hash;
use std::rc::Rc;

use crate::applier::{Applier, Command, Node};
use crate::collections::map::HashSet;
use crate::local::{
    CompositionLocal, LocalContext, LocalStateEntry, ProvidedValue, StaticCompositionLocal,
    StaticLocalEntry,
};
use crate::owned::Owned;
use crate::runtime::RuntimeHandle;
use crate::scope::RecomposeScope;
use crate::slot_table::SlotTable;
use crate::state::MutableState;
use crate::{hash, Key, NodeError, NodeId, CURRENT_COMPOSER};

#[derive(Default, Clone)]
struct ParentChildren {
    children: Vec<NodeId>,
}

struct ParentFrame {
    id: NodeId,
    remembered: Owned<ParentChildren>,
    previous: Vec<NodeId>,
    new_children: Vec<NodeId>,
}

/// Drives one composition pass over a [`SlotTable`].
///
/// Node mutations are queued as commands and applied by the owning
/// [`Composition`](crate::Composition) once the pass finishes.
pub struct Composer<'a> {
    slots: &'a mut SlotTable,
    applier: &'a mut dyn Applier,
    runtime: RuntimeHandle,
    parent_stack: Vec<ParentFrame>,
    pub(crate) root: Option<NodeId>,
    commands: Vec<Command>,
    scope_stack: Vec<RecomposeScope>,
    local_stack: Vec<Rc<LocalContext>>,
}

impl<'a> Composer<'a> {
    pub fn new(
        slots: &'a mut SlotTable,
        applier: &'a mut dyn Applier,
        runtime: RuntimeHandle,
        root: Option<NodeId>,
    ) -> Self {
        Self {
            slots,
            applier,
            runtime,
            parent_stack: Vec::new(),
            root,
            commands: Vec::new(),
            scope_stack: Vec::new(),
            local_stack: Vec::new(),
        }
    }

    /// Makes this composer the one seen by the free composable functions
    /// for the duration of `f`.
    pub fn install<R>(&'a mut self, f: impl FnOnce(&mut Composer<'a>) -> R) -> R {
        CURRENT_COMPOSER.with(|stack| stack.borrow_mut().push(self as *mut _ as *mut ()));
        struct Guard;
        impl Drop for Guard {
            fn drop(&mut self) {
                CURRENT_COMPOSER.with(|stack| {
                    stack.borrow_mut().pop();
                });
            }
        }
        let guard = Guard;
        let result = f(self);
        drop(guard);
        result
    }

    pub fn with_group<R>(&mut self, key: Key, f: impl FnOnce(&mut Composer<'_>) -> R) -> R {
        let index = self.slots.start(key);
        let runtime = self.runtime.clone();
        let scope = self
            .slots
            .remember(|| RecomposeScope::new(runtime))
            .with(|scope| scope.clone());
        scope.set_group_index(index);
        self.scope_stack.push(scope.clone());
        let result = f(self);
        self.scope_stack.pop();
        scope.mark_recomposed();
        self.slots.end();
        result
    }

    pub fn with_key<K: Hash, R>(&mut self, key: &K, f: impl FnOnce(&mut Composer<'_>) -> R) -> R {
        self.with_group(hash::hash_one(key), f)
    }

    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Owned<T> {
        self.slots.remember(init)
    }

    pub fn use_state<T: 'static>(&mut self, init: impl FnOnce() -> T) -> MutableState<T> {
        self.slots
            .remember(|| MutableState::new(init()))
            .with(|state| state.clone())
    }

    pub fn read_composition_local<T: Clone + 'static>(&mut self, local: &CompositionLocal<T>) -> T {
        for context in self.local_stack.iter().rev() {
            if let Some(entry) = context.values.get(&local.key) {
                if let Ok(typed) = entry.clone().downcast::<LocalStateEntry<T>>() {
                    return typed.value();
                }
            }
        }
        local.default_value()
    }

    pub fn read_static_composition_local<T: Clone + 'static>(
        &mut self,
        local: &StaticCompositionLocal<T>,
    ) -> T {
        for context in self.local_stack.iter().rev() {
            if let Some(entry) = context.values.get(&local.key) {
                if let Ok(typed) = entry.clone().downcast::<StaticLocalEntry<T>>() {
                    return typed.value();
                }
            }
        }
        local.default_value()
    }

    pub fn with_composition_locals<R>(
        &mut self,
        provided: Vec<ProvidedValue>,
        f: impl FnOnce(&mut Composer<'_>) -> R,
    ) -> R {
        if provided.is_empty() {
            return f(self);
        }
        let mut context = LocalContext::default();
        for value in provided {
            let (key, entry) = value.into_entry(self);
            context.values.insert(key, entry);
        }
        self.local_stack.push(Rc::new(context));
        let result = f(self);
        self.local_stack.pop();
        result
    }

    pub fn current_recompose_scope(&self) -> Option<RecomposeScope> {
        self.scope_stack.last().cloned()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Lets the current group be re-run on its own when a state it read
    /// changes. Groups without a callback are recomposed with their parent.
    pub fn set_recompose_callback<F>(&mut self, callback: F)
    where
        F: for<'b> FnMut(&mut Composer<'b>) + 'static,
    {
        if let Some(scope) = self.current_recompose_scope() {
            scope.set_recompose(Box::new(callback), self.local_stack.clone());
        }
    }

    pub(crate) fn recompose_group(&mut self, scope: &RecomposeScope) {
        let Some(index) = scope.group_index() else {
            return;
        };
        let saved_locals = std::mem::replace(&mut self.local_stack, scope.captured_locals());
        self.slots.start_recompose(index);
        self.scope_stack.push(scope.clone());
        scope.run_recompose(self);
        self.scope_stack.pop();
        self.slots.end_recompose();
        scope.mark_recomposed();
        self.local_stack = saved_locals;
    }

    pub fn emit_node<N: Node + 'static>(&mut self, init: impl FnOnce() -> N) -> NodeId {
        if let Some(id) = self.slots.read_node() {
            self.commands
                .push(Box::new(move |applier: &mut dyn Applier| {
                    let node = applier.get_mut(id)?;
                    let typed =
                        node.as_any_mut()
                            .downcast_mut::<N>()
                            .ok_or(NodeError::TypeMismatch {
                                id,
                                expected: std::any::type_name::<N>(),
                            })?;
                    typed.update();
                    Ok(())
                }));
            self.attach_to_parent(id);
            return id;
        }
        let id = self.applier.create(Box::new(init()));
        self.slots.record_node(id);
        self.commands
            .push(Box::new(move |applier: &mut dyn Applier| {
                applier.get_mut(id)?.mount();
                Ok(())
            }));
        self.attach_to_parent(id);
        id
    }

    fn attach_to_parent(&mut self, id: NodeId) {
        if let Some(frame) = self.parent_stack.last_mut() {
            frame.new_children.push(id);
        } else {
            self.root = Some(id);
        }
    }

    pub fn with_node_mut<N: Node + 'static, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let node = self.applier.get_mut(id)?;
        let typed = node
            .as_any_mut()
            .downcast_mut::<N>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            })?;
        Ok(f(typed))
    }

    /// Starts collecting the children emitted for node `id`.
    pub fn push_parent(&mut self, id: NodeId) {
        let remembered = self.slots.remember(ParentChildren::default);
        let previous = remembered.with(|entry| entry.children.clone());
        self.parent_stack.push(ParentFrame {
            id,
            remembered,
            previous,
            new_children: Vec::new(),
        });
    }

    /// Diffs the children emitted since the matching [`push_parent`] against
    /// the previous pass and queues insert, move and remove commands.
    ///
    /// [`push_parent`]: Composer::push_parent
    pub fn pop_parent(&mut self) {
        let Some(frame) = self.parent_stack.pop() else {
            return;
        };
        let ParentFrame {
            id,
            remembered,
            previous,
            new_children,
        } = frame;
        if previous != new_children {
            let mut current = previous;
            let desired: HashSet<NodeId> = new_children.iter().copied().collect();

            for index in (0..current.len()).rev() {
                let child = current[index];
                if desired.contains(&child) {
                    continue;
                }
                current.remove(index);
                self.commands
                    .push(Box::new(move |applier: &mut dyn Applier| {
                        applier.get_mut(id)?.remove_child(child);
                        applier.get_mut(child)?.unmount();
                        applier.remove(child)
                    }));
            }

            for (target_index, &child) in new_children.iter().enumerate() {
                match current.iter().position(|&c| c == child) {
                    Some(from_index) if from_index != target_index => {
                        current.remove(from_index);
                        let to_index = target_index.min(current.len());
                        current.insert(to_index, child);
                        self.commands
                            .push(Box::new(move |applier: &mut dyn Applier| {
                                applier.get_mut(id)?.move_child(from_index, to_index);
                                Ok(())
                            }));
                    }
                    Some(_) => {}
                    None => {
                        let insert_index = target_index.min(current.len());
                        let appended_index = current.len();
                        current.insert(insert_index, child);
                        self.commands
                            .push(Box::new(move |applier: &mut dyn Applier| {
                                let parent = applier.get_mut(id)?;
                                parent.insert_child(child);
                                if insert_index != appended_index {
                                    parent.move_child(appended_index, insert_index);
                                }
                                Ok(())
                            }));
                    }
                }
            }
        }
        remembered.update(|entry| entry.children = new_children);
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
impl Composer<'_> {
    /// Overrides the innermost parent frame so diffs can be exercised
    /// without composing real children.
    pub(crate) fn replace_parent_frame(&mut self, previous: Vec<NodeId>, new_children: Vec<NodeId>) {
        if let Some(frame) = self.parent_stack.last_mut() {
            frame
                .remembered
                .update(|entry| entry.children = previous.clone());
            frame.previous = previous;
            frame.new_children = new_children;
        }
    }
}

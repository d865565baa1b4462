use std::any::Any;

use crate::owned::Owned;
use crate::{Key, NodeId};

#[derive(Default)]
struct GroupEntry {
    key: Key,
    start_slot: usize,
    end_slot: usize,
}

enum Slot {
    Group { index: usize },
    Value(Box<dyn Any>),
    Node(NodeId),
}

/// Positional storage for groups, remembered values and emitted nodes.
///
/// Each pass walks the table with a cursor. A slot that matches what the
/// pass asks for is reused; the first mismatch truncates the rest of the
/// table so stale entries never leak into a different call site.
#[derive(Default)]
pub struct SlotTable {
    slots: Vec<Slot>,
    groups: Vec<GroupEntry>,
    cursor: usize,
    group_stack: Vec<usize>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&mut self, slot: Slot) {
        let cursor = self.cursor;
        if cursor == self.slots.len() {
            self.slots.push(slot);
        } else {
            self.slots[cursor] = slot;
        }
        self.cursor += 1;
    }

    pub fn start(&mut self, key: Key) -> usize {
        let cursor = self.cursor;
        if let Some(Slot::Group { index }) = self.slots.get(cursor) {
            let index = *index;
            if self.groups[index].key == key {
                self.groups[index].start_slot = cursor;
                self.cursor += 1;
                self.group_stack.push(index);
                return index;
            }
        }
        self.slots.truncate(cursor);
        let index = self.groups.len();
        self.groups.push(GroupEntry {
            key,
            start_slot: cursor,
            end_slot: cursor,
        });
        self.write(Slot::Group { index });
        self.group_stack.push(index);
        index
    }

    pub fn end(&mut self) {
        if let Some(index) = self.group_stack.pop() {
            if let Some(entry) = self.groups.get_mut(index) {
                entry.end_slot = self.cursor;
            }
        }
    }

    /// Positions the cursor just after the group's own scope slot.
    pub(crate) fn start_recompose(&mut self, index: usize) {
        if let Some(entry) = self.groups.get(index) {
            self.cursor = entry.start_slot + 1;
            self.group_stack.push(index);
            if matches!(self.slots.get(self.cursor), Some(Slot::Value(_))) {
                self.cursor += 1;
            }
        }
    }

    pub(crate) fn end_recompose(&mut self) {
        if let Some(index) = self.group_stack.pop() {
            if let Some(entry) = self.groups.get(index) {
                self.cursor = entry.end_slot;
            }
        }
    }

    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Owned<T> {
        if let Some(Slot::Value(value)) = self.slots.get(self.cursor) {
            if let Some(existing) = value.downcast_ref::<Owned<T>>() {
                let existing = existing.clone();
                self.cursor += 1;
                return existing;
            }
        }
        self.slots.truncate(self.cursor);
        let owned = Owned::new(init());
        self.write(Slot::Value(Box::new(owned.clone())));
        owned
    }

    pub fn record_node(&mut self, id: NodeId) {
        if let Some(Slot::Node(existing)) = self.slots.get(self.cursor) {
            if *existing == id {
                self.cursor += 1;
                return;
            }
        }
        self.slots.truncate(self.cursor);
        self.write(Slot::Node(id));
    }

    pub fn read_node(&mut self) -> Option<NodeId> {
        match self.slots.get(self.cursor) {
            Some(Slot::Node(id)) => {
                let id = *id;
                self.cursor += 1;
                Some(id)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.group_stack.clear();
    }

    pub fn trim_to_cursor(&mut self) {
        self.slots.truncate(self.cursor);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

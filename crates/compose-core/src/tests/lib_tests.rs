use super::*;
use crate as compose_core;
use compose_macros::composable;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct TestTextNode {
    text: String,
}

impl Node for TestTextNode {}

#[derive(Default)]
struct TestDummyNode;

impl Node for TestDummyNode {}

#[derive(Default)]
struct CountingScheduler {
    frames: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
    }
}

thread_local! {
    static INVOCATIONS: Cell<usize> = Cell::new(0);
    static PARENT_RECOMPOSITIONS: Cell<usize> = Cell::new(0);
    static CHILD_RECOMPOSITIONS: Cell<usize> = Cell::new(0);
}

fn compose_test_node<N: Node + 'static>(init: impl FnOnce() -> N) -> NodeId {
    compose_core::with_current_composer(|composer| composer.emit_node(init))
}

#[composable]
fn counted_text(value: i32) -> NodeId {
    INVOCATIONS.with(|calls| calls.set(calls.get() + 1));
    let id = compose_test_node(TestTextNode::default);
    with_node_mut(id, |node: &mut TestTextNode| {
        node.text = format!("{}", value);
    })
    .expect("update text node");
    id
}

#[composable]
fn remembered_counter(slot: &RefCell<Vec<MutableState<i32>>>) {
    let state = compose_core::useState(|| 0);
    slot.borrow_mut().push(state);
}

#[test]
fn with_current_composer_is_available_inside_group() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut slots = SlotTable::new();
    let mut applier = MemoryApplier::new();
    let mut composer = Composer::new(&mut slots, &mut applier, runtime.handle(), None);

    composer.install(|composer| {
        composer.with_group(0, |_| {
            assert!(compose_core::is_composing());
            compose_core::with_current_composer(|current| {
                current.emit_node(TestDummyNode::default);
            });
        });
    });
    assert!(!compose_core::is_composing());
}

#[test]
fn slot_table_remember_replaces_mismatched_type() {
    let mut slots = SlotTable::new();

    {
        let value = slots.remember(|| 42i32);
        assert_eq!(value.with(|value| *value), 42);
    }

    slots.reset();

    {
        let value = slots.remember(|| "updated");
        assert_eq!(value.with(|&value| value), "updated");
    }

    slots.reset();

    {
        let value = slots.remember(|| "should not run");
        assert_eq!(value.with(|&value| value), "updated");
    }
}

#[test]
fn remember_state_roundtrip() {
    let mut composition = Composition::new(MemoryApplier::new());
    let mut text_seen = String::new();

    for _ in 0..2 {
        composition
            .render(location_key(file!(), line!(), column!()), || {
                with_current_composer(|composer| {
                    composer.with_group(location_key(file!(), line!(), column!()), |composer| {
                        let count = composer.use_state(|| 0);
                        let node_id = composer.emit_node(TestTextNode::default);
                        composer
                            .with_node_mut(node_id, |node: &mut TestTextNode| {
                                node.text = format!("{}", count.get());
                            })
                            .expect("update text node");
                        text_seen = count.get().to_string();
                        count.set_value_if_changed(count.get() + 1);
                    });
                });
            })
            .expect("render succeeds");
    }

    assert_eq!(text_seen, "1");
}

#[test]
fn rendering_same_content_reuses_node_ids() {
    INVOCATIONS.with(|calls| calls.set(0));
    let mut composition = Composition::new(MemoryApplier::new());
    let key = location_key(file!(), line!(), column!());

    let mut first = None;
    composition
        .render(key, || first = Some(counted_text(7)))
        .expect("first render");
    let mut second = None;
    composition
        .render(key, || second = Some(counted_text(7)))
        .expect("second render");

    assert_eq!(first, second);
    assert_eq!(composition.root(), first);
    assert_eq!(composition.applier().len(), 1);
    INVOCATIONS.with(|calls| assert_eq!(calls.get(), 2));
}

#[test]
fn composable_calls_at_different_positions_keep_separate_state() {
    let mut composition = Composition::new(MemoryApplier::new());
    let states = RefCell::new(Vec::new());

    composition
        .render(1, || {
            remembered_counter(&states);
            remembered_counter(&states);
        })
        .expect("render succeeds");

    let states = states.into_inner();
    assert_eq!(states.len(), 2);
    assert_ne!(states[0], states[1]);
    states[0].set(5);
    assert_eq!(states[1].get(), 0);
}

#[test]
fn state_update_schedules_render() {
    let scheduler = Arc::new(CountingScheduler::default());
    let mut composition =
        Composition::with_runtime(MemoryApplier::new(), Runtime::new(scheduler.clone()));
    let mut stored = None;
    composition
        .render(location_key(file!(), line!(), column!()), || {
            let state = compose_core::useState(|| 10);
            let _ = state.value();
            stored = Some(state);
        })
        .expect("render succeeds");
    let state = stored.expect("state stored");
    assert!(!composition.should_render());
    assert_eq!(state.watcher_count(), 1);

    state.set(11);
    assert!(composition.should_render());
    assert_eq!(scheduler.frames.load(Ordering::SeqCst), 1);
}

#[test]
fn set_value_if_changed_skips_equal_writes() {
    let mut composition = Composition::new(MemoryApplier::new());
    let mut stored = None;
    composition
        .render(1, || {
            let state = compose_core::useState(|| String::from("same"));
            state.with(|_| {});
            stored = Some(state);
        })
        .expect("render succeeds");
    let state = stored.expect("state stored");

    assert!(!state.set_value_if_changed(String::from("same")));
    assert!(!composition.should_render());
    assert!(state.set_value_if_changed(String::from("other")));
    assert!(composition.should_render());
}

#[test]
fn invalid_scope_without_callback_requests_full_render() {
    PARENT_RECOMPOSITIONS.with(|calls| calls.set(0));
    let mut composition = Composition::new(MemoryApplier::new());
    let captured: Rc<RefCell<Option<MutableState<i32>>>> = Rc::new(RefCell::new(None));

    let mut content = {
        let captured = captured.clone();
        move || {
            PARENT_RECOMPOSITIONS.with(|calls| calls.set(calls.get() + 1));
            let state = compose_core::useState(|| 0);
            let value = state.value();
            captured.borrow_mut().replace(state);
            counted_text(value);
        }
    };

    composition.render(3, &mut content).expect("initial render");
    let state = captured.borrow().clone().expect("state captured");

    state.set(1);
    composition
        .process_invalid_scopes()
        .expect("process invalid scopes");
    assert!(composition.needs_full_render());
    assert!(composition.should_render());

    composition.render(3, &mut content).expect("full render");
    assert!(!composition.should_render());
    PARENT_RECOMPOSITIONS.with(|calls| assert_eq!(calls.get(), 2));
}

#[test]
fn recompose_callback_reruns_only_the_invalid_group() {
    PARENT_RECOMPOSITIONS.with(|calls| calls.set(0));
    CHILD_RECOMPOSITIONS.with(|calls| calls.set(0));

    fn child_body(state: &MutableState<i32>) {
        CHILD_RECOMPOSITIONS.with(|calls| calls.set(calls.get() + 1));
        let _ = state.value();
    }

    let state = MutableState::new(0);
    let mut composition = Composition::new(MemoryApplier::new());
    let mut content = {
        let state = state.clone();
        move || {
            PARENT_RECOMPOSITIONS.with(|calls| calls.set(calls.get() + 1));
            let state = state.clone();
            with_current_composer(|composer| {
                composer.with_group(location_key(file!(), line!(), column!()), |composer| {
                    let callback_state = state.clone();
                    composer.set_recompose_callback(move |_composer| child_body(&callback_state));
                    child_body(&state);
                });
            });
        }
    };

    composition.render(9, &mut content).expect("initial render");
    PARENT_RECOMPOSITIONS.with(|calls| assert_eq!(calls.get(), 1));
    CHILD_RECOMPOSITIONS.with(|calls| assert_eq!(calls.get(), 1));

    state.set(1);
    assert!(composition.should_render());
    composition
        .process_invalid_scopes()
        .expect("process invalid scopes succeeds");

    PARENT_RECOMPOSITIONS.with(|calls| assert_eq!(calls.get(), 1));
    CHILD_RECOMPOSITIONS.with(|calls| assert_eq!(calls.get(), 2));
    assert!(!composition.should_render());
}

#[test]
fn composition_local_provider_scopes_values() {
    let local_counter = compositionLocalOf(|| 0);
    let static_label = staticCompositionLocalOf(|| "default");
    let seen: RefCell<Vec<(i32, &'static str)>> = RefCell::new(Vec::new());
    let mut composition = Composition::new(MemoryApplier::new());

    composition
        .render(1, || {
            seen.borrow_mut()
                .push((local_counter.current(), static_label.current()));
            CompositionLocalProvider(
                vec![local_counter.provides(1), static_label.provides("outer")],
                || {
                    seen.borrow_mut()
                        .push((local_counter.current(), static_label.current()));
                    CompositionLocalProvider(vec![local_counter.provides(2)], || {
                        seen.borrow_mut()
                            .push((local_counter.current(), static_label.current()));
                    });
                    seen.borrow_mut()
                        .push((local_counter.current(), static_label.current()));
                },
            );
        })
        .expect("render succeeds");

    assert_eq!(
        seen.into_inner(),
        vec![(0, "default"), (1, "outer"), (2, "outer"), (1, "outer")]
    );
}

#[test]
fn node_error_messages_name_the_node() {
    let mut applier = MemoryApplier::new();
    let id = applier.create(Box::new(TestDummyNode));

    let err = applier
        .with_node(id, |_: &mut TestTextNode| ())
        .expect_err("type mismatch");
    assert!(err.to_string().starts_with(&format!("node {id} type mismatch")));

    let missing = applier
        .with_node(99, |_: &mut TestDummyNode| ())
        .expect_err("missing node");
    assert_eq!(missing, NodeError::Missing { id: 99 });
    assert_eq!(missing.to_string(), "node 99 missing");
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Operation {
    Insert(NodeId),
    Remove(NodeId),
    Move { from: usize, to: usize },
}

#[derive(Default)]
struct RecordingNode {
    children: Vec<NodeId>,
    operations: Vec<Operation>,
}

impl Node for RecordingNode {
    fn insert_child(&mut self, child: NodeId) {
        self.children.push(child);
        self.operations.push(Operation::Insert(child));
    }

    fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|&c| c != child);
        self.operations.push(Operation::Remove(child));
    }

    fn move_child(&mut self, from: usize, to: usize) {
        if from == to || from >= self.children.len() {
            return;
        }
        let child = self.children.remove(from);
        let target = to.min(self.children.len());
        self.children.insert(target, child);
        self.operations.push(Operation::Move { from, to });
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }
}

struct TrackingChild {
    label: String,
    mount_count: usize,
    unmounts: Rc<Cell<usize>>,
}

impl TrackingChild {
    fn new(label: &str, unmounts: &Rc<Cell<usize>>) -> Self {
        Self {
            label: label.to_string(),
            mount_count: 1,
            unmounts: unmounts.clone(),
        }
    }
}

impl Node for TrackingChild {
    fn mount(&mut self) {
        self.mount_count += 1;
    }

    fn unmount(&mut self) {
        self.unmounts.set(self.unmounts.get() + 1);
    }
}

fn apply_child_diff(
    slots: &mut SlotTable,
    applier: &mut MemoryApplier,
    runtime: &Runtime,
    parent_id: NodeId,
    previous: Vec<NodeId>,
    new_children: Vec<NodeId>,
) -> Vec<Operation> {
    let mut composer = Composer::new(slots, applier, runtime.handle(), Some(parent_id));
    composer.push_parent(parent_id);
    composer.replace_parent_frame(previous, new_children);
    composer.pop_parent();
    let mut commands = composer.take_commands();
    drop(composer);
    for command in commands.iter_mut() {
        command(applier).expect("apply diff command");
    }
    applier
        .with_node(parent_id, |node: &mut RecordingNode| {
            std::mem::take(&mut node.operations)
        })
        .expect("read parent operations")
}

#[test]
fn reorder_keyed_children_emits_moves() {
    let mut slots = SlotTable::new();
    let mut applier = MemoryApplier::new();
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let unmounts = Rc::new(Cell::new(0));
    let parent_id = applier.create(Box::new(RecordingNode::default()));
    let child_a = applier.create(Box::new(TrackingChild::new("a", &unmounts)));
    let child_b = applier.create(Box::new(TrackingChild::new("b", &unmounts)));
    let child_c = applier.create(Box::new(TrackingChild::new("c", &unmounts)));

    applier
        .with_node(parent_id, |node: &mut RecordingNode| {
            node.children = vec![child_a, child_b, child_c];
        })
        .expect("seed parent state");
    let initial_len = applier.len();

    let operations = apply_child_diff(
        &mut slots,
        &mut applier,
        &runtime,
        parent_id,
        vec![child_a, child_b, child_c],
        vec![child_c, child_b, child_a],
    );

    assert_eq!(
        operations,
        vec![
            Operation::Move { from: 2, to: 0 },
            Operation::Move { from: 2, to: 1 },
        ]
    );

    let final_children = applier
        .with_node(parent_id, |node: &mut RecordingNode| node.children.clone())
        .expect("read reordered children");
    assert_eq!(final_children, vec![child_c, child_b, child_a]);
    assert_eq!(applier.len(), initial_len);
    assert_eq!(unmounts.get(), 0);

    for (expected_label, child_id) in [("a", child_a), ("b", child_b), ("c", child_c)] {
        applier
            .with_node(child_id, |child: &mut TrackingChild| {
                assert_eq!(child.label, expected_label);
                assert_eq!(child.mount_count, 1);
            })
            .expect("read tracking child state");
    }
}

#[test]
fn insert_and_remove_emit_expected_ops() {
    let mut slots = SlotTable::new();
    let mut applier = MemoryApplier::new();
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let unmounts = Rc::new(Cell::new(0));
    let parent_id = applier.create(Box::new(RecordingNode::default()));
    let child_a = applier.create(Box::new(TrackingChild::new("a", &unmounts)));
    let child_b = applier.create(Box::new(TrackingChild::new("b", &unmounts)));

    applier
        .with_node(parent_id, |node: &mut RecordingNode| {
            node.children = vec![child_a, child_b];
        })
        .expect("seed parent state");
    let initial_len = applier.len();

    let child_c = applier.create(Box::new(TrackingChild::new("c", &unmounts)));
    let insert_ops = apply_child_diff(
        &mut slots,
        &mut applier,
        &runtime,
        parent_id,
        vec![child_a, child_b],
        vec![child_a, child_b, child_c],
    );
    assert_eq!(insert_ops, vec![Operation::Insert(child_c)]);

    let remove_ops = apply_child_diff(
        &mut slots,
        &mut applier,
        &runtime,
        parent_id,
        vec![child_a, child_b, child_c],
        vec![child_a, child_c],
    );
    assert_eq!(remove_ops, vec![Operation::Remove(child_b)]);

    let children = applier
        .with_node(parent_id, |node: &mut RecordingNode| node.children.clone())
        .expect("read children after remove");
    assert_eq!(children, vec![child_a, child_c]);
    assert_eq!(applier.len(), initial_len);
    assert_eq!(unmounts.get(), 1);
    assert!(matches!(
        applier.with_node(child_b, |_: &mut TrackingChild| ()),
        Err(NodeError::Missing { .. })
    ));
}

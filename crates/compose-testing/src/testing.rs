//! Headless harness for composable content: render it, lay it out, find
//! nodes by what they show and drive them like a user would.

use std::cell::RefCell;
use std::rc::Rc;

use compose_core::{location_key, Composition, CompositionLocalProvider, Key, MemoryApplier, NodeError};
use compose_foundation::{apply_key_event, KeyEvent};
use compose_ui::{
    HeadlessRenderer, LayoutBox, LayoutEngine, LayoutNodeKind, LayoutTree, LocalContext,
    PlatformContext, Point, RecordedRenderScene, Rect, Size, ToastHost, ToastRequest,
};

/// Upper bound on recomposition rounds in [`ComposeTestRule::pump_until_idle`].
const MAX_PUMP_ROUNDS: usize = 16;

/// Toast host that keeps every request it receives.
#[derive(Debug, Default)]
pub struct RecordingToastHost {
    requests: RefCell<Vec<ToastRequest>>,
}

impl RecordingToastHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<ToastRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl ToastHost for RecordingToastHost {
    fn post(&self, request: ToastRequest) {
        self.requests.borrow_mut().push(request);
    }
}

pub struct ComposeTestRule {
    composition: Composition<MemoryApplier>,
    root_key: Key,
    content: Option<Box<dyn FnMut()>>,
    toasts: Rc<RecordingToastHost>,
    context: PlatformContext,
    viewport: Size,
    render_count: usize,
}

impl ComposeTestRule {
    pub fn new() -> Self {
        let toasts = Rc::new(RecordingToastHost::new());
        let host: Rc<dyn ToastHost> = toasts.clone();
        Self {
            composition: Composition::new(MemoryApplier::new()),
            root_key: location_key(file!(), line!(), column!()),
            content: None,
            toasts,
            context: PlatformContext::new(host),
            viewport: Size::new(800.0, 600.0),
            render_count: 0,
        }
    }

    /// Viewport used by the node finders.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Installs `content` with a recording toast host in `LocalContext` and
    /// renders it once.
    pub fn set_content(&mut self, content: impl FnMut() + 'static) -> Result<(), NodeError> {
        self.content = Some(Box::new(content));
        self.render()
    }

    /// Renders the installed content again from the top.
    pub fn render(&mut self) -> Result<(), NodeError> {
        let Some(content) = self.content.as_mut() else {
            return Ok(());
        };
        let context = self.context.clone();
        self.composition.render(self.root_key, || {
            CompositionLocalProvider([LocalContext().provides(context.clone())], || content());
        })?;
        self.render_count += 1;
        Ok(())
    }

    /// Number of top-level renders so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Recomposes until no invalidated work is left.
    pub fn pump_until_idle(&mut self) -> Result<(), NodeError> {
        for _ in 0..MAX_PUMP_ROUNDS {
            if !self.composition.should_render() {
                return Ok(());
            }
            self.composition.process_invalid_scopes()?;
            if self.composition.needs_full_render() {
                self.render()?;
            }
        }
        log::warn!("composition still busy after {MAX_PUMP_ROUNDS} rounds");
        Ok(())
    }

    pub fn composition(&mut self) -> &mut Composition<MemoryApplier> {
        &mut self.composition
    }

    pub fn context(&self) -> PlatformContext {
        self.context.clone()
    }

    pub fn layout(&self, viewport: Size) -> Result<LayoutTree, NodeError> {
        let root = self.composition.root().ok_or(NodeError::Missing { id: 0 })?;
        self.composition.applier().compute_layout(root, viewport)
    }

    pub fn render_scene(&self) -> Result<RecordedRenderScene, NodeError> {
        let tree = self.layout(self.viewport)?;
        Ok(HeadlessRenderer::new().render(&tree))
    }

    /// Texts in paint order, text field values included.
    pub fn visible_texts(&self) -> Vec<String> {
        match self.render_scene() {
            Ok(scene) => scene.texts().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn toasts(&self) -> Vec<ToastRequest> {
        self.toasts.requests()
    }

    pub fn on_node_with_text(&self, text: &str) -> NodeHandle {
        self.find(format!("text {text:?}"), |layout| match &layout.node_data.kind {
            LayoutNodeKind::Text { value, .. } => value == text,
            LayoutNodeKind::TextField { value, label, .. } => value == text || label == text,
            _ => false,
        })
    }

    pub fn on_node_with_content_description(&self, description: &str) -> NodeHandle {
        self.find(format!("content description {description:?}"), |layout| {
            matches!(
                &layout.node_data.kind,
                LayoutNodeKind::Image {
                    content_description: Some(found),
                    ..
                } if found == description
            )
        })
    }

    /// First node, in pre-order, whose modifier carries a click handler.
    pub fn on_clickable_node(&self) -> NodeHandle {
        self.find("clickable node".to_string(), |layout| {
            layout.node_data.modifier.click_handler().is_some()
        })
    }

    fn find(&self, description: String, predicate: impl Fn(&LayoutBox) -> bool) -> NodeHandle {
        let path = match self.layout(self.viewport) {
            Ok(tree) => find_path(tree.root(), &predicate).unwrap_or_default(),
            Err(err) => {
                log::debug!("no layout while looking for {description}: {err}");
                Vec::new()
            }
        };
        NodeHandle { description, path }
    }
}

impl Default for ComposeTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Boxes from the root down to the first box matching `predicate`.
fn find_path(layout: &LayoutBox, predicate: &impl Fn(&LayoutBox) -> bool) -> Option<Vec<LayoutBox>> {
    if predicate(layout) {
        return Some(vec![layout.clone()]);
    }
    layout.children.iter().find_map(|child| {
        let mut path = find_path(child, predicate)?;
        path.insert(0, layout.clone());
        Some(path)
    })
}

/// A node found in the last layout. The handle keeps a snapshot, so find
/// the node again after the content changes.
#[derive(Debug)]
pub struct NodeHandle {
    description: String,
    path: Vec<LayoutBox>,
}

impl NodeHandle {
    fn node(&self) -> Option<&LayoutBox> {
        self.path.last()
    }

    pub fn exists(&self) -> bool {
        self.node().is_some()
    }

    pub fn assert_exists(&self) -> &Self {
        assert!(self.exists(), "no node with {}", self.description);
        self
    }

    pub fn assert_does_not_exist(&self) -> &Self {
        assert!(!self.exists(), "unexpected node with {}", self.description);
        self
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.node().map(|layout| layout.rect)
    }

    pub fn layout(&self) -> Option<&LayoutBox> {
        self.node()
    }

    /// Clicks the centre of the node, dispatching to the nearest clickable
    /// node on the way to the root.
    pub fn perform_click(&self) -> &Self {
        let Some(target) = self.node() else {
            panic!("cannot click: no node with {}", self.description);
        };
        let centre = target.rect.center();
        let clickable = self.path.iter().rev().find_map(|layout| {
            layout
                .node_data
                .modifier
                .click_handler()
                .map(|handler| (layout.rect, handler))
        });
        match clickable {
            Some((rect, handler)) => handler(Point::new(centre.x - rect.x, centre.y - rect.y)),
            None => panic!("node with {} is not clickable", self.description),
        }
        self
    }

    /// Types `text` into a text field, one key event per character, as if
    /// the field had focus. The value shown is only updated after the
    /// content is pumped.
    pub fn perform_text_input(&self, text: &str) -> &Self {
        let Some(LayoutNodeKind::TextField {
            value,
            on_value_change,
            ..
        }) = self.node().map(|layout| &layout.node_data.kind)
        else {
            panic!("node with {} is not a text field", self.description);
        };
        let mut current = value.clone();
        for ch in text.chars() {
            if let Some(edited) = apply_key_event(&current, &KeyEvent::character(ch)) {
                on_value_change(edited.clone());
                current = edited;
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;

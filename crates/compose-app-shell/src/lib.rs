//! Drives one composition on behalf of a window: renders content, lays it
//! out, rebuilds the renderer's scene and routes pointer and key input.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

use compose_core::{location_key, Clock, Composition, CompositionLocalProvider, Key, MemoryApplier};
use compose_foundation::{apply_key_event, FocusManager, KeyCode, KeyEvent, PointerEventKind};
use compose_render_common::{HitTestTarget, RenderScene, Renderer, TextInputTarget};
use compose_runtime_std::{StdClock, StdRuntime};
use compose_ui::{
    log_layout_tree, log_render_scene, log_screen_summary, HeadlessRenderer, LayoutEngine,
    LayoutTree, LocalContext, PlatformContext, ToastHost, ToastRequest,
};
use compose_ui_graphics::Size;

type HitTarget<R> = <<R as Renderer>::Scene as RenderScene>::HitTarget;

/// Toasts posted during composition or event handling, waiting for the
/// shell to pick them up.
#[derive(Debug, Default)]
pub struct ShellToastHost {
    pending: RefCell<Vec<ToastRequest>>,
}

impl ShellToastHost {
    fn take(&self) -> Vec<ToastRequest> {
        self.pending.take()
    }
}

impl ToastHost for ShellToastHost {
    fn post(&self, request: ToastRequest) {
        self.pending.borrow_mut().push(request);
    }
}

struct ActiveToast<I> {
    request: ToastRequest,
    shown_at: I,
}

pub struct AppShell<R, C = StdClock>
where
    R: Renderer,
    C: Clock,
{
    runtime: StdRuntime,
    composition: Composition<MemoryApplier>,
    root_key: Key,
    content: Box<dyn FnMut()>,
    context: PlatformContext,
    toast_host: Rc<ShellToastHost>,
    active_toast: Option<ActiveToast<C::Instant>>,
    clock: Arc<C>,
    renderer: R,
    focus: FocusManager,
    pressed: Option<HitTarget<R>>,
    cursor: (f32, f32),
    viewport: (f32, f32),
    buffer_size: (u32, u32),
    last_layout: Option<LayoutTree>,
}

impl<R> AppShell<R, StdClock>
where
    R: Renderer,
    R::Error: Debug,
{
    pub fn new(renderer: R, root_key: Key, content: impl FnMut() + 'static) -> Self {
        Self::with_clock(renderer, root_key, Arc::new(StdClock), content)
    }
}

impl<R, C> AppShell<R, C>
where
    R: Renderer,
    R::Error: Debug,
    C: Clock,
{
    /// Like [`AppShell::new`], measuring toast lifetimes on `clock`.
    pub fn with_clock(
        renderer: R,
        root_key: Key,
        clock: Arc<C>,
        content: impl FnMut() + 'static,
    ) -> Self {
        let runtime = StdRuntime::new();
        let composition = Composition::with_runtime(MemoryApplier::new(), runtime.runtime());
        let toast_host = Rc::new(ShellToastHost::default());
        let host: Rc<dyn ToastHost> = toast_host.clone();
        let mut shell = Self {
            runtime,
            composition,
            root_key,
            content: Box::new(content),
            context: PlatformContext::new(host),
            toast_host,
            active_toast: None,
            clock,
            renderer,
            focus: FocusManager::new(),
            pressed: None,
            cursor: (0.0, 0.0),
            viewport: (800.0, 600.0),
            buffer_size: (800, 600),
            last_layout: None,
        };
        shell.renderer.scene_mut().clear();
        shell.render_content();
        shell.rebuild_scene();
        shell
    }

    /// Logical size the content is laid out in.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.rebuild_scene();
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_buffer_size(&mut self, width: u32, height: u32) {
        self.buffer_size = (width, height);
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        self.buffer_size
    }

    pub fn scene(&self) -> &R::Scene {
        self.renderer.scene()
    }

    pub fn renderer(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn layout(&self) -> Option<&LayoutTree> {
        self.last_layout.as_ref()
    }

    pub fn toast_host(&self) -> Rc<ShellToastHost> {
        Rc::clone(&self.toast_host)
    }

    /// Context handed to the content through `LocalContext`.
    pub fn context(&self) -> &PlatformContext {
        &self.context
    }

    pub fn focused(&self) -> Option<compose_ui::NodeId> {
        self.focus.focused()
    }

    /// Registers a waker invoked whenever the runtime requests a frame.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.runtime.set_frame_waker(waker);
    }

    pub fn should_render(&self) -> bool {
        self.runtime.take_frame_request()
            || self.composition.should_render()
            || self.has_pending_toasts()
            || self.toast_expired()
    }

    pub fn update(&mut self) {
        if self.composition.should_render() {
            if let Err(err) = self.composition.process_invalid_scopes() {
                log::error!("recomposition failed: {err}");
            }
            if self.composition.needs_full_render() {
                self.render_content();
            }
            self.rebuild_scene();
        }
        self.collect_toasts();
    }

    /// The toast to draw on top of the content, until its duration has
    /// passed on the shell clock.
    pub fn active_toast(&self) -> Option<&ToastRequest> {
        let active = self.active_toast.as_ref()?;
        let elapsed = self.clock.elapsed_millis(active.shown_at);
        (elapsed < active.request.duration.millis()).then_some(&active.request)
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        if let Some(hit) = self.renderer.scene().hit_test(x, y) {
            hit.dispatch(PointerEventKind::Move, x, y);
        }
    }

    pub fn pointer_pressed(&mut self) {
        let (x, y) = self.cursor;
        let scene = self.renderer.scene();
        match scene.text_input_at(x, y) {
            Some(input) => self.focus.request_focus(input.node_id()),
            None => self.focus.clear_focus(),
        }
        self.pressed = scene.hit_test(x, y);
        if let Some(hit) = &self.pressed {
            hit.dispatch(PointerEventKind::Down, x, y);
        }
    }

    /// Completes a click when the release lands on the node that was
    /// pressed; otherwise the press is cancelled.
    pub fn pointer_released(&mut self) {
        let (x, y) = self.cursor;
        let Some(pressed) = self.pressed.take() else {
            return;
        };
        let released_on = self.renderer.scene().hit_test(x, y);
        match released_on {
            Some(hit) if hit.node_id() == pressed.node_id() => {
                hit.dispatch(PointerEventKind::Up, x, y);
            }
            _ => pressed.dispatch(PointerEventKind::Cancel, x, y),
        }
        self.collect_toasts();
    }

    /// Edits the focused text field, or handles shell shortcuts when no
    /// field has focus.
    pub fn key_pressed(&mut self, event: KeyEvent) {
        if let Some(focused) = self.focus.focused() {
            if event.code == KeyCode::Escape {
                self.focus.clear_focus();
                return;
            }
            match self.renderer.scene().text_input(focused) {
                Some(input) => {
                    if let Some(edited) = apply_key_event(input.value(), &event) {
                        input.commit(edited);
                    }
                }
                None => self.focus.clear_focus(),
            }
            return;
        }
        if event.code == KeyCode::D && event.modifiers.is_empty() {
            self.log_debug_info();
        }
    }

    pub fn log_debug_info(&self) {
        log::info!("==== current screen state ====");
        match &self.last_layout {
            Some(layout_tree) => {
                log_layout_tree(layout_tree);
                let render_scene = HeadlessRenderer::new().render(layout_tree);
                log_render_scene(&render_scene);
                log_screen_summary(layout_tree, &render_scene);
            }
            None => log::info!("no layout available"),
        }
        if let Some(toast) = self.active_toast() {
            log::info!("active toast: {:?}", toast.text);
        }
    }

    fn render_content(&mut self) {
        let context = self.context.clone();
        let content = &mut self.content;
        let result = self.composition.render(self.root_key, || {
            CompositionLocalProvider([LocalContext().provides(context.clone())], || content());
        });
        if let Err(err) = result {
            log::error!("render failed: {err}");
        }
        self.collect_toasts();
    }

    fn has_pending_toasts(&self) -> bool {
        !self.toast_host.pending.borrow().is_empty()
    }

    fn toast_expired(&self) -> bool {
        self.active_toast.is_some() && self.active_toast().is_none()
    }

    /// Promotes the newest posted toast to the active one and drops an
    /// expired toast.
    fn collect_toasts(&mut self) {
        if self.toast_expired() {
            self.active_toast = None;
        }
        if let Some(request) = self.toast_host.take().pop() {
            log::debug!("showing toast {:?}", request.text);
            self.active_toast = Some(ActiveToast {
                request,
                shown_at: self.clock.now(),
            });
        }
    }

    fn rebuild_scene(&mut self) {
        self.renderer.scene_mut().clear();
        let Some(root) = self.composition.root() else {
            self.last_layout = None;
            return;
        };
        let viewport = Size::new(self.viewport.0, self.viewport.1);
        match self.composition.applier().compute_layout(root, viewport) {
            Ok(layout_tree) => {
                if let Err(err) = self.renderer.rebuild_scene(&layout_tree, viewport) {
                    log::error!("renderer rebuild failed: {err:?}");
                }
                self.last_layout = Some(layout_tree);
            }
            Err(err) => {
                log::error!("failed to compute layout: {err}");
            }
        }
    }
}

pub fn default_root_key() -> Key {
    location_key(file!(), line!(), column!())
}

#![deny(missing_docs)]

//! Opens a desktop window and runs composable content in it with minimal
//! boilerplate.

#[cfg(not(feature = "desktop"))]
compile_error!("compose-app must be built with the `desktop` feature enabled.");

#[cfg(not(feature = "renderer-pixels"))]
compile_error!("compose-app currently requires the `renderer-pixels` feature.");

use std::convert::Infallible;
use std::fmt;
use std::time::{Duration, Instant};

use compose_app_shell::{default_root_key, AppShell};
use compose_platform_desktop_winit::DesktopWinitPlatform;
use compose_render_pixels::{draw_scene, draw_toast, install_font, PixelsRenderer};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::error::OsError;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::WindowBuilder;

pub use compose_render_pixels::{FontError, FontSource};

/// How often the loop wakes up while a toast is on screen.
const TOAST_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Failures while setting up the window and its pixel surface.
#[derive(Debug)]
pub enum AppError {
    /// The window could not be created.
    Window(OsError),
    /// The pixel surface could not be created.
    Surface(pixels::Error),
    /// The configured font could not be loaded.
    Font(FontError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Window(err) => write!(f, "failed to create window: {err}"),
            AppError::Surface(err) => write!(f, "failed to create pixel surface: {err}"),
            AppError::Font(err) => write!(f, "failed to load font: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Window(err) => Some(err),
            AppError::Surface(err) => Some(err),
            AppError::Font(err) => Some(err),
        }
    }
}

impl From<OsError> for AppError {
    fn from(err: OsError) -> Self {
        AppError::Window(err)
    }
}

impl From<pixels::Error> for AppError {
    fn from(err: pixels::Error) -> Self {
        AppError::Surface(err)
    }
}

impl From<FontError> for AppError {
    fn from(err: FontError) -> Self {
        AppError::Font(err)
    }
}

/// Builder used to configure and launch an application.
#[derive(Debug, Clone, Default)]
pub struct ComposeAppBuilder {
    options: ComposeAppOptions,
}

impl ComposeAppBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title for the application.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Sets the initial logical size of the application window.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options = self.options.with_size(width, height);
        self
    }

    /// Sets where text glyphs are loaded from.
    pub fn font(mut self, source: FontSource) -> Self {
        self.options = self.options.with_font(source);
        self
    }

    /// Runs the application using the configured options and provided content.
    pub fn run(self, content: impl FnMut() + 'static) -> ! {
        run_app(self.options, content)
    }
}

/// Options used to configure the application window.
#[derive(Debug, Clone)]
pub struct ComposeAppOptions {
    title: String,
    initial_size: (u32, u32),
    font: Option<FontSource>,
}

impl Default for ComposeAppOptions {
    fn default() -> Self {
        Self {
            title: "MyCompose".to_string(),
            initial_size: (800, 600),
            font: None,
        }
    }
}

impl ComposeAppOptions {
    /// Sets the title used for the application window.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.initial_size = (width, height);
        self
    }

    /// Sets where text glyphs are loaded from. Without one, the
    /// `MYCOMPOSE_FONT` variable and common system fonts are tried.
    pub fn with_font(mut self, source: FontSource) -> Self {
        self.font = Some(source);
        self
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Initial window size in logical pixels.
    pub fn initial_size(&self) -> (u32, u32) {
        self.initial_size
    }
}

/// Launches an application using the default options.
pub fn compose_app(content: impl FnMut() + 'static) -> ! {
    ComposeAppBuilder::default().run(content)
}

/// Launches an application using the provided options.
pub fn compose_app_with_options(options: ComposeAppOptions, content: impl FnMut() + 'static) -> ! {
    run_app(options, content)
}

/// Alias with Kotlin-inspired casing for use in DSL-like code.
#[allow(non_snake_case)]
pub fn composeApp(content: impl FnMut() + 'static) -> ! {
    compose_app(content)
}

/// Macro helper that allows calling [`compose_app`] using a block without a closure wrapper.
#[macro_export]
macro_rules! composeApp {
    (options: $options:expr, { $($body:tt)* }) => {
        $crate::compose_app_with_options($options, || { $($body)* })
    };
    (options: $options:expr, $body:block) => {
        $crate::compose_app_with_options($options, || $body)
    };
    ({ $($body:tt)* }) => {
        $crate::compose_app(|| { $($body)* })
    };
    ($body:block) => {
        $crate::compose_app(|| $body)
    };
    ($($body:tt)*) => {
        $crate::compose_app(|| { $($body)* })
    };
}

fn run_app(options: ComposeAppOptions, content: impl FnMut() + 'static) -> ! {
    match run_pixels_app(&options, content) {
        Ok(never) => match never {},
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}

fn logical_viewport(size: PhysicalSize<u32>, scale_factor: f64) -> (f32, f32) {
    (
        (size.width as f64 / scale_factor) as f32,
        (size.height as f64 / scale_factor) as f32,
    )
}

/// Resizes the pixel surface and lays the content out again. Returns
/// `false` when the surface could not follow.
fn resize_surface(
    app: &mut AppShell<PixelsRenderer>,
    pixels: &mut Pixels,
    new_size: PhysicalSize<u32>,
    scale_factor: f64,
) -> bool {
    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
        log::error!("failed to resize surface: {err}");
        return false;
    }
    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
        log::error!("failed to resize buffer: {err}");
        return false;
    }
    app.renderer().set_scale_factor(scale_factor as f32);
    app.set_buffer_size(new_size.width, new_size.height);
    let (width, height) = logical_viewport(new_size, scale_factor);
    app.set_viewport(width, height);
    true
}

fn run_pixels_app(
    options: &ComposeAppOptions,
    content: impl FnMut() + 'static,
) -> Result<Infallible, AppError> {
    if let Some(source) = &options.font {
        install_font(source)?;
    }

    let event_loop = EventLoopBuilder::<()>::with_user_event().build();
    let frame_proxy = event_loop.create_proxy();

    let (initial_width, initial_height) = options.initial_size;
    let window = WindowBuilder::new()
        .with_title(options.title.clone())
        .with_inner_size(LogicalSize::new(initial_width as f64, initial_height as f64))
        .build(&event_loop)?;

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let mut platform = DesktopWinitPlatform::default();
    platform.set_scale_factor(window.scale_factor());
    let mut renderer = PixelsRenderer::new();
    renderer.set_scale_factor(platform.scale_factor() as f32);
    let mut app = AppShell::new(renderer, default_root_key(), content);

    app.set_frame_waker({
        let proxy = frame_proxy.clone();
        move || {
            let _ = proxy.send_event(());
        }
    });

    app.set_buffer_size(size.width, size.height);
    let (width, height) = logical_viewport(size, platform.scale_factor());
    app.set_viewport(width, height);
    log::info!("window {}x{} at scale {}", size.width, size.height, platform.scale_factor());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = if app.active_toast().is_some() {
            ControlFlow::WaitUntil(Instant::now() + TOAST_POLL_INTERVAL)
        } else {
            ControlFlow::Wait
        };
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    if !resize_surface(&mut app, &mut pixels, new_size, platform.scale_factor()) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::ScaleFactorChanged {
                    scale_factor,
                    new_inner_size,
                    ..
                } => {
                    platform.set_scale_factor(scale_factor);
                    if !resize_surface(&mut app, &mut pixels, *new_inner_size, platform.scale_factor()) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let logical = platform.pointer_position(position);
                    app.set_cursor(logical.x, logical.y);
                    if app.should_render() {
                        app.update();
                        window.request_redraw();
                    }
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => {
                    match state {
                        ElementState::Pressed => app.pointer_pressed(),
                        ElementState::Released => app.pointer_released(),
                    }
                    window.request_redraw();
                }
                WindowEvent::ModifiersChanged(state) => platform.set_modifiers(state),
                WindowEvent::KeyboardInput { input, .. } => {
                    if input.state != ElementState::Pressed {
                        return;
                    }
                    if let Some(event) = input.virtual_keycode.and_then(|key| platform.key_event(key)) {
                        app.key_pressed(event);
                        window.request_redraw();
                    }
                }
                WindowEvent::ReceivedCharacter(ch) => {
                    if let Some(event) = platform.character_event(ch) {
                        app.key_pressed(event);
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared | Event::RedrawEventsCleared | Event::UserEvent(()) => {
                if app.should_render() {
                    window.request_redraw();
                    *control_flow = ControlFlow::Poll;
                }
            }
            Event::RedrawRequested(_) => {
                app.update();

                let (buffer_width, buffer_height) = app.buffer_size();
                let frame = pixels.frame_mut();
                draw_scene(frame, buffer_width, buffer_height, app.scene());
                if let Some(toast) = app.active_toast() {
                    draw_toast(frame, buffer_width, buffer_height, &toast.text);
                }
                if let Err(err) = pixels.render() {
                    log::error!("pixels render failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_options() {
        let builder = ComposeAppBuilder::new()
            .title("Greeting")
            .size(360, 640)
            .font(FontSource::Path("/tmp/font.ttf".into()));
        assert_eq!(builder.options.title(), "Greeting");
        assert_eq!(builder.options.initial_size(), (360, 640));
        assert_eq!(
            builder.options.font,
            Some(FontSource::Path("/tmp/font.ttf".into()))
        );
    }

    #[test]
    fn viewport_is_measured_in_logical_pixels() {
        assert_eq!(logical_viewport(PhysicalSize::new(1600, 1200), 2.0), (800.0, 600.0));
    }

    #[test]
    fn app_error_keeps_its_source() {
        let err = AppError::from(FontError::NotFound);
        assert!(err.to_string().starts_with("failed to load font"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

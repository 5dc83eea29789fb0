//! winit window shim driving a [`ScopeApp`].

use super::{ScopeApp, ScopeError};
use crate::config::ScopeConfig;
use crate::gpu::{RenderConfig, SurfaceRenderer};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Window and event-loop glue around the application context.
pub struct ScopeWindow {
    app: ScopeApp<SurfaceRenderer>,
    window: Option<Arc<Window>>,
    last_frame: Option<Instant>,
    error: Option<ScopeError>,
}

impl ScopeWindow {
    pub fn new(app: ScopeApp<SurfaceRenderer>) -> Self {
        Self {
            app,
            window: None,
            last_frame: None,
            error: None,
        }
    }

    /// Error that ended the event loop, if any.
    pub fn take_error(&mut self) -> Option<ScopeError> {
        self.error.take()
    }

    fn load(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ScopeError> {
        let config = self.app.config();
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height));
        let render_config = RenderConfig::from(config);

        let window = Arc::new(event_loop.create_window(attributes)?);
        let renderer = pollster::block_on(SurfaceRenderer::new(window.clone(), render_config))?;

        self.app.on_load(renderer);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ScopeError) {
        log::error!("{error}");
        self.error = Some(error);
        self.app.request_close();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);

        self.app.on_update(elapsed);
        if let Err(error) = self.app.on_render() {
            self.fail(event_loop, error.into());
        }
    }
}

impl ApplicationHandler for ScopeWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.load(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                if self.app.request_close() {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.app.on_resize(width, height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if self.app.on_key_down(&logical_key) {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.app.is_running() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.on_close();
    }
}

/// Generate the signal, open the window and run until it is closed.
pub fn run(config: ScopeConfig) -> Result<(), ScopeError> {
    let app = ScopeApp::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut scope = ScopeWindow::new(app);
    event_loop.run_app(&mut scope)?;

    match scope.take_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

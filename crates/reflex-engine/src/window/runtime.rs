use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::renderer::Renderer;

use super::{App, AppControl, NativeProvider, NativeRenderer};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "reflex".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

impl RuntimeConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }
}

/// Entry point: one window, one renderer, redrawn continuously.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState { config, app, renderer: None, exit_requested: false };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A: App> {
    config: RuntimeConfig,
    app: A,
    renderer: Option<NativeRenderer>,
    exit_requested: bool,
}

impl<A: App> AppState<A> {
    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut provider = NativeProvider::new(event_loop, &self.config);
        let mut renderer = Renderer::new(&mut provider, self.app.renderer_config())
            .context("failed to build renderer")?;

        self.app.init(&mut renderer).context("app init failed")?;
        renderer.attach_surface();
        renderer.surface().window().request_redraw();

        self.renderer = Some(renderer);
        Ok(())
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        if let Some(renderer) = self.renderer.take() {
            drop(renderer.dispose());
        }
        event_loop.exit();
    }

    fn frame(&mut self) -> AppControl {
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        if let Err(e) = renderer.update() {
            log::warn!("frame uniforms not updated: {e}");
        }
        let control = self.app.on_frame(renderer);
        renderer.render();
        renderer.present();
        control
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        if let Err(e) = self.create_renderer(event_loop) {
            log::error!("{e:#}");
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Time uniforms animate, so redraw continuously.
        if let Some(renderer) = &self.renderer {
            renderer.surface().window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.set_dimensions(size.width as f32, size.height as f32);
                    renderer.surface().window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if self.frame() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}

use winit::event::WindowEvent;

use crate::renderer::RendererConfig;

use super::NativeRenderer;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`Runtime`](super::Runtime).
pub trait App {
    /// Program and surface options for the window's renderer.
    fn renderer_config(&self) -> RendererConfig;

    /// Called once after the renderer is built, before the first frame.
    fn init(&mut self, renderer: &mut NativeRenderer) -> anyhow::Result<()> {
        let _ = renderer;
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame between `update()` and `render()`.
    fn on_frame(&mut self, renderer: &mut NativeRenderer) -> AppControl;
}

use std::time::Instant;

use log::trace;

use crate::device::{BufferTarget, CLEAR_ALL, Device, Surface, Topology};
use crate::error::Result;

use super::{DELTA_UNIFORM, DIMENSIONS_UNIFORM, Renderer, TIME_UNIFORM};

// ── surface size and clear state ─────────────────────────────────────────────

impl<D: Device, S: Surface> Renderer<D, S> {
    /// Resizes surface and drawing buffer, resets the viewport to cover it,
    /// and clears to opaque black.
    pub fn set_dimensions(&mut self, width: f32, height: f32) {
        let w = width.round().max(0.0) as u32;
        let h = height.round().max(0.0) as u32;

        self.surface.set_size(w, h);
        self.device.resize(w, h);
        self.device.viewport(0, 0, w as i32, h as i32);
        self.device.clear_color(0.0, 0.0, 0.0, 1.0);
        self.device.clear(glow::COLOR_BUFFER_BIT);
    }

    pub fn dimensions(&self) -> [i32; 2] {
        let (w, h) = self.surface.size();
        [w as i32, h as i32]
    }

    pub fn width(&self) -> i32 {
        self.dimensions()[0]
    }

    pub fn height(&self) -> i32 {
        self.dimensions()[1]
    }

    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.device.viewport(x, y, width, height);
    }

    /// Live viewport as `[x, y, width, height]`.
    pub fn viewport(&self) -> [i32; 4] {
        self.device.viewport_rect()
    }

    /// Sets the clear color from 0–255 channels.
    ///
    /// Alpha defaults to opaque when omitted.
    pub fn set_background_color(&mut self, r: u8, g: u8, b: u8, a: Option<u8>) {
        let a = match a {
            None => 1.0,
            Some(a) => f32::from(a) / 255.0,
        };
        self.device.clear_color(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        );
    }

    /// Live clear color, channels in 0..=1.
    pub fn background_color(&self) -> [f32; 4] {
        self.device.clear_color_value()
    }
}

// ── frame ────────────────────────────────────────────────────────────────────

impl<D: Device, S: Surface> Renderer<D, S> {
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Seconds between the last two `update()` calls.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Seconds from construction to the last `update()`.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Samples the clock and pushes the time and dimensions uniforms.
    pub fn update(&mut self) -> Result<()> {
        self.update_at(Instant::now())
    }

    /// [`Renderer::update`] with an explicit sample time.
    pub fn update_at(&mut self, now: Instant) -> Result<()> {
        let ft = self.clock.tick_at(now);
        self.delta_time = ft.delta;
        self.elapsed_time = ft.elapsed;

        self.set_uniform(DELTA_UNIFORM, ft.delta)?;
        self.set_uniform(TIME_UNIFORM, ft.elapsed)?;
        let dims = self.dimensions().map(|v| v as f32);
        self.set_uniform(DIMENSIONS_UNIFORM, dims)?;
        Ok(())
    }

    /// Clears every buffer and draws the program once.
    ///
    /// Indexed when an element buffer is set, otherwise `element_count`
    /// vertices from slot 0.
    pub fn render(&mut self) {
        self.device.use_program(Some(self.program));
        self.device.clear(CLEAR_ALL);

        match self.buffers.element_array() {
            Some(elements) => {
                self.device.bind_buffer(BufferTarget::ElementArray, Some(elements.buffer));
                self.device.draw_elements(
                    self.topology,
                    elements.len as i32,
                    elements.format,
                    elements.byte_offset() as i32,
                );
                trace!("[{}] drew {} indices", self.id, elements.len);
            }
            None => {
                self.device.draw_arrays(self.topology, 0, self.element_count as i32);
                trace!("[{}] drew {} vertices", self.id, self.element_count);
            }
        }
    }

    /// Shows the drawn frame (buffer swap on native hosts).
    pub fn present(&self) {
        self.device.present();
    }
}

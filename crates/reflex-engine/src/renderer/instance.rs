use std::collections::HashMap;

use log::{debug, info, warn};

use crate::buffer::BufferStore;
use crate::device::{ContextProvider, Device, Surface, Topology, acquire_context};
use crate::error::Result;
use crate::program::{
    AttributeDescriptor, UniformDescriptor, build_program, reflect_attributes, reflect_uniforms,
};
use crate::time::FrameClock;

use super::RendererConfig;

/// Buffer name of the full-viewport quad provisioned in raster mode.
pub const RASTER_BUFFER: &str = "vertices";
/// Attribute the raster quad feeds.
pub const RASTER_ATTRIBUTE: &str = "a_VertPos";
/// Two triangles covering clip space, as x/y pairs.
pub const RASTER_QUAD: [f32; 12] = [
    -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, //
    -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
];

/// Seconds since the previous `update()`.
pub const DELTA_UNIFORM: &str = "u_Delta";
/// Seconds since construction.
pub const TIME_UNIFORM: &str = "u_Time";
/// Surface size as a `vec2`.
pub const DIMENSIONS_UNIFORM: &str = "u_Dimensions";

/// One shader program on one device context, plus the buffers feeding it.
///
/// All operations run synchronously against the device and re-assert the
/// state they need (current program, bound buffers) rather than assuming it
/// persists. Several renderers may share a context as long as each one's
/// calls are not interleaved mid-operation.
pub struct Renderer<D: Device, S: Surface> {
    pub(super) device: D,
    pub(super) surface: S,
    pub(super) id: String,
    pub(super) program: D::Program,
    pub(super) attributes: HashMap<String, AttributeDescriptor>,
    pub(super) uniforms: HashMap<String, UniformDescriptor<D::UniformLocation>>,
    pub(super) buffers: BufferStore<D::Buffer>,
    /// Vertex count for non-indexed draws; written only by attribute binding.
    pub(super) element_count: usize,
    pub(super) topology: Topology,
    pub(super) clock: FrameClock,
    pub(super) delta_time: f32,
    pub(super) elapsed_time: f32,
}

impl<D: Device, S: Surface> Renderer<D, S> {
    /// Builds a renderer on a surface created by `provider`.
    ///
    /// The new surface is not attached; call [`Renderer::attach_surface`].
    pub fn new<P>(provider: &mut P, config: RendererConfig) -> Result<Self>
    where
        P: ContextProvider<Device = D, Surface = S>,
    {
        let surface = provider.create_surface()?;
        let fallback = provider.default_surface_size();
        Self::build(provider, surface, fallback, config)
    }

    /// Builds a renderer on a caller-supplied surface.
    pub fn with_surface<P>(provider: &mut P, surface: S, config: RendererConfig) -> Result<Self>
    where
        P: ContextProvider<Device = D, Surface = S>,
    {
        let fallback = surface.size();
        Self::build(provider, surface, fallback, config)
    }

    fn build<P>(
        provider: &mut P,
        mut surface: S,
        fallback: (u32, u32),
        config: RendererConfig,
    ) -> Result<Self>
    where
        P: ContextProvider<Device = D, Surface = S>,
    {
        let (width, height) = config.size().unwrap_or(fallback);
        let device = acquire_context(provider, &mut surface, config.version, &config.attributes)?;

        let program = build_program(
            &device,
            config.vertex_source(),
            config.fragment_source(),
            &config.attribute_bindings,
        )?;

        let attributes = reflect_attributes(&device, program);
        let uniforms = reflect_uniforms(&device, program);
        debug!(
            "[{}] reflected {} attributes, {} uniforms",
            config.id,
            attributes.len(),
            uniforms.len()
        );
        device.use_program(Some(program));

        let mut renderer = Self {
            device,
            surface,
            id: config.id,
            program,
            attributes,
            uniforms,
            buffers: BufferStore::new(),
            element_count: 0,
            topology: Topology::default(),
            clock: FrameClock::new(),
            delta_time: 0.0,
            elapsed_time: 0.0,
        };

        renderer.set_dimensions(width as f32, height as f32);

        if config.raster
            && let Err(e) = renderer.provision_raster()
        {
            warn!("[{}] raster setup failed: {e}", renderer.id);
            renderer.release();
            return Err(e);
        }

        renderer.clock = FrameClock::new();
        info!(
            "[{}] renderer ready on {} ({}x{})",
            renderer.id,
            renderer.device.version(),
            renderer.width(),
            renderer.height()
        );
        Ok(renderer)
    }

    fn provision_raster(&mut self) -> Result<()> {
        self.set_vertex_buffer(RASTER_BUFFER, &RASTER_QUAD, Default::default())?;
        self.set_vertex_buffer_attrib(
            RASTER_BUFFER,
            RASTER_ATTRIBUTE,
            crate::buffer::AttribBinding::new(2).normalized(true),
        );
        let dims = self.dimensions().map(|v| v as f32);
        self.set_uniform(DIMENSIONS_UNIFORM, dims)?;
        self.device.clear_depth(1.0);
        Ok(())
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Makes the surface visible (attach to the document, show the window).
    pub fn attach_surface(&mut self) {
        self.surface.attach();
    }

    /// Releases the program and every buffer, then hands the surface back.
    ///
    /// Dropping a renderer without calling this leaves those objects to the
    /// context's own teardown.
    pub fn dispose(mut self) -> S {
        self.release();
        debug!("[{}] disposed", self.id);
        self.surface
    }

    fn release(&mut self) {
        self.buffers.release_all(&self.device);
        self.device.use_program(None);
        self.device.delete_program(self.program);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn program(&self) -> D::Program {
        self.program
    }

    /// Current non-indexed draw count (last attribute binding wins).
    pub fn element_count(&self) -> usize {
        self.element_count
    }
}

#[cfg(test)]
mod tests {
    use crate::device::BufferUsage;
    use crate::headless::HeadlessProvider;
    use crate::renderer::{Renderer, RendererConfig};

    #[test]
    fn release_frees_program_and_buffers() {
        let mut provider = HeadlessProvider::new();
        let mut r = Renderer::new(&mut provider, RendererConfig::new().with_raster(true)).unwrap();
        r.set_element_array(&[0u16, 1, 2], BufferUsage::Static).unwrap();
        assert_eq!(r.device().live_program_count(), 1);
        assert_eq!(r.device().live_buffer_count(), 2);

        r.release();
        assert_eq!(r.device().live_program_count(), 0);
        assert_eq!(r.device().live_buffer_count(), 0);
        assert_eq!(r.device().live_shader_count(), 0);
        assert_eq!(r.device().current_program(), None);
    }

    #[test]
    fn config_size_overrides_provider_default() {
        let mut provider = HeadlessProvider::new().with_default_size(10, 10);
        let r = Renderer::new(&mut provider, RendererConfig::new().with_size(40, 20)).unwrap();
        assert_eq!(r.dimensions(), [40, 20]);

        let r = Renderer::new(&mut provider, RendererConfig::new().with_size(40, 0)).unwrap();
        assert_eq!(r.dimensions(), [10, 10]);
    }

    #[test]
    fn build_leaves_program_current_and_clock_fresh() {
        let mut provider = HeadlessProvider::new();
        let r = Renderer::new(&mut provider, RendererConfig::new().with_id("main")).unwrap();
        assert_eq!(r.id(), "main");
        assert_eq!(r.device().current_program(), Some(r.program()));
        assert_eq!(r.delta_time(), 0.0);
        assert_eq!(r.elapsed_time(), 0.0);
    }
}

use crate::device::{ContextAttributes, ContextVersion};

/// Dialect of the built-in shader sources.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum GlslVersion {
    /// GLSL ES 1.00 (`#version 100`), accepted by every context.
    #[default]
    Es100,
    /// GLSL ES 3.00 (`#version 300 es`), version 2 contexts only.
    Es300,
}

impl GlslVersion {
    pub fn default_vertex_source(self) -> &'static str {
        match self {
            Self::Es100 => include_str!("shaders/raster.100.vert"),
            Self::Es300 => include_str!("shaders/raster.300.vert"),
        }
    }

    pub fn default_fragment_source(self) -> &'static str {
        match self {
            Self::Es100 => include_str!("shaders/raster.100.frag"),
            Self::Es300 => include_str!("shaders/raster.300.frag"),
        }
    }
}

/// Renderer construction options.
///
/// The surface is not part of the config; pass one to
/// `Renderer::with_surface` or let `Renderer::new` ask the provider.
#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    /// `None` tries version 2, then version 1.
    pub version: Option<ContextVersion>,
    /// Opaque label, carried for logging.
    pub id: String,
    /// Initial surface size; used only when both are non-zero.
    pub width: u32,
    pub height: u32,
    /// Dialect of the default sources when `vertex`/`fragment` are unset.
    pub glsl_version: GlslVersion,
    pub vertex: Option<String>,
    pub fragment: Option<String>,
    /// Provision a full-viewport quad and the dimensions uniform.
    pub raster: bool,
    /// Attribute name to slot, applied before linking.
    pub attribute_bindings: Vec<(String, u32)>,
    pub attributes: ContextAttributes,
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: ContextVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_glsl_version(mut self, glsl: GlslVersion) -> Self {
        self.glsl_version = glsl;
        self
    }

    pub fn with_vertex(mut self, source: impl Into<String>) -> Self {
        self.vertex = Some(source.into());
        self
    }

    pub fn with_fragment(mut self, source: impl Into<String>) -> Self {
        self.fragment = Some(source.into());
        self
    }

    pub fn with_raster(mut self, raster: bool) -> Self {
        self.raster = raster;
        self
    }

    pub fn with_attribute_binding(mut self, name: impl Into<String>, slot: u32) -> Self {
        self.attribute_bindings.push((name.into(), slot));
        self
    }

    pub fn with_attributes(mut self, attributes: ContextAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Explicit size, when both dimensions are given.
    pub(crate) fn size(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }

    pub(crate) fn vertex_source(&self) -> &str {
        self.vertex.as_deref().unwrap_or_else(|| self.glsl_version.default_vertex_source())
    }

    pub(crate) fn fragment_source(&self) -> &str {
        self.fragment.as_deref().unwrap_or_else(|| self.glsl_version.default_fragment_source())
    }
}

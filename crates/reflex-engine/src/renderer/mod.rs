//! The renderer: one program plus the buffers and uniforms that feed it.
//!
//! This module is responsible for:
//! - construction (context acquisition, program build, reflection, raster setup)
//! - named vertex buffers, the element buffer, and attribute binding
//! - uniform upload and readback by name
//! - per-frame time uniforms and the draw call
//!
//! Unknown attribute, uniform, and buffer names never fail: mutators do
//! nothing and queries return `None`.

mod buffers;
mod config;
mod frame;
mod instance;
mod uniforms;

pub use config::{GlslVersion, RendererConfig};
pub use instance::{
    DELTA_UNIFORM, DIMENSIONS_UNIFORM, RASTER_ATTRIBUTE, RASTER_BUFFER, RASTER_QUAD, Renderer,
    TIME_UNIFORM,
};

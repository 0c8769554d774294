//! Graphics device seam and context acquisition.
//!
//! This module is responsible for:
//! - the `Device` trait the renderer drives (a stateful GL-style context)
//! - capability flags, API versions, and the identifier probe order
//! - the `glow`-backed device used on native hosts

mod api;
mod context;
mod gl;
mod surface;

pub use api::{
    ActiveVariable, BufferTarget, BufferUsage, CLEAR_ALL, Device, ShaderStage, Topology,
    VertexAttribLayout, VertexAttribState,
};
pub use context::{
    ContextAttributes, ContextProvider, ContextVersion, WEBGL1_IDENTIFIERS, WEBGL2_IDENTIFIERS,
    acquire_context,
};
pub use gl::{GlowDevice, Presenter};
pub use surface::Surface;

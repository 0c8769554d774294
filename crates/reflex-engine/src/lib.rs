//! Reflex engine crate.
//!
//! A renderer built around a single linked shader program: attributes and
//! uniforms are discovered by reflection after link and then driven by name.
//! The GL context sits behind the `Device` trait, with a `glow` device for
//! native windows and a headless software device for tests and tooling.

pub mod buffer;
pub mod device;
pub mod error;
pub mod headless;
pub mod program;
pub mod renderer;
pub mod time;
pub mod uniform;
pub mod window;

pub mod logging;

pub use buffer::{AttribBinding, BufferSource, IndexSource};
pub use device::{BufferUsage, ContextAttributes, ContextVersion, Topology};
pub use error::{RenderError, Result};
pub use renderer::{GlslVersion, Renderer, RendererConfig};
pub use uniform::UniformValue;

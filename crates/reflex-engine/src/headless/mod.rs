//! In-process software device.
//!
//! This module is responsible for:
//! - emulating the GL object model (shaders, programs, buffers, attribute
//!   slots, uniform storage) with observable state
//! - a declaration-level GLSL scanner standing in for a driver compiler
//! - a provider and surface that need no window or GPU

mod device;
mod glsl;
mod provider;

pub use device::{
    BufferId, Command, Framebuffer, HeadlessDevice, HeadlessUniformLocation, MAX_VERTEX_ATTRIBS,
    ProgramId, ShaderId,
};
pub use provider::{HeadlessProvider, HeadlessSurface};

//! Vertex and element buffers.
//!
//! This module is responsible for:
//! - buffer sources (typed data or a reserved size)
//! - the per-renderer store of named vertex buffers and the element buffer
//! - binding a vertex buffer to a reflected attribute

mod binding;
mod record;
mod source;
mod store;

pub use binding::AttribBinding;
pub use record::{AttribLink, ElementBuffer, VertexBuffer};
pub use source::{BufferSource, INDEX_BYTES, IndexSource, RESERVED_SCALAR_BYTES};
pub use store::BufferStore;

use crate::device::BufferUsage;

/// How an attribute slot was last bound to a vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttribLink {
    pub location: u32,
    pub components: u32,
    pub format: u32,
    pub normalized: bool,
    /// Bytes.
    pub stride: i32,
    /// Bytes.
    pub offset: i32,
    pub element_count: usize,
}

/// A named vertex buffer owned by a renderer.
#[derive(Debug, Clone)]
pub struct VertexBuffer<B> {
    pub buffer: B,
    /// Scalar count.
    pub len: usize,
    pub bytes_per_scalar: usize,
    pub usage: BufferUsage,
    /// Attribute (by name) this buffer was last bound to.
    pub attribute: Option<(String, AttribLink)>,
}

/// The renderer's single index buffer.
#[derive(Debug, Clone)]
pub struct ElementBuffer<B> {
    pub buffer: B,
    /// Index count.
    pub len: usize,
    pub format: u32,
    /// Index offset into the buffer.
    pub offset: usize,
    pub usage: BufferUsage,
}

impl<B> ElementBuffer<B> {
    pub fn bytes_per_index(&self) -> usize {
        super::INDEX_BYTES
    }

    /// Byte offset handed to `draw_elements`.
    pub fn byte_offset(&self) -> usize {
        self.offset * self.bytes_per_index()
    }
}

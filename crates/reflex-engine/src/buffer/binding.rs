/// Parameters for binding a vertex buffer to an attribute.
///
/// `stride` and `offset` count scalars, not bytes. A `components` of `0`
/// falls back to the default of 3.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttribBinding {
    pub components: u32,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
}

impl Default for AttribBinding {
    fn default() -> Self {
        Self {
            components: Self::DEFAULT_COMPONENTS,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

impl AttribBinding {
    pub const DEFAULT_COMPONENTS: u32 = 3;

    pub fn new(components: u32) -> Self {
        Self { components, ..Self::default() }
    }

    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub fn stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Component count with the zero fallback applied.
    pub fn effective_components(&self) -> u32 {
        if self.components == 0 { Self::DEFAULT_COMPONENTS } else { self.components }
    }

    /// Vertices a buffer of `total` scalars holds under this layout.
    pub fn element_count(&self, total: usize) -> usize {
        let comps = self.effective_components();
        let step = if self.stride > comps { self.stride } else { comps };
        total / step as usize
    }
}

use std::fmt;

use crate::program::DataKind;

use super::{ContextAttributes, ContextVersion};

/// Pipeline phase a shader stage compiles for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    #[inline]
    pub const fn gl(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Buffer binding point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    #[inline]
    pub const fn gl(self) -> u32 {
        match self {
            Self::Array => glow::ARRAY_BUFFER,
            Self::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Advisory update/draw frequency for a buffer's storage.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    /// Defined once, drawn often.
    #[default]
    Static,
    /// Redefined often, drawn often.
    Dynamic,
    /// Defined once, drawn a few times.
    Stream,
}

impl BufferUsage {
    #[inline]
    pub const fn gl(self) -> u32 {
        match self {
            Self::Static => glow::STATIC_DRAW,
            Self::Dynamic => glow::DYNAMIC_DRAW,
            Self::Stream => glow::STREAM_DRAW,
        }
    }
}

/// Primitive topology used by draw calls.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Topology {
    #[inline]
    pub const fn gl(self) -> u32 {
        match self {
            Self::Points => glow::POINTS,
            Self::Lines => glow::LINES,
            Self::LineLoop => glow::LINE_LOOP,
            Self::LineStrip => glow::LINE_STRIP,
            Self::Triangles => glow::TRIANGLES,
            Self::TriangleStrip => glow::TRIANGLE_STRIP,
            Self::TriangleFan => glow::TRIANGLE_FAN,
        }
    }
}

/// Color, depth, and stencil clear bits together.
pub const CLEAR_ALL: u32 = glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT;

/// One entry of a program's active attribute or uniform list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    pub name: String,
    pub kind: DataKind,
    pub size: i32,
}

/// Layout installed on an attribute slot by `vertex_attrib_pointer`.
///
/// `stride` and `offset` are in bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribLayout {
    pub components: i32,
    pub format: u32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

impl Default for VertexAttribLayout {
    fn default() -> Self {
        Self {
            components: 4,
            format: glow::FLOAT,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

/// Live state of an attribute slot as reported by the device.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexAttribState {
    pub enabled: bool,
    pub components: i32,
    pub format: u32,
    pub normalized: bool,
    pub stride: i32,
    /// Value used when the array is disabled.
    pub current: [f32; 4],
}

/// The slice of a GL-style device the renderer drives.
///
/// The device is a single stateful resource: current program and bound
/// buffers are global to it, so callers re-bind what they need before each
/// operation. Methods take `&self`; implementations keep their state behind
/// the context they wrap.
pub trait Device {
    type Shader: Copy + Eq + fmt::Debug;
    type Program: Copy + Eq + fmt::Debug;
    type Buffer: Copy + Eq + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    /// API version the context was created for.
    fn version(&self) -> ContextVersion;

    /// Capability flags the context was requested with.
    fn attributes(&self) -> &ContextAttributes;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    // ── reflection ────────────────────────────────────────────────────────

    fn active_attribute_count(&self, program: Self::Program) -> u32;
    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveVariable>;
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn active_uniform_count(&self, program: Self::Program) -> u32;
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveVariable>;
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    /// Allocates `size` zeroed bytes for the buffer bound to `target`.
    fn buffer_data_size(&self, target: BufferTarget, size: usize, usage: BufferUsage);
    fn delete_buffer(&self, buffer: Self::Buffer);

    // ── vertex attributes ─────────────────────────────────────────────────

    fn set_vertex_attrib_array_enabled(&self, index: u32, enabled: bool);
    /// Installs `layout` against the buffer currently bound to `Array`.
    fn vertex_attrib_pointer(&self, index: u32, layout: VertexAttribLayout);
    fn vertex_attrib_state(&self, index: u32) -> VertexAttribState;

    // ── uniforms ──────────────────────────────────────────────────────────

    /// Uploads `components`-wide float vectors (1..=4) to the current program.
    fn uniform_f32(&self, location: &Self::UniformLocation, components: usize, values: &[f32]);
    /// Uploads `components`-wide int vectors (1..=4) to the current program.
    fn uniform_i32(&self, location: &Self::UniformLocation, components: usize, values: &[i32]);
    /// Uploads `dimension`x`dimension` float matrices (2..=4), column-major.
    fn uniform_matrix_f32(
        &self,
        location: &Self::UniformLocation,
        dimension: usize,
        transpose: bool,
        values: &[f32],
    );
    fn get_uniform_f32(
        &self,
        program: Self::Program,
        location: &Self::UniformLocation,
        out: &mut [f32],
    );
    fn get_uniform_i32(
        &self,
        program: Self::Program,
        location: &Self::UniformLocation,
        out: &mut [i32],
    );

    // ── framebuffer ───────────────────────────────────────────────────────

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn viewport_rect(&self) -> [i32; 4];
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_value(&self) -> [f32; 4];
    fn clear_depth(&self, depth: f32);
    fn clear(&self, mask: u32);
    fn draw_arrays(&self, mode: Topology, first: i32, count: i32);
    /// `offset` is in bytes into the bound element buffer.
    fn draw_elements(&self, mode: Topology, count: i32, index_type: u32, offset: i32);

    /// Resizes the drawing buffer after the surface changed size.
    fn resize(&self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Presents the drawing buffer (swap on native hosts).
    fn present(&self) {}
}

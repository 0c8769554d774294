use glow::HasContext;

use crate::program::DataKind;

use super::{
    ActiveVariable, BufferTarget, BufferUsage, ContextAttributes, ContextVersion, Device,
    ShaderStage, Topology, VertexAttribLayout, VertexAttribState,
};

/// Host hook for drawing-buffer resize and presentation.
pub trait Presenter {
    fn resize(&self, width: u32, height: u32);
    fn present(&self);
}

/// `Device` backed by a `glow` OpenGL (ES) context.
///
/// The context must be current on the calling thread for the lifetime of the
/// device.
pub struct GlowDevice {
    gl: glow::Context,
    version: ContextVersion,
    attributes: ContextAttributes,
    presenter: Option<Box<dyn Presenter>>,
}

impl GlowDevice {
    pub fn new(gl: glow::Context, version: ContextVersion, attributes: ContextAttributes) -> Self {
        Self {
            gl,
            version,
            attributes,
            presenter: None,
        }
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Raw context access for host code that needs calls outside the seam.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl Device for GlowDevice {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type UniformLocation = glow::UniformLocation;

    fn version(&self) -> ContextVersion {
        self.version
    }

    fn attributes(&self) -> &ContextAttributes {
        &self.attributes
    }

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(stage.gl()) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, index, name) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    // ── reflection ────────────────────────────────────────────────────────

    fn active_attribute_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl.get_active_attributes(program) }
    }

    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveVariable> {
        let info = unsafe { self.gl.get_active_attribute(program, index) }?;
        Some(ActiveVariable {
            name: info.name,
            kind: DataKind(info.atype),
            size: info.size,
        })
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn active_uniform_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl.get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveVariable> {
        let info = unsafe { self.gl.get_active_uniform(program, index) }?;
        Some(ActiveVariable {
            name: info.name,
            kind: DataKind(info.utype),
            size: info.size,
        })
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(target.gl(), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe { self.gl.buffer_data_u8_slice(target.gl(), data, usage.gl()) }
    }

    fn buffer_data_size(&self, target: BufferTarget, size: usize, usage: BufferUsage) {
        let size = i32::try_from(size).unwrap_or(i32::MAX);
        unsafe { self.gl.buffer_data_size(target.gl(), size, usage.gl()) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    // ── vertex attributes ─────────────────────────────────────────────────

    fn set_vertex_attrib_array_enabled(&self, index: u32, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable_vertex_attrib_array(index);
            } else {
                self.gl.disable_vertex_attrib_array(index);
            }
        }
    }

    fn vertex_attrib_pointer(&self, index: u32, layout: VertexAttribLayout) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                layout.components,
                layout.format,
                layout.normalized,
                layout.stride,
                layout.offset,
            )
        }
    }

    fn vertex_attrib_state(&self, index: u32) -> VertexAttribState {
        let query = |pname: u32| {
            let mut v = [0.0f32; 4];
            unsafe { self.gl.get_vertex_attrib_parameter_f32_slice(index, pname, &mut v) };
            v
        };

        VertexAttribState {
            enabled: query(glow::VERTEX_ATTRIB_ARRAY_ENABLED)[0] != 0.0,
            components: query(glow::VERTEX_ATTRIB_ARRAY_SIZE)[0] as i32,
            format: query(glow::VERTEX_ATTRIB_ARRAY_TYPE)[0] as u32,
            normalized: query(glow::VERTEX_ATTRIB_ARRAY_NORMALIZED)[0] != 0.0,
            stride: query(glow::VERTEX_ATTRIB_ARRAY_STRIDE)[0] as i32,
            current: query(glow::CURRENT_VERTEX_ATTRIB),
        }
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    fn uniform_f32(&self, location: &Self::UniformLocation, components: usize, values: &[f32]) {
        let loc = Some(location);
        unsafe {
            match components {
                1 => self.gl.uniform_1_f32_slice(loc, values),
                2 => self.gl.uniform_2_f32_slice(loc, values),
                3 => self.gl.uniform_3_f32_slice(loc, values),
                4 => self.gl.uniform_4_f32_slice(loc, values),
                n => log::warn!("uniform_f32: unsupported component count {n}"),
            }
        }
    }

    fn uniform_i32(&self, location: &Self::UniformLocation, components: usize, values: &[i32]) {
        let loc = Some(location);
        unsafe {
            match components {
                1 => self.gl.uniform_1_i32_slice(loc, values),
                2 => self.gl.uniform_2_i32_slice(loc, values),
                3 => self.gl.uniform_3_i32_slice(loc, values),
                4 => self.gl.uniform_4_i32_slice(loc, values),
                n => log::warn!("uniform_i32: unsupported component count {n}"),
            }
        }
    }

    fn uniform_matrix_f32(
        &self,
        location: &Self::UniformLocation,
        dimension: usize,
        transpose: bool,
        values: &[f32],
    ) {
        let loc = Some(location);
        unsafe {
            match dimension {
                2 => self.gl.uniform_matrix_2_f32_slice(loc, transpose, values),
                3 => self.gl.uniform_matrix_3_f32_slice(loc, transpose, values),
                4 => self.gl.uniform_matrix_4_f32_slice(loc, transpose, values),
                n => log::warn!("uniform_matrix_f32: unsupported dimension {n}"),
            }
        }
    }

    fn get_uniform_f32(
        &self,
        program: Self::Program,
        location: &Self::UniformLocation,
        out: &mut [f32],
    ) {
        unsafe { self.gl.get_uniform_f32(program, location, out) }
    }

    fn get_uniform_i32(
        &self,
        program: Self::Program,
        location: &Self::UniformLocation,
        out: &mut [i32],
    ) {
        unsafe { self.gl.get_uniform_i32(program, location, out) }
    }

    // ── framebuffer ───────────────────────────────────────────────────────

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn viewport_rect(&self) -> [i32; 4] {
        let mut v = [0i32; 4];
        unsafe { self.gl.get_parameter_i32_slice(glow::VIEWPORT, &mut v) };
        v
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_color_value(&self) -> [f32; 4] {
        let mut v = [0.0f32; 4];
        unsafe { self.gl.get_parameter_f32_slice(glow::COLOR_CLEAR_VALUE, &mut v) };
        v
    }

    fn clear_depth(&self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) }
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) }
    }

    fn draw_arrays(&self, mode: Topology, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode.gl(), first, count) }
    }

    fn draw_elements(&self, mode: Topology, count: i32, index_type: u32, offset: i32) {
        unsafe { self.gl.draw_elements(mode.gl(), count, index_type, offset) }
    }

    fn resize(&self, width: u32, height: u32) {
        if let Some(p) = &self.presenter {
            p.resize(width, height);
        }
    }

    fn present(&self) {
        if let Some(p) = &self.presenter {
            p.present();
        }
    }
}

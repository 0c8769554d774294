use std::cell::RefCell;
use std::collections::HashMap;

use log::trace;

use crate::device::{
    ActiveVariable, BufferTarget, BufferUsage, ContextAttributes, ContextVersion, Device,
    ShaderStage, Topology, VertexAttribLayout, VertexAttribState,
};
use crate::program::DataKind;

use super::glsl::{self, Declaration, Dialect, ShaderInterface};

/// Attribute slots every headless context exposes.
pub const MAX_VERTEX_ATTRIBS: u32 = 16;

// ── handles ──────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferId(u32);

/// Location of one uniform element within one program.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HeadlessUniformLocation {
    program: ProgramId,
    uniform: usize,
    element: usize,
}

// ── observable state ─────────────────────────────────────────────────────────

/// A state-changing call the device recorded, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear { mask: u32, color: [f32; 4], depth: f32 },
    DrawArrays { mode: Topology, first: i32, count: i32 },
    DrawElements { mode: Topology, count: i32, index_type: u32, offset: i32 },
}

/// Drawing buffer contents, modeled as one solid fill.
///
/// `fill` is `None` once a draw has produced colors the device cannot
/// predict without rasterizing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub fill: Option<[f32; 4]>,
}

// ── objects ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
    interface: Option<ShaderInterface>,
}

#[derive(Debug, Clone)]
struct LinkedUniform {
    name: String,
    kind: DataKind,
    size: i32,
    data: UniformData,
}

#[derive(Debug, Clone)]
enum UniformData {
    Float(Vec<f32>),
    Int(Vec<i32>),
}

#[derive(Debug, Default)]
struct ProgramObject {
    shaders: Vec<ShaderId>,
    bindings: HashMap<String, u32>,
    linked: bool,
    log: String,
    attributes: Vec<(Declaration, u32)>,
    uniforms: Vec<LinkedUniform>,
    constant_output: Option<[f32; 4]>,
}

#[derive(Debug, Copy, Clone)]
struct AttribSlot {
    enabled: bool,
    layout: VertexAttribLayout,
    buffer: Option<BufferId>,
    current: [f32; 4],
}

impl Default for AttribSlot {
    fn default() -> Self {
        Self {
            enabled: false,
            layout: VertexAttribLayout::default(),
            buffer: None,
            current: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug)]
struct State {
    next_id: u32,
    shaders: HashMap<ShaderId, ShaderObject>,
    programs: HashMap<ProgramId, ProgramObject>,
    buffers: HashMap<BufferId, Vec<u8>>,
    array_binding: Option<BufferId>,
    element_binding: Option<BufferId>,
    current_program: Option<ProgramId>,
    slots: Vec<AttribSlot>,
    viewport: [i32; 4],
    clear_color: [f32; 4],
    clear_depth: f32,
    framebuffer: Framebuffer,
    error: u32,
    commands: Vec<Command>,
}

impl State {
    fn new(width: u32, height: u32) -> Self {
        Self {
            next_id: 1,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            array_binding: None,
            element_binding: None,
            current_program: None,
            slots: vec![AttribSlot::default(); MAX_VERTEX_ATTRIBS as usize],
            viewport: [0, 0, width as i32, height as i32],
            clear_color: [0.0; 4],
            clear_depth: 1.0,
            framebuffer: Framebuffer { width, height, fill: Some([0.0; 4]) },
            error: glow::NO_ERROR,
            commands: Vec::new(),
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Records an error; like GL, the first one sticks until read.
    fn fail(&mut self, code: u32, what: &str) {
        trace!("headless error 0x{code:04X}: {what}");
        if self.error == glow::NO_ERROR {
            self.error = code;
        }
    }

    fn binding(&self, target: BufferTarget) -> Option<BufferId> {
        match target {
            BufferTarget::Array => self.array_binding,
            BufferTarget::ElementArray => self.element_binding,
        }
    }

    fn uniform_mut(
        &mut self,
        location: &HeadlessUniformLocation,
    ) -> Option<&mut LinkedUniform> {
        if self.current_program != Some(location.program) {
            self.fail(glow::INVALID_OPERATION, "uniform location from a non-current program");
            return None;
        }
        let exists = self
            .programs
            .get(&location.program)
            .is_some_and(|p| location.uniform < p.uniforms.len());
        if !exists {
            self.fail(glow::INVALID_OPERATION, "stale uniform location");
            return None;
        }
        self.programs
            .get_mut(&location.program)
            .and_then(|p| p.uniforms.get_mut(location.uniform))
    }
}

// ── device ───────────────────────────────────────────────────────────────────

/// In-process software emulation of a GL-style device.
///
/// Compiles shaders with a declaration-level GLSL scanner, links them with
/// the usual slot rules, and keeps every piece of context state observable.
/// Errors are recorded (see [`HeadlessDevice::take_error`]) rather than
/// raised, as a real context would.
#[derive(Debug)]
pub struct HeadlessDevice {
    version: ContextVersion,
    attributes: ContextAttributes,
    state: RefCell<State>,
}

impl HeadlessDevice {
    pub fn new(version: ContextVersion, attributes: ContextAttributes, size: (u32, u32)) -> Self {
        Self { version, attributes, state: RefCell::new(State::new(size.0, size.1)) }
    }

    pub fn webgl1() -> Self {
        Self::new(ContextVersion::WebGl1, ContextAttributes::default(), (300, 150))
    }

    pub fn webgl2() -> Self {
        Self::new(ContextVersion::WebGl2, ContextAttributes::default(), (300, 150))
    }

    // ── inspection ────────────────────────────────────────────────────────

    /// Returns and clears the recorded error (`glow::NO_ERROR` if none).
    pub fn take_error(&self) -> u32 {
        std::mem::replace(&mut self.state.borrow_mut().error, glow::NO_ERROR)
    }

    pub fn commands(&self) -> Vec<Command> {
        self.state.borrow().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    pub fn framebuffer(&self) -> Framebuffer {
        self.state.borrow().framebuffer
    }

    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferId> {
        self.state.borrow().binding(target)
    }

    pub fn current_program(&self) -> Option<ProgramId> {
        self.state.borrow().current_program
    }

    pub fn buffer_contents(&self, buffer: BufferId) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    /// Buffer object feeding attribute slot `index`.
    pub fn attrib_buffer(&self, index: u32) -> Option<BufferId> {
        self.state.borrow().slots.get(index as usize).and_then(|s| s.buffer)
    }

    // ── link ──────────────────────────────────────────────────────────────

    fn link(state: &State, program: &ProgramObject) -> Result<ProgramObject, String> {
        let mut vertex = None;
        let mut fragment = None;
        for id in &program.shaders {
            let Some(shader) = state.shaders.get(id) else { continue };
            let Some(iface) = shader.interface.as_ref().filter(|_| shader.compiled) else {
                return Err("Attached shader is not compiled.".into());
            };
            match shader.stage {
                ShaderStage::Vertex => vertex = Some(iface),
                ShaderStage::Fragment => fragment = Some(iface),
            }
        }
        let (Some(vs), Some(fs)) = (vertex, fragment) else {
            return Err("Missing vertex or fragment shader.".into());
        };

        if vs.dialect != fs.dialect {
            return Err("Versions of linked shaders have different values.".into());
        }

        for input in fs.inputs.iter().filter(|d| fs.is_referenced(&d.name)) {
            match vs.outputs.iter().find(|o| o.name == input.name) {
                None => {
                    return Err(format!(
                        "Varying '{}' is read by the fragment shader but not declared by the vertex shader.",
                        input.name
                    ));
                }
                Some(out) if out.kind != input.kind => {
                    return Err(format!("Types of varying '{}' differ between shaders.", input.name));
                }
                Some(_) => {}
            }
        }

        let attributes = Self::assign_slots(vs, &program.bindings)?;

        let mut uniforms: Vec<LinkedUniform> = Vec::new();
        for decl in vs.uniforms.iter().filter(|d| vs.is_referenced(&d.name)).chain(
            fs.uniforms.iter().filter(|d| fs.is_referenced(&d.name)),
        ) {
            // Same declaration in both stages is one uniform; a type clash
            // leaves both entries in the list.
            if uniforms.iter().any(|u| u.name == decl.name && u.kind == decl.kind) {
                continue;
            }
            let scalars = decl.kind.components().unwrap_or(1) * decl.size() as usize;
            let data = if decl.kind.is_float() {
                UniformData::Float(vec![0.0; scalars])
            } else {
                UniformData::Int(vec![0; scalars])
            };
            uniforms.push(LinkedUniform {
                name: decl.name.clone(),
                kind: decl.kind,
                size: decl.size(),
                data,
            });
        }

        Ok(ProgramObject {
            shaders: program.shaders.clone(),
            bindings: program.bindings.clone(),
            linked: true,
            log: String::new(),
            attributes,
            uniforms,
            constant_output: fs.constant_output,
        })
    }

    fn assign_slots(
        vs: &ShaderInterface,
        bindings: &HashMap<String, u32>,
    ) -> Result<Vec<(Declaration, u32)>, String> {
        let active: Vec<&Declaration> =
            vs.attributes.iter().filter(|d| vs.is_referenced(&d.name)).collect();

        let mut used = vec![false; MAX_VERTEX_ATTRIBS as usize];
        let mut placed: Vec<(Declaration, u32)> = Vec::with_capacity(active.len());

        let claim = |used: &mut Vec<bool>, decl: &Declaration, at: u32| -> Result<(), String> {
            let span = decl.kind.attrib_slots();
            if at.checked_add(span).is_none_or(|end| end > MAX_VERTEX_ATTRIBS) {
                return Err(format!("Attribute '{}' does not fit at location {at}.", decl.name));
            }
            for slot in at..at + span {
                if used[slot as usize] {
                    return Err(format!("Attribute '{}' aliases location {slot}.", decl.name));
                }
                used[slot as usize] = true;
            }
            Ok(())
        };

        let mut pending = Vec::new();
        for decl in active {
            let fixed = bindings.get(&decl.name).copied().or(decl.location);
            match fixed {
                Some(at) => {
                    claim(&mut used, decl, at)?;
                    placed.push((decl.clone(), at));
                }
                None => pending.push(decl),
            }
        }

        for decl in pending {
            let span = decl.kind.attrib_slots() as usize;
            let at = (0..used.len())
                .find(|&i| i + span <= used.len() && used[i..i + span].iter().all(|u| !u))
                .ok_or_else(|| "Too many active attributes.".to_string())?;
            claim(&mut used, decl, at as u32)?;
            placed.push((decl.clone(), at as u32));
        }

        Ok(placed)
    }

    fn active_attribute_list(&self, program: ProgramId) -> Vec<ActiveVariable> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .filter(|p| p.linked)
            .map(|p| {
                p.attributes
                    .iter()
                    .map(|(d, _)| ActiveVariable { name: d.name.clone(), kind: d.kind, size: d.size() })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn write_uniform(
        &self,
        location: &HeadlessUniformLocation,
        accepts: impl Fn(DataKind) -> bool,
        per_element: usize,
        write: impl FnOnce(&mut UniformData, DataKind, usize, usize),
    ) {
        let mut state = self.state.borrow_mut();
        let Some((kind, size)) = state.uniform_mut(location).map(|u| (u.kind, u.size)) else {
            return;
        };
        if !accepts(kind) || kind.components() != Some(per_element) {
            state.fail(glow::INVALID_OPERATION, "uniform upload does not match its type");
            return;
        }
        if let Some(uniform) = state.uniform_mut(location) {
            let start = location.element * per_element;
            write(&mut uniform.data, kind, start, size as usize * per_element);
        }
    }
}

fn copy_into<T: Copy>(dst: &mut [T], start: usize, end: usize, src: &[T]) {
    let available = end.saturating_sub(start);
    let n = src.len().min(available);
    dst[start..start + n].copy_from_slice(&src[..n]);
}

impl Device for HeadlessDevice {
    type Shader = ShaderId;
    type Program = ProgramId;
    type Buffer = BufferId;
    type UniformLocation = HeadlessUniformLocation;

    fn version(&self) -> ContextVersion {
        self.version
    }

    fn attributes(&self) -> &ContextAttributes {
        &self.attributes
    }

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let mut state = self.state.borrow_mut();
        let id = ShaderId(state.next_id());
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
                interface: None,
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader) {
            Some(s) => s.source = source.to_string(),
            None => state.fail(glow::INVALID_VALUE, "shader_source on deleted shader"),
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        let Some(s) = state.shaders.get_mut(&shader) else {
            state.fail(glow::INVALID_VALUE, "compile_shader on deleted shader");
            return;
        };

        let result = glsl::scan(s.stage, &s.source).and_then(|iface| {
            if iface.dialect == Dialect::Es300 && self.version == ContextVersion::WebGl1 {
                Err(glsl::Diagnostic {
                    line: 1,
                    message: "'300 es' : version number not supported".into(),
                })
            } else {
                Ok(iface)
            }
        });

        match result {
            Ok(iface) => {
                s.compiled = true;
                s.log.clear();
                s.interface = Some(iface);
            }
            Err(diag) => {
                s.compiled = false;
                s.log = diag.to_log();
                s.interface = None;
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        self.state.borrow().shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        self.state.borrow().shaders.get(&shader).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<ProgramId, String> {
        let mut state = self.state.borrow_mut();
        let id = ProgramId(state.next_id());
        state.programs.insert(id, ProgramObject::default());
        Ok(id)
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader) {
            state.fail(glow::INVALID_VALUE, "attach_shader with deleted shader");
            return;
        }
        match state.programs.get_mut(&program) {
            Some(p) if !p.shaders.contains(&shader) => p.shaders.push(shader),
            Some(_) => state.fail(glow::INVALID_OPERATION, "shader already attached"),
            None => state.fail(glow::INVALID_VALUE, "attach_shader on deleted program"),
        }
    }

    fn bind_attrib_location(&self, program: ProgramId, index: u32, name: &str) {
        let mut state = self.state.borrow_mut();
        if index >= MAX_VERTEX_ATTRIBS {
            state.fail(glow::INVALID_VALUE, "attribute index out of range");
            return;
        }
        match state.programs.get_mut(&program) {
            Some(p) => {
                p.bindings.insert(name.to_string(), index);
            }
            None => state.fail(glow::INVALID_VALUE, "bind_attrib_location on deleted program"),
        }
    }

    fn link_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        let Some(current) = state.programs.get(&program) else {
            state.fail(glow::INVALID_VALUE, "link_program on deleted program");
            return;
        };

        let next = match Self::link(&state, current) {
            Ok(linked) => linked,
            Err(log) => ProgramObject {
                shaders: current.shaders.clone(),
                bindings: current.bindings.clone(),
                log,
                ..ProgramObject::default()
            },
        };
        state.programs.insert(program, next);
    }

    fn program_link_status(&self, program: ProgramId) -> bool {
        self.state.borrow().programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        self.state.borrow().programs.get(&program).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramId>) {
        let mut state = self.state.borrow_mut();
        match program {
            Some(id) if !state.programs.get(&id).is_some_and(|p| p.linked) => {
                state.fail(glow::INVALID_OPERATION, "use_program on unlinked program");
            }
            _ => state.current_program = program,
        }
    }

    fn delete_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        if state.current_program == Some(program) {
            state.current_program = None;
        }
    }

    // ── reflection ────────────────────────────────────────────────────────

    fn active_attribute_count(&self, program: ProgramId) -> u32 {
        self.active_attribute_list(program).len() as u32
    }

    fn active_attribute(&self, program: ProgramId, index: u32) -> Option<ActiveVariable> {
        self.active_attribute_list(program).into_iter().nth(index as usize)
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let p = state.programs.get(&program).filter(|p| p.linked)?;
        p.attributes.iter().find(|(d, _)| d.name == name).map(|(_, at)| *at)
    }

    fn active_uniform_count(&self, program: ProgramId) -> u32 {
        let state = self.state.borrow();
        state.programs.get(&program).filter(|p| p.linked).map_or(0, |p| p.uniforms.len() as u32)
    }

    fn active_uniform(&self, program: ProgramId, index: u32) -> Option<ActiveVariable> {
        let state = self.state.borrow();
        let u = state.programs.get(&program).filter(|p| p.linked)?.uniforms.get(index as usize)?;
        let name = if u.size > 1 { format!("{}[0]", u.name) } else { u.name.clone() };
        Some(ActiveVariable { name, kind: u.kind, size: u.size })
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<HeadlessUniformLocation> {
        let state = self.state.borrow();
        let p = state.programs.get(&program).filter(|p| p.linked)?;

        let (base, element) = match name.strip_suffix(']').and_then(|s| s.split_once('[')) {
            Some((base, idx)) => (base, idx.parse::<usize>().ok()?),
            None => (name, 0),
        };

        let uniform = p.uniforms.iter().position(|u| u.name == base)?;
        if element >= p.uniforms[uniform].size as usize {
            return None;
        }
        Some(HeadlessUniformLocation { program, uniform, element })
    }

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<BufferId, String> {
        let mut state = self.state.borrow_mut();
        let id = BufferId(state.next_id());
        state.buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = buffer
            && !state.buffers.contains_key(&id)
        {
            state.fail(glow::INVALID_OPERATION, "bind_buffer with deleted buffer");
            return;
        }
        match target {
            BufferTarget::Array => state.array_binding = buffer,
            BufferTarget::ElementArray => state.element_binding = buffer,
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], _usage: BufferUsage) {
        let mut state = self.state.borrow_mut();
        let Some(id) = state.binding(target) else {
            state.fail(glow::INVALID_OPERATION, "buffer_data with no buffer bound");
            return;
        };
        if let Some(store) = state.buffers.get_mut(&id) {
            *store = data.to_vec();
        }
    }

    fn buffer_data_size(&self, target: BufferTarget, size: usize, _usage: BufferUsage) {
        let mut state = self.state.borrow_mut();
        let Some(id) = state.binding(target) else {
            state.fail(glow::INVALID_OPERATION, "buffer_data with no buffer bound");
            return;
        };
        if let Some(store) = state.buffers.get_mut(&id) {
            *store = vec![0; size];
        }
    }

    fn delete_buffer(&self, buffer: BufferId) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        if state.array_binding == Some(buffer) {
            state.array_binding = None;
        }
        if state.element_binding == Some(buffer) {
            state.element_binding = None;
        }
        for slot in state.slots.iter_mut().filter(|s| s.buffer == Some(buffer)) {
            slot.buffer = None;
        }
    }

    // ── vertex attributes ─────────────────────────────────────────────────

    fn set_vertex_attrib_array_enabled(&self, index: u32, enabled: bool) {
        let mut state = self.state.borrow_mut();
        match state.slots.get_mut(index as usize) {
            Some(slot) => slot.enabled = enabled,
            None => state.fail(glow::INVALID_VALUE, "attribute index out of range"),
        }
    }

    fn vertex_attrib_pointer(&self, index: u32, layout: VertexAttribLayout) {
        let mut state = self.state.borrow_mut();
        let Some(buffer) = state.array_binding else {
            state.fail(glow::INVALID_OPERATION, "vertex_attrib_pointer with no array buffer bound");
            return;
        };
        if !(1..=4).contains(&layout.components) || layout.stride < 0 || layout.offset < 0 {
            state.fail(glow::INVALID_VALUE, "bad vertex attribute layout");
            return;
        }
        match state.slots.get_mut(index as usize) {
            Some(slot) => {
                slot.layout = layout;
                slot.buffer = Some(buffer);
            }
            None => state.fail(glow::INVALID_VALUE, "attribute index out of range"),
        }
    }

    fn vertex_attrib_state(&self, index: u32) -> VertexAttribState {
        let state = self.state.borrow();
        let slot = state.slots.get(index as usize).copied().unwrap_or_default();
        VertexAttribState {
            enabled: slot.enabled,
            components: slot.layout.components,
            format: slot.layout.format,
            normalized: slot.layout.normalized,
            stride: slot.layout.stride,
            current: slot.current,
        }
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    fn uniform_f32(&self, location: &HeadlessUniformLocation, components: usize, values: &[f32]) {
        self.write_uniform(location, DataKind::is_float, components, |data, _, start, end| {
            if let UniformData::Float(dst) = data {
                copy_into(dst, start, end, values);
            }
        });
    }

    fn uniform_i32(&self, location: &HeadlessUniformLocation, components: usize, values: &[i32]) {
        self.write_uniform(location, UniformData::int_kind, components, |data, kind, start, end| {
            if let UniformData::Int(dst) = data {
                if kind.is_bool() {
                    let normalized: Vec<i32> = values.iter().map(|&v| i32::from(v != 0)).collect();
                    copy_into(dst, start, end, &normalized);
                } else {
                    copy_into(dst, start, end, values);
                }
            }
        });
    }

    fn uniform_matrix_f32(
        &self,
        location: &HeadlessUniformLocation,
        dimension: usize,
        transpose: bool,
        values: &[f32],
    ) {
        if transpose {
            self.state.borrow_mut().fail(glow::INVALID_VALUE, "transpose must be false");
            return;
        }
        let accepts = move |k: DataKind| {
            matches!(
                (k, dimension),
                (DataKind::FLOAT_MAT2, 2) | (DataKind::FLOAT_MAT3, 3) | (DataKind::FLOAT_MAT4, 4)
            )
        };
        self.write_uniform(location, accepts, dimension * dimension, |data, _, start, end| {
            if let UniformData::Float(dst) = data {
                copy_into(dst, start, end, values);
            }
        });
    }

    fn get_uniform_f32(&self, program: ProgramId, location: &HeadlessUniformLocation, out: &mut [f32]) {
        let state = self.state.borrow();
        let Some(u) = state.programs.get(&program).and_then(|p| p.uniforms.get(location.uniform))
        else {
            return;
        };
        let per = u.kind.components().unwrap_or(1);
        let start = location.element * per;
        for (i, slot) in out.iter_mut().enumerate().take(per) {
            *slot = match &u.data {
                UniformData::Float(v) => v.get(start + i).copied().unwrap_or_default(),
                UniformData::Int(v) => v.get(start + i).map_or(0.0, |&x| x as f32),
            };
        }
    }

    fn get_uniform_i32(&self, program: ProgramId, location: &HeadlessUniformLocation, out: &mut [i32]) {
        let state = self.state.borrow();
        let Some(u) = state.programs.get(&program).and_then(|p| p.uniforms.get(location.uniform))
        else {
            return;
        };
        let per = u.kind.components().unwrap_or(1);
        let start = location.element * per;
        for (i, slot) in out.iter_mut().enumerate().take(per) {
            *slot = match &u.data {
                UniformData::Int(v) => v.get(start + i).copied().unwrap_or_default(),
                UniformData::Float(v) => v.get(start + i).map_or(0, |&x| x as i32),
            };
        }
    }

    // ── framebuffer ───────────────────────────────────────────────────────

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        let mut state = self.state.borrow_mut();
        if width < 0 || height < 0 {
            state.fail(glow::INVALID_VALUE, "negative viewport size");
            return;
        }
        state.viewport = [x, y, width, height];
    }

    fn viewport_rect(&self) -> [i32; 4] {
        self.state.borrow().viewport
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.state.borrow_mut().clear_color =
            [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), a.clamp(0.0, 1.0)];
    }

    fn clear_color_value(&self) -> [f32; 4] {
        self.state.borrow().clear_color
    }

    fn clear_depth(&self, depth: f32) {
        self.state.borrow_mut().clear_depth = depth.clamp(0.0, 1.0);
    }

    fn clear(&self, mask: u32) {
        let mut state = self.state.borrow_mut();
        let color = state.clear_color;
        let depth = state.clear_depth;
        if mask & glow::COLOR_BUFFER_BIT != 0 {
            state.framebuffer.fill = Some(color);
        }
        state.commands.push(Command::Clear { mask, color, depth });
    }

    fn draw_arrays(&self, mode: Topology, first: i32, count: i32) {
        let mut state = self.state.borrow_mut();
        let Some(output) = state
            .current_program
            .and_then(|id| state.programs.get(&id))
            .map(|p| p.constant_output)
        else {
            state.fail(glow::INVALID_OPERATION, "draw with no current program");
            return;
        };
        if first < 0 || count < 0 {
            state.fail(glow::INVALID_VALUE, "negative draw range");
            return;
        }
        if count > 0 {
            state.framebuffer.fill = output;
        }
        state.commands.push(Command::DrawArrays { mode, first, count });
    }

    fn draw_elements(&self, mode: Topology, count: i32, index_type: u32, offset: i32) {
        let mut state = self.state.borrow_mut();
        let Some(output) = state
            .current_program
            .and_then(|id| state.programs.get(&id))
            .map(|p| p.constant_output)
        else {
            state.fail(glow::INVALID_OPERATION, "draw with no current program");
            return;
        };
        if state.element_binding.is_none() {
            state.fail(glow::INVALID_OPERATION, "draw_elements with no element buffer bound");
            return;
        }
        if !matches!(index_type, glow::UNSIGNED_BYTE | glow::UNSIGNED_SHORT) {
            state.fail(glow::INVALID_ENUM, "unsupported index type");
            return;
        }
        if count > 0 {
            state.framebuffer.fill = output;
        }
        state.commands.push(Command::DrawElements { mode, count, index_type, offset });
    }

    fn resize(&self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        state.framebuffer = Framebuffer { width, height, fill: Some([0.0; 4]) };
    }
}

impl UniformData {
    /// Kinds stored as ints: int vectors, bools, and sampler units.
    fn int_kind(kind: DataKind) -> bool {
        kind.is_bool()
            || matches!(
                kind,
                DataKind::INT
                    | DataKind::INT_VEC2
                    | DataKind::INT_VEC3
                    | DataKind::INT_VEC4
                    | DataKind::SAMPLER_2D
                    | DataKind::SAMPLER_CUBE
            )
    }
}

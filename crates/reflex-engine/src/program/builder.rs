use log::{debug, warn};

use crate::device::{Device, ShaderStage};
use crate::error::{RenderError, Result};

/// Compiles one shader stage.
///
/// On failure the shader object is released and the device's info log is
/// returned verbatim inside `ShaderCompile`.
pub fn compile_stage<D: Device>(device: &D, stage: ShaderStage, source: &str) -> Result<D::Shader> {
    let shader = device
        .create_shader(stage)
        .map_err(|message| RenderError::ResourceCreation { what: "shader", message })?;

    device.shader_source(shader, source);
    device.compile_shader(shader);

    if !device.shader_compile_status(shader) {
        let log = device.shader_info_log(shader);
        device.delete_shader(shader);
        warn!("{stage} shader failed to compile: {log}");
        return Err(RenderError::ShaderCompile { stage, log });
    }

    debug!("compiled {stage} shader ({} bytes)", source.len());
    Ok(shader)
}

/// Links compiled stages into a program.
///
/// `bindings` pin attribute names to slots before linking. The stages are
/// left attached; the caller owns their deletion.
pub fn link<D: Device>(
    device: &D,
    shaders: &[D::Shader],
    bindings: &[(String, u32)],
) -> Result<D::Program> {
    let program = device
        .create_program()
        .map_err(|message| RenderError::ResourceCreation { what: "program", message })?;

    for &shader in shaders {
        device.attach_shader(program, shader);
    }
    for (name, index) in bindings {
        device.bind_attrib_location(program, *index, name);
    }

    device.link_program(program);

    if !device.program_link_status(program) {
        let log = device.program_info_log(program);
        device.delete_program(program);
        warn!("program failed to link: {log}");
        return Err(RenderError::ProgramLink { log });
    }

    Ok(program)
}

/// Compiles both stages and links them.
///
/// Stage objects are released in every outcome: once linked they are no
/// longer needed, and on failure nothing is leaked.
pub fn build_program<D: Device>(
    device: &D,
    vertex: &str,
    fragment: &str,
    bindings: &[(String, u32)],
) -> Result<D::Program> {
    let vs = compile_stage(device, ShaderStage::Vertex, vertex)?;
    let fs = match compile_stage(device, ShaderStage::Fragment, fragment) {
        Ok(fs) => fs,
        Err(e) => {
            device.delete_shader(vs);
            return Err(e);
        }
    };

    let linked = link(device, &[vs, fs], bindings);

    device.delete_shader(vs);
    device.delete_shader(fs);

    linked
}

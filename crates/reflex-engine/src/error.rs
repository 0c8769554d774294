use crate::device::{ContextVersion, ShaderStage};

/// Errors surfaced by the renderer core.
///
/// Unknown attribute, uniform, or buffer names are never errors; lookups on
/// those return `None` or do nothing.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No device context could be obtained at the requested (or any) version.
    #[error("unable to initialize {}; the host or device may not support it", describe_version(*.version))]
    UnsupportedContext { version: Option<ContextVersion> },

    /// A shader stage failed to compile. `log` is the device's info log, verbatim.
    #[error("an error occurred compiling the {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// The program failed to link. `log` is the device's info log, verbatim.
    #[error("unable to link program: {log}")]
    ProgramLink { log: String },

    /// A reflected uniform carries a data-kind tag with no upload operation.
    #[error("unknown uniform type 0x{tag:04X} for uniform '{name}'")]
    UnknownUniformType { name: String, tag: u32 },

    /// The supplied value cannot fill the uniform's reflected shape.
    #[error("uniform '{name}' expects a multiple of {expected} components, got {got}")]
    UniformValueLength {
        name: String,
        expected: usize,
        got: usize,
    },

    /// The device refused to allocate an object.
    #[error("failed to create {what}: {message}")]
    ResourceCreation { what: &'static str, message: String },
}

fn describe_version(version: Option<ContextVersion>) -> &'static str {
    match version {
        Some(ContextVersion::WebGl2) => "WebGL2",
        _ => "WebGL",
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_context_names_requested_version() {
        let e = RenderError::UnsupportedContext { version: Some(ContextVersion::WebGl2) };
        assert!(e.to_string().starts_with("unable to initialize WebGL2"));

        let e = RenderError::UnsupportedContext { version: None };
        assert!(e.to_string().starts_with("unable to initialize WebGL;"));
    }

    #[test]
    fn compile_error_passes_log_through() {
        let e = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "ERROR: 0:3: 'x' : undeclared identifier".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.ends_with("ERROR: 0:3: 'x' : undeclared identifier"));
    }

    #[test]
    fn unknown_uniform_type_formats_tag_as_hex() {
        let e = RenderError::UnknownUniformType { name: "u_Tex".into(), tag: 0x8B5E };
        assert_eq!(e.to_string(), "unknown uniform type 0x8B5E for uniform 'u_Tex'");
    }
}

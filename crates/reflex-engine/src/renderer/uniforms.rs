use crate::device::{Device, Surface};
use crate::error::Result;
use crate::program::describe_uniforms;
use crate::uniform::{UniformValue, read_back, upload};

use super::Renderer;

impl<D: Device, S: Surface> Renderer<D, S> {
    /// Uploads `value` to uniform `name`.
    ///
    /// Unknown names are ignored. The upload is chosen by the uniform's
    /// reflected kind; `value` only has to supply enough components.
    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) -> Result<()> {
        let Some(desc) = self.uniforms.get(name) else {
            return Ok(());
        };
        self.device.use_program(Some(self.program));
        upload(&self.device, desc, &value.into())
    }

    /// Reads the live value of uniform `name` back from the device.
    pub fn get_uniform(&self, name: &str) -> Option<UniformValue> {
        let desc = self.uniforms.get(name)?;
        Some(read_back(&self.device, self.program, desc))
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    pub fn describe_uniforms(&self) -> String {
        describe_uniforms(&self.uniforms)
    }
}

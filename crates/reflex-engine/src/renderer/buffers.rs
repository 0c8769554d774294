use log::debug;

use crate::buffer::{AttribBinding, BufferSource, IndexSource};
use crate::device::{BufferUsage, Device, Surface};
use crate::error::Result;
use crate::program::describe_attributes;

use super::Renderer;

// ── buffers ──────────────────────────────────────────────────────────────────

impl<D: Device, S: Surface> Renderer<D, S> {
    /// Creates buffer `name` on first use and (re)uploads its contents.
    ///
    /// `source` is typed data (`&[f32]`, `&[u16]`, ..) or a scalar count to
    /// reserve at 4 bytes each.
    pub fn set_vertex_buffer<'a>(
        &mut self,
        name: &str,
        source: impl Into<BufferSource<'a>>,
        usage: BufferUsage,
    ) -> Result<()> {
        self.buffers.set_vertex_buffer(&self.device, name, source.into(), usage)
    }

    pub fn has_vertex_buffer(&self, name: &str) -> bool {
        self.buffers.has_vertex_buffer(name)
    }

    /// Replaces the element buffer with unsigned 16-bit indices.
    pub fn set_element_array<'a>(
        &mut self,
        source: impl Into<IndexSource<'a>>,
        usage: BufferUsage,
    ) -> Result<()> {
        self.buffers.set_element_array(&self.device, source.into(), usage)
    }

    /// Drops the element buffer; `render` goes back to non-indexed draws.
    pub fn destroy_element_array(&mut self) {
        self.buffers.destroy_element_array(&self.device);
    }

    pub fn has_element_array(&self) -> bool {
        self.buffers.element_array().is_some()
    }

    /// Feeds `attribute` from buffer `buffer`.
    ///
    /// Unknown buffer or attribute names are ignored. On success the derived
    /// vertex count becomes the renderer's non-indexed draw count.
    pub fn set_vertex_buffer_attrib(&mut self, buffer: &str, attribute: &str, binding: AttribBinding) {
        let Some(desc) = self.attributes.get(attribute) else {
            debug!("[{}] no attribute '{attribute}'; binding skipped", self.id);
            return;
        };
        if let Some(count) = self.buffers.bind_attribute(&self.device, buffer, desc, binding) {
            self.element_count = count;
        }
    }
}

// ── attribute queries ────────────────────────────────────────────────────────

impl<D: Device, S: Surface> Renderer<D, S> {
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Slot the linked program assigned to `name`.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).map(|a| a.location)
    }

    pub fn set_attribute_array_enabled(&mut self, name: &str, enabled: bool) {
        if let Some(location) = self.attribute_location(name) {
            self.device.set_vertex_attrib_array_enabled(location, enabled);
        }
    }

    pub fn is_attribute_array_enabled(&self, name: &str) -> Option<bool> {
        self.attribute_location(name)
            .map(|location| self.device.vertex_attrib_state(location).enabled)
    }

    /// Name of the vertex buffer currently feeding `name`.
    pub fn attribute_bound_buffer(&self, name: &str) -> Option<&str> {
        self.attribute_location(name)
            .and_then(|location| self.buffers.buffer_bound_to(location))
    }

    pub fn attribute_component_count(&self, name: &str) -> Option<i32> {
        self.attribute_location(name)
            .map(|location| self.device.vertex_attrib_state(location).components)
    }

    /// Storage format installed on the slot (a GL type code).
    pub fn attribute_array_format(&self, name: &str) -> Option<u32> {
        self.attribute_location(name)
            .map(|location| self.device.vertex_attrib_state(location).format)
    }

    pub fn is_attribute_array_normalized(&self, name: &str) -> Option<bool> {
        self.attribute_location(name)
            .map(|location| self.device.vertex_attrib_state(location).normalized)
    }

    /// Byte stride installed on the slot.
    pub fn attribute_array_stride(&self, name: &str) -> Option<i32> {
        self.attribute_location(name)
            .map(|location| self.device.vertex_attrib_state(location).stride)
    }

    /// Byte offset recorded by the last binding of `name`.
    pub fn attribute_offset(&self, name: &str) -> Option<i32> {
        let location = self.attribute_location(name)?;
        let buffer = self.buffers.buffer_bound_to(location)?;
        self.buffers
            .vertex_buffer(buffer)
            .and_then(|vb| vb.attribute.as_ref())
            .map(|(_, link)| link.offset)
    }

    /// Value the slot supplies while its array is disabled.
    pub fn current_attribute_value(&self, name: &str) -> Option<[f32; 4]> {
        self.attribute_location(name)
            .map(|location| self.device.vertex_attrib_state(location).current)
    }

    pub fn describe_attributes(&self) -> String {
        describe_attributes(&self.attributes)
    }
}

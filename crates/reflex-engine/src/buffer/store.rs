use std::collections::HashMap;

use log::debug;

use crate::device::{BufferTarget, BufferUsage, Device, VertexAttribLayout};
use crate::error::{RenderError, Result};
use crate::program::AttributeDescriptor;

use super::{AttribBinding, AttribLink, BufferSource, ElementBuffer, INDEX_BYTES, IndexSource, VertexBuffer};

/// Named vertex buffers plus the single element buffer of one renderer.
#[derive(Debug)]
pub struct BufferStore<B> {
    vertex: HashMap<String, VertexBuffer<B>>,
    element: Option<ElementBuffer<B>>,
}

impl<B> Default for BufferStore<B> {
    fn default() -> Self {
        Self { vertex: HashMap::new(), element: None }
    }
}

impl<B: Copy> BufferStore<B> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── vertex buffers ────────────────────────────────────────────────────

    /// Creates `name` on first use and (re)uploads its contents.
    ///
    /// The array target is bound only for the upload.
    pub fn set_vertex_buffer<D: Device<Buffer = B>>(
        &mut self,
        device: &D,
        name: &str,
        source: BufferSource<'_>,
        usage: BufferUsage,
    ) -> Result<()> {
        let buffer = match self.vertex.get(name) {
            Some(existing) => existing.buffer,
            None => device
                .create_buffer()
                .map_err(|message| RenderError::ResourceCreation { what: "vertex buffer", message })?,
        };

        device.bind_buffer(BufferTarget::Array, Some(buffer));
        match source {
            BufferSource::Data { bytes, .. } => device.buffer_data(BufferTarget::Array, bytes, usage),
            BufferSource::Reserve(_) => {
                device.buffer_data_size(BufferTarget::Array, source.byte_len(), usage)
            }
        }
        device.bind_buffer(BufferTarget::Array, None);

        let len = source.len();
        let bytes_per_scalar = source.bytes_per_scalar();
        match self.vertex.get_mut(name) {
            Some(record) => {
                record.len = len;
                record.bytes_per_scalar = bytes_per_scalar;
                record.usage = usage;
            }
            None => {
                debug!("vertex buffer '{name}' created ({len} scalars)");
                self.vertex.insert(
                    name.to_owned(),
                    VertexBuffer { buffer, len, bytes_per_scalar, usage, attribute: None },
                );
            }
        }
        Ok(())
    }

    pub fn has_vertex_buffer(&self, name: &str) -> bool {
        self.vertex.contains_key(name)
    }

    pub fn vertex_buffer(&self, name: &str) -> Option<&VertexBuffer<B>> {
        self.vertex.get(name)
    }

    /// Name of the vertex buffer most recently bound to attribute slot `location`.
    pub fn buffer_bound_to(&self, location: u32) -> Option<&str> {
        self.vertex
            .iter()
            .find(|(_, vb)| matches!(&vb.attribute, Some((_, link)) if link.location == location))
            .map(|(name, _)| name.as_str())
    }

    /// Points `attribute` at buffer `name` and returns the derived vertex count.
    ///
    /// Returns `None` without touching the device when the buffer is unknown
    /// or the stride/offset do not fit a byte count.
    pub fn bind_attribute<D: Device<Buffer = B>>(
        &mut self,
        device: &D,
        name: &str,
        attribute: &AttributeDescriptor,
        binding: AttribBinding,
    ) -> Option<usize> {
        let record = self.vertex.get(name)?;
        let buffer = record.buffer;

        let components = binding.effective_components();
        let element_count = binding.element_count(record.len);
        let layout = (
            i32::try_from(components).ok(),
            scalars_to_bytes(binding.stride, record.bytes_per_scalar),
            scalars_to_bytes(binding.offset, record.bytes_per_scalar),
        );
        let (Some(gl_components), Some(stride), Some(offset)) = layout else {
            debug!("binding of '{}' -> '{name}' out of range; skipped", attribute.name);
            return None;
        };
        let format = attribute.kind.attrib_format();

        device.bind_buffer(BufferTarget::Array, Some(buffer));
        device.set_vertex_attrib_array_enabled(attribute.location, true);
        device.vertex_attrib_pointer(
            attribute.location,
            VertexAttribLayout {
                components: gl_components,
                format,
                normalized: binding.normalized,
                stride,
                offset,
            },
        );
        device.bind_buffer(BufferTarget::Array, None);

        // A slot reads from one buffer at a time.
        for other in self.vertex.values_mut() {
            if matches!(&other.attribute, Some((_, link)) if link.location == attribute.location) {
                other.attribute = None;
            }
        }
        if let Some(record) = self.vertex.get_mut(name) {
            record.attribute = Some((
                attribute.name.clone(),
                AttribLink {
                    location: attribute.location,
                    components,
                    format,
                    normalized: binding.normalized,
                    stride,
                    offset,
                    element_count,
                },
            ));
        }

        debug!(
            "bound '{}' -> '{name}' ({components} comps, {element_count} elements)",
            attribute.name
        );
        Some(element_count)
    }

    // ── element buffer ────────────────────────────────────────────────────

    /// Replaces the element buffer, releasing any previous one.
    ///
    /// The new buffer is left bound to the element target.
    pub fn set_element_array<D: Device<Buffer = B>>(
        &mut self,
        device: &D,
        source: IndexSource<'_>,
        usage: BufferUsage,
    ) -> Result<()> {
        let buffer = device
            .create_buffer()
            .map_err(|message| RenderError::ResourceCreation { what: "element buffer", message })?;

        if let Some(old) = self.element.take() {
            device.delete_buffer(old.buffer);
        }

        device.bind_buffer(BufferTarget::ElementArray, Some(buffer));
        match source {
            IndexSource::Data(indices) => {
                device.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices), usage)
            }
            IndexSource::Reserve(n) => {
                device.buffer_data_size(BufferTarget::ElementArray, n * INDEX_BYTES, usage)
            }
        }

        self.element = Some(ElementBuffer {
            buffer,
            len: source.len(),
            format: glow::UNSIGNED_SHORT,
            offset: 0,
            usage,
        });
        Ok(())
    }

    /// Unbinds and releases the element buffer; drawing reverts to non-indexed.
    pub fn destroy_element_array<D: Device<Buffer = B>>(&mut self, device: &D) {
        device.bind_buffer(BufferTarget::ElementArray, None);
        if let Some(old) = self.element.take() {
            device.delete_buffer(old.buffer);
        }
    }

    pub fn element_array(&self) -> Option<&ElementBuffer<B>> {
        self.element.as_ref()
    }

    // ── teardown ──────────────────────────────────────────────────────────

    /// Deletes every buffer object held.
    pub fn release_all<D: Device<Buffer = B>>(&mut self, device: &D) {
        self.destroy_element_array(device);
        for (name, vb) in self.vertex.drain() {
            debug!("releasing vertex buffer '{name}'");
            device.delete_buffer(vb.buffer);
        }
    }
}

/// Scalar count to a byte count the pointer call accepts.
fn scalars_to_bytes(scalars: u32, bytes_per_scalar: usize) -> Option<i32> {
    i32::try_from(scalars).ok()?.checked_mul(i32::try_from(bytes_per_scalar).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDevice;
    use crate::program::DataKind;

    fn attr(name: &str, location: u32, kind: DataKind) -> AttributeDescriptor {
        AttributeDescriptor { name: name.into(), location, kind, size: 1 }
    }

    #[test]
    fn vertex_upload_leaves_no_binding() {
        let device = HeadlessDevice::webgl1();
        let mut store = BufferStore::new();
        store
            .set_vertex_buffer(&device, "v", BufferSource::from(&[1.0f32, 2.0, 3.0]), BufferUsage::Static)
            .unwrap();

        assert!(store.has_vertex_buffer("v"));
        assert!(!store.has_vertex_buffer("w"));
        assert_eq!(device.bound_buffer(BufferTarget::Array), None);

        let vb = store.vertex_buffer("v").unwrap();
        assert_eq!(vb.len, 3);
        assert_eq!(device.buffer_contents(vb.buffer).map(|b| b.len()), Some(12));
    }

    #[test]
    fn reupload_reuses_the_buffer_object() {
        let device = HeadlessDevice::webgl1();
        let mut store = BufferStore::new();
        store.set_vertex_buffer(&device, "v", BufferSource::reserve(8), BufferUsage::Dynamic).unwrap();
        let first = store.vertex_buffer("v").unwrap().buffer;
        store
            .set_vertex_buffer(&device, "v", BufferSource::from(&[0u8; 4]), BufferUsage::Dynamic)
            .unwrap();

        let vb = store.vertex_buffer("v").unwrap();
        assert_eq!(vb.buffer, first);
        assert_eq!(vb.bytes_per_scalar, 1);
        assert_eq!(device.live_buffer_count(), 1);
    }

    #[test]
    fn bind_attribute_scales_stride_and_offset_to_bytes() {
        let device = HeadlessDevice::webgl1();
        let mut store = BufferStore::new();
        let data = [0.0f32; 24];
        store.set_vertex_buffer(&device, "v", BufferSource::from(&data), BufferUsage::Static).unwrap();

        let a = attr("a_Color", 2, DataKind::FLOAT_VEC3);
        let count = store.bind_attribute(&device, "v", &a, AttribBinding::new(3).stride(6).offset(3));
        assert_eq!(count, Some(4));

        let state = device.vertex_attrib_state(2);
        assert!(state.enabled);
        assert_eq!(state.components, 3);
        assert_eq!(state.stride, 24);
        assert_eq!(state.format, glow::FLOAT);
        assert_eq!(device.bound_buffer(BufferTarget::Array), None);
        assert_eq!(store.buffer_bound_to(2), Some("v"));
    }

    #[test]
    fn bind_attribute_on_unknown_buffer_is_none() {
        let device = HeadlessDevice::webgl1();
        let mut store: BufferStore<_> = BufferStore::new();
        let a = attr("a_Pos", 0, DataKind::FLOAT_VEC2);
        assert_eq!(store.bind_attribute(&device, "missing", &a, AttribBinding::default()), None);
        assert!(!device.vertex_attrib_state(0).enabled);
    }

    #[test]
    fn oversized_stride_or_offset_is_rejected() {
        let device = HeadlessDevice::webgl1();
        let mut store = BufferStore::new();
        store.set_vertex_buffer(&device, "v", BufferSource::from(&[0.0f32; 6]), BufferUsage::Static).unwrap();
        let a = attr("a_Pos", 0, DataKind::FLOAT_VEC2);

        let wide = AttribBinding::new(2).stride(u32::MAX);
        assert_eq!(store.bind_attribute(&device, "v", &a, wide), None);
        let far = AttribBinding::new(2).offset(i32::MAX as u32);
        assert_eq!(store.bind_attribute(&device, "v", &a, far), None);

        assert!(!device.vertex_attrib_state(0).enabled);
        assert_eq!(store.buffer_bound_to(0), None);
        assert_eq!(store.bind_attribute(&device, "v", &a, AttribBinding::new(2)), Some(3));
    }

    #[test]
    fn replacing_element_array_releases_previous() {
        let device = HeadlessDevice::webgl1();
        let mut store = BufferStore::new();
        store.set_element_array(&device, IndexSource::from(&[0u16, 1, 2]), BufferUsage::Static).unwrap();
        store.set_element_array(&device, IndexSource::from(6usize), BufferUsage::Static).unwrap();

        assert_eq!(device.live_buffer_count(), 1);
        assert_eq!(store.element_array().map(|e| e.len), Some(6));

        store.destroy_element_array(&device);
        assert!(store.element_array().is_none());
        assert_eq!(device.live_buffer_count(), 0);
        assert_eq!(device.bound_buffer(BufferTarget::ElementArray), None);
    }
}

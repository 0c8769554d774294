use std::collections::HashMap;

use log::debug;

use crate::device::Device;

use super::DataKind;

/// An active vertex input discovered on a linked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub location: u32,
    pub kind: DataKind,
    pub size: i32,
}

/// An active uniform discovered on a linked program.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDescriptor<L> {
    pub name: String,
    pub location: L,
    pub kind: DataKind,
    pub size: i32,
}

/// Enumerates active attributes, keyed by name.
///
/// Built-ins and anything else without a bindable location are skipped.
pub fn reflect_attributes<D: Device>(
    device: &D,
    program: D::Program,
) -> HashMap<String, AttributeDescriptor> {
    let count = device.active_attribute_count(program);
    let mut out = HashMap::with_capacity(count as usize);

    for index in 0..count {
        let Some(active) = device.active_attribute(program, index) else {
            continue;
        };
        let Some(location) = device.attrib_location(program, &active.name) else {
            debug!("attribute '{}' has no location; skipped", active.name);
            continue;
        };
        out.insert(
            active.name.clone(),
            AttributeDescriptor {
                name: active.name,
                location,
                kind: active.kind,
                size: active.size,
            },
        );
    }

    out
}

/// Enumerates active uniforms, keyed by name. Later entries replace earlier
/// ones with the same name.
pub fn reflect_uniforms<D: Device>(
    device: &D,
    program: D::Program,
) -> HashMap<String, UniformDescriptor<D::UniformLocation>> {
    let count = device.active_uniform_count(program);
    let mut out = HashMap::with_capacity(count as usize);

    for index in 0..count {
        let Some(active) = device.active_uniform(program, index) else {
            continue;
        };
        let Some(location) = device.uniform_location(program, &active.name) else {
            debug!("uniform '{}' has no location; skipped", active.name);
            continue;
        };
        out.insert(
            active.name.clone(),
            UniformDescriptor {
                name: active.name,
                location,
                kind: active.kind,
                size: active.size,
            },
        );
    }

    out
}

/// One line per attribute, ordered by location.
///
/// Renders the reflected map, so a name the device reported more than once
/// appears once, with the entry that was kept.
pub fn describe_attributes(attributes: &HashMap<String, AttributeDescriptor>) -> String {
    let mut entries: Vec<_> = attributes.values().collect();
    entries.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.name.cmp(&b.name)));

    entries
        .iter()
        .map(|a| {
            format!(
                "attribute: {{ name: {}, loc: {}, type: {}, size: {} }}",
                a.name, a.location, a.kind, a.size
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per uniform, ordered by name.
///
/// A uniform declared in both stages with different types shows only the
/// last reported declaration.
pub fn describe_uniforms<L>(uniforms: &HashMap<String, UniformDescriptor<L>>) -> String {
    let mut entries: Vec<_> = uniforms.values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    entries
        .iter()
        .map(|u| format!("uniform: {{ name: {}, type: {}, size: {} }}", u.name, u.kind, u.size))
        .collect::<Vec<_>>()
        .join("\n")
}

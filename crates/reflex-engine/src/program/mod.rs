//! Shader programs: compile, link, and reflect.
//!
//! This module is responsible for:
//! - compiling stages and linking them with pinned attribute slots
//! - enumerating active attributes and uniforms after link
//! - the reflected data-kind table and its derived formats

mod builder;
mod kind;
mod reflect;

pub use builder::{build_program, compile_stage, link};
pub use kind::DataKind;
pub use reflect::{
    AttributeDescriptor, UniformDescriptor, describe_attributes, describe_uniforms,
    reflect_attributes, reflect_uniforms,
};

//! Uniform values and the kind-driven upload table.

mod dispatch;
mod value;

pub use dispatch::{UploadOp, read_back, upload};
pub use value::UniformValue;

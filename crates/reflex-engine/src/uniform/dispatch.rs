use log::trace;

use crate::device::Device;
use crate::error::{RenderError, Result};
use crate::program::{DataKind, UniformDescriptor};

use super::UniformValue;

/// Upload strategy selected by a uniform's reflected kind.
///
/// Booleans share the int uploads; matrices go up column-major without
/// transposition. Samplers have no entry.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UploadOp {
    Float(usize),
    Int(usize),
    Matrix(usize),
}

impl UploadOp {
    pub fn for_kind(kind: DataKind) -> Option<Self> {
        Some(match kind {
            DataKind::FLOAT => Self::Float(1),
            DataKind::FLOAT_VEC2 => Self::Float(2),
            DataKind::FLOAT_VEC3 => Self::Float(3),
            DataKind::FLOAT_VEC4 => Self::Float(4),
            DataKind::INT | DataKind::BOOL => Self::Int(1),
            DataKind::INT_VEC2 | DataKind::BOOL_VEC2 => Self::Int(2),
            DataKind::INT_VEC3 | DataKind::BOOL_VEC3 => Self::Int(3),
            DataKind::INT_VEC4 | DataKind::BOOL_VEC4 => Self::Int(4),
            DataKind::FLOAT_MAT2 => Self::Matrix(2),
            DataKind::FLOAT_MAT3 => Self::Matrix(3),
            DataKind::FLOAT_MAT4 => Self::Matrix(4),
            _ => return None,
        })
    }

    /// Scalars one element of the uniform occupies.
    pub fn components(self) -> usize {
        match self {
            Self::Float(n) | Self::Int(n) => n,
            Self::Matrix(n) => n * n,
        }
    }
}

/// Uploads `value` to the uniform described by `desc`.
///
/// The program owning `desc` must be current. The value's own shape is not
/// consulted beyond its length: it is flattened to whatever the reflected
/// kind needs.
pub fn upload<D: Device>(
    device: &D,
    desc: &UniformDescriptor<D::UniformLocation>,
    value: &UniformValue,
) -> Result<()> {
    let Some(op) = UploadOp::for_kind(desc.kind) else {
        return Err(RenderError::UnknownUniformType {
            name: desc.name.clone(),
            tag: desc.kind.tag(),
        });
    };

    let expected = op.components();
    let check = |got: usize| -> Result<()> {
        if got == 0 || got % expected != 0 {
            return Err(RenderError::UniformValueLength {
                name: desc.name.clone(),
                expected,
                got,
            });
        }
        Ok(())
    };

    match op {
        UploadOp::Float(n) => {
            let values = value.to_f32s();
            check(values.len())?;
            device.uniform_f32(&desc.location, n, &values);
        }
        UploadOp::Int(n) => {
            let values = value.to_i32s();
            check(values.len())?;
            device.uniform_i32(&desc.location, n, &values);
        }
        UploadOp::Matrix(n) => {
            let values = value.to_f32s();
            check(values.len())?;
            device.uniform_matrix_f32(&desc.location, n, false, &values);
        }
    }

    trace!("uniform '{}' <- {:?}", desc.name, op);
    Ok(())
}

/// Reads the live value of one uniform element from `program`.
pub fn read_back<D: Device>(
    device: &D,
    program: D::Program,
    desc: &UniformDescriptor<D::UniformLocation>,
) -> UniformValue {
    let components = desc.kind.components().unwrap_or(1);

    if desc.kind.is_float() {
        let mut out = vec![0.0; components];
        device.get_uniform_f32(program, &desc.location, &mut out);
        UniformValue::from_f32s(desc.kind, out)
    } else {
        let mut out = vec![0; components];
        device.get_uniform_i32(program, &desc.location, &mut out);
        UniformValue::from_i32s(desc.kind, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_share_int_uploads() {
        assert_eq!(UploadOp::for_kind(DataKind::BOOL), Some(UploadOp::Int(1)));
        assert_eq!(UploadOp::for_kind(DataKind::BOOL_VEC3), Some(UploadOp::Int(3)));
    }

    #[test]
    fn matrices_upload_squared_components() {
        assert_eq!(UploadOp::for_kind(DataKind::FLOAT_MAT3).map(UploadOp::components), Some(9));
    }

    #[test]
    fn samplers_and_storage_formats_have_no_upload() {
        assert_eq!(UploadOp::for_kind(DataKind::SAMPLER_2D), None);
        assert_eq!(UploadOp::for_kind(DataKind::UNSIGNED_BYTE), None);
        assert_eq!(UploadOp::for_kind(DataKind(0xBEEF)), None);
    }
}

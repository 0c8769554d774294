use crate::program::DataKind;

/// A value accepted by `set_uniform` and produced by `get_uniform`.
///
/// Scalars and fixed vectors cover the common cases; `Floats`/`Ints` carry
/// flat data for matrices and uniform arrays. Matrices are column-major.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),
    Bool(bool),
    BVec2([bool; 2]),
    BVec3([bool; 3]),
    BVec4([bool; 4]),
    Mat2([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
    Floats(Vec<f32>),
    Ints(Vec<i32>),
}

impl UniformValue {
    /// Flattens to floats. Ints widen, bools become `0.0`/`1.0`.
    pub fn to_f32s(&self) -> Vec<f32> {
        match self {
            Self::Float(v) => vec![*v],
            Self::Vec2(v) => v.to_vec(),
            Self::Vec3(v) => v.to_vec(),
            Self::Vec4(v) => v.to_vec(),
            Self::Mat2(v) => v.to_vec(),
            Self::Mat3(v) => v.to_vec(),
            Self::Mat4(v) => v.to_vec(),
            Self::Floats(v) => v.clone(),
            Self::Int(_)
            | Self::IVec2(_)
            | Self::IVec3(_)
            | Self::IVec4(_)
            | Self::Bool(_)
            | Self::BVec2(_)
            | Self::BVec3(_)
            | Self::BVec4(_)
            | Self::Ints(_) => self.to_i32s().into_iter().map(|v| v as f32).collect(),
        }
    }

    /// Flattens to ints. Floats truncate toward zero, bools become `0`/`1`.
    pub fn to_i32s(&self) -> Vec<i32> {
        fn bools(v: &[bool]) -> Vec<i32> {
            v.iter().map(|&b| i32::from(b)).collect()
        }

        match self {
            Self::Int(v) => vec![*v],
            Self::IVec2(v) => v.to_vec(),
            Self::IVec3(v) => v.to_vec(),
            Self::IVec4(v) => v.to_vec(),
            Self::Ints(v) => v.clone(),
            Self::Bool(b) => vec![i32::from(*b)],
            Self::BVec2(v) => bools(v),
            Self::BVec3(v) => bools(v),
            Self::BVec4(v) => bools(v),
            Self::Float(_)
            | Self::Vec2(_)
            | Self::Vec3(_)
            | Self::Vec4(_)
            | Self::Mat2(_)
            | Self::Mat3(_)
            | Self::Mat4(_)
            | Self::Floats(_) => self.to_f32s().into_iter().map(|v| v as i32).collect(),
        }
    }

    /// Rebuilds a typed value from device readback.
    ///
    /// Single-element reads of known kinds produce the matching variant;
    /// arrays and anything unrecognized come back flat.
    pub(crate) fn from_f32s(kind: DataKind, values: Vec<f32>) -> Self {
        match (kind, values.as_slice()) {
            (DataKind::FLOAT, [x]) => Self::Float(*x),
            (DataKind::FLOAT_VEC2, &[x, y]) => Self::Vec2([x, y]),
            (DataKind::FLOAT_VEC3, &[x, y, z]) => Self::Vec3([x, y, z]),
            (DataKind::FLOAT_VEC4, &[x, y, z, w]) => Self::Vec4([x, y, z, w]),
            (DataKind::FLOAT_MAT2, s) if s.len() == 4 => {
                let mut m = [0.0; 4];
                m.copy_from_slice(s);
                Self::Mat2(m)
            }
            (DataKind::FLOAT_MAT3, s) if s.len() == 9 => {
                let mut m = [0.0; 9];
                m.copy_from_slice(s);
                Self::Mat3(m)
            }
            (DataKind::FLOAT_MAT4, s) if s.len() == 16 => {
                let mut m = [0.0; 16];
                m.copy_from_slice(s);
                Self::Mat4(m)
            }
            _ => Self::Floats(values),
        }
    }

    pub(crate) fn from_i32s(kind: DataKind, values: Vec<i32>) -> Self {
        match (kind, values.as_slice()) {
            (DataKind::INT | DataKind::SAMPLER_2D | DataKind::SAMPLER_CUBE, &[x]) => Self::Int(x),
            (DataKind::INT_VEC2, &[x, y]) => Self::IVec2([x, y]),
            (DataKind::INT_VEC3, &[x, y, z]) => Self::IVec3([x, y, z]),
            (DataKind::INT_VEC4, &[x, y, z, w]) => Self::IVec4([x, y, z, w]),
            (DataKind::BOOL, &[x]) => Self::Bool(x != 0),
            (DataKind::BOOL_VEC2, &[x, y]) => Self::BVec2([x != 0, y != 0]),
            (DataKind::BOOL_VEC3, &[x, y, z]) => Self::BVec3([x != 0, y != 0, z != 0]),
            (DataKind::BOOL_VEC4, &[x, y, z, w]) => {
                Self::BVec4([x != 0, y != 0, z != 0, w != 0])
            }
            _ => Self::Ints(values),
        }
    }
}

// ── conversions ──────────────────────────────────────────────────────────────

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(v)
    }
}

/// Four floats read as a `vec4`; wrap in `Mat2` explicitly for a matrix.
impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        Self::Vec4(v)
    }
}

impl From<[f32; 9]> for UniformValue {
    fn from(v: [f32; 9]) -> Self {
        Self::Mat3(v)
    }
}

impl From<[f32; 16]> for UniformValue {
    fn from(v: [f32; 16]) -> Self {
        Self::Mat4(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<[i32; 2]> for UniformValue {
    fn from(v: [i32; 2]) -> Self {
        Self::IVec2(v)
    }
}

impl From<[i32; 3]> for UniformValue {
    fn from(v: [i32; 3]) -> Self {
        Self::IVec3(v)
    }
}

impl From<[i32; 4]> for UniformValue {
    fn from(v: [i32; 4]) -> Self {
        Self::IVec4(v)
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<[bool; 2]> for UniformValue {
    fn from(v: [bool; 2]) -> Self {
        Self::BVec2(v)
    }
}

impl From<[bool; 3]> for UniformValue {
    fn from(v: [bool; 3]) -> Self {
        Self::BVec3(v)
    }
}

impl From<[bool; 4]> for UniformValue {
    fn from(v: [bool; 4]) -> Self {
        Self::BVec4(v)
    }
}

impl From<Vec<f32>> for UniformValue {
    fn from(v: Vec<f32>) -> Self {
        Self::Floats(v)
    }
}

impl From<&[f32]> for UniformValue {
    fn from(v: &[f32]) -> Self {
        Self::Floats(v.to_vec())
    }
}

impl From<Vec<i32>> for UniformValue {
    fn from(v: Vec<i32>) -> Self {
        Self::Ints(v)
    }
}

impl From<&[i32]> for UniformValue {
    fn from(v: &[i32]) -> Self {
        Self::Ints(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_coerce_to_numbers() {
        assert_eq!(UniformValue::BVec3([true, false, true]).to_i32s(), vec![1, 0, 1]);
        assert_eq!(UniformValue::Bool(true).to_f32s(), vec![1.0]);
    }

    #[test]
    fn floats_truncate_when_read_as_ints() {
        assert_eq!(UniformValue::Vec2([1.9, -2.7]).to_i32s(), vec![1, -2]);
    }

    #[test]
    fn readback_rebuilds_typed_variants() {
        assert_eq!(
            UniformValue::from_f32s(DataKind::FLOAT_VEC3, vec![1.0, 2.0, 3.0]),
            UniformValue::Vec3([1.0, 2.0, 3.0])
        );
        assert_eq!(
            UniformValue::from_i32s(DataKind::BOOL_VEC2, vec![0, 1]),
            UniformValue::BVec2([false, true])
        );
        assert_eq!(
            UniformValue::from_i32s(DataKind::SAMPLER_2D, vec![3]),
            UniformValue::Int(3)
        );
    }

    #[test]
    fn arrays_read_back_flat() {
        assert_eq!(
            UniformValue::from_f32s(DataKind::FLOAT, vec![1.0, 2.0]),
            UniformValue::Floats(vec![1.0, 2.0])
        );
    }
}

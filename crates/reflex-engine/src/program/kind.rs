use std::fmt;

/// Reflected type tag of an attribute or uniform.
///
/// Wraps the GL numeric type code. Reflection may report codes outside the
/// table below; those are kept as-is and name themselves `"unknown"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DataKind(pub u32);

impl DataKind {
    pub const BYTE: Self = Self(glow::BYTE);
    pub const UNSIGNED_BYTE: Self = Self(glow::UNSIGNED_BYTE);
    pub const SHORT: Self = Self(glow::SHORT);
    pub const UNSIGNED_SHORT: Self = Self(glow::UNSIGNED_SHORT);
    pub const INT: Self = Self(glow::INT);
    pub const UNSIGNED_INT: Self = Self(glow::UNSIGNED_INT);
    pub const FLOAT: Self = Self(glow::FLOAT);

    pub const FLOAT_VEC2: Self = Self(glow::FLOAT_VEC2);
    pub const FLOAT_VEC3: Self = Self(glow::FLOAT_VEC3);
    pub const FLOAT_VEC4: Self = Self(glow::FLOAT_VEC4);
    pub const INT_VEC2: Self = Self(glow::INT_VEC2);
    pub const INT_VEC3: Self = Self(glow::INT_VEC3);
    pub const INT_VEC4: Self = Self(glow::INT_VEC4);
    pub const BOOL: Self = Self(glow::BOOL);
    pub const BOOL_VEC2: Self = Self(glow::BOOL_VEC2);
    pub const BOOL_VEC3: Self = Self(glow::BOOL_VEC3);
    pub const BOOL_VEC4: Self = Self(glow::BOOL_VEC4);
    pub const FLOAT_MAT2: Self = Self(glow::FLOAT_MAT2);
    pub const FLOAT_MAT3: Self = Self(glow::FLOAT_MAT3);
    pub const FLOAT_MAT4: Self = Self(glow::FLOAT_MAT4);
    pub const SAMPLER_2D: Self = Self(glow::SAMPLER_2D);
    pub const SAMPLER_CUBE: Self = Self(glow::SAMPLER_CUBE);

    #[inline]
    pub const fn tag(self) -> u32 {
        self.0
    }

    /// Canonical lowercase hyphenated label.
    pub fn name(self) -> &'static str {
        match self {
            Self::BYTE => "byte",
            Self::UNSIGNED_BYTE => "unsigned-byte",
            Self::SHORT => "short",
            Self::UNSIGNED_SHORT => "unsigned-short",
            Self::INT => "int",
            Self::UNSIGNED_INT => "unsigned-int",
            Self::FLOAT => "float",
            Self::FLOAT_VEC2 => "float-vec2",
            Self::FLOAT_VEC3 => "float-vec3",
            Self::FLOAT_VEC4 => "float-vec4",
            Self::INT_VEC2 => "int-vec2",
            Self::INT_VEC3 => "int-vec3",
            Self::INT_VEC4 => "int-vec4",
            Self::BOOL => "bool",
            Self::BOOL_VEC2 => "bool-vec2",
            Self::BOOL_VEC3 => "bool-vec3",
            Self::BOOL_VEC4 => "bool-vec4",
            Self::FLOAT_MAT2 => "float-mat2",
            Self::FLOAT_MAT3 => "float-mat3",
            Self::FLOAT_MAT4 => "float-mat4",
            Self::SAMPLER_2D => "sampler-2d",
            Self::SAMPLER_CUBE => "sampler-cube",
            _ => "unknown",
        }
    }

    /// Storage format accepted by `vertex_attrib_pointer` for this kind.
    ///
    /// The pointer call only takes a handful of element formats, so shader
    /// types are folded onto them; the fold is lossy for ints and bools.
    pub fn attrib_format(self) -> u32 {
        match self {
            Self::UNSIGNED_INT => glow::UNSIGNED_SHORT,
            Self::INT
            | Self::INT_VEC2
            | Self::INT_VEC3
            | Self::INT_VEC4
            | Self::FLOAT_VEC2
            | Self::FLOAT_VEC3
            | Self::FLOAT_VEC4
            | Self::FLOAT_MAT2
            | Self::FLOAT_MAT3
            | Self::FLOAT_MAT4
            | Self::SAMPLER_2D
            | Self::SAMPLER_CUBE => glow::FLOAT,
            Self::BOOL | Self::BOOL_VEC2 | Self::BOOL_VEC3 | Self::BOOL_VEC4 => glow::BYTE,
            other => other.0,
        }
    }

    /// Scalar slots one value of this kind occupies (`None` for scalar
    /// storage formats and unknown tags).
    pub fn components(self) -> Option<usize> {
        Some(match self {
            Self::FLOAT | Self::INT | Self::BOOL | Self::SAMPLER_2D | Self::SAMPLER_CUBE => 1,
            Self::FLOAT_VEC2 | Self::INT_VEC2 | Self::BOOL_VEC2 => 2,
            Self::FLOAT_VEC3 | Self::INT_VEC3 | Self::BOOL_VEC3 => 3,
            Self::FLOAT_VEC4 | Self::INT_VEC4 | Self::BOOL_VEC4 | Self::FLOAT_MAT2 => 4,
            Self::FLOAT_MAT3 => 9,
            Self::FLOAT_MAT4 => 16,
            _ => return None,
        })
    }

    /// Whether values of this kind are stored as floats on the device.
    pub fn is_float(self) -> bool {
        matches!(
            self,
            Self::FLOAT
                | Self::FLOAT_VEC2
                | Self::FLOAT_VEC3
                | Self::FLOAT_VEC4
                | Self::FLOAT_MAT2
                | Self::FLOAT_MAT3
                | Self::FLOAT_MAT4
        )
    }

    pub fn is_bool(self) -> bool {
        matches!(self, Self::BOOL | Self::BOOL_VEC2 | Self::BOOL_VEC3 | Self::BOOL_VEC4)
    }

    /// Attribute slots a vertex input of this kind consumes.
    pub fn attrib_slots(self) -> u32 {
        match self {
            Self::FLOAT_MAT2 => 2,
            Self::FLOAT_MAT3 => 3,
            Self::FLOAT_MAT4 => 4,
            _ => 1,
        }
    }

    /// Maps a GLSL ES type keyword to its kind.
    pub fn from_glsl_type(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "float" => Self::FLOAT,
            "vec2" => Self::FLOAT_VEC2,
            "vec3" => Self::FLOAT_VEC3,
            "vec4" => Self::FLOAT_VEC4,
            "int" => Self::INT,
            "ivec2" => Self::INT_VEC2,
            "ivec3" => Self::INT_VEC3,
            "ivec4" => Self::INT_VEC4,
            "bool" => Self::BOOL,
            "bvec2" => Self::BOOL_VEC2,
            "bvec3" => Self::BOOL_VEC3,
            "bvec4" => Self::BOOL_VEC4,
            "mat2" => Self::FLOAT_MAT2,
            "mat3" => Self::FLOAT_MAT3,
            "mat4" => Self::FLOAT_MAT4,
            "sampler2D" => Self::SAMPLER_2D,
            "samplerCube" => Self::SAMPLER_CUBE,
            _ => return None,
        })
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn names_are_lowercase_hyphenated() {
        assert_eq!(DataKind::FLOAT_VEC3.name(), "float-vec3");
        assert_eq!(DataKind::INT_VEC2.name(), "int-vec2");
        assert_eq!(DataKind::BOOL.name(), "bool");
        assert_eq!(DataKind::SAMPLER_2D.name(), "sampler-2d");
        assert_eq!(DataKind::UNSIGNED_SHORT.name(), "unsigned-short");
    }

    #[test]
    fn unrecognized_tag_is_unknown() {
        assert_eq!(DataKind(0xDEAD).name(), "unknown");
        assert_eq!(DataKind(0xDEAD).to_string(), "unknown");
    }

    // ── attribute formats ─────────────────────────────────────────────────

    #[test]
    fn unsigned_int_folds_to_unsigned_short() {
        assert_eq!(DataKind::UNSIGNED_INT.attrib_format(), glow::UNSIGNED_SHORT);
    }

    #[test]
    fn vectors_matrices_and_samplers_fold_to_float() {
        for kind in [
            DataKind::INT,
            DataKind::INT_VEC3,
            DataKind::FLOAT_VEC2,
            DataKind::FLOAT_MAT4,
            DataKind::SAMPLER_CUBE,
        ] {
            assert_eq!(kind.attrib_format(), glow::FLOAT, "{kind}");
        }
    }

    #[test]
    fn bools_fold_to_byte() {
        assert_eq!(DataKind::BOOL.attrib_format(), glow::BYTE);
        assert_eq!(DataKind::BOOL_VEC4.attrib_format(), glow::BYTE);
    }

    #[test]
    fn other_formats_pass_through() {
        assert_eq!(DataKind::FLOAT.attrib_format(), glow::FLOAT);
        assert_eq!(DataKind::SHORT.attrib_format(), glow::SHORT);
        assert_eq!(DataKind(0x1234).attrib_format(), 0x1234);
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn matrix_components_are_squared() {
        assert_eq!(DataKind::FLOAT_MAT2.components(), Some(4));
        assert_eq!(DataKind::FLOAT_MAT3.components(), Some(9));
        assert_eq!(DataKind::FLOAT_MAT4.components(), Some(16));
        assert_eq!(DataKind::UNSIGNED_BYTE.components(), None);
    }

    #[test]
    fn glsl_keywords_round_into_kinds() {
        assert_eq!(DataKind::from_glsl_type("vec2"), Some(DataKind::FLOAT_VEC2));
        assert_eq!(DataKind::from_glsl_type("samplerCube"), Some(DataKind::SAMPLER_CUBE));
        assert_eq!(DataKind::from_glsl_type("dvec2"), None);
    }
}

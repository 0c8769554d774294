use bytemuck::Pod;

/// Scalar width assumed for reserved vertex storage.
pub const RESERVED_SCALAR_BYTES: usize = 4;

/// Index width; element buffers always hold unsigned 16-bit indices.
pub const INDEX_BYTES: usize = 2;

/// Contents for a vertex buffer: typed data, or a scalar count to reserve.
#[derive(Debug, Clone, Copy)]
pub enum BufferSource<'a> {
    Data {
        bytes: &'a [u8],
        len: usize,
        bytes_per_scalar: usize,
    },
    Reserve(usize),
}

impl<'a> BufferSource<'a> {
    pub fn from_slice<T: Pod>(data: &'a [T]) -> Self {
        Self::Data {
            bytes: bytemuck::cast_slice(data),
            len: data.len(),
            bytes_per_scalar: size_of::<T>(),
        }
    }

    pub fn reserve(scalars: usize) -> Self {
        Self::Reserve(scalars)
    }

    /// Number of scalars held.
    pub fn len(&self) -> usize {
        match *self {
            Self::Data { len, .. } => len,
            Self::Reserve(n) => n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bytes_per_scalar(&self) -> usize {
        match *self {
            Self::Data { bytes_per_scalar, .. } => bytes_per_scalar,
            Self::Reserve(_) => RESERVED_SCALAR_BYTES,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.len() * self.bytes_per_scalar()
    }
}

impl<'a, T: Pod> From<&'a [T]> for BufferSource<'a> {
    fn from(data: &'a [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<'a, T: Pod, const N: usize> From<&'a [T; N]> for BufferSource<'a> {
    fn from(data: &'a [T; N]) -> Self {
        Self::from_slice(data.as_slice())
    }
}

impl<'a, T: Pod> From<&'a Vec<T>> for BufferSource<'a> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::from_slice(data.as_slice())
    }
}

impl From<usize> for BufferSource<'_> {
    fn from(scalars: usize) -> Self {
        Self::Reserve(scalars)
    }
}

/// Contents for the element buffer.
#[derive(Debug, Clone, Copy)]
pub enum IndexSource<'a> {
    Data(&'a [u16]),
    Reserve(usize),
}

impl IndexSource<'_> {
    pub fn len(&self) -> usize {
        match *self {
            Self::Data(indices) => indices.len(),
            Self::Reserve(n) => n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [u16]> for IndexSource<'a> {
    fn from(indices: &'a [u16]) -> Self {
        Self::Data(indices)
    }
}

impl<'a, const N: usize> From<&'a [u16; N]> for IndexSource<'a> {
    fn from(indices: &'a [u16; N]) -> Self {
        Self::Data(indices.as_slice())
    }
}

impl<'a> From<&'a Vec<u16>> for IndexSource<'a> {
    fn from(indices: &'a Vec<u16>) -> Self {
        Self::Data(indices.as_slice())
    }
}

impl From<usize> for IndexSource<'_> {
    fn from(n: usize) -> Self {
        Self::Reserve(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_slice_reports_its_width() {
        let data = [1.0f32, 2.0, 3.0];
        let src = BufferSource::from(&data);
        assert_eq!(src.len(), 3);
        assert_eq!(src.bytes_per_scalar(), 4);
        assert_eq!(src.byte_len(), 12);

        let shorts: Vec<i16> = vec![1, 2];
        let src = BufferSource::from(&shorts);
        assert_eq!(src.bytes_per_scalar(), 2);
    }

    #[test]
    fn reserve_uses_four_byte_scalars() {
        let src = BufferSource::from(10usize);
        assert!(matches!(src, BufferSource::Reserve(10)));
        assert_eq!(src.byte_len(), 40);
    }

    #[test]
    fn index_sources() {
        assert_eq!(IndexSource::from(&[0u16, 1, 2]).len(), 3);
        assert_eq!(IndexSource::from(6usize).len(), 6);
    }
}

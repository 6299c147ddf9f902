/// Element type tag carried by storages and tensor headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    #[cfg(feature = "half")]
    F16,
    F32,
    F64,
    I8,
    I32,
    I64,
    U8,
    Bool,
}

impl DType {
    /// Size of one element in bytes.
    /// # Example
    /// ```
    /// use tensalloc::DType;
    ///
    /// assert_eq!(DType::F32.size_of(), 4);
    /// assert_eq!(DType::Bool.size_of(), 1);
    /// ```
    #[inline]
    pub const fn size_of(self) -> usize {
        match self {
            #[cfg(feature = "half")]
            DType::F16 => 2,
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
            DType::I8 | DType::U8 | DType::Bool => 1,
        }
    }
}

/// Maps a Rust element type to its [`DType`] tag.
pub trait AsDType: 'static {
    fn dtype() -> DType;
}

impl AsDType for f32 {
    #[inline]
    fn dtype() -> DType {
        DType::F32
    }
}

impl AsDType for f64 {
    #[inline]
    fn dtype() -> DType {
        DType::F64
    }
}

impl AsDType for i8 {
    #[inline]
    fn dtype() -> DType {
        DType::I8
    }
}

impl AsDType for i32 {
    #[inline]
    fn dtype() -> DType {
        DType::I32
    }
}

impl AsDType for i64 {
    #[inline]
    fn dtype() -> DType {
        DType::I64
    }
}

impl AsDType for u8 {
    #[inline]
    fn dtype() -> DType {
        DType::U8
    }
}

impl AsDType for bool {
    #[inline]
    fn dtype() -> DType {
        DType::Bool
    }
}

#[cfg(feature = "half")]
impl AsDType for half::f16 {
    #[inline]
    fn dtype() -> DType {
        DType::F16
    }
}

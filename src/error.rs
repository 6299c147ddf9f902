pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = core::result::Result<T, Error>;

/// Downcast helper for the boxed [`Error`] alias.
pub trait ErrorKind {
    fn kind<E: std::error::Error + PartialEq + 'static>(&self) -> Option<&E>;
}

impl ErrorKind for Error {
    fn kind<E: std::error::Error + PartialEq + 'static>(&self) -> Option<&E> {
        self.downcast_ref::<E>()
    }
}

impl std::error::Error for DeviceError {}

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DeviceError {
    NoDeviceAllocator,
    StorageTooSmall,
}

impl DeviceError {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceError::NoDeviceAllocator => {
                "No allocator is registered for the selected device."
            }
            DeviceError::StorageTooSmall => {
                "The storage holds fewer elements than the requested shape."
            }
        }
    }
}

impl core::fmt::Debug for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

//! Error types for mapped array operations

/// Errors that can occur while opening, accessing, or closing a mapped array
/// file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemArrayError {
    /// The backing file could not be opened or created
    OpenFailed,
    /// The size of the backing file could not be determined
    StatFailed,
    /// The backing file could not be resized to the requested length
    TruncateFailed,
    /// The virtual memory mapping could not be established
    MapFailed,
    /// The access-pattern hint was rejected by the OS
    AdviseFailed,
    /// Dirty pages could not be flushed to the backing file
    FlushFailed,
    /// The instance already holds an open mapping
    AlreadyOpen,
    /// Requested capacity does not fit in the addressable byte range
    SizeOverflow,
    /// Byte length or base address is not compatible with the element type
    ElementAlignment,
}

impl core::fmt::Display for MemArrayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MemArrayError::OpenFailed => "Cannot open backing file",
            MemArrayError::StatFailed => "Cannot determine backing file size",
            MemArrayError::TruncateFailed => "Cannot resize backing file",
            MemArrayError::MapFailed => "Cannot establish memory mapping",
            MemArrayError::AdviseFailed => "Access-pattern hint rejected",
            MemArrayError::FlushFailed => "Cannot flush mapped pages",
            MemArrayError::AlreadyOpen => "Mapping already open",
            MemArrayError::SizeOverflow => "Capacity overflows byte range",
            MemArrayError::ElementAlignment => "Length or address not element-aligned",
        };
        write!(f, "{msg}")
    }
}

/// Result type for mapped array operations
pub type Result<T> = core::result::Result<T, MemArrayError>;

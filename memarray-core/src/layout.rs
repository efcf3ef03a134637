//! Layout arithmetic for mapped array files
//!
//! Pure mathematical functions over byte lengths and element counts, with
//! no I/O dependencies.

use crate::MemArrayError;

/// Number of whole elements of `T` that fit in `byte_len` bytes
///
/// Truncating division: when `byte_len` is not a multiple of the element
/// size, the trailing partial element is unreachable. Callers that want to
/// reject such lengths use [`validate_exact_len`] instead.
pub const fn element_count<T>(byte_len: usize) -> usize {
    match core::mem::size_of::<T>() {
        0 => 0,
        size => byte_len / size,
    }
}

/// Byte length required to hold exactly `count` elements of `T`
///
/// Guards the multiplication against overflow and keeps the result inside
/// the range addressable by a single slice.
pub const fn byte_len_for<T>(count: usize) -> Result<usize, MemArrayError> {
    let byte_len = match count.checked_mul(core::mem::size_of::<T>()) {
        Some(byte_len) => byte_len,
        None => return Err(MemArrayError::SizeOverflow),
    };
    if byte_len > isize::MAX as usize {
        return Err(MemArrayError::SizeOverflow);
    }
    Ok(byte_len)
}

/// Validate alignment of a base address for the element type
///
/// Pure mathematical check with no memory access. Mapped regions start on a
/// page boundary, so this can only fail for types with alignment larger
/// than a page.
pub fn validate_alignment<T>(ptr: *const u8) -> Result<(), MemArrayError> {
    let alignment = core::mem::align_of::<T>();
    let addr = ptr as usize;

    if addr % alignment != 0 {
        return Err(MemArrayError::ElementAlignment);
    }

    Ok(())
}

/// Element count for a byte length that must be an exact multiple of the
/// element size
///
/// The strict counterpart of [`element_count`]: a trailing partial element
/// is rejected rather than silently truncated.
pub const fn validate_exact_len<T>(byte_len: usize) -> Result<usize, MemArrayError> {
    let size = core::mem::size_of::<T>();
    if size == 0 {
        return Ok(0);
    }
    if byte_len % size != 0 {
        return Err(MemArrayError::ElementAlignment);
    }
    Ok(byte_len / size)
}

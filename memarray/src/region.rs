//! Shared descriptor/mapping scaffolding for sources and sinks

use std::fs::File;

use memarray_core::{element_count, Element, MemArrayError, Result};
use memmap2::{Mmap, MmapMut, MmapOptions};

/// Map the whole byte range of `file` read-only with shared visibility
///
/// A zero-length range yields no mapping: empty mappings are not
/// representable at the OS level, and an absent mapping behaves as an
/// empty slice everywhere.
pub(crate) fn map_readonly(file: &File, byte_len: u64) -> Result<Option<Mmap>> {
    let byte_len = checked_len(byte_len)?;
    if byte_len == 0 {
        return Ok(None);
    }
    // SAFETY: shared file-backed mapping over a descriptor the caller owns
    // for at least the lifetime of the returned map.
    let map = unsafe { MmapOptions::new().len(byte_len).map(file) }
        .map_err(|_| MemArrayError::MapFailed)?;
    Ok(Some(map))
}

/// Map the whole byte range of `file` read-write with shared visibility
pub(crate) fn map_readwrite(file: &File, byte_len: u64) -> Result<Option<MmapMut>> {
    let byte_len = checked_len(byte_len)?;
    if byte_len == 0 {
        return Ok(None);
    }
    // SAFETY: as in `map_readonly`; the descriptor was opened read-write.
    let map = unsafe { MmapOptions::new().len(byte_len).map_mut(file) }
        .map_err(|_| MemArrayError::MapFailed)?;
    Ok(Some(map))
}

fn checked_len(byte_len: u64) -> Result<usize> {
    usize::try_from(byte_len).map_err(|_| MemArrayError::SizeOverflow)
}

/// Reinterpret mapped bytes as a slice of whole elements
pub(crate) fn typed_slice<T: Element>(bytes: &[u8]) -> &[T] {
    let len = element_count::<T>(bytes.len());
    if len == 0 {
        return &[];
    }
    // SAFETY: base alignment is validated when the mapping is established,
    // `len` whole elements lie inside `bytes`, and T: Pod accepts any bit
    // pattern.
    unsafe { core::slice::from_raw_parts(bytes.as_ptr().cast::<T>(), len) }
}

/// Mutable counterpart of [`typed_slice`]
pub(crate) fn typed_slice_mut<T: Element>(bytes: &mut [u8]) -> &mut [T] {
    let len = element_count::<T>(bytes.len());
    if len == 0 {
        return &mut [];
    }
    // SAFETY: as in `typed_slice`, with exclusive access inherited from the
    // mutable borrow of `bytes`.
    unsafe { core::slice::from_raw_parts_mut(bytes.as_mut_ptr().cast::<T>(), len) }
}

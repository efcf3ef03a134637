//! Element type constraints for mapped array files
//!
//! This module defines the trait that constrains what types can be stored
//! as elements of a mapped array file.

/// Trait for types that can live directly inside a mapped file region
///
/// Elements are stored byte-for-byte at their native size and alignment,
/// with no header and no endianness conversion. A type qualifies when it is:
/// - `bytemuck::Pod`: plain old data; any bit pattern is a valid value,
///   no padding bytes, no drop glue
/// - `PartialEq`: comparable for equality
///
/// All primitive integer and float types qualify. User-defined `#[repr(C)]`
/// structs qualify through `#[derive(bytemuck::Pod, bytemuck::Zeroable)]`.
pub trait Element: bytemuck::Pod + PartialEq {
    /// Size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }
}

impl<T: bytemuck::Pod + PartialEq> Element for T {}

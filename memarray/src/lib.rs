//! Memarray - Typed Array Storage in Memory-Mapped Files
//!
//! This library exposes a file's bytes as an array of fixed-size elements by
//! mapping the file directly into the process's address space, avoiding the
//! buffered read/write path entirely.
//!
//! ## Architecture
//!
//! Memarray follows a clean definitions/implementation separation:
//!
//! - **memarray-core**: Element constraints, error taxonomy, and layout
//!   arithmetic (no I/O)
//! - **memarray**: Concrete mapped views and sinks built on `memmap2`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memarray::{AccessPattern, FileSink, FileSource};
//!
//! fn example() -> memarray::Result<()> {
//!     // Create a file holding exactly four u64 values
//!     let mut sink = FileSink::<u64>::open("values.bin", 4)?;
//!     sink.as_mut_slice().copy_from_slice(&[1, 2, 3, 5]);
//!     sink.close()?;
//!
//!     // Map it back read-only
//!     let source = FileSource::<u64>::open("values.bin", AccessPattern::Sequential)?;
//!     assert_eq!(source.as_slice(), &[1, 2, 3, 5]);
//!     Ok(())
//! }
//! ```
//!
//! ## On-disk format
//!
//! There is none: a mapped array file is a raw, untagged, fixed-stride run
//! of element values with no header, no length prefix, and no endianness
//! conversion. The element count of a [`FileSource`] is determined entirely
//! by the file size; the element count of a [`FileSink`] is fixed by the
//! caller at open time.

// Re-export core definitions
pub use memarray_core::{
    // Element constraint
    Element,
    // Error handling
    MemArrayError, Result,
    // Layout arithmetic
    byte_len_for, element_count, validate_alignment, validate_exact_len,
};

// Implementation modules
pub mod advice;
mod region;
pub mod sink;
pub mod source;

// Public exports
pub use advice::AccessPattern;
pub use sink::FileSink;
pub use source::FileSource;

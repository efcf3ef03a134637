//! Write-capable mapped sink over a created or truncated file

use std::fs::{File, OpenOptions};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::path::{Path, PathBuf};

use memarray_core::{
    byte_len_for, element_count, validate_alignment, Element, MemArrayError, Result,
};
use memmap2::MmapMut;

use crate::region;

/// Mutable, element-typed mapped region over a file sized to an exact
/// element capacity
///
/// Opening a sink **creates or truncates** the backing file: any prior
/// content at the path is destroyed and the file is resized to exactly
/// `capacity * size_of::<T>()` bytes before being mapped read-write. Use
/// [`create_new`](Self::create_new) when clobbering an existing file must
/// be an error.
///
/// The mapping is shared: element writes are immediately visible to every
/// other mapper of the same file region, with no ordering or atomicity
/// guarantee beyond what the hardware provides for element-sized stores.
/// Dirty pages reach the backing store when the OS writes them back, when
/// [`flush`](Self::flush) is called, or on [`close`](Self::close), which
/// flushes synchronously before releasing the mapping.
pub struct FileSink<T: Element> {
    inner: Option<Inner>,
    _element: PhantomData<T>,
}

struct Inner {
    /// Holds the descriptor for the lifetime of the mapping
    _file: File,
    /// `None` for a zero-capacity sink
    map: Option<MmapMut>,
    path: PathBuf,
}

impl<T: Element> FileSink<T> {
    /// New instance in the closed state
    pub fn new() -> Self {
        Self {
            inner: None,
            _element: PhantomData,
        }
    }

    /// Create or truncate the file at `path` to hold exactly `capacity`
    /// elements and map it read-write
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        let mut sink = Self::new();
        sink.reopen(path, capacity)?;
        Ok(sink)
    }

    /// Like [`open`](Self::open), but fails with
    /// [`MemArrayError::OpenFailed`] if `path` already exists, leaving the
    /// existing file untouched
    pub fn create_new<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|_| MemArrayError::OpenFailed)?;

        let mut sink = Self::new();
        sink.inner = Some(Self::size_and_map(file, path, capacity)?);
        Ok(sink)
    }

    /// Open a sink into this instance, creating or truncating `path`
    ///
    /// Fails with [`MemArrayError::AlreadyOpen`] while a mapping is held;
    /// call [`close`](Self::close) first. Any other failure releases every
    /// resource acquired along the way and leaves the instance closed. A
    /// failed resize is surfaced as [`MemArrayError::TruncateFailed`],
    /// never papered over with a shorter mapping.
    pub fn reopen<P: AsRef<Path>>(&mut self, path: P, capacity: usize) -> Result<()> {
        if self.inner.is_some() {
            return Err(MemArrayError::AlreadyOpen);
        }

        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|_| MemArrayError::OpenFailed)?;

        self.inner = Some(Self::size_and_map(file, path, capacity)?);
        Ok(())
    }

    fn size_and_map(file: File, path: &Path, capacity: usize) -> Result<Inner> {
        let byte_len = byte_len_for::<T>(capacity)?;
        file.set_len(byte_len as u64)
            .map_err(|_| MemArrayError::TruncateFailed)?;

        let map = region::map_readwrite(&file, byte_len as u64)?;
        if let Some(map) = &map {
            validate_alignment::<T>(map.as_ptr())?;
        }

        Ok(Inner {
            _file: file,
            map,
            path: path.to_path_buf(),
        })
    }

    /// Whether the instance currently holds a mapping
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Flush dirty pages, then release the mapping and the descriptor
    ///
    /// Idempotent: closing a closed instance is a no-op. On
    /// [`MemArrayError::FlushFailed`] the instance still transitions to the
    /// closed state, but persistence of the final writes is not guaranteed.
    /// After a successful close every write has reached the backing file.
    pub fn close(&mut self) -> Result<()> {
        if let Some(inner) = self.inner.take() {
            if let Some(map) = &inner.map {
                map.flush().map_err(|_| MemArrayError::FlushFailed)?;
            }
        }
        Ok(())
    }

    /// Synchronously flush dirty pages to the backing file
    ///
    /// No-op while closed or over a zero-capacity mapping.
    pub fn flush(&self) -> Result<()> {
        match &self.inner {
            Some(Inner { map: Some(map), .. }) => {
                map.flush().map_err(|_| MemArrayError::FlushFailed)
            }
            _ => Ok(()),
        }
    }

    /// Total size of the mapping in bytes; zero when closed
    pub fn byte_len(&self) -> usize {
        self.mapped_bytes().len()
    }

    /// Number of elements in the mapping; zero when closed
    pub fn len(&self) -> usize {
        element_count::<T>(self.byte_len())
    }

    /// Whether the mapping holds no element
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path this sink was opened over, while open
    pub fn path(&self) -> Option<&Path> {
        self.inner.as_ref().map(|inner| inner.path.as_path())
    }

    /// The mapped contents as a slice of elements; empty when closed
    pub fn as_slice(&self) -> &[T] {
        region::typed_slice(self.mapped_bytes())
    }

    /// The mapped contents as a mutable slice of elements; empty when
    /// closed
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.inner {
            Some(Inner { map: Some(map), .. }) => region::typed_slice_mut(&mut map[..]),
            _ => &mut [],
        }
    }

    /// Element at `index`, or `None` past the end or while closed
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, or `None` past the end or while closed
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Iterator over the mapped elements in index order
    ///
    /// Restartable: every call begins a fresh traversal at element zero.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutable counterpart of [`iter`](Self::iter)
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    fn mapped_bytes(&self) -> &[u8] {
        match &self.inner {
            Some(Inner { map: Some(map), .. }) => &map[..],
            _ => &[],
        }
    }
}

impl<T: Element> Default for FileSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Index<usize> for FileSink<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Element> IndexMut<usize> for FileSink<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T: Element> IntoIterator for &'a FileSink<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Element> IntoIterator for &'a mut FileSink<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Element> Drop for FileSink<T> {
    fn drop(&mut self) {
        // Last-chance flush; errors have no reporting channel here.
        let _ = self.flush();
    }
}

//! Read-only mapped view over an existing file

use std::fs::File;
use std::marker::PhantomData;
use std::ops::Index;
use std::path::{Path, PathBuf};

use memarray_core::{element_count, validate_alignment, Element, MemArrayError, Result};
use memmap2::Mmap;

use crate::advice::{self, AccessPattern};
use crate::region;

/// Read-only, element-typed view of an existing file's contents, backed by
/// a shared memory mapping
///
/// The whole file is mapped at open time and exposed as a `&[T]`. Element
/// values are read in place from the page cache; no copy into process
/// buffers happens. Because the mapping is shared, writes made by other
/// mappers of the same file become visible through this view without any
/// ordering guarantee.
///
/// The element count is the file size divided by the element size; a
/// trailing partial element is unreachable. Use
/// [`validate_exact_len`](memarray_core::validate_exact_len) on
/// [`byte_len`](Self::byte_len) to reject misaligned files instead.
///
/// An instance is either closed or open. All accessors behave as an empty
/// slice while closed; borrowed slices and iterators keep the instance
/// borrowed, so the mapping cannot be closed out from under them.
pub struct FileSource<T: Element> {
    inner: Option<Inner>,
    _element: PhantomData<T>,
}

struct Inner {
    /// Holds the descriptor for the lifetime of the mapping
    _file: File,
    /// `None` for a zero-length file
    map: Option<Mmap>,
    path: PathBuf,
}

impl<T: Element> FileSource<T> {
    /// New instance in the closed state
    pub fn new() -> Self {
        Self {
            inner: None,
            _element: PhantomData,
        }
    }

    /// Open `path` read-only and map its entire contents
    pub fn open<P: AsRef<Path>>(path: P, pattern: AccessPattern) -> Result<Self> {
        let mut source = Self::new();
        source.reopen(path, pattern)?;
        Ok(source)
    }

    /// Map a file into this instance
    ///
    /// Fails with [`MemArrayError::AlreadyOpen`] while a mapping is held;
    /// call [`close`](Self::close) first. Any other failure releases every
    /// resource acquired along the way and leaves the instance closed,
    /// including a rejected access-pattern hint.
    pub fn reopen<P: AsRef<Path>>(&mut self, path: P, pattern: AccessPattern) -> Result<()> {
        if self.inner.is_some() {
            return Err(MemArrayError::AlreadyOpen);
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|_| MemArrayError::OpenFailed)?;
        let byte_len = file
            .metadata()
            .map_err(|_| MemArrayError::StatFailed)?
            .len();

        let map = region::map_readonly(&file, byte_len)?;
        if let Some(map) = &map {
            validate_alignment::<T>(map.as_ptr())?;
            advice::apply(map, pattern)?;
        }

        self.inner = Some(Inner {
            _file: file,
            map,
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Whether the instance currently holds a mapping
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Release the mapping and the underlying descriptor
    ///
    /// Idempotent: closing a closed instance is a no-op. A closed instance
    /// may be reopened with [`reopen`](Self::reopen).
    pub fn close(&mut self) -> Result<()> {
        // Unmap and descriptor release happen on drop; neither has an
        // observable failure path at this layer.
        self.inner = None;
        Ok(())
    }

    /// Total size of the mapping in bytes; zero when closed
    pub fn byte_len(&self) -> usize {
        self.mapped_bytes().len()
    }

    /// Number of whole elements in the mapping; zero when closed
    pub fn len(&self) -> usize {
        element_count::<T>(self.byte_len())
    }

    /// Whether the mapping holds no whole element
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path this view was opened from, while open
    pub fn path(&self) -> Option<&Path> {
        self.inner.as_ref().map(|inner| inner.path.as_path())
    }

    /// The mapped contents as a slice of whole elements; empty when closed
    pub fn as_slice(&self) -> &[T] {
        region::typed_slice(self.mapped_bytes())
    }

    /// Element at `index`, or `None` past the end or while closed
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Iterator over the mapped elements in index order
    ///
    /// Restartable: every call begins a fresh traversal at element zero.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    fn mapped_bytes(&self) -> &[u8] {
        match &self.inner {
            Some(Inner { map: Some(map), .. }) => &map[..],
            _ => &[],
        }
    }
}

impl<T: Element> Default for FileSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Index<usize> for FileSource<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T: Element> IntoIterator for &'a FileSource<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_u32s(path: &Path, values: &[u32]) {
        let mut bytes = Vec::with_capacity(values.len() * 4);
        for value in values {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn open_maps_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.bin");
        write_u32s(&path, &[7, 11, 13]);

        let source = FileSource::<u32>::open(&path, AccessPattern::Normal).unwrap();
        assert!(source.is_open());
        assert_eq!(source.byte_len(), 12);
        assert_eq!(source.len(), 3);
        assert_eq!(source.as_slice(), &[7, 11, 13]);
        assert_eq!(source[1], 11);
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn open_missing_file_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let mut source = FileSource::<u32>::new();
        assert_eq!(
            source.reopen(&path, AccessPattern::Normal),
            Err(MemArrayError::OpenFailed)
        );
        assert!(!source.is_open());
        assert_eq!(source.len(), 0);
    }

    #[test]
    fn empty_file_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        fs::write(&path, []).unwrap();

        let source = FileSource::<u64>::open(&path, AccessPattern::Sequential).unwrap();
        assert!(source.is_open());
        assert_eq!(source.byte_len(), 0);
        assert!(source.is_empty());
        assert_eq!(source.iter().count(), 0);
    }

    #[test]
    fn trailing_partial_element_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.bin");
        fs::write(&path, [0u8; 10]).unwrap();

        let source = FileSource::<u32>::open(&path, AccessPattern::Normal).unwrap();
        assert_eq!(source.byte_len(), 10);
        assert_eq!(source.len(), 2);
        assert_eq!(source.get(2), None);
        assert_eq!(
            memarray_core::validate_exact_len::<u32>(source.byte_len()),
            Err(MemArrayError::ElementAlignment)
        );
    }

    #[test]
    fn iteration_is_complete_and_restartable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.bin");
        let values: Vec<u32> = (0..64).collect();
        write_u32s(&path, &values);

        let source = FileSource::<u32>::open(&path, AccessPattern::Sequential).unwrap();
        let first: Vec<u32> = source.iter().copied().collect();
        let second: Vec<u32> = (&source).into_iter().copied().collect();
        assert_eq!(first, values);
        assert_eq!(second, values);
    }

    #[test]
    fn close_is_idempotent_and_allows_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.bin");
        write_u32s(&path, &[1, 2, 3, 4]);

        let mut source = FileSource::<u32>::open(&path, AccessPattern::Random).unwrap();
        assert_eq!(source.close(), Ok(()));
        assert_eq!(source.close(), Ok(()));
        assert!(!source.is_open());
        assert_eq!(source.byte_len(), 0);
        assert_eq!(source.as_slice(), &[] as &[u32]);

        source.reopen(&path, AccessPattern::Normal).unwrap();
        assert_eq!(source.len(), 4);
    }

    #[test]
    fn reopen_while_open_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.bin");
        write_u32s(&path, &[5, 6]);

        let mut source = FileSource::<u32>::open(&path, AccessPattern::Normal).unwrap();
        assert_eq!(
            source.reopen(&path, AccessPattern::Normal),
            Err(MemArrayError::AlreadyOpen)
        );
        // The original mapping is undisturbed
        assert_eq!(source.as_slice(), &[5, 6]);
    }

    #[test]
    fn access_hints_do_not_affect_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.bin");
        write_u32s(&path, &[9, 8, 7]);

        for pattern in [
            AccessPattern::Normal,
            AccessPattern::Random,
            AccessPattern::Sequential,
        ] {
            let source = FileSource::<u32>::open(&path, pattern).unwrap();
            assert_eq!(source.as_slice(), &[9, 8, 7]);
        }
    }
}

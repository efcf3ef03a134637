//! Access-pattern hints for mapped files

#[cfg(unix)]
use memarray_core::MemArrayError;
use memarray_core::Result;
use memmap2::Mmap;

/// Expected access pattern for a mapped file, forwarded to the OS page
/// cache as a readahead/eviction hint.
///
/// Hints affect performance only, never correctness or write visibility.
/// On platforms without an advisory mechanism every value is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessPattern {
    /// No particular expectation
    #[default]
    Normal,
    /// Scattered point lookups; favor low readahead
    Random,
    /// Front-to-back scans; favor aggressive readahead and early eviction
    /// of consumed pages
    Sequential,
}

/// Apply the hint to an established mapping
#[cfg(unix)]
pub(crate) fn apply(map: &Mmap, pattern: AccessPattern) -> Result<()> {
    let advice = match pattern {
        AccessPattern::Normal => memmap2::Advice::Normal,
        AccessPattern::Random => memmap2::Advice::Random,
        AccessPattern::Sequential => memmap2::Advice::Sequential,
    };
    map.advise(advice).map_err(|_| MemArrayError::AdviseFailed)
}

#[cfg(not(unix))]
pub(crate) fn apply(_map: &Mmap, _pattern: AccessPattern) -> Result<()> {
    Ok(())
}

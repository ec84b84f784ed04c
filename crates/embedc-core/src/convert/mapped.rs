//! Read-only memory-mapped input.
//!
//! Mapping a zero-length file is not portable, so an empty input is
//! represented without a mapping at all; both cases expose the contents
//! through [`MappedInput::as_bytes`]. The mapping and the underlying file
//! handle are released when the value is dropped, on every exit path.

use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};

/// A whole input file mapped read-only into memory
#[derive(Debug)]
pub(crate) enum MappedInput {
    /// Zero-length input; a valid empty view
    Empty,
    /// Non-empty input backed by a live mapping
    Mapped(Mmap),
}

impl MappedInput {
    /// Opens `path` for shared read and maps its full length.
    ///
    /// The input must not be truncated by another process while the
    /// mapping is alive.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::file_open(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| Error::size_query(path, e))?
            .len();

        if size > usize::MAX as u64 {
            return Err(Error::file_too_large(path, size));
        }
        if size == 0 {
            return Ok(Self::Empty);
        }

        // SAFETY: the file is opened read-only and the map is never given
        // out mutably; see the truncation requirement above.
        #[allow(unsafe_code)]
        let map = unsafe { Mmap::map(&file) }.map_err(|e| Error::mapping(path, e))?;
        Ok(Self::Mapped(map))
    }

    /// Returns the mapped contents
    pub(crate) fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Mapped(map) => map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_maps_full_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"mapped contents").unwrap();
        file.flush().unwrap();

        let mapped = MappedInput::open(file.path()).unwrap();
        assert_eq!(mapped.as_bytes(), b"mapped contents");
    }

    #[test]
    fn test_empty_file_yields_empty_view() {
        let file = NamedTempFile::new().unwrap();
        let mapped = MappedInput::open(file.path()).unwrap();
        assert!(matches!(mapped, MappedInput::Empty));
        assert!(mapped.as_bytes().is_empty());
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = MappedInput::open(Path::new("/nonexistent/input.bin")).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
    }
}

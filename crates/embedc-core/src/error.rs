//! Error types for the embedc-core library.
//!
//! This module provides comprehensive error handling using the `thiserror` crate,
//! with detailed error variants for different failure modes.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for embedc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all embedc operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to open input file
    #[error("failed to open file '{path}': {source}")]
    FileOpen {
        /// Path to the file that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to query input file size
    #[error("failed to query size of '{path}': {source}")]
    SizeQuery {
        /// Path to the file whose size could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input file size exceeds the addressable range of this process
    #[error("file '{path}' is too large for this process ({size} bytes)")]
    FileTooLarge {
        /// Path to the oversized file
        path: PathBuf,
        /// Reported file size in bytes
        size: u64,
    },

    /// Failed to memory-map the input file
    #[error("failed to map file '{path}': {source}")]
    Mapping {
        /// Path to the file that failed to map
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output file
    #[error("failed to create output file '{path}': {source}")]
    OutputCreate {
        /// Path to the file that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to the output file
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A write transferred zero bytes
    #[error("failed to write output file '{path}': 0 bytes written")]
    WriteStalled {
        /// Path to the stalled output file
        path: PathBuf,
    },

    /// A streaming job was submitted without a destination path
    #[error("streaming mode requires an output path")]
    MissingOutputPath,
}

impl Error {
    /// Creates a new file open error
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Creates a new size query error
    pub fn size_query(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SizeQuery {
            path: path.into(),
            source,
        }
    }

    /// Creates a new oversized file error
    pub fn file_too_large(path: impl Into<PathBuf>, size: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            size,
        }
    }

    /// Creates a new mapping error
    pub fn mapping(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Mapping {
            path: path.into(),
            source,
        }
    }

    /// Creates a new output creation error
    pub fn output_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new output write error
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new stalled write error
    pub fn write_stalled(path: impl Into<PathBuf>) -> Self {
        Self::WriteStalled { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::file_too_large("/tmp/huge.bin", u64::MAX);
        assert!(err.to_string().contains("too large"));
        assert!(err.to_string().contains("/tmp/huge.bin"));
    }

    #[test]
    fn test_write_stalled_display() {
        let err = Error::write_stalled("/tmp/out.h");
        assert!(err.to_string().contains("0 bytes written"));
    }
}

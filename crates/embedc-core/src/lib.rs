//! # embedc-core
//!
//! A library for converting arbitrary binary files into C/C++ array source
//! literals: a declaration of a fixed-width unsigned integer array whose
//! bytes reproduce the file's contents, plus a size constant.
//!
//! This crate provides the core functionality for:
//! - Resolving element types and declaration styles to token metadata
//! - Emitting the line-wrapped hexadecimal literal text
//! - Running conversions in memory or streamed to disk with progress
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`format`]: Element type and declaration style resolution
//! - [`emit`]: Array literal emission
//! - [`convert`]: In-memory and streaming conversion paths
//! - [`job`]: Background execution and event delivery
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use embedc_core::{convert_to_string, ElementType, ArrayStyle, Format};
//!
//! let format = Format::new(ElementType::Uint8, ArrayStyle::ConstexprArray);
//! let text = convert_to_string("./firmware.bin", format)?;
//! println!("{text}");
//! # Ok::<(), embedc_core::Error>(())
//! ```
//!
//! ## Choosing a path
//!
//! [`convert_to_string`] holds the whole generated text in memory;
//! [`convert_to_file`] streams it to a destination with bounded memory and
//! periodic progress. [`SOFT_LIMIT`] is the input size above which callers
//! are advised to stream. [`job::submit`] wraps either path in a background
//! thread with a typed notification channel.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod convert;
pub mod emit;
pub mod error;
pub mod format;
pub mod job;

// Re-export primary types for convenience
pub use convert::{convert_to_file, convert_to_string, file_size, SOFT_LIMIT};
pub use emit::{encode, ArrayLayout, ArrayWriter, ARRAY_NAME};
pub use error::{Error, Result};
pub use format::{ArrayStyle, ElementType, Format, FormatSpec, StyleSpec};
pub use job::{submit, Completion, Event, Job, Mode};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
